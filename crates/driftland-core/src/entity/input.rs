//! Player input intent and the double-tap flight toggle

/// Movement intent for one tick, independent of keys or devices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub jump: bool,
    pub crouch: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// -1 for left, +1 for right, 0 when both or neither are held
    pub fn horizontal_axis(&self) -> f32 {
        axis(self.left, self.right)
    }

    /// -1 for up, +1 for down (screen space, `y` grows downward)
    pub fn vertical_axis(&self) -> f32 {
        axis(self.up, self.down)
    }
}

fn axis(negative: bool, positive: bool) -> f32 {
    let mut value = 0.0;
    if negative {
        value -= 1.0;
    }
    if positive {
        value += 1.0;
    }
    value
}

/// Detects two jump presses within a short window.
///
/// Timestamps come from the caller's clock in seconds; nothing is scheduled.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightToggle {
    window: f64,
    last_press: Option<f64>,
}

impl FlightToggle {
    pub const DEFAULT_WINDOW: f64 = 0.3;

    pub fn new(window: f64) -> Self {
        Self {
            window,
            last_press: None,
        }
    }

    pub fn window(&self) -> f64 {
        self.window
    }

    /// Record a jump press at `now`.
    ///
    /// Returns true when this press completes a double tap; the pair is then
    /// consumed so a third press starts a new sequence.
    pub fn register_press(&mut self, now: f64) -> bool {
        match self.last_press {
            Some(previous) if now - previous < self.window => {
                self.last_press = None;
                true
            }
            _ => {
                self.last_press = Some(now);
                false
            }
        }
    }
}

impl Default for FlightToggle {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}
