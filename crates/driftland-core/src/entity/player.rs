use glam::{IVec2, Vec2};

use crate::config::PlayerConfig;
use crate::world::collision::tile_span;

/// Physical state of the player, independent of any front end.
///
/// Pixel space with `y` growing downward; `position` is the top-left corner
/// of the collision box. `height` is always `standing_height` or
/// `crouching_height`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub width: f32,
    pub height: f32,
    pub standing_height: f32,
    pub crouching_height: f32,
    pub on_ground: bool,
    pub crouching: bool,
    pub flight_mode: bool,
}

impl PlayerState {
    /// Crouching height relative to standing height when none is given
    pub const CROUCH_RATIO: f32 = 0.6;

    /// Create a standing, airborne player whose standing height is `height`
    pub fn new(position: Vec2, width: f32, height: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            width,
            height,
            standing_height: height,
            crouching_height: height * Self::CROUCH_RATIO,
            on_ground: false,
            crouching: false,
            flight_mode: false,
        }
    }

    /// Player sized from config, `position` in pixels
    pub fn from_config(position: Vec2, config: &PlayerConfig) -> Self {
        let height = config.tile_size * config.height_tiles;
        Self::new(position, config.tile_size * config.width_tiles, height)
            .with_crouching_height(height * config.crouch_ratio)
    }

    pub fn with_crouching_height(mut self, crouching_height: f32) -> Self {
        self.crouching_height = crouching_height;
        self
    }

    /// `(x, y, width, height)` of the collision box
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        (self.position.x, self.position.y, self.width, self.height)
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.height
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Tile containing the centre of the collision box
    pub fn center_tile(&self, tile_size: f32) -> IVec2 {
        (self.center() / tile_size).floor().as_ivec2()
    }

    /// First and last tile column covered by the collision box
    pub fn column_span(&self, tile_size: f32) -> (i32, i32) {
        tile_span(self.position.x, self.width, tile_size)
    }

    /// First and last tile row covered by the collision box
    pub fn row_span(&self, tile_size: f32) -> (i32, i32) {
        tile_span(self.position.y, self.height, tile_size)
    }

    /// Flip flight mode and return the new state.
    ///
    /// Entering flight cancels any vertical motion; leaving it keeps the
    /// current vertical velocity.
    pub fn toggle_flight(&mut self) -> bool {
        self.flight_mode = !self.flight_mode;
        if self.flight_mode {
            self.velocity.y = 0.0;
        }
        log::debug!("Flight mode {}", if self.flight_mode { "on" } else { "off" });
        self.flight_mode
    }
}
