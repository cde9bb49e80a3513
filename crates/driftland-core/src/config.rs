//! Gameplay tuning values
//!
//! All sections carry compiled defaults so a partial config file (or none at
//! all) still yields a playable setup. Loading from disk and the environment
//! is the binary's job.

use serde::{Deserialize, Serialize};

/// Root configuration consumed by [`crate::GameSession`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub player: PlayerConfig,

    #[serde(default)]
    pub world: WorldConfig,
}

/// Player movement and building settings (distances in pixels)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Edge length of one tile in pixels
    pub tile_size: f32,
    /// Downward acceleration in pixels/sec^2 (y grows downward)
    pub gravity: f32,
    /// Walking speed in pixels/sec
    pub move_speed: f32,
    /// Speed on both axes while flying
    pub flight_speed: f32,
    /// Initial upward launch speed of a jump (roughly four tiles)
    pub jump_speed: f32,
    /// Terminal fall velocity
    pub max_fall_speed: f32,
    /// Walking speed multiplier while crouched
    pub crouch_speed_factor: f32,
    /// Hitbox width as a fraction of a tile
    pub width_tiles: f32,
    /// Standing hitbox height as a fraction of a tile
    pub height_tiles: f32,
    /// Crouching height relative to standing height
    pub crouch_ratio: f32,
    /// Maximum gap between two jump presses that toggles flight (seconds)
    pub double_tap_window: f64,
    /// Chebyshev distance (tiles) within which blocks may be edited
    pub build_radius: i32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tile_size: 24.0,
            gravity: 1200.0,
            move_speed: 180.0,
            flight_speed: 200.0,
            jump_speed: 480.0,
            max_fall_speed: 900.0,
            crouch_speed_factor: 0.5,
            width_tiles: 0.6,
            height_tiles: 0.9,
            crouch_ratio: 0.6,
            double_tap_window: 0.3,
            build_radius: 2,
        }
    }
}

/// World creation settings (distances in tiles)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Width of the opening view; three times this many columns are preloaded
    pub width: i32,
    /// Initial vertical extent; also places the horizon at `height / 2 + 4`
    pub height: i32,
    /// Hue in [0, 1) used for the starting palette
    pub base_hue: f32,
    /// Column the player spawns in
    pub spawn_column: i32,
    /// Row (fractional) of the spawn hitbox top before surface placement
    pub spawn_row: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 40,
            height: 30,
            base_hue: crate::world::block::DEFAULT_HUE,
            spawn_column: 3,
            spawn_row: 10.0,
        }
    }
}
