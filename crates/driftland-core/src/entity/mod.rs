pub mod building;
pub mod input;
pub mod inventory;
pub mod player;

pub use building::{build_target, player_intersects_tile, within_build_radius, BuildOutcome};
pub use input::{FlightToggle, InputState};
pub use inventory::Inventory;
pub use player::PlayerState;
