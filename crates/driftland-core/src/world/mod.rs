pub mod block;
pub mod collision;
pub mod generation;
pub mod grid;
pub mod player_physics;
#[allow(clippy::module_inception)]
mod world;

pub use block::{build_palette, Block, BlockPalette, BlockType, DEFAULT_HUE};
pub use collision::{area_intersects_solid, TileQuery};
pub use generation::TerrainGenerator;
pub use grid::WorldGrid;
pub use player_physics::PlayerPhysicsSystem;
pub use world::{create_prebuilt_world, InfiniteWorld};
