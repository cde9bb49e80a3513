//! Reach and overlap checks for placing and removing blocks

use glam::{IVec2, Vec2};

use super::player::PlayerState;

/// Result of a build or remove attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Placed,
    Removed,
    /// Target is farther than the build radius
    OutOfReach,
    /// Target tile overlaps the player's collision box
    BlockedByPlayer,
    /// Tried to place into a tile that already holds a block
    Occupied,
    /// Tried to remove from an empty tile
    NothingToRemove,
}

impl BuildOutcome {
    /// Whether the world was modified
    pub fn changed_world(self) -> bool {
        matches!(self, BuildOutcome::Placed | BuildOutcome::Removed)
    }
}

/// Check whether `target` lies within a square (Chebyshev) radius of `player`
pub fn within_build_radius(player: IVec2, target: IVec2, radius: i32) -> bool {
    let delta = (player - target).abs();
    delta.x.max(delta.y) <= radius
}

/// Snap a world-space pointer position to a tile, clamped per axis so it
/// never leaves the build radius around the player.
pub fn build_target(player: &PlayerState, pointer: Vec2, tile_size: f32, radius: i32) -> IVec2 {
    let pointer_tile = (pointer / tile_size).floor().as_ivec2();
    let player_tile = player.center_tile(tile_size);
    let offset = (pointer_tile - player_tile).clamp(IVec2::splat(-radius), IVec2::splat(radius));
    player_tile + offset
}

/// Whether the tile at `tile` overlaps the player's collision box
pub fn player_intersects_tile(player: &PlayerState, tile: IVec2, tile_size: f32) -> bool {
    let tile_min = tile.as_vec2() * tile_size;
    let tile_max = tile_min + Vec2::splat(tile_size);
    let player_max = player.position + Vec2::new(player.width, player.height);

    player.position.x < tile_max.x
        && player_max.x > tile_min.x
        && player.position.y < tile_max.y
        && player_max.y > tile_min.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_radius_check() {
        assert!(within_build_radius(IVec2::new(5, 5), IVec2::new(7, 7), 2));
        assert!(!within_build_radius(IVec2::new(5, 5), IVec2::new(9, 9), 2));
        assert!(within_build_radius(IVec2::new(5, 5), IVec2::new(3, 7), 2));
        assert!(!within_build_radius(IVec2::new(5, 5), IVec2::new(5, 8), 2));
    }

    #[test]
    fn test_build_target_clamps_to_radius() {
        // Centre tile (15, 3)
        let player = PlayerState::new(Vec2::new(360.0, 72.0), 14.4, 21.6);

        let near = build_target(&player, Vec2::new(16.5 * 24.0, 2.5 * 24.0), 24.0, 2);
        assert_eq!(near, IVec2::new(16, 2));

        let far = build_target(&player, Vec2::new(40.0 * 24.0, -10.0 * 24.0), 24.0, 2);
        assert_eq!(far, IVec2::new(17, 1));
        assert!(within_build_radius(player.center_tile(24.0), far, 2));
    }

    #[test]
    fn test_player_intersects_tile() {
        let player = PlayerState::new(Vec2::new(360.0, 72.0), 14.4, 21.6);
        assert!(player_intersects_tile(&player, IVec2::new(15, 3), 24.0));
        assert!(!player_intersects_tile(&player, IVec2::new(16, 3), 24.0));
        assert!(!player_intersects_tile(&player, IVec2::new(15, 4), 24.0));

        // Straddling two rows
        let tall = PlayerState::new(Vec2::new(360.0, 60.0), 14.4, 21.6);
        assert!(player_intersects_tile(&tall, IVec2::new(15, 2), 24.0));
        assert!(player_intersects_tile(&tall, IVec2::new(15, 3), 24.0));
    }

    #[test]
    fn test_outcome_changed_world() {
        assert!(BuildOutcome::Placed.changed_world());
        assert!(BuildOutcome::Removed.changed_world());
        assert!(!BuildOutcome::OutOfReach.changed_world());
        assert!(!BuildOutcome::Occupied.changed_world());
    }
}
