//! Player physics system - stance, velocity, tile collision, spawn placement

use crate::config::PlayerConfig;
use crate::entity::input::InputState;
use crate::entity::player::PlayerState;
use crate::world::collision::{area_intersects_solid, tile_of, TileQuery};

/// Heights closer than this count as equal when switching stance
const STANCE_EPSILON: f32 = 1e-5;

/// Player physics system - handles stance, gravity, jumping, flight and
/// axis-separated collision against the tile world
pub struct PlayerPhysicsSystem;

impl PlayerPhysicsSystem {
    /// Advance the player by one tick.
    ///
    /// 1. Stance: crouch intent (ignored while flying) resizes the hitbox
    /// 2. Velocity from input, gravity and jumping
    /// 3. Horizontal then vertical movement with collision
    pub fn step<W: TileQuery + ?Sized>(
        world: &mut W,
        player: &mut PlayerState,
        input: &InputState,
        dt: f32,
        config: &PlayerConfig,
    ) {
        player.crouching = input.crouch && !player.flight_mode;
        Self::update_stance(world, player, config.tile_size);
        Self::update_velocity(player, input, dt, config);
        Self::move_player(world, player, dt, config.tile_size);
    }

    /// Set velocity from the controls and elapsed time.
    ///
    /// `y` grows downward: jumping sets a negative velocity and gravity adds
    /// a positive one. Flight replaces gravity with direct vertical steering.
    pub fn update_velocity(
        player: &mut PlayerState,
        input: &InputState,
        dt: f32,
        config: &PlayerConfig,
    ) {
        let walk_speed = if player.crouching {
            config.move_speed * config.crouch_speed_factor
        } else {
            config.move_speed
        };
        let horizontal_speed = if player.flight_mode {
            config.flight_speed
        } else {
            walk_speed
        };
        player.velocity.x = input.horizontal_axis() * horizontal_speed;

        if player.flight_mode {
            player.velocity.y = input.vertical_axis() * config.flight_speed;
        } else if input.jump && player.on_ground {
            player.velocity.y = -config.jump_speed;
            player.on_ground = false;
            log::debug!("Player jumped from {:?}", player.position);
        } else {
            player.velocity.y = (player.velocity.y + config.gravity * dt).min(config.max_fall_speed);
        }
    }

    /// Match the hitbox height to the crouch state.
    ///
    /// Crouching keeps the feet planted. Standing up only happens when the
    /// taller box has headroom; otherwise the player stays crouched.
    pub fn update_stance<W: TileQuery + ?Sized>(world: &mut W, player: &mut PlayerState, tile_size: f32) {
        let target_height = if player.crouching {
            player.crouching_height
        } else {
            player.standing_height
        };

        if (player.height - target_height).abs() < STANCE_EPSILON {
            return;
        }

        let bottom = player.bottom();

        if target_height < player.height {
            player.height = target_height;
            player.position.y = bottom - player.height;
            return;
        }

        let new_top = bottom - target_height;
        if area_intersects_solid(world, player.position.x, new_top, player.width, target_height, tile_size) {
            log::debug!("Not enough headroom to stand at {:?}", player.position);
            player.crouching = true;
            return;
        }

        player.height = target_height;
        player.position.y = new_top;
    }

    /// Move by `velocity * dt`, one axis at a time, stopping flush against
    /// the first solid tile found on the leading edge.
    pub fn move_player<W: TileQuery + ?Sized>(world: &mut W, player: &mut PlayerState, dt: f32, tile_size: f32) {
        let start = player.position;

        // Horizontal
        player.position.x += player.velocity.x * dt;
        if player.velocity.x != 0.0 {
            let moving_right = player.velocity.x > 0.0;
            let edge = if moving_right { player.right() } else { player.position.x };
            let tile_x = tile_of(edge, tile_size);
            let (y_start, y_end) = player.row_span(tile_size);
            if (y_start..=y_end).any(|tile_y| world.is_solid(tile_x, tile_y)) {
                player.position.x = if moving_right {
                    tile_x as f32 * tile_size - player.width
                } else {
                    (tile_x + 1) as f32 * tile_size
                };
                player.velocity.x = 0.0;
            }
        }

        // Vertical
        player.position.y += player.velocity.y * dt;
        player.on_ground = false;
        if player.velocity.y != 0.0 {
            let moving_down = player.velocity.y > 0.0;
            let edge = if moving_down { player.bottom() } else { player.position.y };
            let tile_y = tile_of(edge, tile_size);
            let (x_start, x_end) = player.column_span(tile_size);
            if (x_start..=x_end).any(|tile_x| world.is_solid(tile_x, tile_y)) {
                if moving_down {
                    player.position.y = tile_y as f32 * tile_size - player.height;
                    player.on_ground = true;
                } else {
                    player.position.y = (tile_y + 1) as f32 * tile_size;
                }
                player.velocity.y = 0.0;
            }
        }

        if player.position != start {
            log::trace!(
                "Player: {:?} -> {:?} (vel: {:?}, on_ground: {})",
                start,
                player.position,
                player.velocity,
                player.on_ground
            );
        }
    }

    /// Settle a freshly spawned player onto the terrain below.
    ///
    /// First pushes the hitbox upward out of any solid tiles it overlaps,
    /// then scans down through the realized rows for the first row with a
    /// solid tile under the player's footprint and rests on it. Returns
    /// whether support was found; without support the player is left
    /// airborne where it is.
    pub fn place_on_surface<W: TileQuery + ?Sized>(world: &mut W, player: &mut PlayerState, tile_size: f32) -> bool {
        let (x_start, x_end) = player.column_span(tile_size);

        // Each push lifts the hitbox at least one row; this many pushes reach
        // the top row even when the spawn lies outside the realized rows
        let (top, _) = world.vertical_extent();
        let (y_start, y_end) = player.row_span(tile_size);
        let max_pushes = (y_end - top.min(y_start) + 1).max(0);

        for _ in 0..=max_pushes {
            let (y_start, y_end) = player.row_span(tile_size);
            let blocking_row = (y_start..=y_end)
                .find(|&tile_y| (x_start..=x_end).any(|tile_x| world.is_solid(tile_x, tile_y)));
            match blocking_row {
                Some(row) => player.position.y = row as f32 * tile_size - player.height,
                None => break,
            }
        }

        let (_, bottom) = world.vertical_extent();
        let first_row = tile_of(player.bottom(), tile_size);
        let support = (first_row..=bottom)
            .find(|&tile_y| (x_start..=x_end).any(|tile_x| world.is_solid(tile_x, tile_y)));

        match support {
            Some(row) => {
                player.position.y = row as f32 * tile_size - player.height;
                player.velocity.y = 0.0;
                player.on_ground = true;
                log::debug!("Placed player on row {} at {:?}", row, player.position);
                true
            }
            None => {
                player.on_ground = false;
                log::debug!(
                    "No support below columns {}..={}, player stays airborne",
                    x_start,
                    x_end
                );
                false
            }
        }
    }
}
