//! GameSession - one running sandbox: world, player, inventory and theme

use glam::{IVec2, Vec2};

use crate::config::GameConfig;
use crate::entity::{
    build_target, player_intersects_tile, within_build_radius, BuildOutcome, FlightToggle,
    InputState, Inventory, PlayerState,
};
use crate::error::Result;
use crate::world::{build_palette, create_prebuilt_world, InfiniteWorld, PlayerPhysicsSystem};

/// A named base hue the palette can be rebuilt from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub base_hue: f32,
}

/// Themes in cycling order
pub static THEMES: [Theme; 7] = [
    Theme { name: "Azure Coast", base_hue: 0.58 },
    Theme { name: "Rose Dawn", base_hue: 0.01 },
    Theme { name: "Amber Drift", base_hue: 0.09 },
    Theme { name: "Sunlit Meadow", base_hue: 0.16 },
    Theme { name: "Verdant Mist", base_hue: 0.28 },
    Theme { name: "Indigo Veil", base_hue: 0.67 },
    Theme { name: "Violet Bloom", base_hue: 0.78 },
];

/// Owns everything the simulation mutates.
///
/// A front end feeds one [`InputState`] per frame into [`GameSession::tick`],
/// forwards discrete events (jump presses, slot keys, build clicks), and
/// reads the world and player back for drawing.
pub struct GameSession {
    world: InfiniteWorld,
    player: PlayerState,
    inventory: Inventory,
    flight_toggle: FlightToggle,
    config: GameConfig,
    /// Index into [`THEMES`], `None` while a custom hue is active
    theme_index: Option<usize>,
}

impl GameSession {
    /// Build the opening world and drop the player onto it
    pub fn new(config: GameConfig) -> Result<Self> {
        let palette = build_palette(config.world.base_hue);
        let inventory = Inventory::new(palette.blocks())?;
        let mut world = create_prebuilt_world(config.world.width, config.world.height, palette);

        let tile_size = config.player.tile_size;
        let spawn = Vec2::new(
            config.world.spawn_column as f32 * tile_size,
            config.world.spawn_row * tile_size,
        );
        let mut player = PlayerState::from_config(spawn, &config.player);
        PlayerPhysicsSystem::place_on_surface(&mut world, &mut player, tile_size);

        let theme_index = THEMES
            .iter()
            .position(|theme| (theme.base_hue - config.world.base_hue).abs() < f32::EPSILON);

        log::info!(
            "Session started: player at {:?}, theme {}",
            player.position,
            theme_index.map_or("custom", |index| THEMES[index].name)
        );

        Ok(Self {
            world,
            player,
            inventory,
            flight_toggle: FlightToggle::new(config.player.double_tap_window),
            config,
            theme_index,
        })
    }

    pub fn world(&self) -> &InfiniteWorld {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut InfiniteWorld {
        &mut self.world
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Active theme, if the palette came from the catalogue
    pub fn theme(&self) -> Option<&'static Theme> {
        self.theme_index.map(|index| &THEMES[index])
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, input: &InputState, dt: f32) {
        PlayerPhysicsSystem::step(&mut self.world, &mut self.player, input, dt, &self.config.player);
    }

    /// Register a jump press at time `now` (seconds, caller's clock).
    ///
    /// Returns true when the press completed a double tap and toggled flight.
    pub fn press_jump(&mut self, now: f64) -> bool {
        if self.flight_toggle.register_press(now) {
            self.player.toggle_flight();
            true
        } else {
            false
        }
    }

    pub fn select_slot(&mut self, index: usize) -> Result<()> {
        self.inventory.select(index)
    }

    /// Switch to the next catalogue theme and return it
    pub fn cycle_theme(&mut self) -> Result<&'static Theme> {
        let next = self.theme_index.map_or(0, |index| (index + 1) % THEMES.len());
        let theme = &THEMES[next];
        self.apply_hue(theme.base_hue)?;
        self.theme_index = Some(next);
        Ok(theme)
    }

    /// Rebuild the palette from `base_hue`, refill the inventory and retheme
    /// every realized cell
    pub fn apply_hue(&mut self, base_hue: f32) -> Result<()> {
        let palette = build_palette(base_hue);
        self.inventory.replace_slots(palette.blocks())?;
        self.world.retheme(palette);
        self.theme_index = None;
        Ok(())
    }

    /// Tile a world-space pointer position resolves to, clamped to reach
    pub fn build_target(&self, pointer: Vec2) -> IVec2 {
        build_target(
            &self.player,
            pointer,
            self.config.player.tile_size,
            self.config.player.build_radius,
        )
    }

    /// Place the selected block at `target` if it is in reach, clear of the
    /// player and currently empty
    pub fn place_block(&mut self, target: IVec2) -> BuildOutcome {
        if let Some(rejected) = self.check_reach(target) {
            return rejected;
        }
        if self.world.get(target.x, target.y).is_some() {
            return BuildOutcome::Occupied;
        }
        let block = self.inventory.selected().clone();
        log::debug!("Placing {} at {}", block.name, target);
        self.world.set(target.x, target.y, Some(block));
        BuildOutcome::Placed
    }

    /// Clear the block at `target` under the same reach rules as placing
    pub fn remove_block(&mut self, target: IVec2) -> BuildOutcome {
        if let Some(rejected) = self.check_reach(target) {
            return rejected;
        }
        if self.world.get(target.x, target.y).is_none() {
            return BuildOutcome::NothingToRemove;
        }
        log::debug!("Removing block at {}", target);
        self.world.set(target.x, target.y, None);
        BuildOutcome::Removed
    }

    fn check_reach(&self, target: IVec2) -> Option<BuildOutcome> {
        let tile_size = self.config.player.tile_size;
        let player_tile = self.player.center_tile(tile_size);
        if !within_build_radius(player_tile, target, self.config.player.build_radius) {
            Some(BuildOutcome::OutOfReach)
        } else if player_intersects_tile(&self.player, target, tile_size) {
            Some(BuildOutcome::BlockedByPlayer)
        } else {
            None
        }
    }

    /// Top-left of a `view_width` x `view_height` pixel view centred on the
    /// player, with `y` kept inside the realized rows
    pub fn camera_origin(&self, view_width: f32, view_height: f32) -> Vec2 {
        let tile_size = self.config.player.tile_size;
        let center = self.player.center();
        let x = center.x - view_width / 2.0;
        let y = center.y - view_height / 2.0;

        let min_y = self.world.top() as f32 * tile_size;
        let max_y = ((self.world.bottom() + 1) as f32 * tile_size - view_height).max(min_y);
        Vec2::new(x, y.clamp(min_y, max_y))
    }
}
