//! Scripted headless play and ASCII snapshots of the world

use driftland_core::entity::InputState;
use driftland_core::world::Block;
use driftland_core::GameSession;
use glam::IVec2;

/// Direction the scripted walker holds
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Walk {
    Left,
    Right,
    Idle,
}

/// Parameters of one scripted run
#[derive(Debug, Clone)]
pub struct Script {
    pub ticks: usize,
    pub dt: f32,
    pub walk: Walk,
    pub fly: bool,
    /// Place the selected block next to the player every this many ticks
    pub build_every: Option<usize>,
}

/// Summary of what happened during a run
#[derive(Debug, Default, Clone, PartialEq)]
pub struct RunReport {
    pub jumps: usize,
    pub placed: usize,
    pub ticks_on_ground: usize,
}

/// Drive `session` with a simple walker: hold a direction, jump when a
/// wall stops the player, and optionally drop blocks behind it.
pub fn run(session: &mut GameSession, script: &Script) -> RunReport {
    let mut report = RunReport::default();
    let mut clock = 0.0f64;

    if script.fly {
        session.press_jump(clock);
        session.press_jump(clock + f64::from(script.dt));
    }

    let mut input = InputState {
        left: script.walk == Walk::Left,
        right: script.walk == Walk::Right,
        ..Default::default()
    };

    for tick in 0..script.ticks {
        let player = session.player();
        let blocked = script.walk != Walk::Idle && player.velocity.x == 0.0 && tick > 0;
        input.jump = blocked && player.on_ground && !player.flight_mode;
        if input.jump {
            report.jumps += 1;
        }

        session.tick(&input, script.dt);
        clock += f64::from(script.dt);

        if session.player().on_ground {
            report.ticks_on_ground += 1;
        }

        if let Some(every) = script.build_every.filter(|&every| every > 0) {
            if tick % every == every - 1 {
                let behind = match script.walk {
                    Walk::Left => IVec2::new(1, 0),
                    _ => IVec2::new(-1, 0),
                };
                let target = session.player().center_tile(session.config().player.tile_size) + behind;
                if session.place_block(target).changed_world() {
                    report.placed += 1;
                }
            }
        }
    }

    log::info!(
        "Ran {} ticks ({:.2}s): {} jumps, {} blocks placed",
        script.ticks,
        clock,
        report.jumps,
        report.placed
    );
    report
}

fn glyph(block: Option<&Block>) -> char {
    match block {
        None => '.',
        Some(block) => match block.name.as_str() {
            "Grass" => '"',
            "Soil" => '%',
            "Stone" => '#',
            name => name.chars().next().unwrap_or('?'),
        },
    }
}

/// Render every realized row of a `width`-column window centred on the
/// player, marking the player's tiles with `@`.
pub fn snapshot(session: &mut GameSession, width: i32) -> String {
    let tile_size = session.config().player.tile_size;
    let player = session.player().clone();
    let (x_start, x_end) = player.column_span(tile_size);
    let (y_start, y_end) = player.row_span(tile_size);

    let start_x = player.center_tile(tile_size).x - width / 2;
    let top = session.world().top();

    let mut out = String::new();
    for (row, cells) in session.world_mut().iter_window(start_x, width).enumerate() {
        let y = top + row as i32;
        let line: String = cells
            .iter()
            .enumerate()
            .map(|(column, cell)| {
                let x = start_x + column as i32;
                if (x_start..=x_end).contains(&x) && (y_start..=y_end).contains(&y) {
                    '@'
                } else {
                    glyph(cell.as_ref())
                }
            })
            .collect();
        out.push_str(&line);
        out.push('\n');
    }
    out
}
