use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use driftland_core::GameSession;

mod config;
mod headless;

use headless::{Script, Walk};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file (RON); defaults to ./driftland.ron when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of simulation ticks to run
    #[arg(long, default_value = "300")]
    ticks: usize,

    /// Seconds per tick
    #[arg(long, default_value = "0.016666668")]
    dt: f32,

    /// Direction the scripted player walks
    #[arg(long, value_enum, default_value = "right")]
    walk: Walk,

    /// Start in flight mode
    #[arg(long)]
    fly: bool,

    /// Place the selected block behind the player every N ticks
    #[arg(long)]
    build_every: Option<usize>,

    /// Inventory slot to build with (0-based)
    #[arg(long, default_value = "0")]
    slot: usize,

    /// Base hue of the starting palette, overrides the config
    #[arg(long)]
    hue: Option<f32>,

    /// Spawn column, overrides the config
    #[arg(long)]
    spawn_column: Option<i32>,

    /// Cycle through this many themes after the run
    #[arg(long, default_value = "0")]
    themes: usize,

    /// Width of the printed snapshot in tiles
    #[arg(long, default_value = "60")]
    view_width: i32,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let mut game_config = config::load(args.config.as_deref())?;
    if let Some(hue) = args.hue {
        game_config.world.base_hue = hue;
    }
    if let Some(column) = args.spawn_column {
        game_config.world.spawn_column = column;
    }
    log::debug!("Config: {:?}", game_config);

    let mut session = GameSession::new(game_config).context("Failed to start session")?;
    session
        .select_slot(args.slot)
        .with_context(|| format!("Invalid --slot {}", args.slot))?;

    let script = Script {
        ticks: args.ticks,
        dt: args.dt,
        walk: args.walk,
        fly: args.fly,
        build_every: args.build_every,
    };
    headless::run(&mut session, &script);

    for _ in 0..args.themes {
        let theme = session.cycle_theme()?;
        log::info!("Switched to theme {}", theme.name);
    }

    let player = session.player();
    log::info!(
        "Player at {:?}, on_ground: {}, flying: {}",
        player.position,
        player.on_ground,
        player.flight_mode
    );
    log::info!(
        "World: {} columns, rows {}..={}",
        session.world().column_count(),
        session.world().top(),
        session.world().bottom()
    );

    print!("{}", headless::snapshot(&mut session, args.view_width));
    Ok(())
}
