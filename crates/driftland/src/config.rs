//! Layered configuration loading
//!
//! Sources, lowest to highest priority:
//! 1. Compiled defaults from [`GameConfig::default`]
//! 2. `driftland.ron` in the working directory, or the file given on the
//!    command line
//! 3. Environment variables prefixed with `DRIFTLAND_`
//!
//! Example environment variable: `DRIFTLAND_PLAYER__GRAVITY=900`

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File, FileFormat};
use driftland_core::config::GameConfig;

/// Load configuration.
///
/// Without `path` a missing `driftland.ron` is fine; an explicit path must
/// exist.
pub fn load(path: Option<&Path>) -> Result<GameConfig> {
    let defaults = Config::try_from(&GameConfig::default())
        .context("Failed to serialize default configuration")?;

    let file = match path {
        Some(path) => File::from(path).format(FileFormat::Ron).required(true),
        None => File::with_name("driftland")
            .format(FileFormat::Ron)
            .required(false),
    };

    let config = Config::builder()
        .add_source(defaults)
        .add_source(file)
        .add_source(Environment::with_prefix("DRIFTLAND").separator("__"))
        .build()
        .context("Failed to build configuration")?;

    config
        .try_deserialize()
        .context("Failed to deserialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_with_defaults() {
        let config = load(None).expect("Failed to load config");
        assert_eq!(config.player.tile_size, 24.0);
        assert_eq!(config.world.spawn_column, 3);
    }

    #[test]
    fn test_load_config_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("driftland-test-{}.ron", std::process::id()));
        std::fs::write(&path, "(player: (move_speed: 90.0), world: (base_hue: 0.16))").unwrap();

        let config = load(Some(&path)).expect("Failed to load config");
        std::fs::remove_file(&path).ok();

        assert_eq!(config.player.move_speed, 90.0);
        assert_eq!(config.player.gravity, 1200.0);
        assert_eq!(config.world.base_hue, 0.16);
        assert_eq!(config.world.height, 30);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let path = std::env::temp_dir().join("driftland-does-not-exist.ron");
        assert!(load(Some(&path)).is_err());
    }
}
