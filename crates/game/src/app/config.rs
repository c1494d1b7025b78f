use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine::{LoopConfig, Vec2};
use serde::Deserialize;
use thiserror::Error;

pub(crate) const CONFIG_ENV_VAR: &str = "BEACHSWEEP_CONFIG";

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_path_to_error::Error<serde_json::Error>,
    },
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub(crate) struct ConfigPoint {
    pub(crate) x: f32,
    pub(crate) y: f32,
}

impl ConfigPoint {
    pub(crate) fn to_vec2(self) -> Vec2 {
        Vec2 {
            x: self.x,
            y: self.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct WindowConfig {
    pub(crate) title: String,
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) target_tps: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Beach Sweep".to_string(),
            width: 1280,
            height: 720,
            target_tps: 60,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameOverConfig {
    pub(crate) shake_ms: u64,
    pub(crate) fade_delay_ms: u64,
    pub(crate) fade_ms: u64,
    pub(crate) restart_delay_ms: u64,
}

impl Default for GameOverConfig {
    fn default() -> Self {
        Self {
            shake_ms: 500,
            fade_delay_ms: 250,
            fade_ms: 250,
            restart_delay_ms: 500,
        }
    }
}

/// Tunables for one play session. Speeds are world units per tick, not
/// per second, so movement scales with the tick rate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    pub(crate) window: WindowConfig,
    pub(crate) playfield_width: f32,
    pub(crate) playfield_height: f32,
    pub(crate) player_start: ConfigPoint,
    pub(crate) player_speed: f32,
    pub(crate) helper_speed: f32,
    pub(crate) arrival_tolerance: f32,
    pub(crate) starting_health: u32,
    pub(crate) health_decay_interval_ms: u64,
    pub(crate) restore_bonus: u32,
    pub(crate) rescue_delay_ms: u64,
    pub(crate) trash_spawn_interval_ms: u64,
    pub(crate) animal_spawn_interval_ms: u64,
    pub(crate) max_trash: usize,
    pub(crate) max_animals: usize,
    pub(crate) spawn_margin: f32,
    pub(crate) bin_position: ConfigPoint,
    pub(crate) booth_position: ConfigPoint,
    pub(crate) convincing_interval_ms: u64,
    pub(crate) convincing_step: u32,
    pub(crate) convincing_max: u32,
    pub(crate) max_helpers: usize,
    pub(crate) rng_seed: Option<u64>,
    pub(crate) game_over: GameOverConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            playfield_width: 640.0,
            playfield_height: 360.0,
            player_start: ConfigPoint { x: 40.0, y: 180.0 },
            player_speed: 2.5,
            helper_speed: 1.5,
            arrival_tolerance: 2.0,
            starting_health: 500,
            health_decay_interval_ms: 1000,
            restore_bonus: 10,
            rescue_delay_ms: 2000,
            trash_spawn_interval_ms: 1000,
            animal_spawn_interval_ms: 1000,
            max_trash: 5,
            max_animals: 5,
            spawn_margin: 24.0,
            bin_position: ConfigPoint { x: 30.0, y: 80.0 },
            booth_position: ConfigPoint { x: 600.0, y: 60.0 },
            convincing_interval_ms: 100,
            convincing_step: 1,
            convincing_max: 50,
            max_helpers: 3,
            rng_seed: None,
            game_over: GameOverConfig::default(),
        }
    }
}

impl GameConfig {
    /// Reads the file named by [`CONFIG_ENV_VAR`], or returns defaults when
    /// the variable is unset.
    pub(crate) fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub(crate) fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    fn parse(raw: &str) -> Result<Self, serde_path_to_error::Error<serde_json::Error>> {
        let deserializer = &mut serde_json::Deserializer::from_str(raw);
        serde_path_to_error::deserialize(deserializer)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        require_positive("playfield_width", self.playfield_width)?;
        require_positive("playfield_height", self.playfield_height)?;
        require_positive("player_speed", self.player_speed)?;
        require_positive("helper_speed", self.helper_speed)?;
        require_positive("arrival_tolerance", self.arrival_tolerance)?;
        require_non_zero_ms("health_decay_interval_ms", self.health_decay_interval_ms)?;
        require_non_zero_ms("trash_spawn_interval_ms", self.trash_spawn_interval_ms)?;
        require_non_zero_ms("animal_spawn_interval_ms", self.animal_spawn_interval_ms)?;
        require_non_zero_ms("convincing_interval_ms", self.convincing_interval_ms)?;
        if self.starting_health == 0 {
            return Err(invalid("starting_health", "must be at least 1"));
        }
        if self.convincing_max == 0 {
            return Err(invalid("convincing_max", "must be at least 1"));
        }
        if self.window.target_tps == 0 {
            return Err(invalid("window.target_tps", "must be at least 1"));
        }
        if self.spawn_margin < 0.0
            || self.spawn_margin * 2.0 >= self.playfield_width.min(self.playfield_height)
        {
            return Err(invalid(
                "spawn_margin",
                "must leave room to spawn inside the playfield",
            ));
        }
        Ok(())
    }

    pub(crate) fn playfield(&self) -> Vec2 {
        Vec2 {
            x: self.playfield_width,
            y: self.playfield_height,
        }
    }

    pub(crate) fn loop_config(&self) -> LoopConfig {
        LoopConfig {
            window_title: self.window.title.clone(),
            window_width: self.window.width,
            window_height: self.window.height,
            target_tps: self.window.target_tps,
            ..LoopConfig::default()
        }
    }

    pub(crate) fn health_decay_interval(&self) -> Duration {
        Duration::from_millis(self.health_decay_interval_ms)
    }

    pub(crate) fn rescue_delay(&self) -> Duration {
        Duration::from_millis(self.rescue_delay_ms)
    }

    pub(crate) fn trash_spawn_interval(&self) -> Duration {
        Duration::from_millis(self.trash_spawn_interval_ms)
    }

    pub(crate) fn animal_spawn_interval(&self) -> Duration {
        Duration::from_millis(self.animal_spawn_interval_ms)
    }

    pub(crate) fn convincing_interval(&self) -> Duration {
        Duration::from_millis(self.convincing_interval_ms)
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a positive number, got {value}"),
        })
    }
}

fn require_non_zero_ms(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        Err(invalid(field, "must be at least 1 ms"))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;

    fn write_config(value: &serde_json::Value) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(value.to_string().as_bytes())
            .expect("write config");
        file
    }

    #[test]
    fn defaults_are_valid() {
        GameConfig::default().validate().expect("defaults validate");
    }

    #[test]
    fn partial_file_overrides_only_named_fields() {
        let file = write_config(&json!({
            "starting_health": 42,
            "window": { "title": "Shoreline" },
            "bin_position": { "x": 10.0, "y": 20.0 }
        }));

        let config = GameConfig::load(file.path()).expect("load");

        assert_eq!(config.starting_health, 42);
        assert_eq!(config.window.title, "Shoreline");
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.bin_position.to_vec2(), Vec2 { x: 10.0, y: 20.0 });
        assert_eq!(config.max_trash, 5);
    }

    #[test]
    fn parse_error_reports_json_path() {
        let file = write_config(&json!({
            "game_over": { "fade_ms": "slow" }
        }));

        let error = GameConfig::load(file.path()).expect_err("bad type");

        match error {
            ConfigError::Parse { source, .. } => {
                assert_eq!(source.path().to_string(), "game_over.fade_ms");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let file = write_config(&json!({ "player_sped": 3.0 }));

        assert!(matches!(
            GameConfig::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("nope.json");

        assert!(matches!(
            GameConfig::load(&missing),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn validation_rejects_non_positive_speed() {
        let file = write_config(&json!({ "player_speed": 0.0 }));

        match GameConfig::load(file.path()) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "player_speed"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn validation_rejects_oversized_spawn_margin() {
        let config = GameConfig {
            spawn_margin: 200.0,
            ..GameConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "spawn_margin",
                ..
            })
        ));
    }

    #[test]
    fn loop_config_carries_window_settings() {
        let config = GameConfig {
            window: WindowConfig {
                title: "Test".to_string(),
                width: 800,
                height: 450,
                target_tps: 30,
            },
            ..GameConfig::default()
        };

        let loop_config = config.loop_config();

        assert_eq!(loop_config.window_title, "Test");
        assert_eq!(loop_config.window_width, 800);
        assert_eq!(loop_config.window_height, 450);
        assert_eq!(loop_config.target_tps, 30);
    }
}
