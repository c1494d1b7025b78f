use std::process::ExitCode;

use engine::{LoopConfig, Scene};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use super::config::{GameConfig, CONFIG_ENV_VAR};
use super::gameplay;

pub(crate) struct AppWiring {
    pub(crate) config: LoopConfig,
    pub(crate) scene: Box<dyn Scene>,
}

pub(crate) fn build_app() -> Result<AppWiring, ExitCode> {
    init_tracing();
    info!("=== Beach Sweep Startup ===");

    let game_config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, env_var = CONFIG_ENV_VAR, "config_load_failed");
            return Err(ExitCode::FAILURE);
        }
    };
    info!(
        starting_health = game_config.starting_health,
        target_tps = game_config.window.target_tps,
        max_helpers = game_config.max_helpers,
        "config_loaded"
    );

    Ok(AppWiring {
        config: game_config.loop_config(),
        scene: gameplay::build_scene(game_config),
    })
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_names(true)
        .compact()
        .init();
}
