use std::process::ExitCode;

use tracing::{error, info};

mod app;

fn main() -> ExitCode {
    let wiring = match app::bootstrap::build_app() {
        Ok(wiring) => wiring,
        Err(code) => return code,
    };

    match engine::run_app(wiring.config, wiring.scene) {
        Ok(()) => {
            info!("shutdown");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "run_failed");
            ExitCode::FAILURE
        }
    }
}
