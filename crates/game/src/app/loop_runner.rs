use std::process::ExitCode;

use overworld_engine::run_app;
use tracing::error;

use super::bootstrap::AppWiring;

pub(crate) fn run(app: AppWiring) -> ExitCode {
    if let Err(err) = run_app(app.config, app.scene, app.sprites) {
        error!(error = %err, "app_failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
