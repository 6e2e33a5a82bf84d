//! Interactive wizard command.

use anyhow::Result;
use sensai_core::config::Config;
use sensai_core::logging;
use tracing::info;

pub async fn run(config: &Config) -> Result<()> {
    let log_path = config.log_path();
    // The TUI owns the terminal; keep the guard alive until it exits.
    let _guard = logging::init_file(&config.log_level, &log_path)?;
    info!(log = %log_path.display(), "wizard starting");

    sensai_tui::run_wizard(config).await
}
