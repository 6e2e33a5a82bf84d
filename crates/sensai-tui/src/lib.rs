//! Full-screen course-creation TUI for SensAI.

pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr, stdout};

use anyhow::Result;
pub use runtime::TuiRuntime;
use sensai_core::config::Config;

/// Runs the interactive course-creation wizard.
pub async fn run_wizard(config: &Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!(
            "The course creation wizard requires a terminal.\n\
             Use `sensai generate ...` for non-interactive generation."
        );
    }

    let mut runtime = TuiRuntime::new(config.clone())?;
    runtime.run()?;

    // Restore before printing so the message lands on the normal screen.
    drop(runtime);
    writeln!(stdout(), "Goodbye!")?;
    Ok(())
}
