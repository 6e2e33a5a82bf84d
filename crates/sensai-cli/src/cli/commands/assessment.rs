//! Assessment follow-up commands.

use anyhow::{Context, Result};
use sensai_core::backend::BackendClient;
use sensai_core::config::Config;
use sensai_core::logging;
use serde_json::Value;

fn client(config: &Config) -> BackendClient {
    logging::init_stderr(&config.log_level);
    BackendClient::new(config.public_backend_url.clone())
}

fn print_json(value: &Value) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize response")?;
    println!("{json}");
    Ok(())
}

pub async fn continue_session(config: &Config, thread_id: &str, message: &str) -> Result<()> {
    let response = client(config)
        .continue_assessment(thread_id, message)
        .await
        .with_context(|| format!("continue assessment {thread_id}"))?;
    print_json(&response)
}

pub async fn status(config: &Config, thread_id: &str) -> Result<()> {
    let response = client(config)
        .assessment_status(thread_id)
        .await
        .with_context(|| format!("fetch assessment status for {thread_id}"))?;
    print_json(&response)
}
