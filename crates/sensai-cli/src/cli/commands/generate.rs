//! Non-interactive form submission.

use std::path::PathBuf;

use anyhow::{Context, Result};
use sensai_core::backend::BackendClient;
use sensai_core::config::Config;
use sensai_core::forms::{Branch, FormData};
use sensai_core::logging;
use sensai_core::response::ResultView;
use tracing::debug;

/// Field overrides. Anything omitted keeps the wizard default.
#[derive(clap::Args, Debug, Default)]
pub struct FieldArgs {
    #[arg(long)]
    board: Option<String>,
    #[arg(long)]
    grade: Option<String>,
    #[arg(long)]
    subject: Option<String>,
    /// Chapter number (chapter and assessment forms)
    #[arg(long)]
    chapter_number: Option<String>,
    /// Topic (topic form)
    #[arg(long)]
    topic: Option<String>,
    /// Number of lectures
    #[arg(long)]
    lectures: Option<u32>,
    /// Lecture duration in minutes
    #[arg(long)]
    duration: Option<u32>,
    /// Class strength (lesson plan forms)
    #[arg(long)]
    class_strength: Option<u32>,
    /// english or hindi
    #[arg(long)]
    language: Option<String>,
    #[arg(long, value_name = "BOOL")]
    quiz: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    assignment: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    structured_output: Option<bool>,
    /// PDF to attach (topic form)
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,
}

impl FieldArgs {
    fn overrides(&self) -> Vec<(&'static str, String)> {
        let text = [
            ("Board", &self.board),
            ("Grade", &self.grade),
            ("Subject", &self.subject),
            ("Chapter_Number", &self.chapter_number),
            ("Topic", &self.topic),
            ("Language", &self.language),
        ];
        let numbers = [
            ("Number_of_Lecture", self.lectures),
            ("Duration_of_Lecture", self.duration),
            ("Class_Strength", self.class_strength),
        ];
        let flags = [
            ("Quiz", self.quiz),
            ("Assignment", self.assignment),
            ("Structured_Output", self.structured_output),
        ];

        let mut out: Vec<(&'static str, String)> = text
            .into_iter()
            .filter_map(|(key, value)| value.clone().map(|v| (key, v)))
            .collect();
        out.extend(
            numbers
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v.to_string()))),
        );
        out.extend(
            flags
                .into_iter()
                .filter_map(|(key, value)| value.map(|v| (key, v.to_string()))),
        );
        if let Some(path) = &self.file {
            out.push(("file", path.display().to_string()));
        }
        out
    }

    /// Builds the form, rejecting flags the branch does not have.
    pub fn into_form(self, branch: Branch) -> Result<FormData> {
        let mut form = FormData::defaults(branch);
        for (key, value) in self.overrides() {
            form.set_from_str(key, &value)?;
        }
        Ok(form)
    }
}

pub async fn run(config: &Config, branch: Branch, args: FieldArgs) -> Result<()> {
    logging::init_stderr(&config.log_level);

    let form = args.into_form(branch)?;
    let definition = form.definition();
    let client = BackendClient::new(config.public_backend_url.clone());
    debug!(%branch, "submitting without the wizard");

    let payload = client
        .submit(&form)
        .await
        .context(definition.failure_message)?;

    println!("{}", definition.success_message);
    let view = ResultView::from_payload(&payload);
    if view.is_empty() {
        let json = serde_json::to_string_pretty(&payload).context("serialize response")?;
        println!("{json}");
    } else {
        println!();
        print!("{}", view.to_plain_text());
    }
    Ok(())
}
