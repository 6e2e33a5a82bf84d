//! HTTP client for the public backend (wizard submissions and assessment
//! follow-ups).
//!
//! Any response whose body parses as JSON is returned as-is, whatever the
//! HTTP status. Only transport failures, unparseable bodies and unreadable
//! attachments are errors. The auth bridge applies a stricter policy.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::forms::{Encoding, FormData};

const PDF_MIME: &str = "application/pdf";
const DEFAULT_ATTACHMENT_NAME: &str = "upload.pdf";

#[derive(Debug, Serialize)]
struct ContinueRequest<'a> {
    thread_id: &'a str,
    message: &'a str,
}

#[derive(Debug, Clone)]
pub struct BackendClient {
    base_url: String,
    http: reqwest::Client,
}

impl BackendClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        let raw = format!("{}{path}", self.base_url.trim_end_matches('/'));
        Url::parse(&raw).with_context(|| format!("Invalid backend URL: {raw}"))
    }

    /// Full request URL for a form, including the query string for the
    /// query-encoded branches.
    pub fn form_url(&self, form: &FormData) -> Result<Url> {
        let definition = form.definition();
        let mut url = self.url(definition.path)?;
        match definition.encoding {
            Encoding::Query | Encoding::QueryMultipart => {
                url.query_pairs_mut().extend_pairs(form.query_pairs());
            }
            Encoding::Json => {}
        }
        Ok(url)
    }

    /// Submits one form and returns the parsed response body.
    pub async fn submit(&self, form: &FormData) -> Result<Value> {
        let definition = form.definition();
        let url = self.form_url(form)?;
        info!(branch = %form.branch(), %url, "submitting form");

        let request = match definition.encoding {
            Encoding::Query => self.http.post(url),
            Encoding::QueryMultipart => {
                let body = multipart_body(form.attachment()).await?;
                self.http.post(url).multipart(body)
            }
            Encoding::Json => self.http.post(url).json(&form.json_body()),
        };

        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .with_context(|| format!("Failed to submit {} form", form.branch()))?;

        read_json(response).await
    }

    /// Sends a follow-up message within an assessment thread.
    pub async fn continue_assessment(&self, thread_id: &str, message: &str) -> Result<Value> {
        let url = self.url("/student/assessment/continue")?;
        info!(thread_id, "continuing assessment");

        let response = self
            .http
            .post(url)
            .header(ACCEPT, "application/json")
            .json(&ContinueRequest { thread_id, message })
            .send()
            .await
            .context("Failed to send assessment message")?;

        read_json(response).await
    }

    /// Fetches the state of an assessment thread.
    pub async fn assessment_status(&self, thread_id: &str) -> Result<Value> {
        let mut url = self.url("/student/assessment")?;
        let base = url.to_string();
        url.path_segments_mut()
            .map_err(|()| anyhow!("Backend URL cannot have path segments: {base}"))?
            .push(thread_id)
            .push("status");
        info!(thread_id, "fetching assessment status");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .context("Failed to fetch assessment status")?;

        read_json(response).await
    }
}

async fn multipart_body(attachment: Option<&Path>) -> Result<Form> {
    let form = Form::new();
    let Some(path) = attachment else {
        return Ok(form);
    };

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read attachment {}", path.display()))?;
    let file_name = path
        .file_name()
        .map_or_else(|| DEFAULT_ATTACHMENT_NAME.to_string(), |n| n.to_string_lossy().into_owned());
    debug!(file = %path.display(), size = bytes.len(), "attaching file");

    let part = Part::bytes(bytes)
        .file_name(file_name)
        .mime_str(PDF_MIME)
        .context("Failed to build attachment part")?;
    Ok(form.part("file", part))
}

async fn read_json(response: reqwest::Response) -> Result<Value> {
    let status = response.status();
    if status.is_success() {
        debug!(%status, "backend responded");
    } else {
        warn!(%status, "backend returned a non-success status");
    }

    response
        .json::<Value>()
        .await
        .with_context(|| format!("Failed to parse backend response (HTTP {status})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::Branch;

    #[test]
    fn test_chapter_url_has_query_in_order() {
        let client = BackendClient::new("http://backend.test/");
        let url = client
            .form_url(&FormData::defaults(Branch::ChapterLessonPlan))
            .unwrap();
        assert_eq!(url.path(), "/lessonplan/Lesson_Plan");
        assert_eq!(
            url.query(),
            Some(
                "Board=&Grade=&Subject=&Chapter_Number=&Number_of_Lecture=1&\
                 Duration_of_Lecture=45&Class_Strength=30&Language=english&\
                 Quiz=true&Assignment=true&Structured_Output=true"
            )
        );
    }

    #[test]
    fn test_query_values_are_encoded() {
        let client = BackendClient::new("http://backend.test");
        let mut form = FormData::defaults(Branch::TopicLessonPlan);
        form.set_from_str("Topic", "Sets & Relations").unwrap();
        let url = client.form_url(&form).unwrap();
        let topic = url
            .query_pairs()
            .find(|(k, _)| k == "Topic")
            .map(|(_, v)| v.into_owned());
        assert_eq!(topic.as_deref(), Some("Sets & Relations"));
    }

    #[test]
    fn test_assessment_url_has_no_query() {
        let client = BackendClient::new("http://backend.test/api");
        let url = client
            .form_url(&FormData::defaults(Branch::Assessment))
            .unwrap();
        assert_eq!(url.as_str(), "http://backend.test/api/student/assessment");
    }

    #[test]
    fn test_invalid_base_url_is_an_error() {
        let client = BackendClient::new("not a url");
        let err = client
            .form_url(&FormData::defaults(Branch::Assessment))
            .unwrap_err();
        assert!(err.to_string().contains("Invalid backend URL"));
    }

    #[tokio::test]
    async fn test_status_rejects_base_without_path_segments() {
        let client = BackendClient::new("mailto:teacher");
        let err = client.assessment_status("t-1").await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "Backend URL cannot have path segments: mailto:teacher/student/assessment"
        );
    }
}
