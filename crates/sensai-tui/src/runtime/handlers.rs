//! Effect handlers for the TUI runtime.
//!
//! Handlers are async functions that return a `UiEvent`. They perform I/O
//! and never touch state; the runtime spawns them and sends the result to
//! the inbox.

use sensai_core::backend::BackendClient;
use sensai_core::wizard::SubmitTicket;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::events::UiEvent;

/// Sends a wizard form to the backend, racing the request against `cancel`.
pub async fn submit_form(
    client: BackendClient,
    ticket: SubmitTicket,
    cancel: CancellationToken,
) -> UiEvent {
    let branch = ticket.form.branch();
    let result = tokio::select! {
        biased;
        () = cancel.cancelled() => {
            info!(%branch, "submission cancelled");
            Err("Submission cancelled.".to_string())
        }
        result = client.submit(&ticket.form) => result.map_err(|err| {
            warn!(%branch, "submission failed: {err:#}");
            format!("{err:#}")
        }),
    };

    UiEvent::SubmissionFinished {
        generation: ticket.generation,
        branch,
        result,
    }
}

#[cfg(test)]
mod tests {
    use sensai_core::forms::{Branch, FormData};

    use super::*;

    #[tokio::test]
    async fn test_cancelled_submission_reports_error() {
        let client = BackendClient::new("http://127.0.0.1:9");
        let ticket = SubmitTicket {
            generation: 3,
            form: FormData::defaults(Branch::Assessment),
        };
        let cancel = CancellationToken::new();
        cancel.cancel();

        match submit_form(client, ticket, cancel).await {
            UiEvent::SubmissionFinished {
                generation,
                branch,
                result,
            } => {
                assert_eq!(generation, 3);
                assert_eq!(branch, Branch::Assessment);
                assert_eq!(result, Err("Submission cancelled.".to_string()));
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_transport_failure_reports_error() {
        let client = BackendClient::new("http://127.0.0.1:9");
        let ticket = SubmitTicket {
            generation: 0,
            form: FormData::defaults(Branch::ChapterLessonPlan),
        };

        match submit_form(client, ticket, CancellationToken::new()).await {
            UiEvent::SubmissionFinished { result, .. } => assert!(result.is_err()),
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
