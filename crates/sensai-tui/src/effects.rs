//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer decides; the runtime performs the I/O.

use sensai_core::wizard::SubmitTicket;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Send the ticket's form to the backend.
    SubmitForm { ticket: SubmitTicket },

    /// Cancel an in-flight submission.
    CancelSubmission { token: Option<CancellationToken> },
}
