//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: timer ticks,
//! terminal input and results of async work sent through the runtime inbox.
//!
//! ## Submission lifecycle
//!
//! - The runtime emits `SubmissionStarted` with the cancel token once the
//!   request task is spawned.
//! - The task emits `SubmissionFinished` when the request completes or is
//!   cancelled.
//! - Both carry the wizard generation the submission belongs to; the reducer
//!   ignores anything from an older generation.

use crossterm::event::Event as CrosstermEvent;
use sensai_core::forms::Branch;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (spinner animation, toast expiry).
    Tick,

    /// Terminal input event (key, paste, resize).
    Terminal(CrosstermEvent),

    /// A submission request task was spawned.
    SubmissionStarted {
        generation: u64,
        cancel: CancellationToken,
    },

    /// A submission request finished (Ok = response body, Err = error text).
    SubmissionFinished {
        generation: u64,
        branch: Branch,
        result: Result<Value, String>,
    },
}
