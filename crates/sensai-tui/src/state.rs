//! Application state composition.
//!
//! ```text
//! AppState
//! ├── tui: TuiState
//! │   ├── config: Config
//! │   ├── wizard: Wizard          (selections, forms, response, generation)
//! │   ├── submission: Option<CancellationToken>
//! │   ├── toast: Option<ToastState>
//! │   └── spinner_frame
//! └── overlay: Option<Overlay>    (the course-creation dialog when open)
//! ```
//!
//! The wizard lives in `TuiState` rather than in the overlay so a late
//! submission result always finds it, even after the dialog closed. The
//! overlay only holds view state (cursor, focus, scroll).

use sensai_core::config::Config;
use sensai_core::wizard::Wizard;
use tokio_util::sync::CancellationToken;

use crate::features::toast::ToastState;
use crate::overlays::Overlay;

/// Combined application state.
///
/// Split so overlay handlers can take `&mut self` and `&TuiState` at once.
pub struct AppState {
    pub tui: TuiState,
    pub overlay: Option<Overlay>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            tui: TuiState::new(config),
            overlay: None,
        }
    }
}

/// Non-overlay state.
pub struct TuiState {
    pub should_quit: bool,
    pub config: Config,
    pub wizard: Wizard,
    /// Cancel token of the in-flight submission, once the runtime reports it.
    pub submission: Option<CancellationToken>,
    pub toast: Option<ToastState>,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl TuiState {
    pub fn new(config: Config) -> Self {
        Self {
            should_quit: false,
            config,
            wizard: Wizard::new(),
            submission: None,
            toast: None,
            spinner_frame: 0,
        }
    }

    /// True while something animates and the loop should tick fast.
    pub fn is_busy(&self) -> bool {
        self.wizard.is_submitting() || self.toast.is_some()
    }
}
