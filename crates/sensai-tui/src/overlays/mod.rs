//! Modal overlays.
//!
//! An overlay takes over keyboard input while open. It owns its view state
//! and returns an [`OverlayUpdate`] from its key handler: whether to stay
//! open plus the mutations the reducer should apply to `TuiState`.
//!
//! - `wizard.rs`: the course-creation dialog
//! - `render_utils.rs`: shared drawing helpers

pub mod render_utils;
pub mod wizard;

use crossterm::event::KeyEvent;
use ratatui::Frame;
use ratatui::layout::Rect;
pub use wizard::WizardOverlay;

use crate::mutations::StateMutation;
use crate::state::TuiState;

#[derive(Debug, PartialEq, Eq)]
pub enum OverlayTransition {
    Stay,
    Close,
}

#[derive(Debug)]
pub struct OverlayUpdate {
    pub transition: OverlayTransition,
    pub mutations: Vec<StateMutation>,
}

impl OverlayUpdate {
    fn new(transition: OverlayTransition) -> Self {
        Self {
            transition,
            mutations: Vec::new(),
        }
    }

    pub fn stay() -> Self {
        Self::new(OverlayTransition::Stay)
    }

    pub fn close() -> Self {
        Self::new(OverlayTransition::Close)
    }

    #[must_use]
    pub fn with_mutations(mut self, mutations: Vec<StateMutation>) -> Self {
        self.mutations = mutations;
        self
    }
}

#[derive(Debug)]
pub enum Overlay {
    Wizard(WizardOverlay),
}

impl Overlay {
    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        match self {
            Overlay::Wizard(w) => w.render(frame, area, tui),
        }
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        match self {
            Overlay::Wizard(w) => w.handle_key(tui, key),
        }
    }

    pub fn handle_paste(&mut self, tui: &TuiState, text: &str) -> OverlayUpdate {
        match self {
            Overlay::Wizard(w) => w.handle_paste(tui, text),
        }
    }

    /// Called when a new response arrives.
    pub fn on_response(&mut self) {
        match self {
            Overlay::Wizard(w) => w.result_scroll = 0,
        }
    }
}

/// Convenience render helper for `Option<Overlay>`.
pub trait OverlayExt {
    fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState);
}

impl OverlayExt for Option<Overlay> {
    fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        if let Some(overlay) = self {
            overlay.render(frame, area, tui);
        }
    }
}
