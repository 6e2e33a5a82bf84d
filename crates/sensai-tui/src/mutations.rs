//! Cross-slice state mutations.
//!
//! Overlays see `TuiState` read-only and return these to request changes.
//! The main reducer applies them in order.

use sensai_core::wizard::{Audience, CreationType, LessonPlanType};

#[derive(Debug)]
pub enum StateMutation {
    Wizard(WizardMutation),
    DismissToast,
}

#[derive(Debug)]
pub enum WizardMutation {
    SelectAudience(Audience),
    SelectCreationType(CreationType),
    SelectLessonPlanType(LessonPlanType),
    Back,
    EditField { index: usize, edit: FieldEdit },
    Submit,
    CreateAnother,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEdit {
    Char(char),
    Paste(String),
    Backspace,
    Toggle,
}
