//! Feature slices for the TUI.

pub mod result;
pub mod toast;
