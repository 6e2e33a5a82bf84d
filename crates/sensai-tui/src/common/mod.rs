//! Shared helpers used across TUI slices.

pub mod text;

pub use text::{sanitize_for_display, truncate_with_ellipsis};
