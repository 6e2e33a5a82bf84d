//! Text helpers for rendering backend-supplied strings.

use std::borrow::Cow;

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncates to `max_width` terminal columns, ending with `…` when cut.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width <= 1 {
        return "…".to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Strips escape characters and expands tabs so backend text cannot corrupt
/// the terminal or misalign wrapped lines.
pub fn sanitize_for_display(s: &str) -> Cow<'_, str> {
    if s.contains(['\x1b', '\t', '\r']) {
        Cow::Owned(s.replace(['\x1b', '\r'], "").replace('\t', "    "))
    } else {
        Cow::Borrowed(s)
    }
}
