//! Toast slice: a transient notification in the bottom-right corner.

use std::time::{Duration, Instant};

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use sensai_core::wizard::{Toast, ToastKind};

use crate::common::truncate_with_ellipsis;

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(4);

const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 4;

#[derive(Debug, Clone)]
pub struct ToastState {
    pub toast: Toast,
    shown_at: Instant,
}

impl ToastState {
    pub fn new(toast: Toast) -> Self {
        Self::shown_at(toast, Instant::now())
    }

    pub fn shown_at(toast: Toast, shown_at: Instant) -> Self {
        Self { toast, shown_at }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.shown_at) >= TOAST_DURATION
    }
}

/// Drops the toast once it has been visible long enough.
pub fn expire(slot: &mut Option<ToastState>, now: Instant) {
    if slot.as_ref().is_some_and(|t| t.is_expired(now)) {
        *slot = None;
    }
}

pub fn render_toast(frame: &mut Frame, area: Rect, state: &ToastState) {
    let width = TOAST_WIDTH.min(area.width);
    let height = TOAST_HEIGHT.min(area.height);
    let popup = Rect::new(
        area.x + area.width.saturating_sub(width + 1),
        area.y + area.height.saturating_sub(height + 1),
        width,
        height,
    );

    let color = match state.toast.kind {
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
    };
    let title = format!(" {} {} ", state.toast.emoji, state.toast.title);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));

    let inner_width = width.saturating_sub(2) as usize;
    let body = Paragraph::new(Line::from(truncate_with_ellipsis(
        &state.toast.description,
        inner_width * 2,
    )))
    .wrap(Wrap { trim: true })
    .block(block);

    frame.render_widget(Clear, popup);
    frame.render_widget(body, popup);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toast_expires_after_duration() {
        let start = Instant::now();
        let mut slot = Some(ToastState::shown_at(Toast::success("done"), start));

        expire(&mut slot, start + Duration::from_secs(1));
        assert!(slot.is_some());

        expire(&mut slot, start + TOAST_DURATION);
        assert!(slot.is_none());
    }

    #[test]
    fn test_expire_without_toast_is_noop() {
        let mut slot: Option<ToastState> = None;
        expire(&mut slot, Instant::now());
        assert!(slot.is_none());
    }
}
