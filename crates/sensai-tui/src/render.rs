//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui Frame and never
//! mutate state or return effects.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::common::truncate_with_ellipsis;
use crate::features::toast::render_toast;
use crate::overlays::OverlayExt;
use crate::state::{AppState, TuiState};

/// Spinner frames for in-flight submissions.
pub const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒"];

const STATUS_HEIGHT: u16 = 1;

/// Renders the entire TUI to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    let state = &app.tui;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(STATUS_HEIGHT)])
        .split(area);

    render_launcher(frame, chunks[0]);
    render_status_line(state, frame, chunks[1]);

    app.overlay.render(frame, area, state);

    if let Some(toast) = &state.toast {
        render_toast(frame, area, toast);
    }
}

/// Lines of the launcher screen shown behind the dialog.
pub fn launcher_lines() -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            "SensAI",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "AI-powered course creation",
            Style::default().fg(Color::DarkGray),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(Color::Magenta)),
            Span::raw(": ✦ Create Courses with AI"),
        ]),
        Line::from(vec![
            Span::styled("q", Style::default().fg(Color::Magenta)),
            Span::raw(": quit"),
        ]),
    ]
}

fn render_launcher(frame: &mut Frame, area: Rect) {
    let lines = launcher_lines();
    let height = (lines.len() as u16).min(area.height);
    let top = area.y + area.height.saturating_sub(height) / 2;
    let centered = Rect::new(area.x, top, area.width, height);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        centered,
    );
}

fn render_status_line(state: &TuiState, frame: &mut Frame, area: Rect) {
    let mut spans = Vec::new();
    if state.wizard.is_submitting() {
        let spinner = SPINNER_FRAMES[state.spinner_frame % SPINNER_FRAMES.len()];
        spans.push(Span::styled(
            format!("{spinner} generating "),
            Style::default().fg(Color::Magenta),
        ));
    }
    let backend = truncate_with_ellipsis(
        &state.config.public_backend_url,
        area.width.saturating_sub(12) as usize,
    );
    spans.push(Span::styled(
        format!("backend: {backend}"),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(
        Paragraph::new(Line::from(spans)).alignment(Alignment::Right),
        area,
    );
}
