//! Result slice: draws the "Generated Response" section.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};
use sensai_core::response::{FieldBody, ResultView, capitalize_words};
use serde_json::Value;

use crate::common::sanitize_for_display;

pub const RESULT_HEADING: &str = "Generated Response";

const BODY_INDENT: &str = "  ";

/// Builds the styled lines for a response payload.
pub fn result_lines(view: &ResultView) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        RESULT_HEADING,
        Style::default().add_modifier(Modifier::BOLD),
    ))];

    if let Some(status) = &view.status {
        let color = if status.success {
            Color::Green
        } else {
            Color::Red
        };
        lines.push(Line::from(vec![
            Span::styled("● ", Style::default().fg(color)),
            Span::styled(
                capitalize_words(&status.text),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    if let Some(message) = &view.message {
        for text in sanitize_for_display(message).lines() {
            lines.push(Line::from(Span::styled(
                text.to_string(),
                Style::default().fg(Color::Blue),
            )));
        }
    }

    for group in &view.groups {
        lines.push(Line::default());
        for field in &group.fields {
            lines.push(Line::from(Span::styled(
                field.label.clone(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )));
            let style = match field.body {
                FieldBody::Text(_) => Style::default(),
                FieldBody::Structured(_) => Style::default().fg(Color::Gray),
            };
            for text in sanitize_for_display(field.body.as_str()).lines() {
                lines.push(Line::from(Span::styled(format!("{BODY_INDENT}{text}"), style)));
            }
        }
    }

    lines
}

/// Renders the response section, scrolled by `scroll` lines.
pub fn render_result(frame: &mut Frame, area: Rect, payload: &Value, scroll: u16) {
    let view = ResultView::from_payload(payload);
    let lines = result_lines(&view);
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}
