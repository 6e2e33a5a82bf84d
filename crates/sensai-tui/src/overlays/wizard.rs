//! Course-creation dialog.
//!
//! Choice steps list their options (Up/Down + Enter). The form step moves a
//! focus cursor over the fields and the submit button. The response section
//! is drawn under whichever step is shown.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use sensai_core::forms::{FieldKind, FieldValue, FormData};
use sensai_core::response::{ResultView, capitalize_words};
use sensai_core::wizard::{Audience, LessonPlanType, Wizard, WizardStep, offered_creation_types};

use super::OverlayUpdate;
use super::render_utils::{InputHint, OverlayConfig, render_overlay, render_separator};
use crate::features::result::{render_result, result_lines};
use crate::mutations::{FieldEdit, StateMutation, WizardMutation};
use crate::render::SPINNER_FRAMES;
use crate::state::TuiState;

pub const DIALOG_TITLE: &str = "✦ Create Courses with AI";

const DIALOG_WIDTH: u16 = 88;
const DIALOG_HEIGHT: u16 = 44;
const LABEL_WIDTH: usize = 22;
const ACCENT: Color = Color::Magenta;

/// Lines moved per PageUp/PageDown in the response section.
const RESULT_PAGE: u16 = 10;

/// View state of the dialog. Wizard data lives in `TuiState`.
#[derive(Debug, Clone, Default)]
pub struct WizardOverlay {
    /// Highlighted option on choice steps.
    pub cursor: usize,
    /// Focused form row; `fields.len()` is the submit button.
    pub focus: usize,
    pub result_scroll: u16,
}

fn wizard(mutation: WizardMutation) -> StateMutation {
    StateMutation::Wizard(mutation)
}

impl WizardOverlay {
    pub fn open() -> Self {
        Self::default()
    }

    fn reset_view(&mut self) {
        self.cursor = 0;
        self.focus = 0;
    }

    fn close(&mut self) -> OverlayUpdate {
        self.reset_view();
        OverlayUpdate::close().with_mutations(vec![wizard(WizardMutation::Close)])
    }

    pub fn handle_key(&mut self, tui: &TuiState, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let has_response = tui.wizard.response().is_some();

        match key.code {
            KeyCode::Char('c') if ctrl => return self.close(),
            KeyCode::Esc => {
                if tui.wizard.step() == WizardStep::ChooseAudience {
                    return self.close();
                }
                self.reset_view();
                return OverlayUpdate::stay().with_mutations(vec![wizard(WizardMutation::Back)]);
            }
            KeyCode::Char('n') if ctrl && has_response => {
                self.reset_view();
                self.result_scroll = 0;
                return OverlayUpdate::stay().with_mutations(vec![
                    StateMutation::DismissToast,
                    wizard(WizardMutation::CreateAnother),
                ]);
            }
            KeyCode::PageDown if has_response => {
                self.result_scroll = self
                    .result_scroll
                    .saturating_add(RESULT_PAGE)
                    .min(max_result_scroll(&tui.wizard));
                return OverlayUpdate::stay();
            }
            KeyCode::PageUp if has_response => {
                self.result_scroll = self.result_scroll.saturating_sub(RESULT_PAGE);
                return OverlayUpdate::stay();
            }
            _ => {}
        }

        match tui.wizard.step() {
            WizardStep::ChooseAudience => {
                self.handle_choice(key, &Audience::ALL, WizardMutation::SelectAudience)
            }
            WizardStep::ChooseCreationType { audience } => self.handle_choice(
                key,
                offered_creation_types(audience),
                WizardMutation::SelectCreationType,
            ),
            WizardStep::ChooseLessonPlanType => self.handle_choice(
                key,
                &LessonPlanType::ALL,
                WizardMutation::SelectLessonPlanType,
            ),
            WizardStep::Form { .. } => match tui.wizard.current_form() {
                Some(form) => self.handle_form_key(form, key),
                None => OverlayUpdate::stay(),
            },
        }
    }

    fn handle_choice<T: Copy>(
        &mut self,
        key: KeyEvent,
        options: &[T],
        select: impl Fn(T) -> WizardMutation,
    ) -> OverlayUpdate {
        let len = options.len().max(1);
        match key.code {
            KeyCode::Up | KeyCode::BackTab => {
                self.cursor = (self.cursor + len - 1) % len;
                OverlayUpdate::stay()
            }
            KeyCode::Down | KeyCode::Tab => {
                self.cursor = (self.cursor + 1) % len;
                OverlayUpdate::stay()
            }
            KeyCode::Enter => match options.get(self.cursor).copied() {
                Some(option) => {
                    self.reset_view();
                    OverlayUpdate::stay().with_mutations(vec![wizard(select(option))])
                }
                None => OverlayUpdate::stay(),
            },
            _ => OverlayUpdate::stay(),
        }
    }

    fn handle_form_key(&mut self, form: &FormData, key: KeyEvent) -> OverlayUpdate {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let rows = form.len() + 1;
        let on_submit = self.focus >= form.len();
        let toggles = form
            .definition()
            .fields
            .get(self.focus)
            .is_some_and(|f| matches!(f.kind, FieldKind::Flag | FieldKind::Language));
        let focus = self.focus;
        let edit = |edit: FieldEdit| {
            OverlayUpdate::stay().with_mutations(vec![wizard(WizardMutation::EditField {
                index: focus,
                edit,
            })])
        };

        match key.code {
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % rows;
                OverlayUpdate::stay()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + rows - 1) % rows;
                OverlayUpdate::stay()
            }
            KeyCode::Char('s') if ctrl => {
                OverlayUpdate::stay().with_mutations(vec![wizard(WizardMutation::Submit)])
            }
            KeyCode::Enter if on_submit => {
                OverlayUpdate::stay().with_mutations(vec![wizard(WizardMutation::Submit)])
            }
            KeyCode::Enter => {
                self.focus = (self.focus + 1) % rows;
                OverlayUpdate::stay()
            }
            _ if on_submit => OverlayUpdate::stay(),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') if toggles => {
                edit(FieldEdit::Toggle)
            }
            KeyCode::Backspace => edit(FieldEdit::Backspace),
            KeyCode::Char(c) if !ctrl => edit(FieldEdit::Char(c)),
            _ => OverlayUpdate::stay(),
        }
    }

    /// Pasted text goes to the focused field.
    pub fn handle_paste(&mut self, tui: &TuiState, text: &str) -> OverlayUpdate {
        match tui.wizard.current_form() {
            Some(form) if self.focus < form.len() => {
                OverlayUpdate::stay().with_mutations(vec![wizard(WizardMutation::EditField {
                    index: self.focus,
                    edit: FieldEdit::Paste(text.to_string()),
                })])
            }
            _ => OverlayUpdate::stay(),
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, tui: &TuiState) {
        let wizard = &tui.wizard;
        let has_response = wizard.response().is_some();
        let at_start = wizard.step() == WizardStep::ChooseAudience;
        let is_form = matches!(wizard.step(), WizardStep::Form { .. });

        let mut hints = Vec::new();
        if is_form {
            hints.push(InputHint::new("Tab", "next"));
            hints.push(InputHint::new("Space", "toggle"));
            hints.push(InputHint::new("Ctrl+S", "submit"));
        } else {
            hints.push(InputHint::new("↑↓", "select"));
            hints.push(InputHint::new("Enter", "choose"));
        }
        hints.push(InputHint::new("Esc", if at_start { "close" } else { "back" }));
        if has_response {
            hints.push(InputHint::new("PgUp/PgDn", "scroll"));
            hints.push(InputHint::new("Ctrl+N", "create another"));
        }
        hints.push(InputHint::new("Ctrl+C", "close"));

        let body = render_overlay(
            frame,
            area,
            &OverlayConfig {
                title: DIALOG_TITLE,
                border_color: ACCENT,
                width: DIALOG_WIDTH,
                height: DIALOG_HEIGHT,
                hints: &hints,
            },
        );

        let lines = step_lines(self, wizard, tui.spinner_frame);
        let step_height = (lines.len() as u16).min(body.height);
        let step_area = Rect::new(body.x, body.y, body.width, step_height);
        frame.render_widget(Paragraph::new(lines), step_area);

        if let Some(payload) = wizard.response() {
            let remaining = body.height.saturating_sub(step_height);
            if remaining > 2 {
                let rule_area = Rect::new(body.x, step_area.y + step_height, body.width, remaining);
                render_separator(frame, rule_area, 0);
                let result_area = Rect::new(body.x, rule_area.y + 1, body.width, remaining - 1);
                render_result(frame, result_area, payload, self.result_scroll);
            }
        }
    }
}

/// Last line of the response section that can be scrolled to the top.
fn max_result_scroll(wizard: &Wizard) -> u16 {
    wizard.response().map_or(0, |payload| {
        let lines = result_lines(&ResultView::from_payload(payload)).len();
        u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
    })
}

fn heading(text: String) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn option_lines(lines: &mut Vec<Line<'static>>, selected: bool, label: &str, description: &str) {
    let (marker, style) = if selected {
        ("▸ ", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
    } else {
        ("  ", Style::default().add_modifier(Modifier::BOLD))
    };
    lines.push(Line::from(vec![
        Span::styled(marker, Style::default().fg(ACCENT)),
        Span::styled(label.to_string(), style),
    ]));
    lines.push(Line::from(Span::styled(
        format!("    {description}"),
        Style::default().fg(Color::DarkGray),
    )));
}

/// Lines for the current step (everything above the response section).
pub fn step_lines(
    view: &WizardOverlay,
    wizard: &Wizard,
    spinner_frame: usize,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    match wizard.step() {
        WizardStep::ChooseAudience => {
            lines.push(heading("Who is this for?".to_string()));
            lines.push(Line::default());
            for (i, audience) in Audience::ALL.iter().enumerate() {
                option_lines(
                    &mut lines,
                    i == view.cursor,
                    audience.label(),
                    audience.description(),
                );
            }
        }
        WizardStep::ChooseCreationType { audience } => {
            lines.push(heading(format!("What would you like to create for {audience}?")));
            lines.push(Line::default());
            for (i, kind) in offered_creation_types(audience).iter().enumerate() {
                option_lines(&mut lines, i == view.cursor, kind.label(), kind.description());
            }
        }
        WizardStep::ChooseLessonPlanType => {
            lines.push(heading("Choose your lesson plan type:".to_string()));
            lines.push(Line::default());
            for (i, kind) in LessonPlanType::ALL.iter().enumerate() {
                option_lines(&mut lines, i == view.cursor, kind.label(), kind.description());
            }
        }
        WizardStep::Form { .. } => {
            if let Some(form) = wizard.current_form() {
                form_lines(&mut lines, view.focus, form, wizard.is_submitting(), spinner_frame);
            }
        }
    }
    lines
}

fn form_lines(
    lines: &mut Vec<Line<'static>>,
    focus: usize,
    form: &FormData,
    submitting: bool,
    spinner_frame: usize,
) {
    let definition = form.definition();
    lines.push(heading(definition.title.to_string()));
    lines.push(Line::default());

    for (i, (spec, value)) in form.fields().enumerate() {
        let focused = i == focus;
        let marker = if focused { "▸ " } else { "  " };
        let label_style = if focused {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let mut spans = vec![
            Span::styled(marker, Style::default().fg(ACCENT)),
            Span::styled(format!("{:<LABEL_WIDTH$}", spec.label), label_style),
        ];
        spans.extend(value_spans(spec.kind, spec.placeholder, value, focused));
        lines.push(Line::from(spans));
    }

    lines.push(Line::default());
    let submit_focused = focus >= form.len();
    let button = if submitting {
        let spinner = SPINNER_FRAMES[spinner_frame % SPINNER_FRAMES.len()];
        Span::styled(
            format!("[ {spinner} {} ]", definition.submitting_label),
            Style::default().fg(Color::DarkGray),
        )
    } else if submit_focused {
        Span::styled(
            format!("[ {} ]", definition.submit_label),
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            format!("[ {} ]", definition.submit_label),
            Style::default().fg(ACCENT),
        )
    };
    lines.push(Line::from(vec![Span::raw("  "), button]));
}

fn value_spans(
    kind: FieldKind,
    placeholder: Option<&'static str>,
    value: &FieldValue,
    focused: bool,
) -> Vec<Span<'static>> {
    let cursor = || Span::styled("█", Style::default().fg(ACCENT));
    let dim = Style::default().fg(Color::DarkGray);

    match (kind, value) {
        (FieldKind::Flag, FieldValue::Flag(on)) => {
            vec![Span::raw(if *on { "[x]" } else { "[ ]" })]
        }
        (FieldKind::Language, FieldValue::Text(lang)) => {
            vec![Span::raw(format!("‹ {} ›", capitalize_words(lang)))]
        }
        (FieldKind::Number { min, .. }, value) => {
            let mut spans = vec![Span::raw(value.display())];
            if focused {
                spans.push(cursor());
            }
            spans.push(Span::styled(format!("  (min {min})"), dim));
            spans
        }
        (_, value) => {
            let text = value.display();
            let mut spans = Vec::new();
            if text.is_empty() {
                if focused {
                    spans.push(cursor());
                }
                let hint = match kind {
                    FieldKind::File => "Path to a PDF file",
                    _ => placeholder.unwrap_or(""),
                };
                spans.push(Span::styled(hint, dim));
            } else {
                spans.push(Span::raw(text));
                if focused {
                    spans.push(cursor());
                }
            }
            spans
        }
    }
}
