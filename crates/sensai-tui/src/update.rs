//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.

use std::time::Instant;

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use sensai_core::forms::Branch;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::features::toast::{self, ToastState};
use crate::mutations::{FieldEdit, StateMutation, WizardMutation};
use crate::overlays::{Overlay, OverlayTransition, OverlayUpdate, WizardOverlay};
use crate::state::{AppState, TuiState};

/// The main reducer function.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Tick => {
            app.tui.spinner_frame = app.tui.spinner_frame.wrapping_add(1);
            toast::expire(&mut app.tui.toast, Instant::now());
            vec![]
        }
        UiEvent::Terminal(event) => handle_terminal_event(app, event),
        UiEvent::SubmissionStarted { generation, cancel } => {
            handle_submission_started(&mut app.tui, generation, cancel)
        }
        UiEvent::SubmissionFinished {
            generation,
            branch,
            result,
        } => {
            handle_submission_finished(app, generation, branch, result);
            vec![]
        }
    }
}

fn handle_submission_started(
    tui: &mut TuiState,
    generation: u64,
    cancel: CancellationToken,
) -> Vec<UiEffect> {
    // The wizard was reset while the task was being spawned.
    if generation != tui.wizard.generation() {
        return vec![UiEffect::CancelSubmission {
            token: Some(cancel),
        }];
    }
    tui.submission = Some(cancel);
    vec![]
}

fn handle_submission_finished(
    app: &mut AppState,
    generation: u64,
    branch: Branch,
    result: Result<Value, String>,
) {
    let succeeded = result.is_ok();
    let Some(toast) = app.tui.wizard.complete_submit(generation, branch, result) else {
        return;
    };
    app.tui.submission = None;
    app.tui.toast = Some(ToastState::new(toast));
    if succeeded && let Some(overlay) = app.overlay.as_mut() {
        overlay.on_response();
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => handle_key(app, key),
        Event::Paste(text) => match app.overlay.as_mut() {
            Some(overlay) => {
                let update = overlay.handle_paste(&app.tui, &text);
                apply_overlay_update(app, update)
            }
            None => vec![],
        },
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if let Some(overlay) = app.overlay.as_mut() {
        let update = overlay.handle_key(&app.tui, key);
        return apply_overlay_update(app, update);
    }
    handle_launcher_key(app, key)
}

/// Keys on the launcher screen (no dialog open).
fn handle_launcher_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter | KeyCode::Char('n') if !ctrl => {
            app.overlay = Some(Overlay::Wizard(WizardOverlay::open()));
            vec![]
        }
        KeyCode::Esc if app.tui.toast.is_some() => {
            apply_mutations(&mut app.tui, vec![StateMutation::DismissToast])
        }
        KeyCode::Char('q') | KeyCode::Esc => quit(&mut app.tui),
        KeyCode::Char('c') if ctrl => quit(&mut app.tui),
        _ => vec![],
    }
}

fn quit(tui: &mut TuiState) -> Vec<UiEffect> {
    tui.should_quit = true;
    let mut effects = Vec::new();
    if let Some(token) = tui.submission.take() {
        effects.push(UiEffect::CancelSubmission { token: Some(token) });
    }
    effects.push(UiEffect::Quit);
    effects
}

fn apply_overlay_update(app: &mut AppState, update: OverlayUpdate) -> Vec<UiEffect> {
    let effects = apply_mutations(&mut app.tui, update.mutations);
    if update.transition == OverlayTransition::Close {
        app.overlay = None;
    }
    effects
}

/// Applies overlay-requested mutations, returning effects they trigger.
fn apply_mutations(tui: &mut TuiState, mutations: Vec<StateMutation>) -> Vec<UiEffect> {
    let mut effects = Vec::new();
    for mutation in mutations {
        match mutation {
            StateMutation::Wizard(mutation) => effects.extend(apply_wizard_mutation(tui, mutation)),
            StateMutation::DismissToast => tui.toast = None,
        }
    }
    effects
}

fn apply_wizard_mutation(tui: &mut TuiState, mutation: WizardMutation) -> Option<UiEffect> {
    let wizard = &mut tui.wizard;
    match mutation {
        WizardMutation::SelectAudience(audience) => {
            wizard.select_audience(audience);
            None
        }
        WizardMutation::SelectCreationType(creation_type) => {
            if let Err(err) = wizard.select_creation_type(creation_type) {
                warn!("{err}");
            }
            None
        }
        WizardMutation::SelectLessonPlanType(plan_type) => {
            if let Err(err) = wizard.select_lesson_plan_type(plan_type) {
                warn!("{err}");
            }
            None
        }
        WizardMutation::Back => {
            wizard.back();
            None
        }
        WizardMutation::EditField { index, edit } => {
            if let Some(form) = wizard.current_form_mut() {
                match edit {
                    FieldEdit::Char(c) => form.insert_char(index, c),
                    FieldEdit::Paste(text) => form.insert_str(index, &text),
                    FieldEdit::Backspace => form.backspace(index),
                    FieldEdit::Toggle => form.toggle(index),
                }
            }
            None
        }
        WizardMutation::Submit => wizard
            .begin_submit()
            .map(|ticket| UiEffect::SubmitForm { ticket }),
        WizardMutation::CreateAnother => {
            wizard.create_another();
            Some(UiEffect::CancelSubmission {
                token: tui.submission.take(),
            })
        }
        WizardMutation::Close => {
            wizard.close(|| debug!("course creation dialog closed"));
            Some(UiEffect::CancelSubmission {
                token: tui.submission.take(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use sensai_core::config::Config;
    use sensai_core::forms::FieldValue;
    use sensai_core::wizard::{Audience, CreationType, LessonPlanType, ToastKind};
    use serde_json::json;

    use super::*;

    fn press(app: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    fn ctrl(app: &mut AppState, c: char) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(
                KeyCode::Char(c),
                KeyModifiers::CONTROL,
            ))),
        )
    }

    /// Opens the dialog and walks to the chapter form.
    fn app_at_chapter_form() -> AppState {
        let mut app = AppState::new(Config::default());
        press(&mut app, KeyCode::Enter);
        apply_mutations(
            &mut app.tui,
            vec![
                StateMutation::Wizard(WizardMutation::SelectAudience(Audience::Teachers)),
                StateMutation::Wizard(WizardMutation::SelectCreationType(
                    CreationType::LessonPlan,
                )),
                StateMutation::Wizard(WizardMutation::SelectLessonPlanType(
                    LessonPlanType::ChapterBased,
                )),
            ],
        );
        app
    }

    fn submit(app: &mut AppState) -> u64 {
        let effects = ctrl(app, 's');
        match effects.as_slice() {
            [UiEffect::SubmitForm { ticket }] => ticket.generation,
            other => panic!("expected SubmitForm, got {other:?}"),
        }
    }

    #[test]
    fn test_enter_opens_dialog_and_q_quits() {
        let mut app = AppState::new(Config::default());
        press(&mut app, KeyCode::Enter);
        assert!(app.overlay.is_some());

        press(&mut app, KeyCode::Esc);
        assert!(app.overlay.is_none());

        let effects = press(&mut app, KeyCode::Char('q'));
        assert!(app.tui.should_quit);
        assert!(matches!(effects.as_slice(), [UiEffect::Quit]));
    }

    #[test]
    fn test_walk_through_choice_steps_with_keys() {
        let mut app = AppState::new(Config::default());
        press(&mut app, KeyCode::Enter);
        // Teachers
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        // Lesson Plans
        press(&mut app, KeyCode::Enter);
        // Topic-based
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            app.tui.wizard.current_form().map(|f| f.branch()),
            Some(Branch::TopicLessonPlan)
        );
    }

    #[test]
    fn test_typing_edits_focused_field() {
        let mut app = app_at_chapter_form();
        press(&mut app, KeyCode::Char('C'));
        press(&mut app, KeyCode::Char('B'));
        press(&mut app, KeyCode::Char('X'));
        press(&mut app, KeyCode::Backspace);
        update(&mut app, UiEvent::Terminal(Event::Paste("SE".to_string())));

        let form = app.tui.wizard.current_form().unwrap();
        assert_eq!(form.get("Board"), Some(&FieldValue::Text("CBSE".into())));
    }

    #[test]
    fn test_submit_is_single_flight() {
        let mut app = app_at_chapter_form();
        submit(&mut app);
        assert!(app.tui.wizard.is_submitting());
        assert!(app.tui.is_busy());
        assert!(ctrl(&mut app, 's').is_empty());
    }

    #[test]
    fn test_success_sets_response_and_toast() {
        let mut app = app_at_chapter_form();
        let generation = submit(&mut app);
        let token = CancellationToken::new();
        update(
            &mut app,
            UiEvent::SubmissionStarted {
                generation,
                cancel: token,
            },
        );
        assert!(app.tui.submission.is_some());

        update(
            &mut app,
            UiEvent::SubmissionFinished {
                generation,
                branch: Branch::ChapterLessonPlan,
                result: Ok(json!({"status": true, "message": "ok"})),
            },
        );

        assert!(!app.tui.wizard.is_submitting());
        assert!(app.tui.submission.is_none());
        assert_eq!(app.tui.wizard.response(), Some(&json!({"status": true, "message": "ok"})));
        let toast = &app.tui.toast.as_ref().unwrap().toast;
        assert_eq!(toast.kind, ToastKind::Success);
        assert_eq!(
            toast.description,
            "Chapter-based lesson plan generated successfully!"
        );
    }

    #[test]
    fn test_failure_shows_error_toast() {
        let mut app = app_at_chapter_form();
        let generation = submit(&mut app);
        update(
            &mut app,
            UiEvent::SubmissionFinished {
                generation,
                branch: Branch::ChapterLessonPlan,
                result: Err("connection refused".to_string()),
            },
        );

        let toast = &app.tui.toast.as_ref().unwrap().toast;
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.description, "Failed to generate chapter-based lesson plan");
        assert!(app.tui.wizard.response().is_none());
    }

    #[test]
    fn test_close_cancels_and_drops_late_result() {
        let mut app = app_at_chapter_form();
        let generation = submit(&mut app);
        let token = CancellationToken::new();
        update(
            &mut app,
            UiEvent::SubmissionStarted {
                generation,
                cancel: token.clone(),
            },
        );

        let effects = ctrl(&mut app, 'c');
        assert!(app.overlay.is_none());
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::CancelSubmission { token: Some(_) }]
        ));

        update(
            &mut app,
            UiEvent::SubmissionFinished {
                generation,
                branch: Branch::ChapterLessonPlan,
                result: Ok(json!({"status": true})),
            },
        );
        assert!(app.tui.wizard.response().is_none());
        assert!(app.tui.toast.is_none());
    }

    #[test]
    fn test_stale_start_is_cancelled_immediately() {
        let mut app = app_at_chapter_form();
        let generation = submit(&mut app);
        ctrl(&mut app, 'c');

        let effects = update(
            &mut app,
            UiEvent::SubmissionStarted {
                generation,
                cancel: CancellationToken::new(),
            },
        );
        assert!(matches!(
            effects.as_slice(),
            [UiEffect::CancelSubmission { token: Some(_) }]
        ));
        assert!(app.tui.submission.is_none());
    }

    #[test]
    fn test_create_another_resets_after_response() {
        let mut app = app_at_chapter_form();
        let generation = submit(&mut app);
        update(
            &mut app,
            UiEvent::SubmissionFinished {
                generation,
                branch: Branch::ChapterLessonPlan,
                result: Ok(json!({"status": true})),
            },
        );

        ctrl(&mut app, 'n');
        assert!(app.overlay.is_some());
        assert!(app.tui.wizard.response().is_none());
        assert!(app.tui.toast.is_none());
        assert_eq!(app.tui.wizard.generation(), generation + 1);
    }

    #[test]
    fn test_launcher_esc_dismisses_toast_before_quitting() {
        let mut app = app_at_chapter_form();
        let generation = submit(&mut app);
        update(
            &mut app,
            UiEvent::SubmissionFinished {
                generation,
                branch: Branch::ChapterLessonPlan,
                result: Err("boom".into()),
            },
        );
        app.overlay = None;

        press(&mut app, KeyCode::Esc);
        assert!(app.tui.toast.is_none());
        assert!(!app.tui.should_quit);
    }
}
