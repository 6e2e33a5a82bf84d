//! Course-creation wizard state machine.
//!
//! ```text
//! ChooseAudience
//!   └─ students ─> ChooseCreationType{students} ─ assessment ─> Form{assessment}
//!   └─ teachers ─> ChooseCreationType{teachers} ─ lessonplan ─> ChooseLessonPlanType
//!                                                               ├─ chapter ─> Form{chapter}
//!                                                               └─ topic   ─> Form{topic}
//! ```
//!
//! Selecting at one level clears every level below it and the displayed
//! response. `back` pops one level and leaves the response alone.
//!
//! Submissions are tagged with the current generation. `reset` and `close`
//! bump the generation, so a completion that arrives afterwards is dropped.

use std::fmt;

use anyhow::{Result, bail};
use serde_json::Value;
use tracing::debug;

use crate::forms::{Branch, FormData, FormSet};
use crate::response::is_truthy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Audience {
    Students,
    Teachers,
}

impl Audience {
    pub const ALL: [Audience; 2] = [Audience::Students, Audience::Teachers];

    pub fn label(self) -> &'static str {
        match self {
            Audience::Students => "Students",
            Audience::Teachers => "Teachers",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Audience::Students => {
                "Create interactive assessments and learning materials for students"
            }
            Audience::Teachers => "Generate comprehensive lesson plans and teaching materials",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Audience::Students => "students",
            Audience::Teachers => "teachers",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CreationType {
    LessonPlan,
    Assessment,
}

impl CreationType {
    pub fn label(self) -> &'static str {
        match self {
            CreationType::LessonPlan => "Lesson Plans",
            CreationType::Assessment => "Student Assessment",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CreationType::LessonPlan => {
                "Generate detailed lesson plans with activities, quizzes, and assignments"
            }
            CreationType::Assessment => "Create interactive assessment sessions for students",
        }
    }
}

impl fmt::Display for CreationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CreationType::LessonPlan => "lessonplan",
            CreationType::Assessment => "assessment",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LessonPlanType {
    ChapterBased,
    TopicBased,
}

impl LessonPlanType {
    pub const ALL: [LessonPlanType; 2] = [LessonPlanType::ChapterBased, LessonPlanType::TopicBased];

    pub fn label(self) -> &'static str {
        match self {
            LessonPlanType::ChapterBased => "Chapter-based Lesson Plan",
            LessonPlanType::TopicBased => "Topic-based Lesson Plan",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            LessonPlanType::ChapterBased => {
                "Generate lesson plans based on chapter number from the curriculum"
            }
            LessonPlanType::TopicBased => {
                "Generate lesson plans based on a specific topic with optional PDF upload"
            }
        }
    }

    pub fn branch(self) -> Branch {
        match self {
            LessonPlanType::ChapterBased => Branch::ChapterLessonPlan,
            LessonPlanType::TopicBased => Branch::TopicLessonPlan,
        }
    }
}

/// Creation types offered to an audience.
pub fn offered_creation_types(audience: Audience) -> &'static [CreationType] {
    match audience {
        Audience::Students => &[CreationType::Assessment],
        Audience::Teachers => &[CreationType::LessonPlan],
    }
}

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    ChooseAudience,
    ChooseCreationType { audience: Audience },
    /// Only reachable as teachers + lesson plan.
    ChooseLessonPlanType,
    Form { branch: Branch },
}

impl WizardStep {
    pub fn audience(self) -> Option<Audience> {
        match self {
            WizardStep::ChooseAudience => None,
            WizardStep::ChooseCreationType { audience } => Some(audience),
            WizardStep::ChooseLessonPlanType => Some(Audience::Teachers),
            WizardStep::Form { branch } => Some(match branch {
                Branch::Assessment => Audience::Students,
                Branch::ChapterLessonPlan | Branch::TopicLessonPlan => Audience::Teachers,
            }),
        }
    }

    pub fn creation_type(self) -> Option<CreationType> {
        match self {
            WizardStep::ChooseAudience | WizardStep::ChooseCreationType { .. } => None,
            WizardStep::ChooseLessonPlanType => Some(CreationType::LessonPlan),
            WizardStep::Form { branch } => Some(match branch {
                Branch::Assessment => CreationType::Assessment,
                Branch::ChapterLessonPlan | Branch::TopicLessonPlan => CreationType::LessonPlan,
            }),
        }
    }

    pub fn lesson_plan_type(self) -> Option<LessonPlanType> {
        match self {
            WizardStep::Form {
                branch: Branch::ChapterLessonPlan,
            } => Some(LessonPlanType::ChapterBased),
            WizardStep::Form {
                branch: Branch::TopicLessonPlan,
            } => Some(LessonPlanType::TopicBased),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// Transient notification shown after a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub title: &'static str,
    pub description: String,
    pub emoji: &'static str,
}

impl Toast {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            title: "Success",
            description: description.into(),
            emoji: "✨",
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            title: "Error",
            description: description.into(),
            emoji: "❌",
        }
    }
}

/// A submission handed to the runtime.
#[derive(Debug, Clone)]
pub struct SubmitTicket {
    pub generation: u64,
    pub form: FormData,
}

#[derive(Debug, Clone)]
pub struct Wizard {
    step: WizardStep,
    pub forms: FormSet,
    response: Option<Value>,
    submitting: bool,
    generation: u64,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new()
    }
}

impl Wizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::ChooseAudience,
            forms: FormSet::default(),
            response: None,
            submitting: false,
            generation: 0,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn response(&self) -> Option<&Value> {
        self.response.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Form shown at the current step, if any.
    pub fn current_form(&self) -> Option<&FormData> {
        match self.step {
            WizardStep::Form { branch } => Some(self.forms.get(branch)),
            _ => None,
        }
    }

    pub fn current_form_mut(&mut self) -> Option<&mut FormData> {
        match self.step {
            WizardStep::Form { branch } => Some(self.forms.get_mut(branch)),
            _ => None,
        }
    }

    pub fn select_audience(&mut self, audience: Audience) {
        self.step = WizardStep::ChooseCreationType { audience };
        self.response = None;
    }

    pub fn select_creation_type(&mut self, creation_type: CreationType) -> Result<()> {
        let Some(audience) = self.step.audience() else {
            bail!("Choose who this is for before picking what to create");
        };
        if !offered_creation_types(audience).contains(&creation_type) {
            bail!("{creation_type} is not offered for {audience}");
        }
        self.step = match creation_type {
            CreationType::LessonPlan => WizardStep::ChooseLessonPlanType,
            CreationType::Assessment => WizardStep::Form {
                branch: Branch::Assessment,
            },
        };
        self.response = None;
        Ok(())
    }

    pub fn select_lesson_plan_type(&mut self, plan_type: LessonPlanType) -> Result<()> {
        if self.step.creation_type() != Some(CreationType::LessonPlan) {
            bail!("Lesson plan type can only be chosen for teacher lesson plans");
        }
        self.step = WizardStep::Form {
            branch: plan_type.branch(),
        };
        self.response = None;
        Ok(())
    }

    /// Pops one selection level. No-op at the start.
    pub fn back(&mut self) {
        self.step = match self.step {
            WizardStep::ChooseAudience | WizardStep::ChooseCreationType { .. } => {
                WizardStep::ChooseAudience
            }
            WizardStep::ChooseLessonPlanType => WizardStep::ChooseCreationType {
                audience: Audience::Teachers,
            },
            WizardStep::Form {
                branch: Branch::ChapterLessonPlan | Branch::TopicLessonPlan,
            } => WizardStep::ChooseLessonPlanType,
            WizardStep::Form {
                branch: Branch::Assessment,
            } => WizardStep::ChooseCreationType {
                audience: Audience::Students,
            },
        };
    }

    /// Starts a submission of the current form.
    ///
    /// Returns `None` while another submission is in flight or when no form
    /// is shown.
    pub fn begin_submit(&mut self) -> Option<SubmitTicket> {
        if self.submitting {
            return None;
        }
        let form = self.current_form()?.clone();
        self.submitting = true;
        Some(SubmitTicket {
            generation: self.generation,
            form,
        })
    }

    /// Applies a finished submission.
    ///
    /// Completions from an earlier generation are dropped and yield no toast.
    /// On failure the previously displayed response stays.
    pub fn complete_submit(
        &mut self,
        generation: u64,
        branch: Branch,
        result: Result<Value, String>,
    ) -> Option<Toast> {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "dropping stale submission result"
            );
            return None;
        }
        self.submitting = false;

        let definition = branch.definition();
        match result {
            Ok(value) => {
                self.response = is_truthy(&value).then_some(value);
                Some(Toast::success(definition.success_message))
            }
            Err(error) => {
                debug!(%branch, %error, "submission failed");
                Some(Toast::error(definition.failure_message))
            }
        }
    }

    /// Full reset: selections, forms and response. Any in-flight submission
    /// becomes stale.
    pub fn reset(&mut self) {
        self.step = WizardStep::ChooseAudience;
        self.forms.reset();
        self.response = None;
        self.submitting = false;
        self.generation += 1;
    }

    /// "Create another": reset while the dialog stays open.
    pub fn create_another(&mut self) {
        self.reset();
    }

    /// Reset, then notify the host that the dialog closed.
    pub fn close<F: FnOnce()>(&mut self, on_close: F) {
        self.reset();
        on_close();
    }
}
