//! Form definitions for the three wizard branches.
//!
//! Each branch is described by one static [`FormDefinition`]: the ordered
//! field list (which is also the query-parameter order), the endpoint, the
//! request encoding and the user-facing copy. [`FormData`] holds the values
//! for one branch and knows how to encode them.

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};

/// Languages offered by the language selector, as sent to the backend.
pub const LANGUAGES: &[&str] = &["english", "hindi"];

/// The three things the wizard can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    ChapterLessonPlan,
    TopicLessonPlan,
    Assessment,
}

impl Branch {
    pub const ALL: [Branch; 3] = [
        Branch::ChapterLessonPlan,
        Branch::TopicLessonPlan,
        Branch::Assessment,
    ];

    pub fn definition(self) -> &'static FormDefinition {
        match self {
            Branch::ChapterLessonPlan => &CHAPTER_FORM,
            Branch::TopicLessonPlan => &TOPIC_FORM,
            Branch::Assessment => &ASSESSMENT_FORM,
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Branch::ChapterLessonPlan => "chapter",
            Branch::TopicLessonPlan => "topic",
            Branch::Assessment => "assessment",
        };
        f.write_str(name)
    }
}

/// How a form is put on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Values as query parameters, empty body.
    Query,
    /// Values as query parameters, multipart body with an optional `file` part.
    QueryMultipart,
    /// Values as a JSON object body.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// Non-negative integer. `min` is a display hint only.
    Number { min: u32, default: u32 },
    /// One of [`LANGUAGES`].
    Language,
    /// Boolean switch, on by default.
    Flag,
    /// Optional local file attachment.
    File,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Wire name (query parameter or JSON key).
    pub key: &'static str,
    pub label: &'static str,
    pub placeholder: Option<&'static str>,
    pub kind: FieldKind,
}

impl FieldSpec {
    const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            key,
            label,
            placeholder: None,
            kind,
        }
    }

    const fn text(key: &'static str, label: &'static str, placeholder: &'static str) -> Self {
        Self {
            key,
            label,
            placeholder: Some(placeholder),
            kind: FieldKind::Text,
        }
    }

    fn default_value(&self) -> FieldValue {
        match self.kind {
            FieldKind::Text => FieldValue::Text(String::new()),
            FieldKind::Number { default, .. } => FieldValue::Number(default),
            FieldKind::Language => FieldValue::Text(LANGUAGES[0].to_string()),
            FieldKind::Flag => FieldValue::Flag(true),
            FieldKind::File => FieldValue::File(None),
        }
    }
}

/// Static description of one branch's form.
#[derive(Debug)]
pub struct FormDefinition {
    pub branch: Branch,
    pub title: &'static str,
    /// Endpoint path relative to the public backend URL.
    pub path: &'static str,
    pub encoding: Encoding,
    pub fields: &'static [FieldSpec],
    pub submit_label: &'static str,
    pub submitting_label: &'static str,
    pub success_message: &'static str,
    pub failure_message: &'static str,
}

impl FormDefinition {
    pub fn field(&self, key: &str) -> Option<(usize, &'static FieldSpec)> {
        self.fields.iter().enumerate().find(|(_, f)| f.key == key)
    }
}

const BOARD: FieldSpec = FieldSpec::text("Board", "Board", "e.g., CBSE, ICSE");
const GRADE: FieldSpec = FieldSpec::text("Grade", "Grade", "e.g., 10th");
const SUBJECT: FieldSpec = FieldSpec::text("Subject", "Subject", "e.g., Mathematics");
const CHAPTER_NUMBER: FieldSpec = FieldSpec::text("Chapter_Number", "Chapter Number", "e.g., 1");
const TOPIC: FieldSpec = FieldSpec::text("Topic", "Topic", "e.g., Quadratic Equations");
const LECTURES: FieldSpec = FieldSpec::new(
    "Number_of_Lecture",
    "Number of Lectures",
    FieldKind::Number { min: 1, default: 1 },
);
const DURATION: FieldSpec = FieldSpec::new(
    "Duration_of_Lecture",
    "Duration (minutes)",
    FieldKind::Number {
        min: 15,
        default: 45,
    },
);
const CLASS_STRENGTH: FieldSpec = FieldSpec::new(
    "Class_Strength",
    "Class Strength",
    FieldKind::Number {
        min: 1,
        default: 30,
    },
);
const LANGUAGE: FieldSpec = FieldSpec::new("Language", "Language", FieldKind::Language);
const QUIZ: FieldSpec = FieldSpec::new("Quiz", "Include Quiz", FieldKind::Flag);
const ASSIGNMENT: FieldSpec = FieldSpec::new("Assignment", "Include Assignment", FieldKind::Flag);
const STRUCTURED_OUTPUT: FieldSpec =
    FieldSpec::new("Structured_Output", "Structured Output", FieldKind::Flag);
const FILE: FieldSpec = FieldSpec::new("file", "Upload PDF (Optional)", FieldKind::File);

static CHAPTER_FORM: FormDefinition = FormDefinition {
    branch: Branch::ChapterLessonPlan,
    title: "Chapter-based Lesson Plan Details",
    path: "/lessonplan/Lesson_Plan",
    encoding: Encoding::Query,
    fields: &[
        BOARD,
        GRADE,
        SUBJECT,
        CHAPTER_NUMBER,
        LECTURES,
        DURATION,
        CLASS_STRENGTH,
        LANGUAGE,
        QUIZ,
        ASSIGNMENT,
        STRUCTURED_OUTPUT,
    ],
    submit_label: "Generate Chapter-based Lesson Plan",
    submitting_label: "Generating Chapter-based Lesson Plan...",
    success_message: "Chapter-based lesson plan generated successfully!",
    failure_message: "Failed to generate chapter-based lesson plan",
};

static TOPIC_FORM: FormDefinition = FormDefinition {
    branch: Branch::TopicLessonPlan,
    title: "Topic-based Lesson Plan Details",
    path: "/lessonplan/Lesson_Plan_from_Topic",
    encoding: Encoding::QueryMultipart,
    fields: &[
        BOARD,
        GRADE,
        SUBJECT,
        TOPIC,
        LECTURES,
        DURATION,
        CLASS_STRENGTH,
        LANGUAGE,
        QUIZ,
        ASSIGNMENT,
        STRUCTURED_OUTPUT,
        FILE,
    ],
    submit_label: "Generate Topic-based Lesson Plan",
    submitting_label: "Generating Topic-based Lesson Plan...",
    success_message: "Topic-based lesson plan generated successfully!",
    failure_message: "Failed to generate topic-based lesson plan",
};

static ASSESSMENT_FORM: FormDefinition = FormDefinition {
    branch: Branch::Assessment,
    title: "Assessment Details",
    path: "/student/assessment",
    encoding: Encoding::Json,
    fields: &[
        BOARD,
        GRADE,
        SUBJECT,
        CHAPTER_NUMBER,
        LECTURES,
        DURATION,
        LANGUAGE,
        QUIZ,
        ASSIGNMENT,
        STRUCTURED_OUTPUT,
    ],
    submit_label: "Start Assessment Session",
    submitting_label: "Starting Assessment...",
    success_message: "Assessment session started successfully!",
    failure_message: "Failed to start assessment",
};

/// Current value of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Number(u32),
    Flag(bool),
    File(Option<PathBuf>),
}

impl FieldValue {
    /// Query-string rendering. Attachments never go in the query.
    pub fn as_param(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Number(n) => Some(n.to_string()),
            FieldValue::Flag(b) => Some(b.to_string()),
            FieldValue::File(_) => None,
        }
    }

    pub fn as_json(&self) -> Option<Value> {
        match self {
            FieldValue::Text(s) => Some(Value::String(s.clone())),
            FieldValue::Number(n) => Some(Value::from(*n)),
            FieldValue::Flag(b) => Some(Value::Bool(*b)),
            FieldValue::File(_) => None,
        }
    }

    /// Text shown in an input box.
    pub fn display(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Flag(b) => if *b { "on" } else { "off" }.to_string(),
            FieldValue::File(p) => p
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Values for one branch's form, in definition order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormData {
    branch: Branch,
    values: Vec<FieldValue>,
}

impl FormData {
    pub fn defaults(branch: Branch) -> Self {
        let values = branch
            .definition()
            .fields
            .iter()
            .map(FieldSpec::default_value)
            .collect();
        Self { branch, values }
    }

    pub fn branch(&self) -> Branch {
        self.branch
    }

    pub fn definition(&self) -> &'static FormDefinition {
        self.branch.definition()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = (&'static FieldSpec, &FieldValue)> {
        self.definition().fields.iter().zip(self.values.iter())
    }

    pub fn value(&self, index: usize) -> Option<&FieldValue> {
        self.values.get(index)
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        let (index, _) = self.definition().field(key)?;
        self.values.get(index)
    }

    /// Sets a field from its textual form (CLI flags, tests).
    ///
    /// Numbers must parse as non-negative integers, flags as `true`/`false`,
    /// the language must be one of [`LANGUAGES`]. An empty attachment path
    /// clears the attachment.
    pub fn set_from_str(&mut self, key: &str, raw: &str) -> Result<()> {
        let Some((index, spec)) = self.definition().field(key) else {
            bail!("Unknown field '{key}' for {} form", self.branch);
        };
        let value = match spec.kind {
            FieldKind::Text => FieldValue::Text(raw.to_string()),
            FieldKind::Number { .. } => FieldValue::Number(
                raw.trim()
                    .parse()
                    .with_context(|| format!("Invalid number for {key}: '{raw}'"))?,
            ),
            FieldKind::Language => {
                let lang = raw.trim().to_lowercase();
                if !LANGUAGES.contains(&lang.as_str()) {
                    bail!(
                        "Unsupported language '{raw}' (expected one of: {})",
                        LANGUAGES.join(", ")
                    );
                }
                FieldValue::Text(lang)
            }
            FieldKind::Flag => FieldValue::Flag(
                raw.trim()
                    .parse()
                    .with_context(|| format!("Invalid value for {key}: '{raw}'"))?,
            ),
            FieldKind::File => {
                let path = raw.trim();
                FieldValue::File((!path.is_empty()).then(|| PathBuf::from(path)))
            }
        };
        self.values[index] = value;
        Ok(())
    }

    /// Types one character into the field at `index`.
    ///
    /// Text and file fields append it. Number fields take digits only and
    /// ignore input that would overflow. Flags and the language ignore typing.
    pub fn insert_char(&mut self, index: usize, c: char) {
        let kind = self.kind_at(index);
        match (kind, self.values.get_mut(index)) {
            (Some(FieldKind::Text), Some(FieldValue::Text(s))) => s.push(c),
            (_, Some(FieldValue::Number(n))) => {
                if let Some(next) = c
                    .to_digit(10)
                    .and_then(|d| n.checked_mul(10)?.checked_add(d))
                {
                    *n = next;
                }
            }
            (_, Some(FieldValue::File(path))) => {
                let mut s = path
                    .take()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default();
                s.push(c);
                *path = Some(PathBuf::from(s));
            }
            _ => {}
        }
    }

    /// Inserts pasted text. Line breaks become spaces; pasted paths are trimmed.
    pub fn insert_str(&mut self, index: usize, text: &str) {
        let is_file = matches!(self.values.get(index), Some(FieldValue::File(_)));
        let text = text.replace(['\r', '\n'], " ");
        let text = if is_file { text.trim() } else { text.as_str() };
        for c in text.chars() {
            self.insert_char(index, c);
        }
    }

    pub fn backspace(&mut self, index: usize) {
        let kind = self.kind_at(index);
        match (kind, self.values.get_mut(index)) {
            (Some(FieldKind::Text), Some(FieldValue::Text(s))) => {
                s.pop();
            }
            (_, Some(FieldValue::Number(n))) => *n /= 10,
            (_, Some(FieldValue::File(path))) => {
                let mut s = path
                    .take()
                    .map(|p| p.to_string_lossy().into_owned())
                    .unwrap_or_default();
                s.pop();
                *path = (!s.is_empty()).then(|| PathBuf::from(s));
            }
            _ => {}
        }
    }

    fn kind_at(&self, index: usize) -> Option<FieldKind> {
        self.definition().fields.get(index).map(|f| f.kind)
    }

    /// Flips a flag or cycles the language. Other fields are untouched.
    pub fn toggle(&mut self, index: usize) {
        let kind = self.kind_at(index);
        match (kind, self.values.get_mut(index)) {
            (Some(FieldKind::Flag), Some(FieldValue::Flag(b))) => *b = !*b,
            (Some(FieldKind::Language), Some(FieldValue::Text(lang))) => {
                let next = LANGUAGES
                    .iter()
                    .position(|l| *l == lang.as_str())
                    .map_or(0, |i| (i + 1) % LANGUAGES.len());
                *lang = LANGUAGES[next].to_string();
            }
            _ => {}
        }
    }

    /// Query parameters in definition order, every value stringified.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        self.fields()
            .filter_map(|(spec, value)| value.as_param().map(|v| (spec.key, v)))
            .collect()
    }

    /// JSON body with numbers as numbers and flags as booleans.
    pub fn json_body(&self) -> Value {
        let map: Map<String, Value> = self
            .fields()
            .filter_map(|(spec, value)| value.as_json().map(|v| (spec.key.to_string(), v)))
            .collect();
        Value::Object(map)
    }

    /// The attached file, if any.
    pub fn attachment(&self) -> Option<&Path> {
        self.values.iter().find_map(|v| match v {
            FieldValue::File(Some(path)) => Some(path.as_path()),
            _ => None,
        })
    }
}

/// The three form records held by the wizard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSet {
    pub chapter: FormData,
    pub topic: FormData,
    pub assessment: FormData,
}

impl Default for FormSet {
    fn default() -> Self {
        Self {
            chapter: FormData::defaults(Branch::ChapterLessonPlan),
            topic: FormData::defaults(Branch::TopicLessonPlan),
            assessment: FormData::defaults(Branch::Assessment),
        }
    }
}

impl FormSet {
    pub fn get(&self, branch: Branch) -> &FormData {
        match branch {
            Branch::ChapterLessonPlan => &self.chapter,
            Branch::TopicLessonPlan => &self.topic,
            Branch::Assessment => &self.assessment,
        }
    }

    pub fn get_mut(&mut self, branch: Branch) -> &mut FormData {
        match branch {
            Branch::ChapterLessonPlan => &mut self.chapter,
            Branch::TopicLessonPlan => &mut self.topic,
            Branch::Assessment => &mut self.assessment,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn keys(form: &FormData) -> Vec<&'static str> {
        form.query_pairs().into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn test_chapter_defaults_as_query() {
        let form = FormData::defaults(Branch::ChapterLessonPlan);
        let pairs = form.query_pairs();
        assert_eq!(
            keys(&form),
            vec![
                "Board",
                "Grade",
                "Subject",
                "Chapter_Number",
                "Number_of_Lecture",
                "Duration_of_Lecture",
                "Class_Strength",
                "Language",
                "Quiz",
                "Assignment",
                "Structured_Output",
            ]
        );
        let values: Vec<&str> = pairs.iter().map(|(_, v)| v.as_str()).collect();
        assert_eq!(
            values,
            vec!["", "", "", "", "1", "45", "30", "english", "true", "true", "true"]
        );
    }

    #[test]
    fn test_topic_query_keeps_class_strength_and_skips_file() {
        let mut form = FormData::defaults(Branch::TopicLessonPlan);
        form.set_from_str("file", "/tmp/notes.pdf").unwrap();
        let keys = keys(&form);
        assert_eq!(keys.len(), 11);
        assert_eq!(keys[3], "Topic");
        assert!(keys.contains(&"Class_Strength"));
        assert!(!keys.contains(&"file"));
        assert_eq!(form.attachment(), Some(Path::new("/tmp/notes.pdf")));
    }

    #[test]
    fn test_assessment_json_body_types() {
        let mut form = FormData::defaults(Branch::Assessment);
        form.set_from_str("Board", "CBSE").unwrap();
        form.set_from_str("Quiz", "false").unwrap();
        assert_eq!(
            form.json_body(),
            json!({
                "Board": "CBSE",
                "Grade": "",
                "Subject": "",
                "Chapter_Number": "",
                "Number_of_Lecture": 1,
                "Duration_of_Lecture": 45,
                "Language": "english",
                "Quiz": false,
                "Assignment": true,
                "Structured_Output": true,
            })
        );
    }

    #[test]
    fn test_minimums_do_not_gate_values() {
        let mut form = FormData::defaults(Branch::ChapterLessonPlan);
        form.set_from_str("Duration_of_Lecture", "5").unwrap();
        assert_eq!(form.get("Duration_of_Lecture"), Some(&FieldValue::Number(5)));
    }

    #[test]
    fn test_set_from_str_rejects_bad_input() {
        let mut form = FormData::defaults(Branch::Assessment);
        assert!(form.set_from_str("Class_Strength", "30").is_err());
        assert!(form.set_from_str("Number_of_Lecture", "two").is_err());
        assert!(form.set_from_str("Language", "french").is_err());
        form.set_from_str("Language", "Hindi").unwrap();
        assert_eq!(form.get("Language"), Some(&FieldValue::Text("hindi".into())));
    }

    #[test]
    fn test_typing_into_number_field() {
        let mut form = FormData::defaults(Branch::ChapterLessonPlan);
        let (idx, _) = form.definition().field("Number_of_Lecture").unwrap();
        form.insert_char(idx, '2');
        form.insert_char(idx, 'x');
        assert_eq!(form.value(idx), Some(&FieldValue::Number(12)));
        form.backspace(idx);
        form.backspace(idx);
        assert_eq!(form.value(idx), Some(&FieldValue::Number(0)));
    }

    #[test]
    fn test_typing_ignored_for_language_and_flags() {
        let mut form = FormData::defaults(Branch::ChapterLessonPlan);
        let (lang, _) = form.definition().field("Language").unwrap();
        let (quiz, _) = form.definition().field("Quiz").unwrap();
        form.insert_char(lang, 'x');
        form.backspace(lang);
        form.insert_char(quiz, 'x');
        assert_eq!(form, FormData::defaults(Branch::ChapterLessonPlan));
    }

    #[test]
    fn test_toggle_cycles_language_and_flips_flag() {
        let mut form = FormData::defaults(Branch::TopicLessonPlan);
        let (lang, _) = form.definition().field("Language").unwrap();
        let (quiz, _) = form.definition().field("Quiz").unwrap();
        form.toggle(lang);
        form.toggle(quiz);
        assert_eq!(form.get("Language"), Some(&FieldValue::Text("hindi".into())));
        assert_eq!(form.get("Quiz"), Some(&FieldValue::Flag(false)));
        form.toggle(lang);
        assert_eq!(form.get("Language"), Some(&FieldValue::Text("english".into())));
    }

    #[test]
    fn test_paste_into_file_field_trims() {
        let mut form = FormData::defaults(Branch::TopicLessonPlan);
        let (idx, _) = form.definition().field("file").unwrap();
        form.insert_str(idx, "  /home/me/chapter 3.pdf\n");
        assert_eq!(form.attachment(), Some(Path::new("/home/me/chapter 3.pdf")));
        for _ in 0.."/home/me/chapter 3.pdf".len() {
            form.backspace(idx);
        }
        assert_eq!(form.attachment(), None);
    }

    #[test]
    fn test_form_set_reset() {
        let mut forms = FormSet::default();
        forms.get_mut(Branch::Assessment).set_from_str("Board", "ICSE").unwrap();
        forms.reset();
        assert_eq!(forms, FormSet::default());
    }
}
