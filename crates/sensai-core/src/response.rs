//! View model for a backend response.
//!
//! Turns an arbitrary JSON payload into what the result section shows: an
//! optional status indicator, an optional message and field groups built from
//! `data`. Presence checks follow JavaScript truthiness, since that is how the
//! backend's payloads are shaped (`""`, `0`, `false` and `null` count as absent).

use std::fmt::Write as _;

use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusIndicator {
    pub text: String,
    /// True only for the literal string `"success"`.
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldBody {
    /// Plain string, shown verbatim with line breaks kept.
    Text(String),
    /// Anything else, pretty-printed JSON.
    Structured(String),
}

impl FieldBody {
    pub fn as_str(&self) -> &str {
        match self {
            FieldBody::Text(s) | FieldBody::Structured(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub key: String,
    pub label: String,
    pub body: FieldBody,
}

impl RenderedField {
    fn new(key: impl Into<String>, value: &Value) -> Self {
        let key = key.into();
        Self {
            label: field_label(&key),
            body: field_body(value),
            key,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldGroup {
    pub fields: Vec<RenderedField>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultView {
    pub status: Option<StatusIndicator>,
    pub message: Option<String>,
    pub groups: Vec<FieldGroup>,
}

impl ResultView {
    pub fn from_payload(payload: &Value) -> Self {
        let Value::Object(map) = payload else {
            return Self::default();
        };

        let status = map
            .get("status")
            .filter(|v| is_truthy(v))
            .map(|v| {
                let text = scalar_text(v);
                StatusIndicator {
                    success: text == "success" && v.is_string(),
                    text,
                }
            });

        let message = map.get("message").filter(|v| is_truthy(v)).map(scalar_text);

        let groups = match map.get("data").filter(|v| is_truthy(v)) {
            None => Vec::new(),
            Some(Value::Array(items)) => items.iter().enumerate().map(element_group).collect(),
            Some(Value::Object(fields)) => vec![FieldGroup {
                fields: fields
                    .iter()
                    .map(|(k, v)| RenderedField::new(k.as_str(), v))
                    .collect(),
            }],
            Some(other) => vec![FieldGroup {
                fields: vec![RenderedField::new("data", other)],
            }],
        };

        Self {
            status,
            message,
            groups,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.message.is_none() && self.groups.is_empty()
    }

    /// Plain-text rendering for non-interactive output.
    pub fn to_plain_text(&self) -> String {
        let mut out = String::new();
        if let Some(status) = &self.status {
            let _ = writeln!(out, "Status: {}", capitalize_words(&status.text));
        }
        if let Some(message) = &self.message {
            let _ = writeln!(out, "{message}");
        }
        for (i, group) in self.groups.iter().enumerate() {
            if !out.is_empty() || i > 0 {
                out.push('\n');
            }
            for field in &group.fields {
                let _ = writeln!(out, "## {}", field.label);
                let _ = writeln!(out, "{}", field.body.as_str());
            }
        }
        out
    }
}

fn element_group((index, item): (usize, &Value)) -> FieldGroup {
    let fields = match item {
        Value::Object(fields) => fields
            .iter()
            .map(|(k, v)| RenderedField::new(k.as_str(), v))
            .collect(),
        other => vec![RenderedField::new(index.to_string(), other)],
    };
    FieldGroup { fields }
}

/// JavaScript truthiness for JSON values.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn field_body(value: &Value) -> FieldBody {
    match value {
        Value::String(s) => FieldBody::Text(s.clone()),
        other => FieldBody::Structured(
            serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
        ),
    }
}

/// `lesson_plan_title` -> `Lesson Plan Title`.
pub fn field_label(key: &str) -> String {
    capitalize_words(&key.replace('_', " "))
}

/// Upper-cases the first letter of every space-separated word.
pub fn capitalize_words(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
