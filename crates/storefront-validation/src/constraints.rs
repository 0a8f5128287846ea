//! Field constraint descriptors
//!
//! [`FieldAttributes`] is the raw attribute set a host reads off a form
//! control (`name`, `type`, `required`, `minlength`, `maxlength`, `pattern`,
//! `data-pattern-message`, `data-confirm`). [`FieldConstraints`] is the typed
//! descriptor built from it once, when the form is attached.

use crate::error::ConstraintError;
use fancy_regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Label used in messages when a field has no `name`
pub const DEFAULT_FIELD_LABEL: &str = "This field";

/// Raw validation attributes of a single form control
///
/// Lengths stay strings here because that is what markup carries; they are
/// parsed when the descriptor is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAttributes {
    #[serde(default)]
    pub name: Option<String>,

    /// The control's `type` attribute
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub required: bool,

    #[serde(default, deserialize_with = "string_or_number")]
    pub minlength: Option<String>,

    #[serde(default, deserialize_with = "string_or_number")]
    pub maxlength: Option<String>,

    #[serde(default)]
    pub pattern: Option<String>,

    /// `data-pattern-message`
    #[serde(default)]
    pub pattern_message: Option<String>,

    /// `data-confirm`: name of the field this one must equal
    #[serde(default)]
    pub confirm: Option<String>,
}

impl FieldAttributes {
    /// Attributes for a control with the given `name`
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn minlength(mut self, min: impl ToString) -> Self {
        self.minlength = Some(min.to_string());
        self
    }

    pub fn maxlength(mut self, max: impl ToString) -> Self {
        self.maxlength = Some(max.to_string());
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    pub fn pattern_message(mut self, message: impl Into<String>) -> Self {
        self.pattern_message = Some(message.into());
        self
    }

    pub fn confirm(mut self, target: impl Into<String>) -> Self {
        self.confirm = Some(target.into());
        self
    }
}

/// Accept `"8"` (markup) as well as `8` (script-built rule objects)
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(u64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(text) => text,
        Raw::Number(n) => n.to_string(),
    }))
}

/// Kind of control, from its `type` attribute
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Email,
    Other(String),
}

impl FieldKind {
    pub fn parse(kind: &str) -> Self {
        match kind.to_ascii_lowercase().as_str() {
            "" | "text" => FieldKind::Text,
            "email" => FieldKind::Email,
            other => FieldKind::Other(other.to_string()),
        }
    }
}

/// Typed constraints of one field
#[derive(Debug, Clone)]
pub struct FieldConstraints {
    /// The control's `name`, if it has a non-empty one
    pub name: Option<String>,
    /// Name used in messages
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: usize,
    /// `None` means unbounded
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    pub pattern_message: Option<String>,
    pub confirm: Option<String>,
}

impl FieldConstraints {
    /// Build constraints, logging and dropping any malformed attribute
    pub fn from_attributes(attrs: &FieldAttributes) -> Self {
        Self::with_fallback_label(attrs, DEFAULT_FIELD_LABEL)
    }

    /// Same as [`from_attributes`](Self::from_attributes) with a custom label
    /// for unnamed fields
    pub fn with_fallback_label(attrs: &FieldAttributes, fallback: &str) -> Self {
        let (constraints, problems) = Self::parse(attrs, fallback);
        for problem in problems {
            warn!(field = %constraints.label, "ignoring constraint: {}", problem);
        }
        constraints
    }

    /// Build constraints and report malformed attributes instead of logging
    ///
    /// A malformed constraint is left out of the descriptor, so the field is
    /// validated as if the attribute were absent.
    pub fn parse(attrs: &FieldAttributes, fallback: &str) -> (Self, Vec<ConstraintError>) {
        let mut problems = Vec::new();

        let name = non_empty(&attrs.name).map(str::to_string);
        let label = name.clone().unwrap_or_else(|| fallback.to_string());

        let min_length = match parse_length("minlength", &attrs.minlength) {
            Ok(min) => min.unwrap_or(0),
            Err(e) => {
                problems.push(e);
                0
            }
        };

        let max_length = parse_length("maxlength", &attrs.maxlength).unwrap_or_else(|e| {
            problems.push(e);
            None
        });

        let pattern = match non_empty(&attrs.pattern) {
            Some(source) => match Regex::new(source) {
                Ok(regex) => Some(regex),
                Err(e) => {
                    problems.push(ConstraintError::InvalidPattern {
                        pattern: source.to_string(),
                        reason: e.to_string(),
                    });
                    None
                }
            },
            None => None,
        };

        let constraints = Self {
            name,
            label,
            kind: attrs.kind.as_deref().map(FieldKind::parse).unwrap_or_default(),
            required: attrs.required,
            min_length,
            max_length,
            pattern,
            pattern_message: non_empty(&attrs.pattern_message).map(str::to_string),
            confirm: non_empty(&attrs.confirm).map(str::to_string),
        };

        (constraints, problems)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn parse_length(
    attribute: &'static str,
    raw: &Option<String>,
) -> Result<Option<usize>, ConstraintError> {
    match non_empty(raw) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<usize>()
            .map(Some)
            .map_err(|_| ConstraintError::InvalidLength {
                attribute,
                value: value.to_string(),
            }),
    }
}
