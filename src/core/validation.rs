//! Field validation engine
//!
//! A single routine validates any block instance against its field-descriptor
//! table: required-present, max length, choice membership, value shape, URL
//! syntax and nested lists. Every problem is collected as a [`FieldError`]
//! scoped to a path like `stats[0].number`; a value is accepted only when the
//! error set is empty.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::block::BlockKind;
use super::field::{FieldDescriptor, FieldType, FieldValue, StructValue};
use super::registry::BlockRegistry;

/// URL schemes accepted by URL fields
const URL_SCHEMES: [&str; 4] = ["http", "https", "ftp", "ftps"];

// ── Error types ─────────────────────────────────────────────────────────────

/// Why a field was rejected
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// A required field is absent, null or blank
    MissingRequiredField,
    /// A text value is longer than the declared maximum (in characters)
    LengthExceeded { max: usize, actual: usize },
    /// A choice value is not one of the declared codes
    InvalidChoice { value: String },
    /// A content-sequence entry names a kind the page type does not allow
    UnknownBlockKind { kind: String },
    /// The value has the wrong JSON shape for the field
    InvalidType { expected: String, found: String },
    /// A URL field holds something that is not an absolute http(s)/ftp URL
    InvalidUrl { value: String },
    /// The instance carries a field its definition does not declare
    UnknownField,
    /// The content sequence holds more entries than configured
    SequenceTooLong { max: usize, actual: usize },
    /// Two content-sequence entries carry the same block id
    DuplicateBlockId { id: String },
}

impl std::fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationErrorKind::MissingRequiredField => write!(f, "This field is required"),
            ValidationErrorKind::LengthExceeded { max, actual } => write!(
                f,
                "Ensure this value has at most {} characters (it has {})",
                max, actual
            ),
            ValidationErrorKind::InvalidChoice { value } => write!(
                f,
                "Select a valid choice. {} is not one of the available choices",
                value
            ),
            ValidationErrorKind::UnknownBlockKind { kind } => {
                write!(f, "Block kind '{}' is not allowed here", kind)
            }
            ValidationErrorKind::InvalidType { expected, found } => {
                write!(f, "Expected {}, found {}", expected, found)
            }
            ValidationErrorKind::InvalidUrl { value } => write!(f, "Enter a valid URL: {}", value),
            ValidationErrorKind::UnknownField => write!(f, "Unknown field"),
            ValidationErrorKind::SequenceTooLong { max, actual } => write!(
                f,
                "Content may hold at most {} blocks (it has {})",
                max, actual
            ),
            ValidationErrorKind::DuplicateBlockId { id } => {
                write!(f, "Block id {} is already used earlier in the content", id)
            }
        }
    }
}

/// A single field-scoped validation error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Location of the field, e.g. `stats[0].number`; empty for the whole value
    pub path: String,
    #[serde(flatten)]
    pub kind: ValidationErrorKind,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.path, self.kind)
        }
    }
}

/// Every error found while validating one value
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error at `path`
    pub fn add(&mut self, path: impl Into<String>, kind: ValidationErrorKind) {
        self.errors.push(FieldError {
            path: path.into(),
            kind,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Errors recorded for exactly `path`
    pub fn errors_for<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationErrorKind> {
        self.errors
            .iter()
            .filter(move |e| e.path == path)
            .map(|e| &e.kind)
    }

    /// Whether any error at `path` satisfies `pred`
    pub fn has(&self, path: &str, pred: impl Fn(&ValidationErrorKind) -> bool) -> bool {
        self.errors_for(path).any(pred)
    }

    /// Re-root every error under `prefix`
    pub fn prefixed(mut self, prefix: &str) -> Self {
        for error in &mut self.errors {
            error.path = join_path(prefix, &error.path);
        }
        self
    }

    /// Merge another error set into this one
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// `Ok(value)` if nothing was recorded, otherwise `Err(self)`
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} validation error(s)", self.errors.len())?;
        for error in &self.errors {
            write!(f, "; {}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

// ── Configuration ───────────────────────────────────────────────────────────

/// Validation settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Reject fields a definition does not declare instead of dropping them
    pub reject_unknown_fields: bool,
    /// Maximum number of entries in a content sequence
    pub max_sequence_len: Option<usize>,
}

impl ValidationConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set unknown-field handling
    pub fn with_reject_unknown_fields(mut self, reject: bool) -> Self {
        self.reject_unknown_fields = reject;
        self
    }

    /// Set the content-sequence length limit
    pub fn with_max_sequence_len(mut self, max: usize) -> Self {
        self.max_sequence_len = Some(max);
        self
    }
}

// ── Validator ───────────────────────────────────────────────────────────────

/// Validates values against field-descriptor tables.
///
/// Nested list fields resolve their item definitions through the registry.
pub struct Validator<'a> {
    registry: &'a BlockRegistry,
    config: &'a ValidationConfig,
}

impl<'a> Validator<'a> {
    pub fn new(registry: &'a BlockRegistry, config: &'a ValidationConfig) -> Self {
        Self { registry, config }
    }

    /// Validate an instance of `kind` and return it with explicit defaults applied.
    pub fn clean_block(&self, kind: BlockKind, raw: &StructValue) -> Result<StructValue, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let cleaned = self.clean_kind(kind, raw, "", &mut errors);
        errors.into_result(cleaned)
    }

    /// Validate a bare field table (page-level scalar fields use this).
    pub fn clean_fields(
        &self,
        fields: &[FieldDescriptor],
        raw: &StructValue,
    ) -> Result<StructValue, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let cleaned = self.clean_struct(fields, raw, "", &mut errors);
        errors.into_result(cleaned)
    }

    fn clean_kind(
        &self,
        kind: BlockKind,
        raw: &StructValue,
        path: &str,
        errors: &mut ValidationErrors,
    ) -> StructValue {
        match self.registry.get_definition(kind) {
            Ok(definition) => self.clean_struct(&definition.fields, raw, path, errors),
            Err(_) => {
                errors.add(
                    path,
                    ValidationErrorKind::UnknownBlockKind {
                        kind: kind.to_string(),
                    },
                );
                StructValue::new()
            }
        }
    }

    fn clean_struct(
        &self,
        fields: &[FieldDescriptor],
        raw: &StructValue,
        path: &str,
        errors: &mut ValidationErrors,
    ) -> StructValue {
        let mut cleaned = StructValue::new();

        for field in fields {
            let field_path = join_path(path, &field.name);
            if let Some(value) = self.clean_field(field, raw.get(&field.name), &field_path, errors) {
                cleaned.insert(field.name.clone(), value);
            }
        }

        for name in raw.keys() {
            if fields.iter().any(|f| &f.name == name) {
                continue;
            }
            let field_path = join_path(path, name);
            if self.config.reject_unknown_fields {
                errors.add(field_path, ValidationErrorKind::UnknownField);
            } else {
                warn!(path = %field_path, "dropping undeclared field");
            }
        }

        cleaned
    }

    fn clean_field(
        &self,
        field: &FieldDescriptor,
        value: Option<&FieldValue>,
        path: &str,
        errors: &mut ValidationErrors,
    ) -> Option<FieldValue> {
        let value = match value {
            Some(v) if !v.is_null() => v,
            _ => {
                if let Some(default) = &field.default_value {
                    return Some(default.clone());
                }
                if field.required {
                    errors.add(path, ValidationErrorKind::MissingRequiredField);
                }
                return None;
            }
        };

        match &field.field_type {
            FieldType::Char | FieldType::Text => {
                let s = self.expect_str(field, value, path, errors)?;
                if field.required && s.trim().is_empty() {
                    errors.add(path, ValidationErrorKind::MissingRequiredField);
                    return None;
                }
                if let Some(max) = field.constraints.max_length {
                    let actual = s.chars().count();
                    if actual > max {
                        errors.add(path, ValidationErrorKind::LengthExceeded { max, actual });
                        return None;
                    }
                }
                Some(value.clone())
            }
            FieldType::Choice => {
                let s = self.expect_str(field, value, path, errors)?;
                if s.is_empty() {
                    if field.required {
                        errors.add(path, ValidationErrorKind::MissingRequiredField);
                        return None;
                    }
                    return Some(value.clone());
                }
                let allowed = field
                    .constraints
                    .choices
                    .as_ref()
                    .map_or(false, |choices| choices.contains(s));
                if !allowed {
                    errors.add(
                        path,
                        ValidationErrorKind::InvalidChoice {
                            value: s.to_string(),
                        },
                    );
                    return None;
                }
                Some(value.clone())
            }
            FieldType::Boolean => match value {
                FieldValue::Boolean(_) => Some(value.clone()),
                other => {
                    self.type_error(field, other, path, errors);
                    None
                }
            },
            FieldType::Url => {
                let s = self.expect_str(field, value, path, errors)?;
                if s.trim().is_empty() {
                    if field.required {
                        errors.add(path, ValidationErrorKind::MissingRequiredField);
                        return None;
                    }
                    return Some(value.clone());
                }
                if !is_valid_url(s) {
                    errors.add(
                        path,
                        ValidationErrorKind::InvalidUrl {
                            value: s.to_string(),
                        },
                    );
                    return None;
                }
                Some(value.clone())
            }
            FieldType::Image | FieldType::Page => match value {
                FieldValue::Integer(id) if *id > 0 => Some(value.clone()),
                other => {
                    self.type_error(field, other, path, errors);
                    None
                }
            },
            FieldType::List(kind) => {
                let items = match value {
                    FieldValue::List(items) => items,
                    other => {
                        self.type_error(field, other, path, errors);
                        return None;
                    }
                };
                let mut cleaned = Vec::with_capacity(items.len());
                for (index, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, index);
                    match item {
                        FieldValue::Object(obj) => {
                            let value = self.clean_kind(*kind, obj, &item_path, errors);
                            cleaned.push(FieldValue::Object(value));
                        }
                        other => errors.add(
                            item_path,
                            ValidationErrorKind::InvalidType {
                                expected: "object".into(),
                                found: other.type_name().into(),
                            },
                        ),
                    }
                }
                Some(FieldValue::List(cleaned))
            }
        }
    }

    fn expect_str<'v>(
        &self,
        field: &FieldDescriptor,
        value: &'v FieldValue,
        path: &str,
        errors: &mut ValidationErrors,
    ) -> Option<&'v str> {
        match value {
            FieldValue::String(s) => Some(s),
            other => {
                self.type_error(field, other, path, errors);
                None
            }
        }
    }

    fn type_error(
        &self,
        field: &FieldDescriptor,
        found: &FieldValue,
        path: &str,
        errors: &mut ValidationErrors,
    ) {
        errors.add(
            path,
            ValidationErrorKind::InvalidType {
                expected: field.field_type.expected().into(),
                found: found.type_name().into(),
            },
        );
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// Join a parent path and a child segment with a dot.
pub(crate) fn join_path(prefix: &str, name: &str) -> String {
    match (prefix.is_empty(), name.is_empty()) {
        (true, _) => name.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) if name.starts_with('[') => format!("{}{}", prefix, name),
        (false, false) => format!("{}.{}", prefix, name),
    }
}

fn is_valid_url(s: &str) -> bool {
    match url::Url::parse(s) {
        Ok(url) => URL_SCHEMES.contains(&url.scheme()) && url.has_host(),
        Err(_) => false,
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
