//! Field system for block definitions
//!
//! This module defines the field descriptors that make up a block definition,
//! the JSON-shaped values a block instance holds, and the widget hints the
//! editing surface uses to render each field.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::block::BlockKind;
use super::choice::ChoiceSet;

/// Field values of one block instance, keyed by field name
pub type StructValue = BTreeMap<String, FieldValue>;

/// Field definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Field name, unique within a block
    pub name: String,
    /// Human-readable field label
    pub label: String,
    /// Semantic field type
    pub field_type: FieldType,
    /// Help text shown under the field
    pub help_text: String,
    /// Whether a value must be present
    pub required: bool,
    /// Value used when the field is absent
    pub default_value: Option<FieldValue>,
    /// Length and choice constraints
    pub constraints: FieldConstraints,
}

/// Semantic field types
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Single-line text
    Char,
    /// Multi-line text
    Text,
    /// One code of a choice set
    Choice,
    /// Boolean flag
    Boolean,
    /// Absolute URL
    Url,
    /// Reference to an image by primary key
    Image,
    /// Reference to a page by primary key
    Page,
    /// Ordered list of nested block instances
    List(BlockKind),
}

impl FieldType {
    /// Name of the JSON shape this type accepts, used in error messages
    pub fn expected(&self) -> &'static str {
        match self {
            FieldType::Char | FieldType::Text | FieldType::Choice | FieldType::Url => "string",
            FieldType::Boolean => "boolean",
            FieldType::Image => "image id",
            FieldType::Page => "page id",
            FieldType::List(_) => "list",
        }
    }

    /// Default widget for this type
    pub fn widget(&self) -> WidgetType {
        match self {
            FieldType::Char => WidgetType::Input,
            FieldType::Text => WidgetType::Textarea,
            FieldType::Choice => WidgetType::Select,
            FieldType::Boolean => WidgetType::Checkbox,
            FieldType::Url => WidgetType::UrlInput,
            FieldType::Image => WidgetType::ImageChooser,
            FieldType::Page => WidgetType::PageChooser,
            FieldType::List(_) => WidgetType::ListEditor,
        }
    }
}

/// Field value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// String value
    String(String),
    /// Integer number (also used for image/page primary keys)
    Integer(i64),
    /// Floating point number
    Number(f64),
    /// Boolean value
    Boolean(bool),
    /// Ordered list of values
    List(Vec<FieldValue>),
    /// Nested structured value
    Object(StructValue),
    /// Null value
    Null,
}

impl FieldValue {
    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Try to convert to string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Try to convert to integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to convert to boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to convert to list
    pub fn as_list(&self) -> Option<&Vec<FieldValue>> {
        match self {
            FieldValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Try to convert to a nested struct
    pub fn as_object(&self) -> Option<&StructValue> {
        match self {
            FieldValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Short name of the JSON shape, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::String(_) => "string",
            FieldValue::Integer(_) => "integer",
            FieldValue::Number(_) => "number",
            FieldValue::Boolean(_) => "boolean",
            FieldValue::List(_) => "list",
            FieldValue::Object(_) => "object",
            FieldValue::Null => "null",
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Integer(i)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Boolean(b)
    }
}

impl From<StructValue> for FieldValue {
    fn from(obj: StructValue) -> Self {
        FieldValue::Object(obj)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(items: Vec<FieldValue>) -> Self {
        FieldValue::List(items)
    }
}

/// Field constraints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldConstraints {
    /// Maximum length in characters (text fields)
    pub max_length: Option<usize>,
    /// Allowed codes (choice fields)
    pub choices: Option<ChoiceSet>,
}

impl FieldConstraints {
    /// Create a new empty constraints object
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum length
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    /// Set allowed choices
    pub fn with_choices(mut self, choices: ChoiceSet) -> Self {
        self.choices = Some(choices);
        self
    }
}

impl FieldDescriptor {
    fn new(name: &str, field_type: FieldType, help_text: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label_from_name(name),
            field_type,
            help_text: help_text.to_string(),
            required: true,
            default_value: None,
            constraints: FieldConstraints::new(),
        }
    }

    /// Single-line text field
    pub fn char(name: &str, help_text: &str) -> Self {
        Self::new(name, FieldType::Char, help_text)
    }

    /// Multi-line text field
    pub fn text(name: &str, help_text: &str) -> Self {
        Self::new(name, FieldType::Text, help_text)
    }

    /// Choice field restricted to `choices`
    pub fn choice(name: &str, choices: ChoiceSet, help_text: &str) -> Self {
        let mut field = Self::new(name, FieldType::Choice, help_text);
        field.constraints = field.constraints.with_choices(choices);
        field
    }

    /// Boolean field; optional unless marked required
    pub fn boolean(name: &str, help_text: &str) -> Self {
        Self::new(name, FieldType::Boolean, help_text).optional()
    }

    /// URL field
    pub fn url(name: &str, help_text: &str) -> Self {
        Self::new(name, FieldType::Url, help_text)
    }

    /// Image chooser field
    pub fn image(name: &str, help_text: &str) -> Self {
        Self::new(name, FieldType::Image, help_text)
    }

    /// Page chooser field
    pub fn page(name: &str, help_text: &str) -> Self {
        Self::new(name, FieldType::Page, help_text)
    }

    /// Ordered list of nested `kind` instances, defaulting to an empty list
    pub fn list(name: &str, kind: BlockKind, help_text: &str) -> Self {
        Self::new(name, FieldType::List(kind), help_text)
            .optional()
            .with_default(FieldValue::List(Vec::new()))
    }

    /// Mark the field optional
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Mark the field required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set maximum length in characters
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.constraints = self.constraints.with_max_length(max_length);
        self
    }

    /// Set the value used when the field is absent
    pub fn with_default(mut self, value: impl Into<FieldValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Override the generated label
    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    /// Widget the editing surface should render
    pub fn widget(&self) -> WidgetType {
        self.field_type.widget()
    }
}

/// Turn `section_title` into `Section title`
fn label_from_name(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Widget types for the editing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WidgetType {
    /// Text input field
    Input,
    /// Multi-line text area
    Textarea,
    /// Select dropdown
    Select,
    /// Checkbox
    Checkbox,
    /// URL input
    UrlInput,
    /// Image chooser
    ImageChooser,
    /// Page chooser
    PageChooser,
    /// Repeatable, orderable list of nested forms
    ListEditor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_from_name() {
        assert_eq!(label_from_name("section_title"), "Section title");
        assert_eq!(label_from_name("title"), "Title");
        assert_eq!(label_from_name(""), "");
    }

    #[test]
    fn test_builder_defaults() {
        let field = FieldDescriptor::char("number", "Main numeric value").with_max_length(20);
        assert!(field.required);
        assert_eq!(field.constraints.max_length, Some(20));
        assert_eq!(field.widget(), WidgetType::Input);

        let flag = FieldDescriptor::boolean("centered", "Center text").with_default(true);
        assert!(!flag.required);
        assert_eq!(flag.default_value, Some(FieldValue::Boolean(true)));
    }

    #[test]
    fn test_list_defaults_to_empty() {
        let field = FieldDescriptor::list("stats", BlockKind::StatItem, "");
        assert!(!field.required);
        assert_eq!(field.default_value, Some(FieldValue::List(Vec::new())));
        assert_eq!(field.field_type, FieldType::List(BlockKind::StatItem));
    }

    #[test]
    fn test_untagged_value_parsing() {
        let value: FieldValue = serde_json::from_str(r#"{"n": 5, "s": "x", "b": true, "l": [], "z": null}"#).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["n"], FieldValue::Integer(5));
        assert_eq!(obj["s"].as_str(), Some("x"));
        assert_eq!(obj["b"].as_bool(), Some(true));
        assert_eq!(obj["l"].as_list().map(Vec::len), Some(0));
        assert!(obj["z"].is_null());
    }

    #[test]
    fn test_float_is_not_an_integer() {
        let value: FieldValue = serde_json::from_str("1.5").unwrap();
        assert_eq!(value.as_integer(), None);
        assert_eq!(value.type_name(), "number");
    }
}
