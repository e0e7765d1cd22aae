//! Enumerated choice sets
//!
//! A choice set is a fixed mapping from a stored code to a display label.
//! Typed choice enums implement [`Choice`] so the descriptor table and the
//! Rust enum are built from the same option list.

use serde::{Deserialize, Serialize};

/// One selectable option of a choice set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    /// Stored code
    pub value: String,
    /// Label shown by the editing surface
    pub label: String,
}

/// Fixed code → label table constraining a field's stored value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSet {
    /// Name of the set (e.g. "hero_height")
    pub name: String,
    /// Options in display order
    pub options: Vec<ChoiceOption>,
}

impl ChoiceSet {
    /// Create a choice set from `(code, label)` pairs
    pub fn new(name: impl Into<String>, options: &[(&str, &str)]) -> Self {
        Self {
            name: name.into(),
            options: options
                .iter()
                .map(|(value, label)| ChoiceOption {
                    value: (*value).to_string(),
                    label: (*label).to_string(),
                })
                .collect(),
        }
    }

    /// Whether `code` is one of the declared codes
    pub fn contains(&self, code: &str) -> bool {
        self.options.iter().any(|o| o.value == code)
    }

    /// Display label for a stored code
    pub fn label(&self, code: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == code)
            .map(|o| o.label.as_str())
    }

    /// All declared codes, in order
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.value.as_str())
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}

/// A Rust enum backed by a choice set.
///
/// `OPTIONS` must list the same codes the enum's serde representation uses.
pub trait Choice: Sized + Copy + 'static {
    /// Name of the choice set
    const NAME: &'static str;
    /// `(code, label)` pairs in display order
    const OPTIONS: &'static [(&'static str, &'static str)];

    /// Stored code of this value
    fn code(self) -> &'static str;

    /// Parse a stored code
    fn from_code(code: &str) -> Option<Self>;

    /// Display label of this value
    fn label(self) -> &'static str {
        let code = self.code();
        Self::OPTIONS
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, label)| *label)
            .unwrap_or(code)
    }

    /// Build the runtime choice set for descriptor tables
    fn choice_set() -> ChoiceSet {
        ChoiceSet::new(Self::NAME, Self::OPTIONS)
    }
}
