//! Test suite for the content schema
//!
//! This module groups tests by concern: the block catalog's field rules, page
//! sequences and storage, and property-based checks.

#[cfg(test)]
mod catalog_tests;

/// Shared fixtures
#[cfg(test)]
pub(crate) mod fixtures {
    use crate::core::field::{FieldValue, StructValue};

    /// Route tracing output to the test harness; `RUST_LOG` picks the level.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    /// Build a struct value from `(field, value)` pairs
    pub fn obj(pairs: &[(&str, FieldValue)]) -> StructValue {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    pub fn hero() -> StructValue {
        obj(&[
            ("title", "Welcome".into()),
            ("background_image", 1i64.into()),
            ("height", "medium".into()),
        ])
    }

    pub fn stat(number: &str) -> StructValue {
        obj(&[
            ("icon_name", "users".into()),
            ("number", number.into()),
            ("label", "People Helped".into()),
        ])
    }

    pub fn impact_statistics() -> StructValue {
        obj(&[
            ("section_title", "Our Impact".into()),
            ("stats", vec![FieldValue::Object(stat("500"))].into()),
        ])
    }

    pub fn section_header() -> StructValue {
        obj(&[("title", "What We Do".into())])
    }

    pub fn project_card(status: &str) -> StructValue {
        obj(&[
            ("image", 7i64.into()),
            ("title", "Clean Water Initiative".into()),
            ("location", "Cebu, Philippines".into()),
            ("description", "Wells for rural communities".into()),
            ("status", status.into()),
        ])
    }

    pub fn project_cards() -> StructValue {
        obj(&[(
            "projects",
            vec![FieldValue::Object(project_card("Ongoing"))].into(),
        )])
    }

    pub fn team_member() -> StructValue {
        obj(&[("name", "Maria Santos".into()), ("role", "Director".into())])
    }

    pub fn team_section() -> StructValue {
        obj(&[("members", vec![FieldValue::Object(team_member())].into())])
    }
}
