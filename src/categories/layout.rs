//! Section Header Block
//!
//! A heading with optional lead paragraph used to introduce the block that
//! follows it. Centered by default.

use serde::{Deserialize, Serialize};

use crate::categories::BlockCategory;
use crate::core::block::{BlockDefinition, BlockKind, BlockMetadata};
use crate::core::field::FieldDescriptor;

pub const SECTION_HEADER_TEMPLATE: &str = "blocks/section_header.html";

fn centered_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionHeaderBlock {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default = "centered_by_default")]
    pub centered: bool,
}

pub fn section_header_definition() -> BlockDefinition {
    BlockDefinition {
        metadata: BlockMetadata {
            kind: BlockKind::SectionHeader,
            label: "Section Header".into(),
            category: BlockCategory::Layout,
            description: "Heading with an optional lead paragraph".into(),
            template: SECTION_HEADER_TEMPLATE.into(),
            icon: "title".into(),
        },
        fields: vec![
            FieldDescriptor::char("title", "Section heading"),
            FieldDescriptor::text("subtitle", "Optional lead paragraph").optional(),
            FieldDescriptor::boolean("centered", "Center the heading").with_default(true),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_defaults_to_true() {
        let header: SectionHeaderBlock = serde_json::from_value(serde_json::json!({"title": "Our Work"})).unwrap();
        assert!(header.centered);
        assert_eq!(header.subtitle, None);
    }
}
