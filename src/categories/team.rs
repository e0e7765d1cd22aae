//! Team blocks
//!
//! Modelled on the item/section pattern of the statistics and project blocks:
//! a team member card and a section holding an ordered list of them. The field
//! set is provisional and kept minimal.

use serde::{Deserialize, Serialize};

use crate::categories::BlockCategory;
use crate::core::block::{BlockDefinition, BlockKind, BlockMetadata, ImageRef};
use crate::core::field::FieldDescriptor;

pub const TEAM_MEMBER_TEMPLATE: &str = "blocks/team_member.html";
pub const TEAM_SECTION_TEMPLATE: &str = "blocks/team_section.html";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMemberBlock {
    pub name: String,
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<ImageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSectionBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_subtitle: Option<String>,
    #[serde(default)]
    pub members: Vec<TeamMemberBlock>,
}

pub fn team_member_definition() -> BlockDefinition {
    BlockDefinition {
        metadata: BlockMetadata {
            kind: BlockKind::TeamMember,
            label: "Team Member".into(),
            category: BlockCategory::Team,
            description: "Person with name, role and photo".into(),
            template: TEAM_MEMBER_TEMPLATE.into(),
            icon: "user".into(),
        },
        fields: vec![
            FieldDescriptor::char("name", "Full name").with_max_length(100),
            FieldDescriptor::char("role", "Role in the organization").with_max_length(100),
            FieldDescriptor::image("photo", "Portrait photo").optional(),
            FieldDescriptor::text("bio", "Short biography").optional(),
        ],
    }
}

pub fn team_section_definition() -> BlockDefinition {
    BlockDefinition {
        metadata: BlockMetadata {
            kind: BlockKind::TeamSection,
            label: "Team Section".into(),
            category: BlockCategory::Team,
            description: "Group of team members under an optional heading".into(),
            template: TEAM_SECTION_TEMPLATE.into(),
            icon: "group".into(),
        },
        fields: vec![
            FieldDescriptor::char("section_title", "Title for the team section")
                .with_max_length(200)
                .optional(),
            FieldDescriptor::text("section_subtitle", "Subtitle for the team section").optional(),
            FieldDescriptor::list("members", BlockKind::TeamMember, "List of team members"),
        ],
    }
}
