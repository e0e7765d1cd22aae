//! Project blocks
//!
//! A project card presents one field project (image, title, location,
//! description, status and an optional external link). The project cards
//! section lists cards under an optional heading.

use serde::{Deserialize, Serialize};

use crate::categories::BlockCategory;
use crate::core::block::{BlockDefinition, BlockKind, BlockMetadata, ImageRef};
use crate::core::choice::Choice;
use crate::core::field::FieldDescriptor;

pub const PROJECT_CARD_TEMPLATE: &str = "blocks/project_card.html";
pub const PROJECT_CARDS_TEMPLATE: &str = "blocks/project_cards.html";

/// Lifecycle status shown on a project card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProjectStatus {
    #[default]
    Active,
    Ongoing,
    Completed,
}

impl Choice for ProjectStatus {
    const NAME: &'static str = "project_status";
    const OPTIONS: &'static [(&'static str, &'static str)] = &[
        ("Active", "Active"),
        ("Ongoing", "Ongoing"),
        ("Completed", "Completed"),
    ];

    fn code(self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Ongoing => "Ongoing",
            ProjectStatus::Completed => "Completed",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "Active" => Some(ProjectStatus::Active),
            "Ongoing" => Some(ProjectStatus::Ongoing),
            "Completed" => Some(ProjectStatus::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCardBlock {
    pub image: ImageRef,
    pub title: String,
    pub location: String,
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

impl ProjectCardBlock {
    /// External link, ignoring a stored empty string
    pub fn link(&self) -> Option<&str> {
        self.link.as_deref().filter(|l| !l.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectCardsBlock {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_subtitle: Option<String>,
    #[serde(default)]
    pub projects: Vec<ProjectCardBlock>,
}

impl ProjectCardsBlock {
    /// Cards with the given status, in author order
    pub fn with_status(&self, status: ProjectStatus) -> impl Iterator<Item = &ProjectCardBlock> {
        self.projects.iter().filter(move |p| p.status == status)
    }
}

pub fn project_card_definition() -> BlockDefinition {
    BlockDefinition {
        metadata: BlockMetadata {
            kind: BlockKind::ProjectCard,
            label: "Project Card".into(),
            category: BlockCategory::Projects,
            description: "Single project with image, location and status".into(),
            template: PROJECT_CARD_TEMPLATE.into(),
            icon: "doc-full".into(),
        },
        fields: vec![
            FieldDescriptor::image("image", "Project image"),
            FieldDescriptor::char("title", "Project title").with_max_length(200),
            FieldDescriptor::char("location", "Where the project takes place").with_max_length(100),
            FieldDescriptor::text("description", "Short project description"),
            FieldDescriptor::choice("status", ProjectStatus::choice_set(), "Project status")
                .with_default(ProjectStatus::Active.code()),
            FieldDescriptor::url("link", "Optional link to project details").optional(),
        ],
    }
}

pub fn project_cards_definition() -> BlockDefinition {
    BlockDefinition {
        metadata: BlockMetadata {
            kind: BlockKind::ProjectCards,
            label: "Project Cards Section".into(),
            category: BlockCategory::Projects,
            description: "Grid of project cards under an optional heading".into(),
            template: PROJECT_CARDS_TEMPLATE.into(),
            icon: "list-ul".into(),
        },
        fields: vec![
            FieldDescriptor::char("section_title", "Title for the projects section")
                .with_max_length(200)
                .optional(),
            FieldDescriptor::text("section_subtitle", "Subtitle for the projects section").optional(),
            FieldDescriptor::list("projects", BlockKind::ProjectCard, "List of project cards"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_are_capitalized() {
        assert_eq!(serde_json::to_string(&ProjectStatus::Ongoing).unwrap(), "\"Ongoing\"");
        assert_eq!(ProjectStatus::from_code("active"), None);
        assert_eq!(ProjectStatus::from_code("Completed"), Some(ProjectStatus::Completed));
    }

    #[test]
    fn test_with_status_keeps_order() {
        let card = |title: &str, status| ProjectCardBlock {
            image: ImageRef(1),
            title: title.into(),
            location: "Cebu".into(),
            description: "Clean water".into(),
            status,
            link: Some(String::new()),
        };
        let section = ProjectCardsBlock {
            section_title: None,
            section_subtitle: None,
            projects: vec![
                card("a", ProjectStatus::Active),
                card("b", ProjectStatus::Completed),
                card("c", ProjectStatus::Active),
            ],
        };
        let titles: Vec<_> = section
            .with_status(ProjectStatus::Active)
            .map(|p| p.title.as_str())
            .collect();
        assert_eq!(titles, vec!["a", "c"]);
        assert_eq!(section.projects[0].link(), None);
    }
}
