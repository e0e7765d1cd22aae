//! Hero Section Block
//!
//! Full-width banner shown at the top of a page: a heading, an optional
//! supporting paragraph, a background image and up to two call-to-action
//! buttons linking to other pages.
//!
//! ## Fields
//!
//! | Field | Type | Constraint |
//! |-------|------|------------|
//! | `title` | char | required |
//! | `subtitle` | text | optional |
//! | `background_image` | image | required |
//! | `primary_button_text` / `secondary_button_text` | char | optional |
//! | `primary_button_link` / `secondary_button_link` | page | optional |
//! | `height` | choice | `full` (default), `medium`, `small` |

use serde::{Deserialize, Serialize};

use crate::categories::BlockCategory;
use crate::core::block::{BlockDefinition, BlockKind, BlockMetadata, ImageRef, PageRef};
use crate::core::choice::Choice;
use crate::core::field::FieldDescriptor;

pub const TEMPLATE: &str = "blocks/hero.html";

/// Vertical size of the hero banner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroHeight {
    #[default]
    Full,
    Medium,
    Small,
}

impl Choice for HeroHeight {
    const NAME: &'static str = "hero_height";
    const OPTIONS: &'static [(&'static str, &'static str)] = &[
        ("full", "Full Screen"),
        ("medium", "Medium Height"),
        ("small", "Small Height"),
    ];

    fn code(self) -> &'static str {
        match self {
            HeroHeight::Full => "full",
            HeroHeight::Medium => "medium",
            HeroHeight::Small => "small",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "full" => Some(HeroHeight::Full),
            "medium" => Some(HeroHeight::Medium),
            "small" => Some(HeroHeight::Small),
            _ => None,
        }
    }
}

/// Typed hero banner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeroBlock {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub background_image: ImageRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_button_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_button_link: Option<PageRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_button_link: Option<PageRef>,
    #[serde(default)]
    pub height: HeroHeight,
}

impl HeroBlock {
    /// Primary call to action, when both its text and link are set
    pub fn primary_button(&self) -> Option<(&str, PageRef)> {
        button(&self.primary_button_text, self.primary_button_link)
    }

    /// Secondary call to action, when both its text and link are set
    pub fn secondary_button(&self) -> Option<(&str, PageRef)> {
        button(&self.secondary_button_text, self.secondary_button_link)
    }
}

fn button(text: &Option<String>, link: Option<PageRef>) -> Option<(&str, PageRef)> {
    match (text.as_deref(), link) {
        (Some(text), Some(link)) if !text.trim().is_empty() => Some((text, link)),
        _ => None,
    }
}

pub fn definition() -> BlockDefinition {
    BlockDefinition {
        metadata: BlockMetadata {
            kind: BlockKind::Hero,
            label: "Hero Section".into(),
            category: BlockCategory::Layout,
            description: "Full-width banner with background image and call-to-action buttons".into(),
            template: TEMPLATE.into(),
            icon: "image".into(),
        },
        fields: vec![
            FieldDescriptor::char("title", "Main heading text"),
            FieldDescriptor::text("subtitle", "Optional subtitle text").optional(),
            FieldDescriptor::image("background_image", "Background image for hero section"),
            FieldDescriptor::char("primary_button_text", "Text for primary button").optional(),
            FieldDescriptor::char("secondary_button_text", "Text for secondary button").optional(),
            FieldDescriptor::page("primary_button_link", "Link for primary button").optional(),
            FieldDescriptor::page("secondary_button_link", "Link for secondary button").optional(),
            FieldDescriptor::choice("height", HeroHeight::choice_set(), "Hero section height")
                .with_default(HeroHeight::Full.code()),
        ],
    }
}
