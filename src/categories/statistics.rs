//! Statistics blocks
//!
//! A stat item is one headline figure ("500+ People Helped"); the impact
//! statistics section groups an ordered list of them under a heading.

use serde::{Deserialize, Serialize};

use crate::categories::BlockCategory;
use crate::core::block::{BlockDefinition, BlockKind, BlockMetadata};
use crate::core::choice::Choice;
use crate::core::field::FieldDescriptor;

pub const STAT_ITEM_TEMPLATE: &str = "blocks/stats.html";
pub const IMPACT_STATISTICS_TEMPLATE: &str = "blocks/impact_statistics.html";

/// Icon shown next to a statistic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatIcon {
    Users,
    Utensils,
    Heart,
    Globe,
}

impl Choice for StatIcon {
    const NAME: &'static str = "stat_icon";
    const OPTIONS: &'static [(&'static str, &'static str)] = &[
        ("users", "Users"),
        ("utensils", "Utensils"),
        ("heart", "Heart"),
        ("globe", "Globe"),
    ];

    fn code(self) -> &'static str {
        match self {
            StatIcon::Users => "users",
            StatIcon::Utensils => "utensils",
            StatIcon::Heart => "heart",
            StatIcon::Globe => "globe",
        }
    }

    fn from_code(code: &str) -> Option<Self> {
        match code {
            "users" => Some(StatIcon::Users),
            "utensils" => Some(StatIcon::Utensils),
            "heart" => Some(StatIcon::Heart),
            "globe" => Some(StatIcon::Globe),
            _ => None,
        }
    }
}

/// One statistic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatItemBlock {
    pub icon_name: StatIcon,
    /// Kept as text so values like "10k" survive unchanged
    pub number: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suffix: Option<String>,
}

impl StatItemBlock {
    /// Number with its suffix, e.g. "500+"
    pub fn display_value(&self) -> String {
        match &self.suffix {
            Some(suffix) => format!("{}{}", self.number, suffix),
            None => self.number.clone(),
        }
    }
}

/// Section grouping several statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactStatisticsBlock {
    pub section_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_subtitle: Option<String>,
    #[serde(default)]
    pub stats: Vec<StatItemBlock>,
}

pub fn stat_item_definition() -> BlockDefinition {
    BlockDefinition {
        metadata: BlockMetadata {
            kind: BlockKind::StatItem,
            label: "Statistics Block".into(),
            category: BlockCategory::Statistics,
            description: "Single statistic with an icon, a figure and a label".into(),
            template: STAT_ITEM_TEMPLATE.into(),
            icon: "pick".into(),
        },
        fields: vec![
            FieldDescriptor::choice("icon_name", StatIcon::choice_set(), "Icon representing the statistic"),
            FieldDescriptor::char("number", "Main numeric value").with_max_length(20),
            FieldDescriptor::char("label", "Description of the statistic").with_max_length(50),
            FieldDescriptor::char("suffix", "Optional suffix like '+'")
                .with_max_length(5)
                .optional(),
        ],
    }
}

pub fn impact_statistics_definition() -> BlockDefinition {
    BlockDefinition {
        metadata: BlockMetadata {
            kind: BlockKind::ImpactStatistics,
            label: "Impact Statistics Section".into(),
            category: BlockCategory::Statistics,
            description: "Grouped statistics showcasing organizational impact".into(),
            template: IMPACT_STATISTICS_TEMPLATE.into(),
            icon: "group".into(),
        },
        fields: vec![
            FieldDescriptor::char("section_title", "Title for the statistics section").with_max_length(100),
            FieldDescriptor::text("section_subtitle", "Subtitle for the statistics section").optional(),
            FieldDescriptor::list("stats", BlockKind::StatItem, "List of impact statistics"),
        ],
    }
}
