//! Block categories and the built-in block catalog
//!
//! Each submodule defines one group of page sections: the typed block structs,
//! their choice enums, and the field-descriptor table the validator runs on.

pub mod hero;
pub mod layout;
pub mod projects;
pub mod statistics;
pub mod team;

use serde::{Deserialize, Serialize};

use crate::core::block::{BlockDefinition, BlockKind};

/// Block category enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockCategory {
    /// Banners and section headings
    Layout,
    /// Impact figures
    Statistics,
    /// Project showcases
    Projects,
    /// People
    Team,
}

impl BlockCategory {
    /// Get a human-readable name for the category
    pub fn display_name(&self) -> &str {
        match self {
            BlockCategory::Layout => "Layout",
            BlockCategory::Statistics => "Statistics",
            BlockCategory::Projects => "Projects",
            BlockCategory::Team => "Team",
        }
    }
}

impl std::fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Field-descriptor table for `kind`
pub fn definition_for(kind: BlockKind) -> BlockDefinition {
    match kind {
        BlockKind::Hero => hero::definition(),
        BlockKind::StatItem => statistics::stat_item_definition(),
        BlockKind::ImpactStatistics => statistics::impact_statistics_definition(),
        BlockKind::SectionHeader => layout::section_header_definition(),
        BlockKind::ProjectCard => projects::project_card_definition(),
        BlockKind::ProjectCards => projects::project_cards_definition(),
        BlockKind::TeamMember => team::team_member_definition(),
        BlockKind::TeamSection => team::team_section_definition(),
    }
}

/// Every built-in definition, in catalog order
pub fn builtin_definitions() -> Vec<BlockDefinition> {
    BlockKind::ALL.iter().map(|k| definition_for(*k)).collect()
}
