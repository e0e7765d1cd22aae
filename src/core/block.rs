//! Block kinds, definitions and typed block values
//!
//! [`BlockKind`] is the closed set of block kinds. Each kind has a static
//! field-descriptor table ([`BlockDefinition`]) built by its category module,
//! and a typed Rust representation collected in the [`Block`] union.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;

use super::field::{FieldDescriptor, FieldType, FieldValue, StructValue};
use crate::categories::hero::HeroBlock;
use crate::categories::layout::SectionHeaderBlock;
use crate::categories::projects::{ProjectCardBlock, ProjectCardsBlock};
use crate::categories::statistics::{ImpactStatisticsBlock, StatItemBlock};
use crate::categories::team::{TeamMemberBlock, TeamSectionBlock};
use crate::categories::{self, BlockCategory};

/// Closed set of block kinds known to the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    Hero,
    StatItem,
    ImpactStatistics,
    SectionHeader,
    ProjectCard,
    ProjectCards,
    TeamMember,
    TeamSection,
}

impl BlockKind {
    /// Every kind, in catalog order
    pub const ALL: [BlockKind; 8] = [
        BlockKind::Hero,
        BlockKind::StatItem,
        BlockKind::ImpactStatistics,
        BlockKind::SectionHeader,
        BlockKind::ProjectCard,
        BlockKind::ProjectCards,
        BlockKind::TeamMember,
        BlockKind::TeamSection,
    ];

    /// Identifier used in configuration files
    pub fn as_str(self) -> &'static str {
        match self {
            BlockKind::Hero => "hero",
            BlockKind::StatItem => "stat_item",
            BlockKind::ImpactStatistics => "impact_statistics",
            BlockKind::SectionHeader => "section_header",
            BlockKind::ProjectCard => "project_card",
            BlockKind::ProjectCards => "project_cards",
            BlockKind::TeamMember => "team_member",
            BlockKind::TeamSection => "team_section",
        }
    }

    /// Template the rendering layer binds to this kind
    pub fn template(self) -> &'static str {
        match self {
            BlockKind::Hero => categories::hero::TEMPLATE,
            BlockKind::StatItem => categories::statistics::STAT_ITEM_TEMPLATE,
            BlockKind::ImpactStatistics => categories::statistics::IMPACT_STATISTICS_TEMPLATE,
            BlockKind::SectionHeader => categories::layout::SECTION_HEADER_TEMPLATE,
            BlockKind::ProjectCard => categories::projects::PROJECT_CARD_TEMPLATE,
            BlockKind::ProjectCards => categories::projects::PROJECT_CARDS_TEMPLATE,
            BlockKind::TeamMember => categories::team::TEAM_MEMBER_TEMPLATE,
            BlockKind::TeamSection => categories::team::TEAM_SECTION_TEMPLATE,
        }
    }

    /// Build the field-descriptor table for this kind
    pub fn definition(self) -> BlockDefinition {
        categories::definition_for(self)
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlockKind {
    type Err = BlockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockKind::ALL
            .iter()
            .copied()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| BlockError::UnknownKind(s.to_string()))
    }
}

/// Block metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockMetadata {
    /// Kind this definition describes
    pub kind: BlockKind,
    /// Label shown in the block picker
    pub label: String,
    /// Block category
    pub category: BlockCategory,
    /// Brief description of the block
    pub description: String,
    /// Template path used by the rendering layer
    pub template: String,
    /// Icon identifier for the block picker
    pub icon: String,
}

/// Named structured record type: metadata plus an ordered field table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlockDefinition {
    pub metadata: BlockMetadata,
    pub fields: Vec<FieldDescriptor>,
}

impl BlockDefinition {
    pub fn kind(&self) -> BlockKind {
        self.metadata.kind
    }

    /// Look up a field descriptor by name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of the fields that must be present in every instance
    pub fn required_fields(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.required && f.default_value.is_none())
            .map(|f| f.name.as_str())
    }

    /// Kinds this definition nests through list fields
    pub fn nested_kinds(&self) -> impl Iterator<Item = BlockKind> + '_ {
        self.fields.iter().filter_map(|f| match f.field_type {
            FieldType::List(kind) => Some(kind),
            _ => None,
        })
    }

    /// Check the definition is well formed
    pub fn check(&self) -> Result<(), BlockError> {
        if self.metadata.label.is_empty() {
            return Err(BlockError::InvalidDefinition {
                kind: self.kind(),
                reason: "label cannot be empty".into(),
            });
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(BlockError::InvalidDefinition {
                    kind: self.kind(),
                    reason: "field name cannot be empty".into(),
                });
            }
            if !seen.insert(field.name.as_str()) {
                return Err(BlockError::InvalidDefinition {
                    kind: self.kind(),
                    reason: format!("duplicate field '{}'", field.name),
                });
            }
            if field.field_type == FieldType::Choice && field.constraints.choices.is_none() {
                return Err(BlockError::InvalidDefinition {
                    kind: self.kind(),
                    reason: format!("choice field '{}' has no choice set", field.name),
                });
            }
        }

        Ok(())
    }
}

/// Primary key of an image in the host media library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(pub i64);

/// Primary key of a page in the host page tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageRef(pub i64);

/// Typed view of a cleaned block instance
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Hero(HeroBlock),
    StatItem(StatItemBlock),
    ImpactStatistics(ImpactStatisticsBlock),
    SectionHeader(SectionHeaderBlock),
    ProjectCard(ProjectCardBlock),
    ProjectCards(ProjectCardsBlock),
    TeamMember(TeamMemberBlock),
    TeamSection(TeamSectionBlock),
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Hero(_) => BlockKind::Hero,
            Block::StatItem(_) => BlockKind::StatItem,
            Block::ImpactStatistics(_) => BlockKind::ImpactStatistics,
            Block::SectionHeader(_) => BlockKind::SectionHeader,
            Block::ProjectCard(_) => BlockKind::ProjectCard,
            Block::ProjectCards(_) => BlockKind::ProjectCards,
            Block::TeamMember(_) => BlockKind::TeamMember,
            Block::TeamSection(_) => BlockKind::TeamSection,
        }
    }

    /// Build the typed block from a value that already passed validation
    pub fn from_value(kind: BlockKind, value: &StructValue) -> Result<Self, BlockError> {
        let json = serde_json::to_value(value).map_err(|e| BlockError::Decode {
            kind,
            reason: e.to_string(),
        })?;
        let decode = |e: serde_json::Error| BlockError::Decode {
            kind,
            reason: e.to_string(),
        };

        Ok(match kind {
            BlockKind::Hero => Block::Hero(serde_json::from_value(json).map_err(decode)?),
            BlockKind::StatItem => Block::StatItem(serde_json::from_value(json).map_err(decode)?),
            BlockKind::ImpactStatistics => {
                Block::ImpactStatistics(serde_json::from_value(json).map_err(decode)?)
            }
            BlockKind::SectionHeader => {
                Block::SectionHeader(serde_json::from_value(json).map_err(decode)?)
            }
            BlockKind::ProjectCard => Block::ProjectCard(serde_json::from_value(json).map_err(decode)?),
            BlockKind::ProjectCards => {
                Block::ProjectCards(serde_json::from_value(json).map_err(decode)?)
            }
            BlockKind::TeamMember => Block::TeamMember(serde_json::from_value(json).map_err(decode)?),
            BlockKind::TeamSection => {
                Block::TeamSection(serde_json::from_value(json).map_err(decode)?)
            }
        })
    }

    /// Convert back to the stored field map
    pub fn to_value(&self) -> Result<StructValue, BlockError> {
        let kind = self.kind();
        let json = match self {
            Block::Hero(b) => serde_json::to_value(b),
            Block::StatItem(b) => serde_json::to_value(b),
            Block::ImpactStatistics(b) => serde_json::to_value(b),
            Block::SectionHeader(b) => serde_json::to_value(b),
            Block::ProjectCard(b) => serde_json::to_value(b),
            Block::ProjectCards(b) => serde_json::to_value(b),
            Block::TeamMember(b) => serde_json::to_value(b),
            Block::TeamSection(b) => serde_json::to_value(b),
        }
        .map_err(|e| BlockError::Encode(e.to_string()))?;

        match serde_json::from_value::<FieldValue>(json) {
            Ok(FieldValue::Object(obj)) => Ok(obj),
            Ok(other) => Err(BlockError::Encode(format!(
                "{} encoded as {}, expected object",
                kind,
                other.type_name()
            ))),
            Err(e) => Err(BlockError::Encode(e.to_string())),
        }
    }

    /// Template the rendering layer binds to this block
    pub fn template(&self) -> &'static str {
        self.kind().template()
    }
}

/// Block errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum BlockError {
    /// Kind name is not part of the catalog
    #[error("Unknown block kind: {0}")]
    UnknownKind(String),

    /// Definition is malformed
    #[error("Invalid definition for {kind}: {reason}")]
    InvalidDefinition { kind: BlockKind, reason: String },

    /// Value could not be decoded into the typed block
    #[error("Failed to decode {kind}: {reason}")]
    Decode { kind: BlockKind, reason: String },

    /// Typed block could not be encoded
    #[error("Failed to encode block: {0}")]
    Encode(String),
}
