//! Page schema
//!
//! A page type declares which block kinds may appear in its content sequence
//! (short kind name → block definition) and which scalar fields it carries.
//! Validation of a sequence is all-or-nothing: either every entry is accepted
//! and a [`ContentSequence`] is returned, or every problem is reported and
//! nothing is returned.

pub mod draft;
pub mod sequence;
pub mod store;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

use crate::core::block::BlockKind;
use crate::core::field::{FieldDescriptor, FieldValue, StructValue};
use crate::core::registry::BlockRegistry;
use crate::core::validation::{ValidationConfig, ValidationErrorKind, ValidationErrors, Validator};

pub use draft::{Page, PageDraft};
pub use sequence::{ContentBlock, ContentSequence, StreamChild, TemplateBinding};
pub use store::{InMemoryPageStore, PageId, PageStore, StoreError};

/// Maximum length of page titles and subtitles
const PAGE_TEXT_MAX_LENGTH: usize = 255;

/// One entry of a page type's allowed-kinds list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedBlock {
    /// Kind name stored in the content sequence
    pub name: String,
    pub kind: BlockKind,
}

/// Serializable description of a page type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSchemaConfig {
    pub name: String,
    #[serde(default)]
    pub verbose_name: Option<String>,
    pub blocks: Vec<AllowedBlock>,
    #[serde(default)]
    pub validation: ValidationConfig,
}

impl PageSchemaConfig {
    /// Parse a page type description from JSON
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Page type: scalar fields plus the allowed content vocabulary
#[derive(Clone)]
pub struct PageSchema {
    name: String,
    verbose_name: String,
    scalar_fields: Vec<FieldDescriptor>,
    allowed: Vec<AllowedBlock>,
    registry: BlockRegistry,
    config: ValidationConfig,
}

impl PageSchema {
    /// Page type with `title`/`subtitle` scalar fields and no allowed blocks
    pub fn new(name: impl Into<String>, registry: &BlockRegistry) -> Self {
        let name = name.into();
        Self {
            verbose_name: name.replace('_', " "),
            name,
            scalar_fields: vec![
                FieldDescriptor::char("title", "The page title as you'd like it to be seen by the public")
                    .with_max_length(PAGE_TEXT_MAX_LENGTH),
                FieldDescriptor::char("subtitle", "Optional subtitle displayed under the page title.")
                    .with_max_length(PAGE_TEXT_MAX_LENGTH)
                    .optional(),
            ],
            allowed: Vec::new(),
            registry: registry.clone(),
            config: ValidationConfig::default(),
        }
    }

    /// The UnityAid home page type
    pub fn home(registry: &BlockRegistry) -> Self {
        Self::new("home_page", registry)
            .with_verbose_name("Home Page")
            .with_block("hero_section", BlockKind::Hero)
            .with_block("stats", BlockKind::ImpactStatistics)
            .with_block("section_header", BlockKind::SectionHeader)
            .with_block("project_cards", BlockKind::ProjectCards)
            .with_block("team_section", BlockKind::TeamSection)
    }

    /// Build a page type from its description, checking it against the registry
    pub fn from_config(config: PageSchemaConfig, registry: &BlockRegistry) -> Result<Self, PageError> {
        if config.name.trim().is_empty() {
            return Err(PageError::EmptyName);
        }

        let mut seen = HashSet::new();
        for block in &config.blocks {
            if block.name.trim().is_empty() {
                return Err(PageError::EmptyName);
            }
            if !seen.insert(block.name.as_str()) {
                return Err(PageError::DuplicateBlockName(block.name.clone()));
            }
            if !registry.contains(block.kind) {
                return Err(PageError::UnregisteredKind(block.kind));
            }
        }

        let mut schema = Self::new(config.name, registry).with_config(config.validation);
        if let Some(verbose_name) = config.verbose_name {
            schema = schema.with_verbose_name(verbose_name);
        }
        schema.allowed = config.blocks;
        Ok(schema)
    }

    pub fn with_verbose_name(mut self, verbose_name: impl Into<String>) -> Self {
        self.verbose_name = verbose_name.into();
        self
    }

    /// Allow `kind` under `name`, replacing any earlier entry with that name
    pub fn with_block(mut self, name: impl Into<String>, kind: BlockKind) -> Self {
        let name = name.into();
        match self.allowed.iter_mut().find(|b| b.name == name) {
            Some(existing) => existing.kind = kind,
            None => self.allowed.push(AllowedBlock { name, kind }),
        }
        self
    }

    pub fn with_config(mut self, config: ValidationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn verbose_name(&self) -> &str {
        &self.verbose_name
    }

    pub fn scalar_fields(&self) -> &[FieldDescriptor] {
        &self.scalar_fields
    }

    pub fn allowed_blocks(&self) -> &[AllowedBlock] {
        &self.allowed
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// Block kind declared under `name`
    pub fn kind_for(&self, name: &str) -> Option<BlockKind> {
        self.allowed.iter().find(|b| b.name == name).map(|b| b.kind)
    }

    /// Describe this page type
    pub fn to_config(&self) -> PageSchemaConfig {
        PageSchemaConfig {
            name: self.name.clone(),
            verbose_name: Some(self.verbose_name.clone()),
            blocks: self.allowed.clone(),
            validation: self.config.clone(),
        }
    }

    /// Validate a raw content sequence.
    ///
    /// Every entry must use a declared kind name and pass its block's field
    /// validation. Errors are scoped as `[index].field`. Ids must be unique
    /// within the sequence; entries without one are assigned a fresh one.
    pub fn clean_sequence(&self, raw: &[StreamChild]) -> Result<ContentSequence, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if let Some(max) = self.config.max_sequence_len {
            if raw.len() > max {
                errors.add(
                    "",
                    ValidationErrorKind::SequenceTooLong {
                        max,
                        actual: raw.len(),
                    },
                );
            }
        }

        let validator = Validator::new(&self.registry, &self.config);
        let mut blocks = Vec::with_capacity(raw.len());
        let mut seen_ids = HashSet::new();

        for (index, child) in raw.iter().enumerate() {
            let path = format!("[{}]", index);

            if let Some(id) = child.id {
                if !seen_ids.insert(id) {
                    errors.add(
                        format!("{}.id", path),
                        ValidationErrorKind::DuplicateBlockId { id: id.to_string() },
                    );
                }
            }

            let Some(kind) = self.kind_for(&child.kind) else {
                errors.add(
                    path,
                    ValidationErrorKind::UnknownBlockKind {
                        kind: child.kind.clone(),
                    },
                );
                continue;
            };

            let FieldValue::Object(value) = &child.value else {
                errors.add(
                    path,
                    ValidationErrorKind::InvalidType {
                        expected: "object".into(),
                        found: child.value.type_name().into(),
                    },
                );
                continue;
            };

            match validator.clean_block(kind, value) {
                Ok(cleaned) => blocks.push(ContentBlock {
                    name: child.kind.clone(),
                    kind,
                    id: child.id.unwrap_or_default(),
                    value: cleaned,
                }),
                Err(e) => errors.merge(e.prefixed(&path)),
            }
        }

        if !errors.is_empty() {
            warn!(page_type = %self.name, errors = errors.len(), "content sequence rejected");
            return Err(errors);
        }

        debug!(page_type = %self.name, blocks = blocks.len(), "content sequence validated");
        Ok(ContentSequence::new(blocks))
    }

    /// Parse and validate a content sequence in its persisted JSON form
    pub fn parse_sequence(&self, json: &str) -> Result<ContentSequence, PageError> {
        let raw: Vec<StreamChild> = serde_json::from_str(json)?;
        Ok(self.clean_sequence(&raw)?)
    }

    /// Validate scalar fields and content together; content errors are
    /// scoped as `content[index].field`.
    pub fn clean_page(&self, draft: &PageDraft) -> Result<Page, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let mut scalars = StructValue::new();
        scalars.insert("title".into(), draft.title.as_str().into());
        if let Some(subtitle) = &draft.subtitle {
            scalars.insert("subtitle".into(), subtitle.as_str().into());
        }

        let validator = Validator::new(&self.registry, &self.config);
        if let Err(e) = validator.clean_fields(&self.scalar_fields, &scalars) {
            errors.merge(e);
        }

        let content = match self.clean_sequence(&draft.content) {
            Ok(content) => content,
            Err(e) => {
                errors.merge(e.prefixed("content"));
                ContentSequence::default()
            }
        };

        errors.into_result(Page {
            title: draft.title.clone(),
            subtitle: draft.subtitle.clone(),
            content,
        })
    }
}

impl std::fmt::Debug for PageSchema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageSchema")
            .field("name", &self.name)
            .field("allowed", &self.allowed)
            .field("config", &self.config)
            .finish()
    }
}

/// Page schema errors
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Page type or allowed block has an empty name
    #[error("Name cannot be empty")]
    EmptyName,

    /// Two allowed blocks share a name
    #[error("Duplicate block name: {0}")]
    DuplicateBlockName(String),

    /// Allowed block refers to a kind missing from the registry
    #[error("Block kind not registered: {0}")]
    UnregisteredKind(BlockKind),

    /// Malformed JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Content failed validation
    #[error("{0}")]
    Validation(#[from] ValidationErrors),
}
