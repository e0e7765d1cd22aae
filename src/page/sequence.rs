//! Content sequences
//!
//! The persisted form of a page body is an ordered JSON array of tagged
//! records, `{"type": <kind name>, "value": {...}, "id": <uuid>}`. A
//! [`ContentSequence`] is the validated form: every entry has a resolved
//! [`BlockKind`], a cleaned value and an id.

use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use crate::core::block::{Block, BlockError, BlockKind};
use crate::core::field::{FieldValue, StructValue};
use crate::core::BlockId;

/// One raw entry of a content sequence, as stored or submitted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamChild {
    /// Kind name declared by the page type (e.g. "hero_section")
    #[serde(rename = "type", alias = "kind")]
    pub kind: String,
    pub value: FieldValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BlockId>,
}

impl StreamChild {
    /// New entry without an id; one is assigned when the sequence is cleaned
    pub fn new(kind: impl Into<String>, value: StructValue) -> Self {
        Self {
            kind: kind.into(),
            value: FieldValue::Object(value),
            id: None,
        }
    }

    /// Set the entry id
    pub fn with_id(mut self, id: BlockId) -> Self {
        self.id = Some(id);
        self
    }
}

/// One validated entry of a content sequence
#[derive(Debug, Clone, PartialEq)]
pub struct ContentBlock {
    /// Kind name as declared by the page type
    pub name: String,
    pub kind: BlockKind,
    pub id: BlockId,
    /// Cleaned field values, explicit defaults applied
    pub value: StructValue,
}

impl ContentBlock {
    /// Typed view of this entry
    pub fn block(&self) -> Result<Block, BlockError> {
        Block::from_value(self.kind, &self.value)
    }

    pub fn template(&self) -> &'static str {
        self.kind.template()
    }

    /// Persisted form of this entry
    pub fn to_stream_child(&self) -> StreamChild {
        StreamChild {
            kind: self.name.clone(),
            value: FieldValue::Object(self.value.clone()),
            id: Some(self.id),
        }
    }
}

/// A block paired with the template that renders it
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateBinding<'a> {
    pub name: &'a str,
    pub id: BlockId,
    pub template: &'static str,
    pub block: Block,
}

/// Validated, ordered page body
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentSequence {
    blocks: Vec<ContentBlock>,
}

impl ContentSequence {
    pub(crate) fn new(blocks: Vec<ContentBlock>) -> Self {
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ContentBlock> {
        self.blocks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ContentBlock> {
        self.blocks.iter()
    }

    /// Entries declared under `name`, in order
    pub fn blocks_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ContentBlock> {
        self.blocks.iter().filter(move |b| b.name == name)
    }

    /// Persisted form of the whole sequence
    pub fn to_stream(&self) -> Vec<StreamChild> {
        self.blocks.iter().map(ContentBlock::to_stream_child).collect()
    }

    /// Serialize to the persisted JSON representation
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Typed blocks with their templates, in render order
    pub fn template_bindings(&self) -> Result<Vec<TemplateBinding<'_>>, BlockError> {
        self.blocks
            .iter()
            .map(|b| {
                Ok(TemplateBinding {
                    name: &b.name,
                    id: b.id,
                    template: b.template(),
                    block: b.block()?,
                })
            })
            .collect()
    }
}

impl Serialize for ContentSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.blocks.iter().map(ContentBlock::to_stream_child))
    }
}

impl<'a> IntoIterator for &'a ContentSequence {
    type Item = &'a ContentBlock;
    type IntoIter = std::slice::Iter<'a, ContentBlock>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
