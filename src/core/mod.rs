//! Core block abstractions and types
//!
//! This module defines the field descriptors, choice sets, block definitions,
//! the shared validator and the registry that together form the block catalog.

pub mod choice;
pub mod field;
pub mod block;
pub mod validation;
pub mod registry;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use block::{Block, BlockDefinition, BlockError, BlockKind, BlockMetadata};
pub use field::{FieldDescriptor, FieldType, FieldValue, StructValue};
pub use validation::{FieldError, ValidationConfig, ValidationErrorKind, ValidationErrors};

/// Unique identifier of one block instance inside a content sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub Uuid);

impl BlockId {
    /// Generate a new random block ID
    pub fn new() -> Self {
        BlockId(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
