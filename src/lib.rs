//! UnityAid content - block catalog and page schema
//!
//! This crate defines the content blocks of the UnityAid website (hero banners,
//! statistics, project cards, team sections, section headers), validates block
//! instances against their field-descriptor tables, and composes them into
//! page content sequences with an all-or-nothing save contract.

pub mod core;
pub mod categories;
pub mod page;
mod tests;

// Re-export commonly used types
pub use crate::core::registry::BlockRegistry;
pub use crate::core::{Block, BlockDefinition, BlockId, BlockKind, ValidationErrorKind, ValidationErrors};
pub use categories::BlockCategory;
pub use page::{ContentSequence, Page, PageDraft, PageSchema, PageStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
