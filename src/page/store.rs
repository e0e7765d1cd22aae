//! Page store
//!
//! A [`PageStore`] validates before it writes: a page whose scalar fields or
//! content sequence fail validation is never stored, not even in part.
//! [`InMemoryPageStore`] keeps each page in its persisted JSON form.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

use super::draft::{Page, PageDraft};
use super::PageSchema;
use crate::core::validation::ValidationErrors;

/// Unique identifier for a stored page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(pub Uuid);

impl PageId {
    /// Generate a new random page ID
    pub fn new() -> Self {
        PageId(Uuid::new_v4())
    }
}

impl Default for PageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Storage seam for pages
pub trait PageStore: Send + Sync {
    /// Validate and store a new page
    fn save(&self, schema: &PageSchema, draft: &PageDraft) -> Result<PageId, StoreError>;

    /// Validate and replace an existing page; the old version stays on failure
    fn update(&self, id: PageId, schema: &PageSchema, draft: &PageDraft) -> Result<(), StoreError>;

    /// Load and re-validate a page
    fn load(&self, id: PageId, schema: &PageSchema) -> Result<Page, StoreError>;

    /// Delete a page and its content sequence
    fn delete(&self, id: PageId) -> Result<(), StoreError>;

    /// IDs of every stored page, ordered by page title
    fn list(&self) -> Vec<PageId>;
}

/// Page store holding the persisted JSON form of each page
#[derive(Clone, Default)]
pub struct InMemoryPageStore {
    pages: Arc<RwLock<HashMap<PageId, serde_json::Value>>>,
}

impl InMemoryPageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pages
    pub fn count(&self) -> usize {
        self.pages.read().len()
    }

    /// Persisted JSON of a page
    pub fn raw(&self, id: PageId) -> Option<serde_json::Value> {
        self.pages.read().get(&id).cloned()
    }

    fn encode(schema: &PageSchema, draft: &PageDraft) -> Result<serde_json::Value, StoreError> {
        let page = schema.clean_page(draft).map_err(|errors| {
            warn!(page_type = schema.name(), errors = errors.len(), "page rejected");
            StoreError::Validation(errors)
        })?;
        Ok(serde_json::to_value(&page)?)
    }
}

impl PageStore for InMemoryPageStore {
    fn save(&self, schema: &PageSchema, draft: &PageDraft) -> Result<PageId, StoreError> {
        let json = Self::encode(schema, draft)?;
        let id = PageId::new();
        self.pages.write().insert(id, json);
        debug!(page = %id, page_type = schema.name(), "page saved");
        Ok(id)
    }

    fn update(&self, id: PageId, schema: &PageSchema, draft: &PageDraft) -> Result<(), StoreError> {
        if !self.pages.read().contains_key(&id) {
            return Err(StoreError::PageNotFound(id));
        }
        let json = Self::encode(schema, draft)?;

        let mut pages = self.pages.write();
        match pages.get_mut(&id) {
            Some(slot) => {
                *slot = json;
                debug!(page = %id, "page updated");
                Ok(())
            }
            None => Err(StoreError::PageNotFound(id)),
        }
    }

    fn load(&self, id: PageId, schema: &PageSchema) -> Result<Page, StoreError> {
        let json = self.raw(id).ok_or(StoreError::PageNotFound(id))?;
        let draft: PageDraft = serde_json::from_value(json)?;
        Ok(schema.clean_page(&draft)?)
    }

    fn delete(&self, id: PageId) -> Result<(), StoreError> {
        self.pages
            .write()
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::PageNotFound(id))
    }

    fn list(&self) -> Vec<PageId> {
        let pages = self.pages.read();
        let mut entries: Vec<(&str, PageId)> = pages
            .iter()
            .map(|(id, json)| (json["title"].as_str().unwrap_or_default(), *id))
            .collect();
        entries.sort();
        entries.into_iter().map(|(_, id)| id).collect()
    }
}

/// Page store errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Page failed validation; nothing was written
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// No page with the given ID
    #[error("Page not found: {0}")]
    PageNotFound(PageId),

    /// Stored JSON could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
