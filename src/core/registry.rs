//! Block Registry - Central catalog of block definitions
//!
//! This module provides a thread-safe registry of block definitions. It supports:
//! - Definition registration and unregistration
//! - Lookup by kind, category, or search query
//! - Definition checks (unique field names, non-empty labels)
//! - Detection of list fields that nest unregistered kinds
//! - Validation of block instances against the registered definitions

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::categories::{self, BlockCategory};
use crate::core::block::{BlockDefinition, BlockKind};
use crate::core::field::StructValue;
use crate::core::validation::{ValidationConfig, ValidationErrors, Validator};

/// Registry of block definitions
///
/// The registry uses `Arc<RwLock<HashMap>>` so clones share the same catalog;
/// parking_lot's RwLock allows concurrent reads and exclusive writes.
#[derive(Clone)]
pub struct BlockRegistry {
    definitions: Arc<RwLock<HashMap<BlockKind, Arc<BlockDefinition>>>>,
}

impl BlockRegistry {
    /// Create a new empty registry
    ///
    /// # Example
    /// ```
    /// use unityaid_content::core::registry::BlockRegistry;
    ///
    /// let registry = BlockRegistry::new();
    /// assert_eq!(registry.count(), 0);
    /// ```
    pub fn new() -> Self {
        Self {
            definitions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a registry holding every built-in block definition
    ///
    /// # Example
    /// ```
    /// use unityaid_content::core::registry::BlockRegistry;
    /// use unityaid_content::core::BlockKind;
    ///
    /// let registry = BlockRegistry::with_builtin_blocks();
    /// assert!(registry.contains(BlockKind::Hero));
    /// ```
    pub fn with_builtin_blocks() -> Self {
        let registry = Self::new();
        {
            let mut definitions = registry.definitions.write();
            for definition in categories::builtin_definitions() {
                definitions.insert(definition.kind(), Arc::new(definition));
            }
        }
        registry
    }

    /// Register a new block definition
    ///
    /// # Returns
    /// * `Ok(())` if registration succeeds
    /// * `Err(RegistryError)` if the kind is already registered or the definition is malformed
    pub fn register(&self, definition: BlockDefinition) -> Result<(), RegistryError> {
        definition
            .check()
            .map_err(|e| RegistryError::ValidationError(e.to_string()))?;

        let kind = definition.kind();
        let mut definitions = self.definitions.write();

        if definitions.contains_key(&kind) {
            return Err(RegistryError::DuplicateDefinition(kind));
        }

        debug!(kind = %kind, fields = definition.fields.len(), "registered block definition");
        definitions.insert(kind, Arc::new(definition));
        Ok(())
    }

    /// Unregister a definition
    pub fn unregister(&self, kind: BlockKind) -> Result<(), RegistryError> {
        let mut definitions = self.definitions.write();

        definitions
            .remove(&kind)
            .ok_or(RegistryError::DefinitionNotFound(kind))?;

        Ok(())
    }

    /// Get a definition by kind
    pub fn get_definition(&self, kind: BlockKind) -> Result<Arc<BlockDefinition>, RegistryError> {
        let definitions = self.definitions.read();

        definitions
            .get(&kind)
            .cloned()
            .ok_or(RegistryError::DefinitionNotFound(kind))
    }

    /// Get all registered definitions, in catalog order
    pub fn get_all_definitions(&self) -> Vec<Arc<BlockDefinition>> {
        let definitions = self.definitions.read();
        let mut all: Vec<_> = definitions.values().cloned().collect();
        all.sort_by_key(|d| d.kind());
        all
    }

    /// Get definitions filtered by category
    pub fn get_definitions_by_category(&self, category: &BlockCategory) -> Vec<Arc<BlockDefinition>> {
        self.get_all_definitions()
            .into_iter()
            .filter(|d| d.metadata.category == *category)
            .collect()
    }

    /// Search definitions by query string
    ///
    /// Searches in kind, label and description (case-insensitive).
    pub fn search_definitions(&self, query: &str) -> Vec<Arc<BlockDefinition>> {
        let query = query.to_lowercase();

        self.get_all_definitions()
            .into_iter()
            .filter(|d| {
                let meta = &d.metadata;
                meta.kind.as_str().contains(&query)
                    || meta.label.to_lowercase().contains(&query)
                    || meta.description.to_lowercase().contains(&query)
            })
            .collect()
    }

    /// Get the number of registered definitions
    pub fn count(&self) -> usize {
        self.definitions.read().len()
    }

    /// Check if a kind is registered
    pub fn contains(&self, kind: BlockKind) -> bool {
        self.definitions.read().contains_key(&kind)
    }

    /// Remove every definition
    pub fn clear(&self) {
        self.definitions.write().clear();
    }

    /// List fields whose nested kind is not registered, as `(owner, nested)` pairs
    pub fn missing_dependencies(&self) -> Vec<(BlockKind, BlockKind)> {
        let definitions = self.definitions.read();
        let mut missing: Vec<_> = definitions
            .values()
            .flat_map(|d| {
                let owner = d.kind();
                d.nested_kinds()
                    .filter(|nested| !definitions.contains_key(nested))
                    .map(move |nested| (owner, nested))
                    .collect::<Vec<_>>()
            })
            .collect();
        missing.sort();
        missing
    }

    /// Validate an instance of `kind` with the default configuration
    pub fn clean(&self, kind: BlockKind, raw: &StructValue) -> Result<StructValue, ValidationErrors> {
        self.clean_with(kind, raw, &ValidationConfig::default())
    }

    /// Validate an instance of `kind`, returning it with explicit defaults applied
    pub fn clean_with(
        &self,
        kind: BlockKind,
        raw: &StructValue,
        config: &ValidationConfig,
    ) -> Result<StructValue, ValidationErrors> {
        Validator::new(self, config).clean_block(kind, raw)
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Registry error types
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// No definition registered for the kind
    #[error("Block definition not found: {0}")]
    DefinitionNotFound(BlockKind),

    /// Attempted to register a kind twice
    #[error("Duplicate block definition: {0}")]
    DuplicateDefinition(BlockKind),

    /// Definition failed its checks
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::{FieldDescriptor, FieldValue};
    use crate::core::validation::ValidationErrorKind;

    #[test]
    fn test_registry_creation() {
        let registry = BlockRegistry::new();
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_builtin_registry_holds_every_kind() {
        let registry = BlockRegistry::with_builtin_blocks();
        assert_eq!(registry.count(), BlockKind::ALL.len());
        assert!(registry.missing_dependencies().is_empty());
    }

    #[test]
    fn test_definition_registration() {
        let registry = BlockRegistry::new();
        registry.register(BlockKind::Hero.definition()).unwrap();

        assert_eq!(registry.count(), 1);
        let retrieved = registry.get_definition(BlockKind::Hero).unwrap();
        assert_eq!(retrieved.metadata.label, "Hero Section");
    }

    #[test]
    fn test_duplicate_registration() {
        let registry = BlockRegistry::new();
        registry.register(BlockKind::Hero.definition()).unwrap();

        let result = registry.register(BlockKind::Hero.definition());
        assert!(matches!(
            result.unwrap_err(),
            RegistryError::DuplicateDefinition(BlockKind::Hero)
        ));
    }

    #[test]
    fn test_unregister() {
        let registry = BlockRegistry::with_builtin_blocks();
        registry.unregister(BlockKind::TeamSection).unwrap();
        assert!(!registry.contains(BlockKind::TeamSection));

        let result = registry.unregister(BlockKind::TeamSection);
        assert!(matches!(
            result.unwrap_err(),
            RegistryError::DefinitionNotFound(BlockKind::TeamSection)
        ));
    }

    #[test]
    fn test_validation_rejects_malformed_definition() {
        let registry = BlockRegistry::new();
        let mut definition = BlockKind::StatItem.definition();
        definition.fields.push(FieldDescriptor::char("label", "duplicate"));

        let result = registry.register(definition);
        assert!(matches!(result.unwrap_err(), RegistryError::ValidationError(_)));
    }

    #[test]
    fn test_validation_rejects_empty_label() {
        let registry = BlockRegistry::new();
        let mut definition = BlockKind::Hero.definition();
        definition.metadata.label = String::new();

        assert!(registry.register(definition).is_err());
    }

    #[test]
    fn test_missing_dependencies() {
        let registry = BlockRegistry::new();
        registry.register(BlockKind::ImpactStatistics.definition()).unwrap();
        assert_eq!(
            registry.missing_dependencies(),
            vec![(BlockKind::ImpactStatistics, BlockKind::StatItem)]
        );

        registry.register(BlockKind::StatItem.definition()).unwrap();
        assert!(registry.missing_dependencies().is_empty());
    }

    #[test]
    fn test_nested_kind_missing_at_clean_time() {
        let registry = BlockRegistry::new();
        registry.register(BlockKind::ImpactStatistics.definition()).unwrap();

        let mut stat = StructValue::new();
        stat.insert("number".into(), "5".into());
        let mut raw = StructValue::new();
        raw.insert("section_title".into(), "Impact".into());
        raw.insert("stats".into(), FieldValue::List(vec![FieldValue::Object(stat)]));

        let errors = registry.clean(BlockKind::ImpactStatistics, &raw).unwrap_err();
        assert!(errors.has("stats[0]", |k| matches!(k, ValidationErrorKind::UnknownBlockKind { .. })));
    }

    #[test]
    fn test_search_and_category() {
        let registry = BlockRegistry::with_builtin_blocks();

        let results = registry.search_definitions("project");
        assert_eq!(results.len(), 2);

        let stats = registry.get_definitions_by_category(&BlockCategory::Statistics);
        let kinds: Vec<_> = stats.iter().map(|d| d.kind()).collect();
        assert_eq!(kinds, vec![BlockKind::StatItem, BlockKind::ImpactStatistics]);
    }

    #[test]
    fn test_clear() {
        let registry = BlockRegistry::with_builtin_blocks();
        registry.clear();
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_thread_safety() {
        use std::thread;

        let registry = BlockRegistry::new();
        let mut handles = vec![];

        for kind in BlockKind::ALL {
            let registry_clone = registry.clone();
            handles.push(thread::spawn(move || {
                registry_clone.register(kind.definition()).unwrap();
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(registry.count(), BlockKind::ALL.len());
    }
}
