//! Name → index registry.

use std::sync::Arc;

use ahash::AHashMap;
use log::info;
use parking_lot::RwLock;

use crate::analysis::Preprocessor;
use crate::engine::config::IndexConfig;
use crate::engine::search_index::{IndexSummary, SearchIndex};
use crate::error::{Result, XiphosError};

/// Registry of named indices.
///
/// The registry lock is held only to look up, insert or remove an entry;
/// work on an index happens on its own lock after the handle is returned.
#[derive(Debug, Default)]
pub struct IndexRegistry {
    indices: RwLock<AHashMap<String, Arc<SearchIndex>>>,
}

impl IndexRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an index. Fails with `Conflict` when the name is taken.
    pub fn create_index(&self, name: &str, config: IndexConfig) -> Result<Arc<SearchIndex>> {
        let index = SearchIndex::new(name, config)?;
        self.insert(index)
    }

    /// Create an index with a caller-supplied preprocessor.
    pub fn create_index_with_preprocessor(
        &self,
        name: &str,
        config: IndexConfig,
        preprocessor: Arc<dyn Preprocessor>,
    ) -> Result<Arc<SearchIndex>> {
        let index = SearchIndex::with_preprocessor(name, config, preprocessor)?;
        self.insert(index)
    }

    fn insert(&self, index: SearchIndex) -> Result<Arc<SearchIndex>> {
        let mut indices = self.indices.write();
        if indices.contains_key(index.name()) {
            return Err(XiphosError::conflict(format!(
                "index '{}' already exists",
                index.name()
            )));
        }

        let index = Arc::new(index);
        indices.insert(index.name().to_string(), Arc::clone(&index));
        drop(indices);

        info!("created index '{}'", index.name());
        Ok(index)
    }

    /// Remove an index. Handles already given out stay usable.
    pub fn delete_index(&self, name: &str) -> Result<()> {
        self.indices
            .write()
            .remove(name)
            .ok_or_else(|| XiphosError::not_found(format!("index '{name}'")))?;

        info!("deleted index '{name}'");
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<Arc<SearchIndex>> {
        self.indices
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| XiphosError::not_found(format!("index '{name}'")))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.indices.read().contains_key(name)
    }

    /// Index names in ascending order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.indices.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Summaries of all indices, ordered by name.
    pub fn list(&self) -> Vec<IndexSummary> {
        let mut indices: Vec<Arc<SearchIndex>> = self.indices.read().values().cloned().collect();
        indices.sort_by(|a, b| a.name().cmp(b.name()));
        indices.iter().map(|index| index.summary()).collect()
    }

    pub fn len(&self) -> usize {
        self.indices.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_create_get_delete() {
        let registry = IndexRegistry::new();
        registry.create_index("books", IndexConfig::default()).unwrap();

        assert!(registry.contains("books"));
        assert_eq!(registry.get("books").unwrap().name(), "books");

        registry.delete_index("books").unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.get("books").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(registry.delete_index("books").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_duplicate_name() {
        let registry = IndexRegistry::new();
        registry.create_index("books", IndexConfig::default()).unwrap();

        let err = registry.create_index("books", IndexConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_list_is_sorted() {
        let registry = IndexRegistry::new();
        for name in ["zebra", "apple", "mango"] {
            registry.create_index(name, IndexConfig::default()).unwrap();
        }

        let names: Vec<_> = registry.list().into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["apple", "mango", "zebra"]);
        assert_eq!(registry.names(), names);
    }

    #[test]
    fn test_handle_outlives_deletion() {
        let registry = IndexRegistry::new();
        let index = registry.create_index("tmp", IndexConfig::default()).unwrap();
        registry.delete_index("tmp").unwrap();

        index.ingest_json(r#"{"text": "still works"}"#).unwrap();
        assert_eq!(index.document_count(), 1);
    }
}
