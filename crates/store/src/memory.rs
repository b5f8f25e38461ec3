//! In-memory collections with unique-index enforcement.

use std::collections::HashMap;
use std::sync::RwLock;

use time::OffsetDateTime;
use uuid::Uuid;

use crate::StoreError;

/// Contract every stored document satisfies: a stable id and a creation
/// timestamp used as the default sort key.
pub trait Document: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
    fn created_at(&self) -> OffsetDateTime;
}

type KeyFn<T> = Box<dyn Fn(&T) -> String + Send + Sync>;

/// One page of query results together with the unpaged total.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// A named collection of documents.
///
/// Unique indexes are declared at construction with [`Collection::with_unique_index`];
/// every key extractor runs inside the write lock on insert and update, which
/// makes uniqueness enforcement atomic with the write.
pub struct Collection<T: Document> {
    name: &'static str,
    unique_indexes: Vec<(&'static str, KeyFn<T>)>,
    documents: RwLock<HashMap<Uuid, T>>,
}

impl<T: Document> Collection<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            unique_indexes: Vec::new(),
            documents: RwLock::new(HashMap::new()),
        }
    }

    /// Declare a unique index. `key` extracts the indexed value; two documents
    /// with equal keys cannot coexist in the collection.
    pub fn with_unique_index(
        mut self,
        index: &'static str,
        key: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        self.unique_indexes.push((index, Box::new(key)));
        self
    }

    /// Conditionally insert a document, rejecting unique-index collisions.
    pub fn insert(&self, doc: T) -> Result<T, StoreError> {
        let mut documents = self.documents.write().expect("collection lock poisoned");

        for (index, key) in &self.unique_indexes {
            let candidate = key(&doc);
            if documents.values().any(|existing| key(existing) == candidate) {
                return Err(StoreError::Duplicate {
                    collection: self.name,
                    index,
                });
            }
        }

        documents.insert(doc.id(), doc.clone());
        tracing::debug!(collection = self.name, id = %doc.id(), "document inserted");
        Ok(doc)
    }

    pub fn get(&self, id: Uuid) -> Option<T> {
        self.documents
            .read()
            .expect("collection lock poisoned")
            .get(&id)
            .cloned()
    }

    /// Apply `apply` to the stored document, re-validating unique indexes
    /// against the rest of the collection before committing.
    pub fn update(&self, id: Uuid, apply: impl FnOnce(&mut T)) -> Result<T, StoreError> {
        let mut documents = self.documents.write().expect("collection lock poisoned");

        let mut updated = documents
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound {
                collection: self.name,
                id,
            })?;
        apply(&mut updated);

        for (index, key) in &self.unique_indexes {
            let candidate = key(&updated);
            let collides = documents
                .values()
                .any(|other| other.id() != id && key(other) == candidate);
            if collides {
                return Err(StoreError::Duplicate {
                    collection: self.name,
                    index,
                });
            }
        }

        documents.insert(id, updated.clone());
        Ok(updated)
    }

    pub fn remove(&self, id: Uuid) -> Result<T, StoreError> {
        self.documents
            .write()
            .expect("collection lock poisoned")
            .remove(&id)
            .ok_or(StoreError::NotFound {
                collection: self.name,
                id,
            })
    }

    /// All documents matching `filter`, newest first (id breaks ties).
    pub fn find(&self, filter: impl Fn(&T) -> bool) -> Vec<T> {
        let documents = self.documents.read().expect("collection lock poisoned");

        let mut matches: Vec<T> = documents.values().filter(|doc| filter(doc)).cloned().collect();
        matches.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| b.id().cmp(&a.id()))
        });
        matches
    }

    /// Skip/limit page over the filtered, sorted result set, with the
    /// unpaged match count for pagination metadata.
    pub fn page(&self, filter: impl Fn(&T) -> bool, skip: u64, limit: u64) -> Page<T> {
        let matches = self.find(filter);
        let total = matches.len() as u64;
        let items = matches
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect();

        Page { items, total }
    }

    pub fn count(&self, filter: impl Fn(&T) -> bool) -> u64 {
        self.documents
            .read()
            .expect("collection lock poisoned")
            .values()
            .filter(|doc| filter(doc))
            .count() as u64
    }

    pub fn len(&self) -> usize {
        self.documents
            .read()
            .expect("collection lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
