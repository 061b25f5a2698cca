//! In-memory document store driver.
//!
//! Backs the test suite and the default process. All synchronization is
//! internal; callers share a single instance across concurrent requests.

use std::collections::BTreeMap;

use async_trait::async_trait;
use futures_util::stream::{self, BoxStream, StreamExt};
use parking_lot::RwLock;

use super::{DocId, Document, DocumentStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<BTreeMap<DocId, Document>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.docs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.read().is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn insert(&self, doc: Document) -> Result<DocId, StoreError> {
        let id = DocId::generate();
        self.docs.write().insert(id, doc);
        Ok(id)
    }

    async fn find_by_id(&self, id: DocId) -> Result<Option<Document>, StoreError> {
        Ok(self.docs.read().get(&id).cloned())
    }

    async fn replace_by_id(&self, id: DocId, doc: Document) -> Result<bool, StoreError> {
        let mut docs = self.docs.write();
        match docs.get_mut(&id) {
            Some(slot) => {
                *slot = doc;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_by_id(&self, id: DocId) -> Result<bool, StoreError> {
        Ok(self.docs.write().remove(&id).is_some())
    }

    fn scan(&self) -> BoxStream<'static, Result<(DocId, Document), StoreError>> {
        // Snapshot under the read lock; the cursor itself holds no lock.
        let snapshot: Vec<(DocId, Document)> = self
            .docs
            .read()
            .iter()
            .map(|(id, doc)| (*id, doc.clone()))
            .collect();
        stream::iter(snapshot.into_iter().map(Ok)).boxed()
    }
}
