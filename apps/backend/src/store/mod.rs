//! Document store seam.
//!
//! The repository layer talks to persistence exclusively through the
//! [`DocumentStore`] trait, so the driver can be swapped without touching
//! domain code and the repos are testable against the in-memory driver.
//! Deadlines and domain error mapping live one layer up, in
//! `adapters::accounts_store`; a driver only reports its own transport
//! failures.

pub mod doc_id;
pub mod memory;

use async_trait::async_trait;
use futures_util::stream::BoxStream;
use thiserror::Error;

pub use doc_id::{DocId, DocIdError};
pub use memory::MemoryStore;

/// Raw document shape handed to and returned by a driver.
pub type Document = serde_json::Value;

/// Driver-level failure. Classification into the domain taxonomy happens in
/// the adapter.
#[derive(Error, Debug, Clone)]
pub enum StoreError {
    #[error("store transport failure: {0}")]
    Transport(String),
}

/// Narrow contract the repository needs from a document store.
///
/// `scan` returns a lazy, finite, non-restartable cursor over every
/// document; a driver must surface mid-stream transport errors as items
/// rather than truncating silently.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document; the store assigns and returns the native id.
    async fn insert(&self, doc: Document) -> Result<DocId, StoreError>;

    async fn find_by_id(&self, id: DocId) -> Result<Option<Document>, StoreError>;

    /// Replace the document stored under `id`. Returns whether a document
    /// existed.
    async fn replace_by_id(&self, id: DocId, doc: Document) -> Result<bool, StoreError>;

    /// Delete the document stored under `id`. Returns whether a document
    /// existed.
    async fn delete_by_id(&self, id: DocId) -> Result<bool, StoreError>;

    fn scan(&self) -> BoxStream<'static, Result<(DocId, Document), StoreError>>;
}
