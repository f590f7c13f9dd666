use crate::domain::model::{Document, DocumentList};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Durable home of the full document collection.
///
/// Implementations must serialize `append` and `save` so that concurrent
/// callers never lose or duplicate a document.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn load(&self) -> Result<DocumentList>;

    async fn save(&self, documents: &DocumentList) -> Result<()>;

    /// Appends one document and returns the collection size after the write.
    async fn append(&self, document: Document) -> Result<usize>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_address(&self) -> String;
    fn storage_path(&self) -> &str;
    fn request_limit(&self) -> usize;
    fn window(&self) -> Duration;
}
