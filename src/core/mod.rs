pub mod admission;
pub mod ingest;
pub mod ticker;

pub use crate::domain::model::{Document, DocumentList};
pub use crate::domain::ports::{ConfigProvider, DocumentStore};
pub use crate::utils::error::Result;
