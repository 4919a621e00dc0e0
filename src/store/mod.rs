//! The configuration store boundary: one `GET`-like fetch and one `POST`-like
//! persist per operation, single-shot, no retry, last writer wins.

use async_trait::async_trait;
use thiserror::Error;

use crate::config::models::RawDocument;

pub mod file;
pub mod http;

pub use file::FileConfigStore;
pub use http::HttpConfigStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Config store returned non-success status: {0}")]
    Status(u16),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed configuration document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Abstract persistence for the whole configuration document. Documents are
/// replaced wholesale; there are no partial or patch semantics at this layer.
#[async_trait]
pub trait ConfigStore: Send + Sync {
    async fn fetch(&self) -> Result<RawDocument, StoreError>;
    async fn persist(&self, document: &RawDocument) -> Result<(), StoreError>;
}
