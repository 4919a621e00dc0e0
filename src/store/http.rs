use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{ConfigStore, StoreError};
use crate::config::models::RawDocument;

/// Client for a remote config store exposing `GET`/`POST /api/config`.
pub struct HttpConfigStore {
    client: Client,
    endpoint: String,
}

impl HttpConfigStore {
    pub fn new(base_url: &str) -> Self {
        HttpConfigStore {
            client: Client::new(),
            endpoint: format!("{}/api/config", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl ConfigStore for HttpConfigStore {
    async fn fetch(&self) -> Result<RawDocument, StoreError> {
        debug!(endpoint = %self.endpoint, "Fetching configuration.");
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }
        Ok(response.json().await?)
    }

    async fn persist(&self, document: &RawDocument) -> Result<(), StoreError> {
        debug!(endpoint = %self.endpoint, "Persisting configuration.");
        let response = self.client.post(&self.endpoint).json(document).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_derived_from_the_base_url() {
        let store = HttpConfigStore::new("http://localhost:8080/");
        assert_eq!(store.endpoint, "http://localhost:8080/api/config");

        let store = HttpConfigStore::new("http://localhost:8080");
        assert_eq!(store.endpoint, "http://localhost:8080/api/config");
    }
}
