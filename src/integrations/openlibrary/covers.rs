// src/integrations/openlibrary/covers.rs
//
// Cover image downloads
//
// Best-effort: the import pipeline treats any failure here as a skipped
// enhancement, never a user-visible error.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use crate::error::{AppError, AppResult};

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

/// Seam for cover downloads, so the import pipeline can be tested offline
#[async_trait]
pub trait CoverFetcher: Send + Sync {
    /// Fetch raw image bytes from a cover URL
    async fn fetch_cover(&self, url: &str) -> AppResult<Vec<u8>>;
}

/// HTTP cover fetcher against the covers endpoint
pub struct HttpCoverFetcher {
    http_client: Client,
}

impl HttpCoverFetcher {
    pub fn new() -> Self {
        let http_client = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self { http_client }
    }
}

#[async_trait]
impl CoverFetcher for HttpCoverFetcher {
    async fn fetch_cover(&self, url: &str) -> AppResult<Vec<u8>> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Server(status.as_u16()));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

impl Default for HttpCoverFetcher {
    fn default() -> Self {
        Self::new()
    }
}
