// src/integrations/openlibrary/client.rs
//
// Open Library search client
//
// ARCHITECTURE:
// - Plain HTTP client for the Open Library search endpoint
// - At most one request in flight per client instance
// - A new search aborts the previous request before starting
// - Maps the wire format into CatalogRecord DTOs (NO domain mutation)
//
// Cancellation is a first-class outcome, never an error: the caller who
// superseded a request already owns the new in-flight one.

use async_trait::async_trait;
use reqwest::Client;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::AbortHandle;

use super::record::SearchResponse;
use crate::error::{AppError, AppResult};

/// Fixed cap on returned records per search
const RESULT_LIMIT: u32 = 25;

/// Per-request timeout
const SEARCH_TIMEOUT: Duration = Duration::from_secs(15);

/// How a search request settled
#[derive(Debug)]
pub enum SearchOutcome {
    /// The request ran to completion (possibly with zero records)
    Complete(SearchResponse),
    /// The request was superseded or torn down before completing
    Cancelled,
}

/// Seam for the catalog search, so controllers can be tested with fakes
#[async_trait]
pub trait CatalogSearch: Send + Sync {
    /// Issue a search, cancelling any prior in-flight request first.
    ///
    /// An empty or whitespace-only query short-circuits to an empty
    /// completed response without touching the network.
    async fn search(&self, query: &str) -> AppResult<SearchOutcome>;

    /// Abort the in-flight request, if any. Idempotent.
    fn cancel(&self);
}

/// Open Library search API client
pub struct OpenLibraryClient {
    base_url: String,
    http_client: Client,
    /// (request id, abort handle) of the one logically-current request
    in_flight: Mutex<Option<(u64, AbortHandle)>>,
    request_seq: AtomicU64,
}

impl OpenLibraryClient {
    pub fn new() -> Self {
        let http_client = Client::builder()
            .timeout(SEARCH_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: "https://openlibrary.org".to_string(),
            http_client,
            in_flight: Mutex::new(None),
            request_seq: AtomicU64::new(0),
        }
    }

    /// Create a client against a different endpoint (tests, mirrors)
    pub fn with_base_url(base_url: String) -> Self {
        let mut client = Self::new();
        client.base_url = base_url;
        client
    }

    async fn execute(request: reqwest::RequestBuilder) -> AppResult<SearchResponse> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Server(status.as_u16()));
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| AppError::Decode(e.to_string()))
    }
}

#[async_trait]
impl CatalogSearch for OpenLibraryClient {
    async fn search(&self, query: &str) -> AppResult<SearchOutcome> {
        // Supersede whatever was running before
        self.cancel();

        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Ok(SearchOutcome::Complete(SearchResponse::default()));
        }

        let limit = RESULT_LIMIT.to_string();
        let request = self
            .http_client
            .get(format!("{}/search.json", self.base_url))
            .query(&[("q", trimmed), ("limit", limit.as_str())]);

        let request_id = self.request_seq.fetch_add(1, Ordering::SeqCst);
        let handle = tokio::spawn(Self::execute(request));
        {
            let mut slot = self.in_flight.lock().unwrap();
            *slot = Some((request_id, handle.abort_handle()));
        }

        let joined = handle.await;

        // Only clear our own slot; a newer search may have replaced it
        {
            let mut slot = self.in_flight.lock().unwrap();
            if matches!(*slot, Some((id, _)) if id == request_id) {
                *slot = None;
            }
        }

        match joined {
            Ok(outcome) => outcome.map(SearchOutcome::Complete),
            Err(join_err) if join_err.is_cancelled() => Ok(SearchOutcome::Cancelled),
            Err(join_err) => Err(AppError::Other(format!(
                "Search task failed: {}",
                join_err
            ))),
        }
    }

    fn cancel(&self) {
        if let Some((_, handle)) = self.in_flight.lock().unwrap().take() {
            handle.abort();
        }
    }
}

impl Default for OpenLibraryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenLibraryClient::new();
        assert_eq!(client.base_url, "https://openlibrary.org");
    }

    #[test]
    fn test_cancel_with_nothing_in_flight_is_noop() {
        let client = OpenLibraryClient::new();
        client.cancel();
        client.cancel();
    }

    #[tokio::test]
    async fn test_empty_query_short_circuits() {
        // Unroutable base URL: any actual network call would error out
        let client = OpenLibraryClient::with_base_url("http://127.0.0.1:1".to_string());

        let outcome = client.search("").await.unwrap();
        match outcome {
            SearchOutcome::Complete(response) => {
                assert_eq!(response.num_found, 0);
                assert!(response.docs.is_empty());
            }
            SearchOutcome::Cancelled => panic!("expected completed empty response"),
        }
    }

    #[tokio::test]
    async fn test_whitespace_query_short_circuits() {
        let client = OpenLibraryClient::with_base_url("http://127.0.0.1:1".to_string());

        let outcome = client.search("   ").await.unwrap();
        assert!(matches!(outcome, SearchOutcome::Complete(r) if r.docs.is_empty()));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let client = OpenLibraryClient::with_base_url("http://127.0.0.1:1".to_string());

        let result = client.search("dune").await;
        assert!(matches!(result, Err(AppError::Network(_))));
    }
}
