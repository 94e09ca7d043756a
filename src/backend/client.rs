/// Search backend HTTP client implementation.
///
/// This module provides `SearchClient` for making synchronous HTTP requests to the
/// knowledge-base backend, along with error types and a builder for configuration.
use serde::Deserialize;
use thiserror::Error;

/// Default backend address when neither the builder nor the environment supplies one.
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8000";

/// Errors that can occur when talking to the search backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Network-related errors (connection failures, DNS resolution, etc.)
    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    /// HTTP errors with status code
    #[error("Backend error: status {status}")]
    Http { status: u16 },

    /// Response body failed to parse as the expected JSON shape
    #[error("Invalid response body: {0}")]
    Serialization(#[source] serde_json::Error),

    /// Invalid URL configuration error
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// One retrieved source chunk backing an answer.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SourceRef {
    /// Identifier of the origin document
    pub file: String,
    /// Zero-based chunk index within that document
    pub chunk: u64,
    /// Relevance score in [0, 1]
    pub similarity: f64,
}

/// Successful response body from `POST /search`.
///
/// The backend also echoes the query and may add fields; unknown fields are
/// ignored. An absent `sources` array deserializes as empty.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResponse {
    pub answer: String,
    pub num_docs_searched: u64,
    #[serde(default)]
    pub sources: Vec<SourceRef>,
}

/// Response body from the backend health endpoint (`GET /`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub docs_loaded: u64,
}

/// Builder for constructing `SearchClient` instances.
///
/// # Examples
///
/// ```
/// use kbq::backend::SearchClientBuilder;
///
/// let client = SearchClientBuilder::new()
///     .base_url("http://127.0.0.1:8000")
///     .build()
///     .expect("Failed to create client");
/// ```
#[derive(Debug, Default)]
pub struct SearchClientBuilder {
    base_url: Option<String>,
}

impl SearchClientBuilder {
    /// Creates a new `SearchClientBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the base URL for the search backend.
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL (e.g., "http://127.0.0.1:8000")
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Builds the `SearchClient` with the configured settings.
    ///
    /// # Returns
    ///
    /// Returns `Ok(SearchClient)` if the client was created successfully,
    /// or `Err(BackendError)` if there was an error (e.g., invalid URL).
    ///
    /// # Environment Variables
    ///
    /// If `base_url()` was not called, this method will check the
    /// `KB_BACKEND_URL` environment variable. If not set, it defaults to
    /// `http://127.0.0.1:8000`.
    pub fn build(self) -> Result<SearchClient, BackendError> {
        // Determine base URL: use builder value, then env var, then default
        let base_url = if let Some(url) = self.base_url {
            url
        } else {
            std::env::var("KB_BACKEND_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string())
        };

        // Validate URL
        reqwest::Url::parse(&base_url)
            .map_err(|e| BackendError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        // No request timeout: the search call waits for the backend to resolve
        // or fail at the network layer. reqwest's blocking client applies a
        // 30s default unless explicitly disabled.
        let client = reqwest::blocking::Client::builder()
            .timeout(None)
            .build()
            .map_err(BackendError::Network)?;

        Ok(SearchClient { client, base_url })
    }
}

/// Synchronous HTTP client for the knowledge-base search backend.
///
/// Construct with `SearchClientBuilder`.
pub struct SearchClient {
    client: reqwest::blocking::Client,
    base_url: String,
}

/// Trait for search backend operations.
///
/// This trait enables mocking in unit tests and provides a clean interface
/// between the UI controller and the HTTP layer.
pub trait SearchBackend: Send + Sync {
    /// Sends one search query and returns the parsed answer.
    ///
    /// # Arguments
    ///
    /// * `query` - The trimmed query text
    /// * `top_k` - Maximum number of source chunks to retrieve
    fn search(&self, query: &str, top_k: u32) -> Result<SearchResponse, BackendError>;

    /// Returns the base URL this backend points at, for user-facing hints.
    fn base_url(&self) -> &str;
}

impl SearchClient {
    /// Returns the base URL configured for this client.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues exactly one `POST /search` request and parses the response.
    fn search_internal(&self, query: &str, top_k: u32) -> Result<SearchResponse, BackendError> {
        let url = format!("{}/search", self.base_url);
        let request_body = serde_json::json!({
            "query": query,
            "top_k": top_k,
        });

        tracing::debug!(%url, query, top_k, "sending search request");

        let response = self
            .client
            .post(&url)
            .json(&request_body)
            .send()
            .map_err(BackendError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Http {
                status: status.as_u16(),
            });
        }

        // Read the body as text first so a malformed payload surfaces as a
        // Serialization error rather than a transport error.
        let body = response.text().map_err(BackendError::Network)?;
        let parsed: SearchResponse =
            serde_json::from_str(&body).map_err(BackendError::Serialization)?;

        tracing::debug!(
            num_docs_searched = parsed.num_docs_searched,
            num_sources = parsed.sources.len(),
            "search response parsed"
        );

        Ok(parsed)
    }

    /// Fetches backend status from the health endpoint (`GET /`).
    pub fn health(&self) -> Result<HealthResponse, BackendError> {
        let url = format!("{}/", self.base_url);

        let response = self.client.get(&url).send().map_err(BackendError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Http {
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(BackendError::Network)?;
        serde_json::from_str(&body).map_err(BackendError::Serialization)
    }
}

impl SearchBackend for SearchClient {
    fn search(&self, query: &str, top_k: u32) -> Result<SearchResponse, BackendError> {
        self.search_internal(query, top_k)
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
