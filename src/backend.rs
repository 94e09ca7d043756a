/// Knowledge-base backend HTTP client module.
///
/// This module provides a blocking HTTP client for the search/answer backend,
/// including error handling, configuration via builder and environment, and
/// the response types returned by the `/search` endpoint.
mod client;

pub use client::{
    BackendError, HealthResponse, SearchBackend, SearchClient, SearchClientBuilder,
    SearchResponse, SourceRef, DEFAULT_BACKEND_URL,
};
