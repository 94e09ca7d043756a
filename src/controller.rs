//! Search submission controller.
//!
//! Owns the one interaction flow of the client: trim the input, validate it
//! is non-empty, issue exactly one request to the backend, and collapse the
//! result into a `Submission` outcome that the UI layer renders. The backend
//! is an explicit dependency so tests can substitute a mock.

use crate::backend::{BackendError, SearchBackend, SearchResponse};

/// Number of source chunks requested per query. Fixed by the client.
pub const TOP_K: u32 = 3;

/// Outcome of one submission, from the UI's perspective.
///
/// Every failure mode of the request (non-success status, transport failure,
/// parse failure) collapses into `Failed`; the UI does not differentiate
/// beyond the error's description text.
#[derive(Debug)]
pub enum Submission {
    /// The input trimmed to the empty string; no request was made.
    EmptyQuery,
    /// The backend answered with a well-formed response.
    Answered(SearchResponse),
    /// The request failed for any reason.
    Failed(BackendError),
}

/// Wires user-submitted query text to the search backend.
pub struct SearchController {
    backend: Box<dyn SearchBackend>,
}

impl SearchController {
    /// Creates a controller over the given backend.
    pub fn new(backend: Box<dyn SearchBackend>) -> Self {
        Self { backend }
    }

    /// Returns the backend base URL, for user-facing reachability hints.
    pub fn backend_url(&self) -> &str {
        self.backend.base_url()
    }

    /// Submits the current input value.
    ///
    /// Trims the input first. An empty trimmed value short-circuits with
    /// `Submission::EmptyQuery` and performs no network call. Otherwise
    /// exactly one request is issued with the trimmed query and `TOP_K`.
    /// Failures are logged to the diagnostic channel and returned; nothing
    /// propagates past this boundary.
    pub fn submit(&self, raw_input: &str) -> Submission {
        let query = raw_input.trim();
        if query.is_empty() {
            return Submission::EmptyQuery;
        }

        match self.backend.search(query, TOP_K) {
            Ok(response) => Submission::Answered(response),
            Err(error) => {
                tracing::error!(%error, query, "search request failed");
                Submission::Failed(error)
            }
        }
    }
}

/// Builds the user-visible error text for a failed submission.
///
/// Contains the failure's description plus a static hint that the backend
/// endpoint may not be reachable.
pub fn failure_message(error: &BackendError, backend_url: &str) -> String {
    format!("{error}\nMake sure the backend server is running at {backend_url}")
}

/// The validation warning shown when the trimmed query is empty.
pub const EMPTY_QUERY_WARNING: &str = "Please enter a query.";
