pub mod backend;
pub mod controller;
pub mod format;
pub mod tui;

pub use backend::{
    BackendError, HealthResponse, SearchBackend, SearchClient, SearchClientBuilder,
    SearchResponse, SourceRef,
};
pub use controller::{SearchController, Submission, TOP_K};
pub use format::{FormattedAnswer, format_answer};
