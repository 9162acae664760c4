pub mod client;
pub mod error;
pub mod prompt;
pub mod util;

pub use client::SonarClient;
pub use error::{ResearchError, Result};

use async_trait::async_trait;

/// Page content fetched ahead of analysis when the query is itself a URL.
#[derive(Debug, Clone)]
pub struct PageContext {
    pub headline: Option<String>,
    pub body: String,
}

/// What the pipeline asks the provider to analyze.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub query: String,
    /// Present when the query was a URL and page extraction succeeded.
    pub page: Option<PageContext>,
}

/// The upstream research collaborator. Returns the raw model reply; fenced
/// code blocks and surrounding prose are the caller's problem (see
/// [`util::extract_json`]).
#[async_trait]
pub trait ResearchProvider: Send + Sync {
    async fn analyze(&self, request: &AnalysisRequest) -> Result<String>;
}
