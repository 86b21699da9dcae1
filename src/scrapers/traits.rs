use crate::models::{Listing, SearchRequest};
use anyhow::Result;
use async_trait::async_trait;

/// What one executed search produced
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub listings: Vec<Listing>,
    pub source: String,
    pub fetched_pages: u32,
}

/// The external collaborator that performs the actual property lookup for a
/// validated request. Implementations own their own timeout policy; the
/// validation engine imposes none.
#[async_trait]
pub trait SearchExecutor: Send + Sync {
    /// Execute the search described by a canonical request
    async fn execute(&self, request: &SearchRequest) -> Result<SearchOutcome>;

    /// Get the name of the executor source
    fn source_name(&self) -> &'static str;
}
