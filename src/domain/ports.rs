use crate::domain::model::{SearchRequest, SearchResultItem};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Read-only settings consumed by the search client and the lookup.
pub trait SearchSettings: Send + Sync {
    fn endpoint(&self) -> &str;
    fn api_key(&self) -> &str;
    fn engine_id(&self) -> &str;
    fn site_domain(&self) -> &str;
    fn fallback_title(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}

/// Outbound image search. Returns the items of the first result page,
/// possibly empty.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResultItem>>;
}
