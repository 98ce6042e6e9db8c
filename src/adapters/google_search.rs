use crate::domain::model::{SearchRequest, SearchResultItem};
use crate::domain::ports::{SearchClient, SearchSettings};
use crate::utils::error::{LookupError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Google Custom Search JSON API client.
///
/// One GET per search, first page only. Non-2xx responses and bodies that
/// are not valid JSON both surface as upstream errors.
pub struct GoogleSearchClient {
    client: Client,
    endpoint: String,
    api_key: String,
    engine_id: String,
}

#[derive(Debug, Deserialize)]
struct SearchResponseBody {
    // Absent when the engine has no hits.
    #[serde(default)]
    items: Option<Vec<SearchResultItem>>,
}

impl GoogleSearchClient {
    pub fn new<S: SearchSettings + ?Sized>(settings: &S) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = settings.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: settings.endpoint().to_string(),
            api_key: settings.api_key().to_string(),
            engine_id: settings.engine_id().to_string(),
        })
    }
}

#[async_trait]
impl SearchClient for GoogleSearchClient {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchResultItem>> {
        tracing::debug!(
            query = %request.query,
            num = request.num_results,
            "Making search request to: {}",
            self.endpoint
        );

        let num = request.num_results.to_string();
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", request.query.as_str()),
                ("cx", self.engine_id.as_str()),
                ("key", self.api_key.as_str()),
                ("searchType", request.mode.as_str()),
                ("num", num.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Search response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = %status, error = %body, "search api error");
            return Err(LookupError::UpstreamStatusError {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        let parsed: SearchResponseBody = serde_json::from_slice(&bytes)?;
        let items = parsed.items.unwrap_or_default();

        tracing::debug!(
            query = %request.query,
            result_count = items.len(),
            "search completed"
        );
        Ok(items)
    }
}
