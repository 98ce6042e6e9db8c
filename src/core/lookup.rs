use crate::core::title::extract_title;
use crate::domain::model::{ProductResponse, SearchQuery, SearchRequest, SearchResultItem};
use crate::domain::ports::SearchClient;
use crate::utils::error::{LookupError, Result};
use std::sync::Arc;

pub const MISSING_BARCODE_MESSAGE: &str = "Missing 'barcode' parameter";

/// Barcode to product lookup: validates the barcode, runs one restricted
/// image search and maps the first hit into a [`ProductResponse`].
#[derive(Clone)]
pub struct ProductLookup {
    client: Arc<dyn SearchClient>,
    site_domain: String,
    fallback_title: String,
}

impl ProductLookup {
    pub fn new(
        client: Arc<dyn SearchClient>,
        site_domain: impl Into<String>,
        fallback_title: impl Into<String>,
    ) -> Self {
        Self {
            client,
            site_domain: site_domain.into(),
            fallback_title: fallback_title.into(),
        }
    }

    pub async fn lookup(&self, barcode: Option<&str>) -> Result<ProductResponse> {
        let query = self.build_query(barcode)?;
        let request = SearchRequest::first_image(&query);

        tracing::debug!(query = %request.query, "searching for barcode");
        let items = self.client.search(&request).await?;

        let first = items.into_iter().next().ok_or_else(|| LookupError::NotFoundError {
            query: request.query.clone(),
        })?;

        let response = self.to_product(first);
        tracing::debug!(
            barcode = %query.barcode,
            product_name = %response.product_name,
            "barcode resolved"
        );
        Ok(response)
    }

    fn build_query(&self, barcode: Option<&str>) -> Result<SearchQuery> {
        match barcode.map(str::trim) {
            Some(barcode) if !barcode.is_empty() => {
                Ok(SearchQuery::new(barcode, self.site_domain.as_str()))
            }
            _ => Err(LookupError::validation(MISSING_BARCODE_MESSAGE)),
        }
    }

    fn to_product(&self, item: SearchResultItem) -> ProductResponse {
        let image_url = item.image_link().map(str::to_string);
        let page_url = item.context_link().map(str::to_string);
        let product_name = page_url
            .as_deref()
            .and_then(extract_title)
            .unwrap_or_else(|| self.fallback_title.clone());

        ProductResponse {
            product_name,
            image_url,
            page_url,
        }
    }
}
