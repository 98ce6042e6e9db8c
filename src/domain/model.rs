use serde::{Deserialize, Serialize};

/// Barcode plus the retail domain the search is restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub barcode: String,
    pub site_domain: String,
}

impl SearchQuery {
    pub fn new(barcode: impl Into<String>, site_domain: impl Into<String>) -> Self {
        Self {
            barcode: barcode.into(),
            site_domain: site_domain.into(),
        }
    }

    pub fn query_string(&self) -> String {
        format!("{} site:{}", self.barcode, self.site_domain)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    Image,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Image => "image",
        }
    }
}

/// Parameters of one outbound search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub mode: SearchMode,
    pub num_results: u32,
}

impl SearchRequest {
    /// First image result only.
    pub fn first_image(query: &SearchQuery) -> Self {
        Self {
            query: query.query_string(),
            mode: SearchMode::Image,
            num_results: 1,
        }
    }
}

/// One item of the upstream `items` array. Only the fields the lookup
/// reads are modelled; everything else is ignored on deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub image: Option<ImageDetails>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDetails {
    #[serde(rename = "contextLink", default)]
    pub context_link: Option<String>,
}

impl SearchResultItem {
    pub fn image_link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn context_link(&self) -> Option<&str> {
        self.image.as_ref().and_then(|i| i.context_link.as_deref())
    }
}

/// Body of a successful `/search` response. `image_url` and `page_url`
/// serialize as `null` when absent so all three keys are always present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub product_name: String,
    pub image_url: Option<String>,
    pub page_url: Option<String>,
}
