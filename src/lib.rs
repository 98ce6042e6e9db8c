pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod http;
pub mod utils;

pub use crate::adapters::GoogleSearchClient;
pub use crate::config::{AppConfig, SearchConfig, ServerArgs, ServerConfig};
pub use crate::core::{lookup::ProductLookup, title::extract_title};
pub use crate::domain::model::{ProductResponse, SearchQuery, SearchRequest, SearchResultItem};
pub use crate::http::{build_router, AppState};
pub use crate::utils::error::{LookupError, Result};
