//! Axum router construction.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{routing::get, Json, Router};

use crate::adapters::GoogleSearchClient;
use crate::core::lookup::ProductLookup;
use crate::core::SearchSettings;
use crate::http::handlers::{hello_handler, search_handler};
use crate::utils::error::{ErrorBody, Result};

/// Shared, read-only per-process state. Cloned into every request.
#[derive(Clone)]
pub struct AppState {
    pub lookup: ProductLookup,
}

impl AppState {
    pub fn new(lookup: ProductLookup) -> Self {
        Self { lookup }
    }

    /// Wire the Google search client and the lookup from startup settings.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built.
    pub fn from_settings<S: SearchSettings>(settings: &S) -> Result<Self> {
        let client = GoogleSearchClient::new(settings)?;
        let lookup = ProductLookup::new(
            Arc::new(client),
            settings.site_domain(),
            settings.fallback_title(),
        );
        Ok(Self::new(lookup))
    }
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/hello", get(hello_handler).fallback(method_not_allowed_handler))
        .route("/search", get(search_handler).fallback(method_not_allowed_handler))
        .fallback(not_found_handler)
        .with_state(state)
}

async fn not_found_handler() -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::NOT_FOUND, Json(ErrorBody::new("Not Found")))
}

async fn method_not_allowed_handler() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorBody::new("Method Not Allowed")),
    )
}
