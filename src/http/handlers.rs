//! Handlers for the greeting and barcode search endpoints.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::domain::model::ProductResponse;
use crate::http::router::AppState;
use crate::utils::error::{LookupError, Result};

pub const GREETING: &str = "Hello from the Barcode Search API!";
pub const INVALID_QUERY_MESSAGE: &str = "Invalid query string: expected a single 'barcode' parameter";

/// Query parameters for `GET /search`.
#[derive(Debug, Deserialize)]
pub struct BarcodeParams {
    pub barcode: Option<String>,
}

/// `GET /hello`
pub async fn hello_handler() -> &'static str {
    GREETING
}

/// `GET /search?barcode=...` — resolve a barcode to a product.
///
/// # Errors
///
/// `400` for a missing, blank or repeated barcode, `404` when the search has no
/// results, `500` when the search API fails. Error bodies are
/// `{"error": "..."}`.
pub async fn search_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<BarcodeParams>, QueryRejection>,
) -> Result<Json<ProductResponse>> {
    let Query(params) = params.map_err(|rejection| {
        tracing::debug!("query string rejected: {}", rejection.body_text());
        LookupError::validation(INVALID_QUERY_MESSAGE)
    })?;
    let product = state.lookup.lookup(params.barcode.as_deref()).await?;
    Ok(Json(product))
}
