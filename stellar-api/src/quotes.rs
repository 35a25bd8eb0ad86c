use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use stellar_domain::PackageQuote;
use uuid::Uuid;

use crate::error::AppError;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/v1/quotes/package", get(quote_package))
}

#[derive(Debug, Deserialize)]
struct QuoteQuery {
    package_id: Uuid,
    destination_id: Uuid,
    /// Duration in days
    duration: i64,
}

/// Pre-booking price preview; unauthenticated.
async fn quote_package(
    State(state): State<AppState>,
    Query(query): Query<QuoteQuery>,
) -> Result<Json<PackageQuote>, AppError> {
    let quote = state
        .engine
        .quote_package(query.package_id, query.destination_id, query.duration)
        .await?;
    Ok(Json(quote))
}
