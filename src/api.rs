// src/api.rs
//! HTTP surface consumed by the presentation layer. The dashboard renders
//! `/listings` as a table and wires its download button to `/listings.csv`;
//! any live sub-filtering happens over there, not here.

use std::sync::Arc;

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::export;
use crate::pipeline::Scanner;

#[derive(Clone)]
pub struct AppState {
    pub scanner: Arc<Scanner>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/listings", get(listings))
        .route("/listings.csv", get(listings_csv))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// The filtered table, as the dashboard renders it.
async fn listings(State(state): State<AppState>) -> impl IntoResponse {
    let table = state.scanner.table().await;
    Json((*table).clone())
}

/// CSV download of the same table.
async fn listings_csv(State(state): State<AppState>) -> impl IntoResponse {
    let table = state.scanner.table().await;
    let body = export::to_csv(&table);
    (
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"grant_listings.csv\"",
            ),
        ],
        body,
    )
}
