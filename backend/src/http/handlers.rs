//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! store and service layers for the actual work.

use axum::{
    extract::{OriginalUri, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use geojson::FeatureCollection;
use std::sync::Arc;

use super::dto::{
    DashboardData, DashboardQuery, DatasetMetadata, HealthResponse, Legend, ListingsResponse,
    MetaResponse, PlacesResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::DATA_ATTRIBUTION_URL;
use crate::services::{build_dashboard, place_options};
use crate::store::listings_to_csv_string;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// File name offered for the CSV download.
pub const EXPORT_FILE_NAME: &str = "swiss-rents.csv";

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Reports that the service is up and which dataset it serves.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        dataset: state.dataset.metadata.clone(),
    }))
}

/// Fallback for paths outside the API.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

// =============================================================================
// Catalog
// =============================================================================

/// GET /v1/meta
pub async fn get_meta(State(state): State<AppState>) -> HandlerResult<MetaResponse> {
    let metadata: DatasetMetadata = state.dataset.metadata.clone();
    Ok(Json(MetaResponse {
        metadata,
        attribution_url: DATA_ATTRIBUTION_URL.to_string(),
    }))
}

/// GET /v1/places
///
/// Options of the place selector, "All" first.
pub async fn list_places(State(state): State<AppState>) -> HandlerResult<PlacesResponse> {
    Ok(Json(PlacesResponse {
        places: place_options(&state.dataset.listings),
    }))
}

/// GET /v1/legend
pub async fn get_legend(State(state): State<AppState>) -> HandlerResult<Legend> {
    Ok(Json(Legend::for_policy(state.dataset.listings.policy())))
}

// =============================================================================
// Dashboard
// =============================================================================

/// GET /v1/dashboard?place=&max_rent=&min_rooms=
///
/// Run the query pipeline for one filter submission. Missing parameters take
/// the form defaults.
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> HandlerResult<DashboardData> {
    let criteria = query.into_criteria()?;
    let dataset = Arc::clone(&state.dataset);

    let data = tokio::task::spawn_blocking(move || build_dashboard(&dataset.listings, &criteria))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(data))
}

// =============================================================================
// Raw Data
// =============================================================================

/// GET /v1/listings
pub async fn list_listings(State(state): State<AppState>) -> HandlerResult<ListingsResponse> {
    let listings = state.dataset.listings.listings().to_vec();
    let total = listings.len();
    Ok(Json(ListingsResponse { listings, total }))
}

/// GET /v1/listings/export.csv
///
/// The normalized collection as a CSV download.
pub async fn export_listings_csv(State(state): State<AppState>) -> Result<Response, AppError> {
    let body = listings_to_csv_string(&state.dataset.listings)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", EXPORT_FILE_NAME),
            ),
        ],
        body,
    )
        .into_response())
}

/// GET /v1/cantons/boundaries
///
/// Canton outlines as a GeoJSON FeatureCollection, in source order.
pub async fn get_boundaries(State(state): State<AppState>) -> HandlerResult<FeatureCollection> {
    Ok(Json(state.dataset.boundaries.to_feature_collection()))
}
