//! Data Transfer Objects for the HTTP API.
//!
//! Chart and legend DTOs are re-exported from the routes module; the types
//! here only exist at the HTTP boundary.

use serde::{Deserialize, Serialize};

use super::error::AppError;
use crate::services::{
    FilterCriteria, FilterError, ALL_PLACES, DEFAULT_MAX_RENT_CHF, DEFAULT_MIN_ROOMS,
};

pub use crate::api::{
    // Dashboard
    BarRow, BarSegment, DashboardData, MapPoint, MapTrace, ScatterPoint, ScatterTrace,
    // Catalog
    CategoryInfo, Legend,
    // Store
    DatasetMetadata, Listing,
};

/// Query parameters for the dashboard endpoint.
///
/// Values arrive as raw strings so that a malformed number is reported as an
/// invalid filter input instead of an extractor rejection.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DashboardQuery {
    /// Place name or "All" (default: "All")
    #[serde(default)]
    pub place: Option<String>,
    /// Upper rent bound in CHF, inclusive (default: 16500)
    #[serde(default)]
    pub max_rent: Option<String>,
    /// Lower room bound, inclusive (default: 0)
    #[serde(default)]
    pub min_rooms: Option<String>,
}

fn parse_number(
    field: &'static str,
    value: Option<&str>,
    default: f64,
) -> Result<f64, FilterError> {
    match value.map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw.parse().map_err(|_| FilterError::InvalidFilterInput {
            field,
            reason: format!("must be a number, got '{}'", raw),
        }),
    }
}

impl DashboardQuery {
    /// Apply the form defaults to missing parameters and validate the result.
    pub fn into_criteria(self) -> Result<FilterCriteria, AppError> {
        let max_rent = parse_number(
            "max_rent_chf",
            self.max_rent.as_deref(),
            DEFAULT_MAX_RENT_CHF,
        )?;
        let min_rooms = parse_number("min_rooms", self.min_rooms.as_deref(), DEFAULT_MIN_ROOMS)?;
        let place = self.place.unwrap_or_else(|| ALL_PLACES.to_string());
        Ok(FilterCriteria::new(place, max_rent, min_rooms)?)
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// The dataset being served
    pub dataset: DatasetMetadata,
}

/// Dataset metadata plus the attribution link.
#[derive(Debug, Clone, Serialize)]
pub struct MetaResponse {
    #[serde(flatten)]
    pub metadata: DatasetMetadata,
    pub attribution_url: String,
}

/// Place selector options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacesResponse {
    /// "All" followed by the distinct places, sorted ascending
    pub places: Vec<String>,
}

/// Raw normalized listings.
#[derive(Debug, Clone, Serialize)]
pub struct ListingsResponse {
    pub listings: Vec<Listing>,
    /// Total count
    pub total: usize,
}
