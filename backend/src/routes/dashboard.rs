use serde::{Deserialize, Serialize};

use crate::models::RentCategory;
use crate::services::filter::FilterCriteria;

/// One marker of the scatter map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapPoint {
    pub lon: f64,
    pub lat: f64,
    /// Hover text.
    pub text: String,
}

/// Map markers of one rent category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapTrace {
    pub category: RentCategory,
    pub label: String,
    pub color: String,
    pub points: Vec<MapPoint>,
}

/// One point of the size-vs-rent scatter plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScatterPoint {
    pub floor_area_m2: f64,
    pub rent_chf: f64,
}

/// Scatter points of one rent category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScatterTrace {
    pub category: RentCategory,
    pub label: String,
    pub color: String,
    pub points: Vec<ScatterPoint>,
}

/// One stacked segment of a canton bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSegment {
    pub category: RentCategory,
    pub label: String,
    pub color: String,
    pub count: usize,
    pub percentage: f64,
    /// `percentage` formatted for hover text, e.g. `"33.33%"`.
    pub percentage_label: String,
}

/// Bar chart row for one canton.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarRow {
    pub canton: String,
    pub total: usize,
    pub segments: Vec<BarSegment>,
}

/// Everything the dashboard page draws for one filter submission.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardData {
    pub criteria: FilterCriteria,
    /// No listing matched; the layers show the unfiltered collection instead.
    pub empty_result: bool,
    pub total_count: usize,
    pub matched_count: usize,
    pub map_layer: Vec<MapTrace>,
    pub scatter_layer: Vec<ScatterTrace>,
    /// Sorted by canton descending.
    pub bar_layer: Vec<BarRow>,
}
