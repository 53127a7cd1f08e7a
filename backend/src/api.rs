//! Public API surface for the dashboard backend.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize for JSON serialization.

pub use crate::routes::catalog::CategoryInfo;
pub use crate::routes::catalog::Legend;
pub use crate::routes::catalog::DATA_ATTRIBUTION_URL;
pub use crate::routes::dashboard::BarRow;
pub use crate::routes::dashboard::BarSegment;
pub use crate::routes::dashboard::DashboardData;
pub use crate::routes::dashboard::MapPoint;
pub use crate::routes::dashboard::MapTrace;
pub use crate::routes::dashboard::ScatterPoint;
pub use crate::routes::dashboard::ScatterTrace;

pub use crate::models::{BucketingPolicy, Listing, RentCategory};
pub use crate::services::filter::{FilterCriteria, PlaceSelection};
pub use crate::store::DatasetMetadata;
