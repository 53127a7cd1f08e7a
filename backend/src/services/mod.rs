//! Query pipeline: filter the canonical listings and shape them for the charts.
//!
//! Every function here is pure. The listing collection is only borrowed, so
//! requests can run the pipeline concurrently without locking.

pub mod canton_aggregate;
pub mod dashboard;
pub mod filter;
pub mod grouping;

pub use canton_aggregate::{aggregate_by_canton, CantonAggregate, CategoryShare};
pub use dashboard::{build_dashboard, format_percentage};
pub use filter::{
    filter, place_options, FilterCriteria, FilterError, FilteredListings, PlaceSelection,
    ALL_PLACES, DEFAULT_MAX_RENT_CHF, DEFAULT_MIN_ROOMS,
};
pub use grouping::{group_by_category, DisplayListing};
