//! Domain models: listings, rent categories, cantons and boundaries.

pub mod boundary;
pub mod canton;
pub mod category;
pub mod listing;

pub use boundary::{BoundaryCollection, CantonBoundary};
pub use canton::{canton_name, CANTONS};
pub use category::{BucketingPolicy, RentCategory, CATEGORY_COLORS};
pub use listing::{Listing, ListingCollection, UNKNOWN_APARTMENT_TYPE};
