//! Filter criteria and the listing filter.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{BucketingPolicy, Listing, ListingCollection};

/// Place selector value that matches every place.
pub const ALL_PLACES: &str = "All";

/// Default of the max-rent input.
pub const DEFAULT_MAX_RENT_CHF: f64 = 16_500.0;

/// Default of the min-rooms input.
pub const DEFAULT_MIN_ROOMS: f64 = 0.0;

/// Rejected filter input. Raised before the pipeline runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    #[error("Invalid filter input: {field} {reason}")]
    InvalidFilterInput { field: &'static str, reason: String },
}

impl FilterError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidFilterInput {
            field,
            reason: reason.into(),
        }
    }
}

/// Which place(s) a filter keeps.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlaceSelection {
    All,
    Place(String),
}

impl PlaceSelection {
    pub fn matches(&self, place: &str) -> bool {
        match self {
            PlaceSelection::All => true,
            PlaceSelection::Place(selected) => selected == place,
        }
    }
}

impl From<String> for PlaceSelection {
    fn from(value: String) -> Self {
        if value == ALL_PLACES {
            PlaceSelection::All
        } else {
            PlaceSelection::Place(value)
        }
    }
}

impl From<PlaceSelection> for String {
    fn from(value: PlaceSelection) -> Self {
        match value {
            PlaceSelection::All => ALL_PLACES.to_string(),
            PlaceSelection::Place(place) => place,
        }
    }
}

impl fmt::Display for PlaceSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlaceSelection::All => f.write_str(ALL_PLACES),
            PlaceSelection::Place(place) => f.write_str(place),
        }
    }
}

/// One submission of the selection form. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCriteria {
    place: PlaceSelection,
    max_rent_chf: f64,
    min_rooms: f64,
}

impl FilterCriteria {
    /// Validate raw form values.
    ///
    /// # Errors
    /// [`FilterError::InvalidFilterInput`] for a blank place, a negative or
    /// non-finite max rent, or a negative or non-finite room count.
    pub fn new(
        place: impl Into<String>,
        max_rent_chf: f64,
        min_rooms: f64,
    ) -> Result<Self, FilterError> {
        let place = place.into();
        let place = place.trim();
        if place.is_empty() {
            return Err(FilterError::invalid("place", "must not be empty"));
        }
        if !max_rent_chf.is_finite() {
            return Err(FilterError::invalid("max_rent_chf", "must be a finite number"));
        }
        if max_rent_chf < 0.0 {
            return Err(FilterError::invalid(
                "max_rent_chf",
                format!("must not be negative, got {}", max_rent_chf),
            ));
        }
        if !min_rooms.is_finite() {
            return Err(FilterError::invalid("min_rooms", "must be a finite number"));
        }
        if min_rooms < 0.0 {
            return Err(FilterError::invalid(
                "min_rooms",
                format!("must not be negative, got {}", min_rooms),
            ));
        }

        Ok(Self {
            place: PlaceSelection::from(place.to_string()),
            max_rent_chf,
            min_rooms,
        })
    }

    /// Criteria that keep every listing.
    pub fn unrestricted() -> Self {
        Self {
            place: PlaceSelection::All,
            max_rent_chf: f64::MAX,
            min_rooms: 0.0,
        }
    }

    pub fn place(&self) -> &PlaceSelection {
        &self.place
    }

    pub fn max_rent_chf(&self) -> f64 {
        self.max_rent_chf
    }

    pub fn min_rooms(&self) -> f64 {
        self.min_rooms
    }

    pub fn matches(&self, listing: &Listing) -> bool {
        self.place.matches(&listing.place)
            && listing.rent_chf <= self.max_rent_chf
            && listing.rooms >= self.min_rooms
    }
}

impl Default for FilterCriteria {
    /// The selection form's initial values.
    fn default() -> Self {
        Self {
            place: PlaceSelection::All,
            max_rent_chf: DEFAULT_MAX_RENT_CHF,
            min_rooms: DEFAULT_MIN_ROOMS,
        }
    }
}

/// A filtered view over a [`ListingCollection`], in collection order.
#[derive(Debug, Clone)]
pub struct FilteredListings<'a> {
    policy: BucketingPolicy,
    listings: Vec<&'a Listing>,
}

impl<'a> FilteredListings<'a> {
    /// View containing every listing of the collection.
    pub fn all(collection: &'a ListingCollection) -> Self {
        Self {
            policy: collection.policy(),
            listings: collection.iter().collect(),
        }
    }

    pub fn policy(&self) -> BucketingPolicy {
        self.policy
    }

    pub fn listings(&self) -> &[&'a Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Listing> + '_ {
        self.listings.iter().copied()
    }

    /// Apply further criteria to an already filtered view.
    pub fn refine(&self, criteria: &FilterCriteria) -> FilteredListings<'a> {
        FilteredListings {
            policy: self.policy,
            listings: self
                .listings
                .iter()
                .copied()
                .filter(|listing| criteria.matches(listing))
                .collect(),
        }
    }
}

/// Keep the listings that match `criteria`, in collection order.
///
/// A place that does not occur in the collection yields an empty view.
pub fn filter<'a>(
    collection: &'a ListingCollection,
    criteria: &FilterCriteria,
) -> FilteredListings<'a> {
    FilteredListings {
        policy: collection.policy(),
        listings: collection
            .iter()
            .filter(|listing| criteria.matches(listing))
            .collect(),
    }
}

/// Options of the place selector: `"All"` followed by the distinct places.
pub fn place_options(collection: &ListingCollection) -> Vec<String> {
    std::iter::once(ALL_PLACES.to_string())
        .chain(collection.distinct_places())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RentCategory;

    fn listing(place: &str, rooms: f64, rent: f64) -> Listing {
        Listing {
            address: format!("{} {}", place, rent),
            place: place.to_string(),
            canton_code: "BE".to_string(),
            canton_name: "Bern".to_string(),
            rooms,
            floor_area_m2: 70.0,
            rent_chf: rent,
            apartment_type: "Wohnung".to_string(),
            latitude: 46.9,
            longitude: 7.4,
            rent_category: RentCategory::Medium,
        }
    }

    fn collection() -> ListingCollection {
        ListingCollection::new(
            BucketingPolicy::AbsoluteRentBuckets,
            vec![
                listing("Bern", 3.0, 1500.0),
                listing("Thun", 2.0, 1100.0),
                listing("Bern", 4.5, 2600.0),
                listing("Biel", 1.0, 800.0),
            ],
        )
    }

    #[test]
    fn test_unrestricted_keeps_everything() {
        let listings = collection();
        let filtered = filter(&listings, &FilterCriteria::unrestricted());
        assert_eq!(filtered.len(), listings.len());
        for (kept, original) in filtered.iter().zip(listings.iter()) {
            assert!(std::ptr::eq(kept, original));
        }
    }

    #[test]
    fn test_filter_by_place() {
        let listings = collection();
        let criteria = FilterCriteria::new("Bern", f64::MAX, 0.0).unwrap();
        let filtered = filter(&listings, &criteria);
        assert_eq!(filtered.len(), 2);
        assert!(filtered.iter().all(|l| l.place == "Bern"));
    }

    #[test]
    fn test_max_rent_is_inclusive() {
        let listings = collection();
        let criteria = FilterCriteria::new(ALL_PLACES, 1500.0, 0.0).unwrap();
        let rents: Vec<f64> = filter(&listings, &criteria).iter().map(|l| l.rent_chf).collect();
        assert_eq!(rents, vec![1500.0, 1100.0, 800.0]);
    }

    #[test]
    fn test_min_rooms_is_inclusive() {
        let listings = collection();
        let criteria = FilterCriteria::new(ALL_PLACES, f64::MAX, 3.0).unwrap();
        let rooms: Vec<f64> = filter(&listings, &criteria).iter().map(|l| l.rooms).collect();
        assert_eq!(rooms, vec![3.0, 4.5]);
    }

    #[test]
    fn test_combined_criteria() {
        let listings = collection();
        let criteria = FilterCriteria::new("Bern", 2000.0, 2.0).unwrap();
        let filtered = filter(&listings, &criteria);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.listings()[0].rent_chf, 1500.0);
    }

    #[test]
    fn test_unknown_place_is_empty_not_error() {
        let listings = collection();
        let criteria = FilterCriteria::new("Zürich", f64::MAX, 0.0).unwrap();
        let filtered = filter(&listings, &criteria);
        assert!(filtered.is_empty());
        assert_eq!(filtered.policy(), BucketingPolicy::AbsoluteRentBuckets);
    }

    #[test]
    fn test_refine_is_idempotent() {
        let listings = collection();
        let criteria = FilterCriteria::new(ALL_PLACES, 2000.0, 1.5).unwrap();
        let once = filter(&listings, &criteria);
        let twice = once.refine(&criteria);
        assert_eq!(once.listings(), twice.listings());
    }

    #[test]
    fn test_invalid_inputs_are_rejected() {
        assert!(matches!(
            FilterCriteria::new(ALL_PLACES, 1000.0, -1.0),
            Err(FilterError::InvalidFilterInput { field: "min_rooms", .. })
        ));
        assert!(matches!(
            FilterCriteria::new(ALL_PLACES, -1.0, 0.0),
            Err(FilterError::InvalidFilterInput { field: "max_rent_chf", .. })
        ));
        assert!(FilterCriteria::new(ALL_PLACES, f64::NAN, 0.0).is_err());
        assert!(FilterCriteria::new(ALL_PLACES, 1000.0, f64::INFINITY).is_err());
        assert!(FilterCriteria::new("   ", 1000.0, 0.0).is_err());
    }

    #[test]
    fn test_place_is_trimmed() {
        let criteria = FilterCriteria::new(" Thun ", 1000.0, 0.0).unwrap();
        assert_eq!(criteria.place(), &PlaceSelection::Place("Thun".to_string()));
        let criteria = FilterCriteria::new("All", 1000.0, 0.0).unwrap();
        assert_eq!(criteria.place(), &PlaceSelection::All);
    }

    #[test]
    fn test_default_matches_form_defaults() {
        let criteria = FilterCriteria::default();
        assert_eq!(criteria.place(), &PlaceSelection::All);
        assert_eq!(criteria.max_rent_chf(), 16_500.0);
        assert_eq!(criteria.min_rooms(), 0.0);
    }

    #[test]
    fn test_criteria_serializes_place_as_string() {
        let criteria = FilterCriteria::new("Thun", 1000.0, 2.0).unwrap();
        let json = serde_json::to_value(&criteria).unwrap();
        assert_eq!(json["place"], "Thun");
        assert_eq!(json["max_rent_chf"], 1000.0);
        let json = serde_json::to_value(FilterCriteria::default()).unwrap();
        assert_eq!(json["place"], "All");
    }

    #[test]
    fn test_place_options() {
        let options = place_options(&collection());
        assert_eq!(options, vec!["All", "Bern", "Biel", "Thun"]);
    }
}
