use serde::{Deserialize, Serialize};

use super::category::{BucketingPolicy, RentCategory};

/// Apartment type used when the source leaves it empty.
pub const UNKNOWN_APARTMENT_TYPE: &str = "Unbekannt";

fn format_rooms(rooms: f64) -> String {
    if rooms.fract() == 0.0 {
        format!("{:.1}", rooms)
    } else {
        rooms.to_string()
    }
}

/// One normalized apartment listing.
///
/// Field order is also the column order of the CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub address: String,
    pub place: String,
    pub canton_code: String,
    pub canton_name: String,
    pub rooms: f64,
    pub floor_area_m2: f64,
    pub rent_chf: f64,
    pub apartment_type: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rent_category: RentCategory,
}

impl Listing {
    /// Hover text for the map layer.
    ///
    /// Room counts always carry a decimal (`3.0`, `3.5`) since the source
    /// column is fractional.
    pub fn display_string(&self) -> String {
        format!(
            "Address: {}, {}, Rooms: {}, Size: {}m², Rent: CHF {}",
            self.address,
            self.place,
            format_rooms(self.rooms),
            self.floor_area_m2.round(),
            self.rent_chf
        )
    }
}

/// The canonical normalized listing set.
///
/// Built once by the listing store and shared read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ListingCollection {
    policy: BucketingPolicy,
    listings: Vec<Listing>,
}

impl ListingCollection {
    /// Every listing must carry a category of `policy`; the canton
    /// aggregation labels category slots by the collection policy.
    pub fn new(policy: BucketingPolicy, listings: Vec<Listing>) -> Self {
        debug_assert!(
            listings.iter().all(|l| l.rent_category.policy() == policy),
            "listing categorized with a policy other than {}",
            policy
        );
        Self { policy, listings }
    }

    /// Bucketing policy every listing in the collection was categorized with.
    pub fn policy(&self) -> BucketingPolicy {
        self.policy
    }

    pub fn listings(&self) -> &[Listing] {
        &self.listings
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Listing> {
        self.listings.iter()
    }

    /// Distinct places, sorted ascending.
    pub fn distinct_places(&self) -> Vec<String> {
        let mut places: Vec<String> = self.listings.iter().map(|l| l.place.clone()).collect();
        places.sort();
        places.dedup();
        places
    }
}

impl<'a> IntoIterator for &'a ListingCollection {
    type Item = &'a Listing;
    type IntoIter = std::slice::Iter<'a, Listing>;

    fn into_iter(self) -> Self::IntoIter {
        self.listings.iter()
    }
}
