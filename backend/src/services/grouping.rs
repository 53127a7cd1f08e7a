use std::collections::BTreeMap;

use super::filter::FilteredListings;
use crate::models::{Listing, RentCategory};

/// A filtered listing paired with its map hover text.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayListing<'a> {
    pub listing: &'a Listing,
    pub display: String,
}

/// Partition filtered listings by rent category.
///
/// Each partition keeps the relative input order. Categories without members
/// are absent from the map; iteration runs cheapest category first.
pub fn group_by_category<'a>(
    filtered: &FilteredListings<'a>,
) -> BTreeMap<RentCategory, Vec<DisplayListing<'a>>> {
    let mut groups: BTreeMap<RentCategory, Vec<DisplayListing<'a>>> = BTreeMap::new();
    for listing in filtered.iter() {
        groups
            .entry(listing.rent_category)
            .or_default()
            .push(DisplayListing {
                listing,
                display: listing.display_string(),
            });
    }
    groups
}
