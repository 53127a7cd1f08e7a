use log::debug;
use std::collections::BTreeMap;

use super::canton_aggregate::{aggregate_by_canton, CantonAggregate};
use super::filter::{filter, FilterCriteria, FilteredListings};
use super::grouping::{group_by_category, DisplayListing};
use crate::api::{
    BarRow, BarSegment, DashboardData, MapPoint, MapTrace, ScatterPoint, ScatterTrace,
};
use crate::models::{ListingCollection, RentCategory};

/// Format a percentage with up to 2 decimals and at least one, e.g. `"50.0%"`
/// or `"33.33%"`.
pub fn format_percentage(value: f64) -> String {
    let mut text = format!("{:.2}", value);
    if text.ends_with('0') {
        text.pop();
    }
    text.push('%');
    text
}

fn map_layer(groups: &BTreeMap<RentCategory, Vec<DisplayListing<'_>>>) -> Vec<MapTrace> {
    groups
        .iter()
        .map(|(&category, members)| MapTrace {
            category,
            label: category.label().to_string(),
            color: category.color().to_string(),
            points: members
                .iter()
                .map(|member| MapPoint {
                    lon: member.listing.longitude,
                    lat: member.listing.latitude,
                    text: member.display.clone(),
                })
                .collect(),
        })
        .collect()
}

fn scatter_layer(groups: &BTreeMap<RentCategory, Vec<DisplayListing<'_>>>) -> Vec<ScatterTrace> {
    groups
        .iter()
        .map(|(&category, members)| ScatterTrace {
            category,
            label: category.label().to_string(),
            color: category.color().to_string(),
            points: members
                .iter()
                .map(|member| ScatterPoint {
                    floor_area_m2: member.listing.floor_area_m2,
                    rent_chf: member.listing.rent_chf,
                })
                .collect(),
        })
        .collect()
}

fn bar_layer(aggregates: Vec<CantonAggregate>) -> Vec<BarRow> {
    aggregates
        .into_iter()
        .map(|aggregate| BarRow {
            canton: aggregate.canton_name,
            total: aggregate.total,
            segments: aggregate
                .shares
                .into_iter()
                .map(|share| BarSegment {
                    category: share.category,
                    label: share.category.label().to_string(),
                    color: share.category.color().to_string(),
                    count: share.count,
                    percentage: share.percentage_of_canton_total,
                    percentage_label: format_percentage(share.percentage_of_canton_total),
                })
                .collect(),
        })
        .collect()
}

/// Run the pipeline for one filter submission.
///
/// When nothing matches, `empty_result` is set and the chart layers are built
/// from the unfiltered collection so the page never goes blank.
pub fn build_dashboard(listings: &ListingCollection, criteria: &FilterCriteria) -> DashboardData {
    let filtered = filter(listings, criteria);
    let matched_count = filtered.len();
    let empty_result = filtered.is_empty();

    let view = if empty_result {
        debug!(
            "No listings for place={} max_rent={} min_rooms={}, falling back to all {}",
            criteria.place(),
            criteria.max_rent_chf(),
            criteria.min_rooms(),
            listings.len()
        );
        FilteredListings::all(listings)
    } else {
        filtered
    };

    let groups = group_by_category(&view);
    let map_layer = map_layer(&groups);
    let scatter_layer = scatter_layer(&groups);
    let bar_layer = bar_layer(aggregate_by_canton(&view));

    debug!(
        "Dashboard built: {} of {} listings, {} categories, {} cantons",
        matched_count,
        listings.len(),
        map_layer.len(),
        bar_layer.len()
    );

    DashboardData {
        criteria: criteria.clone(),
        empty_result,
        total_count: listings.len(),
        matched_count,
        map_layer,
        scatter_layer,
        bar_layer,
    }
}
