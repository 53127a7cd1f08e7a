//! Per-canton category counts for the stacked bar chart.

use serde::Serialize;
use std::collections::BTreeMap;

use super::filter::FilteredListings;
use crate::models::RentCategory;

/// Count of one category within a canton.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category: RentCategory,
    pub count: usize,
    /// `count / total * 100`, rounded to 2 decimals.
    pub percentage_of_canton_total: f64,
}

/// One bar of the chart: a canton with a count for each of the 4 categories.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CantonAggregate {
    pub canton_name: String,
    /// Always 4 entries, cheapest category first.
    pub shares: Vec<CategoryShare>,
    pub total: usize,
}

impl CantonAggregate {
    /// Count of `category`, 0 if the category belongs to another policy.
    pub fn count(&self, category: RentCategory) -> usize {
        self.share(category).map_or(0, |s| s.count)
    }

    pub fn percentage(&self, category: RentCategory) -> f64 {
        self.share(category)
            .map_or(0.0, |s| s.percentage_of_canton_total)
    }

    fn share(&self, category: RentCategory) -> Option<&CategoryShare> {
        self.shares.iter().find(|s| s.category == category)
    }
}

/// Round to 2 decimal places, half away from zero.
pub fn round_percentage(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Count filtered listings per canton and category.
///
/// Output is sorted by canton name descending. Only cantons with at least one
/// listing appear, so `total` is never 0.
pub fn aggregate_by_canton(filtered: &FilteredListings<'_>) -> Vec<CantonAggregate> {
    let categories = filtered.policy().categories();

    let mut counts: BTreeMap<&str, [usize; 4]> = BTreeMap::new();
    for listing in filtered.iter() {
        let row = counts.entry(listing.canton_name.as_str()).or_insert([0; 4]);
        row[listing.rent_category.rank()] += 1;
    }

    counts
        .into_iter()
        .rev()
        .map(|(canton_name, row)| {
            let total: usize = row.iter().sum();
            let shares = categories
                .iter()
                .zip(row)
                .map(|(&category, count)| CategoryShare {
                    category,
                    count,
                    percentage_of_canton_total: round_percentage(
                        count as f64 / total as f64 * 100.0,
                    ),
                })
                .collect();
            CantonAggregate {
                canton_name: canton_name.to_string(),
                shares,
                total,
            }
        })
        .collect()
}
