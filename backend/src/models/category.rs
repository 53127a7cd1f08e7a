//! Rent categories and the bucketing policies that assign them.
//!
//! Every listing is placed in one of four coarse rent buckets when the dataset
//! is loaded. Two policies exist: absolute monthly rent, and rent per square
//! metre of floor area. A loaded collection always uses exactly one policy, so
//! a listing's category is always one of that policy's four values.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bounds (inclusive) of the absolute-rent buckets, in CHF.
pub const ABSOLUTE_RENT_BOUNDS_CHF: [f64; 3] = [1200.0, 2000.0, 2800.0];

/// Lower bounds (inclusive) of the rate buckets, in CHF per m².
///
/// Frozen 15th/50th/85th percentiles of the 2019 listing snapshot. They are not
/// recomputed when a different dataset is loaded.
pub const RATE_BOUNDS_CHF_PER_M2: [f64; 3] = [15.70, 19.70, 26.10];

/// First four colours of the Plotly "Bold" qualitative palette, by category rank.
pub const CATEGORY_COLORS: [&str; 4] = [
    "rgb(127, 60, 141)",
    "rgb(17, 165, 121)",
    "rgb(57, 105, 172)",
    "rgb(242, 183, 1)",
];

/// How rent categories are assigned at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BucketingPolicy {
    /// Buckets by gross monthly rent.
    #[serde(rename = "absolute", alias = "absolute_rent_buckets")]
    AbsoluteRentBuckets,
    /// Buckets by gross rent per square metre.
    #[default]
    #[serde(rename = "rate", alias = "rate_buckets")]
    RateBuckets,
}

impl BucketingPolicy {
    /// The four categories of this policy, cheapest first.
    pub fn categories(self) -> [RentCategory; 4] {
        match self {
            BucketingPolicy::AbsoluteRentBuckets => [
                RentCategory::Low,
                RentCategory::Medium,
                RentCategory::High,
                RentCategory::VeryHigh,
            ],
            BucketingPolicy::RateBuckets => [
                RentCategory::Cheapest,
                RentCategory::BelowAverage,
                RentCategory::AboveAverage,
                RentCategory::MostExpensive,
            ],
        }
    }

    /// Assign a category from gross rent and floor area.
    ///
    /// `floor_area_m2` is only consulted by [`BucketingPolicy::RateBuckets`]
    /// and must be positive there; the listing store guarantees this.
    pub fn categorize(self, rent_chf: f64, floor_area_m2: f64) -> RentCategory {
        let [first, second, third, fourth] = self.categories();
        match self {
            BucketingPolicy::AbsoluteRentBuckets => {
                let [low, medium, high] = ABSOLUTE_RENT_BOUNDS_CHF;
                if rent_chf <= low {
                    first
                } else if rent_chf <= medium {
                    second
                } else if rent_chf <= high {
                    third
                } else {
                    fourth
                }
            }
            BucketingPolicy::RateBuckets => {
                let rate = rent_chf / floor_area_m2;
                let [below, average, above] = RATE_BOUNDS_CHF_PER_M2;
                if rate < below {
                    first
                } else if rate < average {
                    second
                } else if rate < above {
                    third
                } else {
                    fourth
                }
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BucketingPolicy::AbsoluteRentBuckets => "absolute",
            BucketingPolicy::RateBuckets => "rate",
        }
    }
}

impl fmt::Display for BucketingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BucketingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "absolute" | "absolute_rent_buckets" | "absolute-rent" => {
                Ok(BucketingPolicy::AbsoluteRentBuckets)
            }
            "rate" | "rate_buckets" | "per-area" => Ok(BucketingPolicy::RateBuckets),
            other => Err(format!(
                "Unsupported bucketing policy '{}'. Use absolute or rate.",
                other
            )),
        }
    }
}

/// Coarse rent bucket of a listing.
///
/// Variants are ordered by policy and then by price, so sorting categories of
/// one policy yields cheapest-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentCategory {
    Low,
    Medium,
    High,
    VeryHigh,
    Cheapest,
    BelowAverage,
    AboveAverage,
    MostExpensive,
}

impl RentCategory {
    /// Position of the category within its policy (0 = cheapest).
    pub fn rank(self) -> usize {
        match self {
            RentCategory::Low | RentCategory::Cheapest => 0,
            RentCategory::Medium | RentCategory::BelowAverage => 1,
            RentCategory::High | RentCategory::AboveAverage => 2,
            RentCategory::VeryHigh | RentCategory::MostExpensive => 3,
        }
    }

    pub fn policy(self) -> BucketingPolicy {
        match self {
            RentCategory::Low
            | RentCategory::Medium
            | RentCategory::High
            | RentCategory::VeryHigh => BucketingPolicy::AbsoluteRentBuckets,
            _ => BucketingPolicy::RateBuckets,
        }
    }

    /// Stable identifier, as used in JSON and CSV output.
    pub fn as_str(self) -> &'static str {
        match self {
            RentCategory::Low => "low",
            RentCategory::Medium => "medium",
            RentCategory::High => "high",
            RentCategory::VeryHigh => "very_high",
            RentCategory::Cheapest => "cheapest",
            RentCategory::BelowAverage => "below_average",
            RentCategory::AboveAverage => "above_average",
            RentCategory::MostExpensive => "most_expensive",
        }
    }

    /// Legend label shown next to the chart traces.
    pub fn label(self) -> &'static str {
        match self {
            RentCategory::Low => "low",
            RentCategory::Medium => "medium",
            RentCategory::High => "high",
            RentCategory::VeryHigh => "very high",
            RentCategory::Cheapest => "cheapest",
            RentCategory::BelowAverage => "below average",
            RentCategory::AboveAverage => "above average",
            RentCategory::MostExpensive => "most expensive",
        }
    }

    pub fn color(self) -> &'static str {
        CATEGORY_COLORS[self.rank()]
    }
}

impl fmt::Display for RentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
