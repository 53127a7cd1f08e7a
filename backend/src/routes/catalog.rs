use serde::{Deserialize, Serialize};

use crate::models::{BucketingPolicy, RentCategory};

/// Legend entry for a rent category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryInfo {
    pub category: RentCategory,
    pub label: String,
    pub color: String,
}

impl From<RentCategory> for CategoryInfo {
    fn from(category: RentCategory) -> Self {
        Self {
            category,
            label: category.label().to_string(),
            color: category.color().to_string(),
        }
    }
}

/// Legend of the active bucketing policy, cheapest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Legend {
    pub policy: BucketingPolicy,
    pub categories: Vec<CategoryInfo>,
}

impl Legend {
    pub fn for_policy(policy: BucketingPolicy) -> Self {
        Self {
            policy,
            categories: policy.categories().into_iter().map(CategoryInfo::from).collect(),
        }
    }
}

/// Where the listing data comes from, shown under the charts.
pub const DATA_ATTRIBUTION_URL: &str = "https://datenportal.info/wohnungsmarkt/wohnungsmieten/";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_legend() {
        let legend = Legend::for_policy(BucketingPolicy::RateBuckets);
        let labels: Vec<&str> = legend.categories.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["cheapest", "below average", "above average", "most expensive"]
        );
        assert_eq!(legend.categories[0].color, "rgb(127, 60, 141)");
    }

    #[test]
    fn test_absolute_legend() {
        let legend = Legend::for_policy(BucketingPolicy::AbsoluteRentBuckets);
        assert_eq!(legend.categories.len(), 4);
        assert_eq!(legend.categories[3].category, RentCategory::VeryHigh);
        assert_eq!(legend.categories[3].label, "very high");
    }
}
