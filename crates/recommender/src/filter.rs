//! The two filter paths and the intersection of their results.
//!
//! All functions are pure scans over the dataset; nothing is indexed or
//! cached.

use std::collections::{BTreeSet, HashSet};

use crop_common::CropRecord;
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;

/// Selections for the investment path.
///
/// Thresholds are upper bounds and inclusive. `soil_type` is matched as a
/// case-insensitive substring of the record's free-text soil description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentCriteria {
    pub max_duration: f64,
    pub max_investment: f64,
    pub soil_type: String,
    pub max_water: f64,
}

impl InvestmentCriteria {
    pub fn matches(&self, record: &CropRecord) -> bool {
        record.duration_months <= self.max_duration
            && record.investment_per_acre <= self.max_investment
            && contains_ignore_case(&record.suitable_soil_type, &self.soil_type)
            && record.water_requirement <= self.max_water
    }
}

/// Selections for the environment path. Every bucket must match exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentCriteria {
    pub nitrogen: String,
    pub phosphorus: String,
    pub potassium: String,
    pub humidity: String,
    pub temperature: String,
    pub ph: String,
}

impl EnvironmentCriteria {
    pub fn matches(&self, record: &CropRecord) -> bool {
        record.nitrogen_range == self.nitrogen
            && record.phosphorus_range == self.phosphorus
            && record.potassium_range == self.potassium
            && record.humidity_range == self.humidity
            && record.temperature_range == self.temperature
            && record.ph_range == self.ph
    }
}

/// Records satisfying every investment-path predicate, in dataset order.
pub fn investment_filter<'a>(
    dataset: &'a Dataset,
    criteria: &InvestmentCriteria,
) -> Vec<&'a CropRecord> {
    dataset.iter().filter(|r| criteria.matches(r)).collect()
}

/// Records whose six buckets all equal the selected ones, in dataset order.
pub fn environment_filter<'a>(
    dataset: &'a Dataset,
    criteria: &EnvironmentCriteria,
) -> Vec<&'a CropRecord> {
    dataset.iter().filter(|r| criteria.matches(r)).collect()
}

/// Crop names present in both subsets.
///
/// Compares names only: two rows with the same name count as the same crop.
pub fn intersect(a: &[&CropRecord], b: &[&CropRecord]) -> BTreeSet<String> {
    let names_b: HashSet<&str> = b.iter().map(|r| r.name.as_str()).collect();
    a.iter()
        .map(|r| r.name.as_str())
        .filter(|name| names_b.contains(name))
        .map(str::to_string)
        .collect()
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::{rice, CropBuilder};

    fn rice_buckets() -> EnvironmentCriteria {
        EnvironmentCriteria {
            nitrogen: "Medium".to_string(),
            phosphorus: "Low".to_string(),
            potassium: "Medium".to_string(),
            humidity: "High".to_string(),
            temperature: "20-35".to_string(),
            ph: "5.5-6.5".to_string(),
        }
    }

    #[test]
    fn test_rice_passes_investment_with_lowercase_soil() {
        let dataset = Dataset::new(vec![rice()]);
        let criteria = InvestmentCriteria {
            max_duration: 6.0,
            max_investment: 25000.0,
            soil_type: "clay".to_string(),
            max_water: 2500.0,
        };
        let result = investment_filter(&dataset, &criteria);
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].name, "Rice");
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        let dataset = Dataset::new(vec![rice()]);
        let criteria = InvestmentCriteria {
            max_duration: 4.0,
            max_investment: 20000.0,
            soil_type: "Clayey".to_string(),
            max_water: 2000.0,
        };
        assert_eq!(investment_filter(&dataset, &criteria).len(), 1);
    }

    #[test]
    fn test_each_threshold_can_exclude() {
        let dataset = Dataset::new(vec![rice()]);
        let base = InvestmentCriteria {
            max_duration: 4.0,
            max_investment: 20000.0,
            soil_type: "Clayey".to_string(),
            max_water: 2000.0,
        };

        let tighter = [
            InvestmentCriteria { max_duration: 3.9, ..base.clone() },
            InvestmentCriteria { max_investment: 19999.0, ..base.clone() },
            InvestmentCriteria { soil_type: "Sandy".to_string(), ..base.clone() },
            InvestmentCriteria { max_water: 1999.0, ..base.clone() },
        ];
        for criteria in tighter {
            assert!(investment_filter(&dataset, &criteria).is_empty(), "{:?}", criteria);
        }
    }

    #[test]
    fn test_soil_substring_within_multi_soil_description() {
        let record = CropBuilder::new("Wheat").soil("Loamy, Clay Loam").build();
        let criteria = InvestmentCriteria {
            max_duration: 12.0,
            max_investment: 100000.0,
            soil_type: "CLAY LOAM".to_string(),
            max_water: 10000.0,
        };
        assert!(criteria.matches(&record));
    }

    #[test]
    fn test_environment_exact_match() {
        let dataset = Dataset::new(vec![rice()]);
        let result = environment_filter(&dataset, &rice_buckets());
        assert_eq!(result.len(), 1);
    }

    #[test]
    fn test_environment_any_single_mismatch_excludes() {
        let dataset = Dataset::new(vec![rice()]);
        let base = rice_buckets();
        let variants = [
            EnvironmentCriteria { nitrogen: "High".to_string(), ..base.clone() },
            EnvironmentCriteria { phosphorus: "High".to_string(), ..base.clone() },
            EnvironmentCriteria { potassium: "High".to_string(), ..base.clone() },
            EnvironmentCriteria { humidity: "Low".to_string(), ..base.clone() },
            EnvironmentCriteria { temperature: "10-20".to_string(), ..base.clone() },
            EnvironmentCriteria { ph: "6.0-7.0".to_string(), ..base.clone() },
        ];
        for criteria in variants {
            assert!(environment_filter(&dataset, &criteria).is_empty(), "{:?}", criteria);
        }
    }

    #[test]
    fn test_environment_match_is_case_sensitive() {
        let dataset = Dataset::new(vec![rice()]);
        let criteria = EnvironmentCriteria {
            nitrogen: "medium".to_string(),
            ..rice_buckets()
        };
        assert!(environment_filter(&dataset, &criteria).is_empty());
    }

    #[test]
    fn test_intersect_by_name() {
        let rice = CropBuilder::new("Rice").build();
        let maize = CropBuilder::new("Maize").build();
        let wheat = CropBuilder::new("Wheat").build();

        let a = vec![&rice, &maize];
        let b = vec![&maize, &wheat];
        let common = intersect(&a, &b);
        assert_eq!(common.into_iter().collect::<Vec<_>>(), vec!["Maize".to_string()]);
    }

    #[test]
    fn test_intersect_ignores_other_fields() {
        let cheap = CropBuilder::new("Rice").investment(1000.0).build();
        let dear = CropBuilder::new("Rice").investment(90000.0).build();
        let common = intersect(&[&cheap], &[&dear]);
        assert!(common.contains("Rice"));
    }

    #[test]
    fn test_intersect_with_empty_side() {
        let rice = CropBuilder::new("Rice").build();
        assert!(intersect(&[&rice], &[]).is_empty());
        assert!(intersect(&[], &[&rice]).is_empty());
    }
}
