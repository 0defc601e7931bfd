//! The end-to-end recommendation pipeline.
//!
//! Selections arrive as loose strings (form fields, query parameters). They
//! are resolved against the dataset's option lists, then both filter paths
//! run and their crop names are intersected.

use std::collections::BTreeSet;

use crop_common::{CropRecord, CropResult, FilterColumn};
use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::filter::{
    environment_filter, intersect, investment_filter, EnvironmentCriteria, InvestmentCriteria,
};
use crate::options::FilterOptions;

/// User choices for the ten selection controls. Absent means "first option".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selections {
    pub duration: Option<String>,
    pub investment: Option<String>,
    pub soil: Option<String>,
    pub water: Option<String>,
    pub nitrogen: Option<String>,
    pub phosphorus: Option<String>,
    pub potassium: Option<String>,
    pub humidity: Option<String>,
    pub temperature: Option<String>,
    pub ph: Option<String>,
}

impl Selections {
    pub fn get(&self, column: FilterColumn) -> Option<&str> {
        let value = match column {
            FilterColumn::Duration => &self.duration,
            FilterColumn::Investment => &self.investment,
            FilterColumn::SoilType => &self.soil,
            FilterColumn::Water => &self.water,
            FilterColumn::Nitrogen => &self.nitrogen,
            FilterColumn::Phosphorus => &self.phosphorus,
            FilterColumn::Potassium => &self.potassium,
            FilterColumn::Humidity => &self.humidity,
            FilterColumn::Temperature => &self.temperature,
            FilterColumn::Ph => &self.ph,
        };
        value.as_deref()
    }

    pub fn investment_criteria(&self, options: &FilterOptions) -> CropResult<InvestmentCriteria> {
        let number = |column| options.get(column).select_number(self.get(column));
        Ok(InvestmentCriteria {
            max_duration: number(FilterColumn::Duration)?,
            max_investment: number(FilterColumn::Investment)?,
            soil_type: self.text(options, FilterColumn::SoilType)?,
            max_water: number(FilterColumn::Water)?,
        })
    }

    pub fn environment_criteria(&self, options: &FilterOptions) -> CropResult<EnvironmentCriteria> {
        Ok(EnvironmentCriteria {
            nitrogen: self.text(options, FilterColumn::Nitrogen)?,
            phosphorus: self.text(options, FilterColumn::Phosphorus)?,
            potassium: self.text(options, FilterColumn::Potassium)?,
            humidity: self.text(options, FilterColumn::Humidity)?,
            temperature: self.text(options, FilterColumn::Temperature)?,
            ph: self.text(options, FilterColumn::Ph)?,
        })
    }

    /// The resolved value of every column, in control order.
    pub fn resolved(&self, options: &FilterOptions) -> CropResult<Vec<(FilterColumn, String)>> {
        self.resolve_columns(options, FilterColumn::all())
    }

    fn resolve_columns(
        &self,
        options: &FilterOptions,
        columns: impl IntoIterator<Item = FilterColumn>,
    ) -> CropResult<Vec<(FilterColumn, String)>> {
        columns
            .into_iter()
            .map(|column| {
                options
                    .get(column)
                    .select(self.get(column))
                    .map(|value| (column, value.to_string()))
            })
            .collect()
    }

    fn text(&self, options: &FilterOptions, column: FilterColumn) -> CropResult<String> {
        options
            .get(column)
            .select(self.get(column))
            .map(str::to_string)
    }
}

/// Result of running both filter paths.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Recommendation<'a> {
    /// The investment path matched nothing. Terminal: nothing derived from
    /// it is reported.
    NoInvestmentMatch,

    /// Both paths ran. `environment` and `common` may be empty.
    Complete {
        investment: Vec<&'a CropRecord>,
        environment: Vec<&'a CropRecord>,
        common: BTreeSet<String>,
    },
}

impl Recommendation<'_> {
    /// Short label used for logging and metrics.
    pub fn outcome(&self) -> &'static str {
        match self {
            Recommendation::NoInvestmentMatch => "no_investment_match",
            Recommendation::Complete { environment, .. } if environment.is_empty() => {
                "no_environment_match"
            }
            Recommendation::Complete { common, .. } if common.is_empty() => "no_common_crop",
            Recommendation::Complete { .. } => "recommended",
        }
    }

    pub fn common(&self) -> Option<&BTreeSet<String>> {
        match self {
            Recommendation::NoInvestmentMatch => None,
            Recommendation::Complete { common, .. } => Some(common),
        }
    }
}

/// Run the investment path, then the environment path, then intersect.
pub fn evaluate<'a>(
    dataset: &'a Dataset,
    investment: &InvestmentCriteria,
    environment: &EnvironmentCriteria,
) -> Recommendation<'a> {
    let investment_matches = investment_filter(dataset, investment);
    if investment_matches.is_empty() {
        return Recommendation::NoInvestmentMatch;
    }

    let environment_matches = environment_filter(dataset, environment);
    let common = intersect(&investment_matches, &environment_matches);

    Recommendation::Complete {
        investment: investment_matches,
        environment: environment_matches,
        common,
    }
}

/// Selections as shown back to the user, with the pipeline result.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation<'a> {
    pub selections: Vec<(FilterColumn, String)>,
    pub recommendation: Recommendation<'a>,
}

/// Resolve selections path by path and run the pipeline.
///
/// Environment selections are only validated once the investment path has
/// matched. On an investment miss they are carried through as submitted.
pub fn recommend<'a>(
    dataset: &'a Dataset,
    options: &FilterOptions,
    selections: &Selections,
) -> CropResult<Evaluation<'a>> {
    let mut resolved = selections.resolve_columns(options, FilterColumn::INVESTMENT_PATH)?;
    let investment = selections.investment_criteria(options)?;
    let investment_matches = investment_filter(dataset, &investment);

    if investment_matches.is_empty() {
        resolved.extend(FilterColumn::ENVIRONMENT_PATH.into_iter().filter_map(|column| {
            selections
                .get(column)
                .filter(|v| !v.trim().is_empty())
                .map(|v| (column, v.to_string()))
        }));
        return Ok(Evaluation {
            selections: resolved,
            recommendation: Recommendation::NoInvestmentMatch,
        });
    }

    resolved.extend(selections.resolve_columns(options, FilterColumn::ENVIRONMENT_PATH)?);
    let environment = selections.environment_criteria(options)?;
    let environment_matches = environment_filter(dataset, &environment);
    let common = intersect(&investment_matches, &environment_matches);

    Ok(Evaluation {
        selections: resolved,
        recommendation: Recommendation::Complete {
            investment: investment_matches,
            environment: environment_matches,
            common,
        },
    })
}
