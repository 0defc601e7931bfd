//! Crop recommendation filters.
//!
//! Loads the crop reference table, derives the selectable values of each
//! filterable column, and evaluates the two filter paths:
//!
//! - the investment path (duration, investment, soil type, water) with
//!   inclusive thresholds and a case-insensitive soil substring match
//! - the environment path (six nutrient and climate buckets) with exact
//!   equality
//!
//! The final recommendation is the intersection of both paths by crop name.

pub mod dataset;
pub mod filter;
pub mod options;
pub mod recommendation;

pub use dataset::Dataset;
pub use filter::{
    environment_filter, intersect, investment_filter, EnvironmentCriteria, InvestmentCriteria,
};
pub use options::{FilterOptions, OptionList};
pub use recommendation::{evaluate, recommend, Evaluation, Recommendation, Selections};
