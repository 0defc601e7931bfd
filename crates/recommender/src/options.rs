//! Selectable values for each filterable column.
//!
//! Options are exactly the sorted distinct values present in the dataset.
//! Empty cells are never offered.

use std::collections::BTreeSet;

use crop_common::record::{format_number, parse_number};
use crop_common::{ColumnKind, CropError, CropResult, FieldValue, FilterColumn};
use serde::Serialize;

use crate::dataset::Dataset;

/// Sorted distinct values of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptionList {
    #[serde(skip)]
    column: FilterColumn,
    key: &'static str,
    label: &'static str,
    values: Vec<String>,
}

impl OptionList {
    /// Collect the options of `column` from the dataset.
    pub fn from_dataset(dataset: &Dataset, column: FilterColumn) -> Self {
        let values = match column.kind() {
            ColumnKind::Threshold => {
                let mut numbers: Vec<f64> = dataset
                    .iter()
                    .filter_map(|r| match r.value(column) {
                        FieldValue::Number(n) => Some(n),
                        FieldValue::Text(_) => None,
                    })
                    .collect();
                numbers.sort_by(|a, b| a.total_cmp(b));
                numbers.dedup();
                numbers.into_iter().map(format_number).collect()
            }
            ColumnKind::Substring | ColumnKind::Bucket => dataset
                .iter()
                .filter_map(|r| match r.value(column) {
                    FieldValue::Text(t) if !t.is_empty() => Some(t),
                    _ => None,
                })
                .collect::<BTreeSet<&str>>()
                .into_iter()
                .map(str::to_string)
                .collect(),
        };

        Self {
            column,
            key: column.query_key(),
            label: column.label(),
            values,
        }
    }

    pub fn column(&self) -> FilterColumn {
        self.column
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Resolve a user choice against the list.
    ///
    /// With no request the first option is chosen. Numeric columns compare
    /// by value, so "20000" and "20000.0" name the same option.
    pub fn select(&self, requested: Option<&str>) -> CropResult<&str> {
        let first = self
            .values
            .first()
            .map(String::as_str)
            .ok_or_else(|| CropError::NoOptions(self.column.header().to_string()))?;

        let requested = match requested.map(str::trim) {
            None | Some("") => return Ok(first),
            Some(value) => value,
        };

        let found = match self.column.kind() {
            ColumnKind::Threshold => {
                let wanted = parse_number(requested).map_err(|message| {
                    CropError::InvalidParameter {
                        param: self.key.to_string(),
                        message,
                    }
                })?;
                self.values
                    .iter()
                    .find(|v| parse_number(v).map(|n| n == wanted).unwrap_or(false))
            }
            ColumnKind::Substring | ColumnKind::Bucket => {
                self.values.iter().find(|v| v.as_str() == requested)
            }
        };

        found.map(String::as_str).ok_or_else(|| CropError::InvalidSelection {
            column: self.column.header().to_string(),
            value: requested.to_string(),
        })
    }

    /// Like [`select`](Self::select) for threshold columns, returning the number.
    pub fn select_number(&self, requested: Option<&str>) -> CropResult<f64> {
        let value = self.select(requested)?;
        parse_number(value).map_err(|message| CropError::InvalidParameter {
            param: self.key.to_string(),
            message,
        })
    }
}

/// Option lists for all ten filterable columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    lists: Vec<OptionList>,
}

impl FilterOptions {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self {
            lists: FilterColumn::all()
                .map(|column| OptionList::from_dataset(dataset, column))
                .collect(),
        }
    }

    pub fn get(&self, column: FilterColumn) -> &OptionList {
        // lists follows FilterColumn::all(), which is declaration order
        &self.lists[column as usize]
    }

    pub fn iter(&self) -> impl Iterator<Item = &OptionList> {
        self.lists.iter()
    }

    /// Columns that have nothing to offer.
    pub fn empty_columns(&self) -> Vec<FilterColumn> {
        self.lists
            .iter()
            .filter(|l| l.is_empty())
            .map(|l| l.column)
            .collect()
    }
}
