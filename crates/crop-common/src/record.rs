//! A single row of the crop reference table.

use serde::{Deserialize, Serialize};

use crate::schema::{self, FilterColumn};

/// One crop record. Names are not unique; duplicates match independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropRecord {
    pub name: String,
    pub best_season: String,
    pub duration_months: f64,
    pub harvesting_time: String,
    pub investment_per_acre: f64,
    pub avg_selling_price: String,
    pub suitable_soil_type: String,
    pub water_requirement: f64,
    pub nitrogen_range: String,
    pub phosphorus_range: String,
    pub potassium_range: String,
    pub humidity_range: String,
    pub temperature_range: String,
    pub ph_range: String,
}

/// Borrowed value of a filterable column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Number(f64),
    Text(&'a str),
}

impl CropRecord {
    pub fn value(&self, column: FilterColumn) -> FieldValue<'_> {
        match column {
            FilterColumn::Duration => FieldValue::Number(self.duration_months),
            FilterColumn::Investment => FieldValue::Number(self.investment_per_acre),
            FilterColumn::Water => FieldValue::Number(self.water_requirement),
            FilterColumn::SoilType => FieldValue::Text(&self.suitable_soil_type),
            FilterColumn::Nitrogen => FieldValue::Text(&self.nitrogen_range),
            FilterColumn::Phosphorus => FieldValue::Text(&self.phosphorus_range),
            FilterColumn::Potassium => FieldValue::Text(&self.potassium_range),
            FilterColumn::Humidity => FieldValue::Text(&self.humidity_range),
            FilterColumn::Temperature => FieldValue::Text(&self.temperature_range),
            FilterColumn::Ph => FieldValue::Text(&self.ph_range),
        }
    }

    /// Display text for a column header, or `None` for an unknown header.
    pub fn display(&self, header: &str) -> Option<String> {
        let text = match header {
            schema::CROP => self.name.clone(),
            schema::BEST_SEASON => self.best_season.clone(),
            schema::DURATION => format_number(self.duration_months),
            schema::HARVESTING_TIME => self.harvesting_time.clone(),
            schema::INVESTMENT => format_number(self.investment_per_acre),
            schema::AVG_SELLING_PRICE => self.avg_selling_price.clone(),
            schema::SOIL_TYPE => self.suitable_soil_type.clone(),
            schema::WATER => format_number(self.water_requirement),
            schema::NITROGEN => self.nitrogen_range.clone(),
            schema::PHOSPHORUS => self.phosphorus_range.clone(),
            schema::POTASSIUM => self.potassium_range.clone(),
            schema::HUMIDITY => self.humidity_range.clone(),
            schema::TEMPERATURE => self.temperature_range.clone(),
            schema::PH => self.ph_range.clone(),
            _ => return None,
        };
        Some(text)
    }
}

/// Format a numeric cell the way it is offered in selection controls.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

/// Parse a numeric cell, accepting thousands separators ("20,000").
pub fn parse_number(raw: &str) -> Result<f64, String> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return Err("empty numeric value".to_string());
    }
    let value = cleaned
        .parse::<f64>()
        .map_err(|_| format!("'{}' is not a number", raw.trim()))?;
    if !value.is_finite() {
        return Err(format!("'{}' is not a finite number", raw.trim()));
    }
    Ok(value)
}
