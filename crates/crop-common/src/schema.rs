//! Column names of the crop reference table.
//!
//! Columns are looked up by header name, never by position.

// ── Identity and display-only columns ───────────────────────────────────────
pub const CROP: &str = "Crop";
pub const BEST_SEASON: &str = "Best Season to Cultivate";
pub const HARVESTING_TIME: &str = "Harvesting Time";
pub const AVG_SELLING_PRICE: &str = "Average Selling Price (INR per Acre)";

// ── Investment path columns ─────────────────────────────────────────────────
pub const DURATION: &str = "Duration (Months)";
pub const INVESTMENT: &str = "Investment per Acre (INR)";
pub const SOIL_TYPE: &str = "Suitable Soil Type";
pub const WATER: &str = "Water Requirement (liters per acre per day)";

// ── Environment path columns ────────────────────────────────────────────────
pub const NITROGEN: &str = "Nitrogen Range (kg/acre)";
pub const PHOSPHORUS: &str = "Phosphorus Range (kg/acre)";
pub const POTASSIUM: &str = "Potassium Range (kg/acre)";
pub const HUMIDITY: &str = "Humidity Level Range (%)";
pub const TEMPERATURE: &str = "Temperature Range (°C)";
pub const PH: &str = "pH Range";

/// Every column the dataset must provide.
pub const REQUIRED: [&str; 14] = [
    CROP,
    BEST_SEASON,
    DURATION,
    HARVESTING_TIME,
    INVESTMENT,
    AVG_SELLING_PRICE,
    SOIL_TYPE,
    WATER,
    NITROGEN,
    PHOSPHORUS,
    POTASSIUM,
    HUMIDITY,
    TEMPERATURE,
    PH,
];

/// Columns shown in the investment/soil results table.
pub const INVESTMENT_DISPLAY: [&str; 12] = [
    CROP,
    BEST_SEASON,
    DURATION,
    HARVESTING_TIME,
    INVESTMENT,
    AVG_SELLING_PRICE,
    NITROGEN,
    PHOSPHORUS,
    POTASSIUM,
    HUMIDITY,
    TEMPERATURE,
    PH,
];

/// Columns shown in the environment results table.
pub const ENVIRONMENT_DISPLAY: [&str; 7] = [
    CROP, NITROGEN, PHOSPHORUS, POTASSIUM, HUMIDITY, TEMPERATURE, PH,
];

/// How a column's values are compared and sorted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// Numeric threshold, compared with `<=`.
    Threshold,
    /// Free text, matched by case-insensitive substring.
    Substring,
    /// Bucketed label, matched by exact equality.
    Bucket,
}

/// The ten columns a user can select a value for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FilterColumn {
    Duration,
    Investment,
    SoilType,
    Water,
    Nitrogen,
    Phosphorus,
    Potassium,
    Humidity,
    Temperature,
    Ph,
}

impl FilterColumn {
    pub const INVESTMENT_PATH: [FilterColumn; 4] = [
        FilterColumn::Duration,
        FilterColumn::Investment,
        FilterColumn::SoilType,
        FilterColumn::Water,
    ];

    pub const ENVIRONMENT_PATH: [FilterColumn; 6] = [
        FilterColumn::Nitrogen,
        FilterColumn::Phosphorus,
        FilterColumn::Potassium,
        FilterColumn::Humidity,
        FilterColumn::Temperature,
        FilterColumn::Ph,
    ];

    pub fn all() -> impl Iterator<Item = FilterColumn> {
        Self::INVESTMENT_PATH
            .into_iter()
            .chain(Self::ENVIRONMENT_PATH)
    }

    /// Header name in the dataset file.
    pub fn header(&self) -> &'static str {
        match self {
            FilterColumn::Duration => DURATION,
            FilterColumn::Investment => INVESTMENT,
            FilterColumn::SoilType => SOIL_TYPE,
            FilterColumn::Water => WATER,
            FilterColumn::Nitrogen => NITROGEN,
            FilterColumn::Phosphorus => PHOSPHORUS,
            FilterColumn::Potassium => POTASSIUM,
            FilterColumn::Humidity => HUMIDITY,
            FilterColumn::Temperature => TEMPERATURE,
            FilterColumn::Ph => PH,
        }
    }

    /// Query-string key used by the dashboard forms and API.
    pub fn query_key(&self) -> &'static str {
        match self {
            FilterColumn::Duration => "duration",
            FilterColumn::Investment => "investment",
            FilterColumn::SoilType => "soil",
            FilterColumn::Water => "water",
            FilterColumn::Nitrogen => "nitrogen",
            FilterColumn::Phosphorus => "phosphorus",
            FilterColumn::Potassium => "potassium",
            FilterColumn::Humidity => "humidity",
            FilterColumn::Temperature => "temperature",
            FilterColumn::Ph => "ph",
        }
    }

    /// Label of the selection control.
    pub fn label(&self) -> &'static str {
        match self {
            FilterColumn::Duration => "Select Crop Duration (Months)",
            FilterColumn::Investment => "Select Investment per Acre (INR)",
            FilterColumn::SoilType => "Select Suitable Soil Type",
            FilterColumn::Water => "Select Water Requirement (liters per acre per day)",
            FilterColumn::Nitrogen => "Select Nitrogen Range (kg/acre)",
            FilterColumn::Phosphorus => "Select Phosphorus Range (kg/acre)",
            FilterColumn::Potassium => "Select Potassium Range (kg/acre)",
            FilterColumn::Humidity => "Select Humidity Level (%)",
            FilterColumn::Temperature => "Select Temperature Range (°C)",
            FilterColumn::Ph => "Select pH Range",
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            FilterColumn::Duration | FilterColumn::Investment | FilterColumn::Water => {
                ColumnKind::Threshold
            }
            FilterColumn::SoilType => ColumnKind::Substring,
            _ => ColumnKind::Bucket,
        }
    }
}

impl std::fmt::Display for FilterColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.header())
    }
}
