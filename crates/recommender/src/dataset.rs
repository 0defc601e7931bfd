//! Loading the crop reference table.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crop_common::record::parse_number;
use crop_common::{schema, CropError, CropRecord, CropResult};
use serde::Deserialize;
use tracing::{debug, info};

/// The crop reference table. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<CropRecord>,
    source: Option<PathBuf>,
}

impl Dataset {
    /// Build a dataset from records already in memory.
    pub fn new(records: Vec<CropRecord>) -> Self {
        Self {
            records,
            source: None,
        }
    }

    /// Load the table from a delimited file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> CropResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| CropError::DatasetUnavailable {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut dataset = Self::from_reader(file)?;
        dataset.source = Some(path.to_path_buf());

        info!(
            path = %path.display(),
            rows = dataset.len(),
            "Loaded crop dataset"
        );
        Ok(dataset)
    }

    /// Parse the table from any reader. The first line must be the header.
    pub fn from_reader<R: Read>(reader: R) -> CropResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = reader
            .headers()
            .map_err(|e| CropError::ParseError(format!("Failed to read header: {}", e)))?
            .clone();

        validate_headers(&headers)?;

        let mut records = Vec::new();
        for result in reader.records() {
            let row = result.map_err(|e| CropError::ParseError(e.to_string()))?;
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            let raw: RawRow = row
                .deserialize(Some(&headers))
                .map_err(|e| CropError::ParseError(format!("line {}: {}", line, e)))?;
            records.push(raw.into_record(line)?);
        }

        debug!(rows = records.len(), "Parsed crop records");
        Ok(Self {
            records,
            source: None,
        })
    }

    pub fn records(&self) -> &[CropRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CropRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// File the dataset was loaded from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a CropRecord;
    type IntoIter = std::slice::Iter<'a, CropRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Check that every required column is present, naming all that are not.
fn validate_headers(headers: &csv::StringRecord) -> CropResult<()> {
    let missing: Vec<&str> = schema::REQUIRED
        .iter()
        .copied()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(CropError::MissingColumn(missing.join(", ")))
    }
}

/// A row as it appears in the file, before numeric cells are parsed.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "Crop")]
    name: String,
    #[serde(rename = "Best Season to Cultivate")]
    best_season: String,
    #[serde(rename = "Duration (Months)")]
    duration_months: String,
    #[serde(rename = "Harvesting Time")]
    harvesting_time: String,
    #[serde(rename = "Investment per Acre (INR)")]
    investment_per_acre: String,
    #[serde(rename = "Average Selling Price (INR per Acre)")]
    avg_selling_price: String,
    #[serde(rename = "Suitable Soil Type")]
    suitable_soil_type: String,
    #[serde(rename = "Water Requirement (liters per acre per day)")]
    water_requirement: String,
    #[serde(rename = "Nitrogen Range (kg/acre)")]
    nitrogen_range: String,
    #[serde(rename = "Phosphorus Range (kg/acre)")]
    phosphorus_range: String,
    #[serde(rename = "Potassium Range (kg/acre)")]
    potassium_range: String,
    #[serde(rename = "Humidity Level Range (%)")]
    humidity_range: String,
    #[serde(rename = "Temperature Range (°C)")]
    temperature_range: String,
    #[serde(rename = "pH Range")]
    ph_range: String,
}

impl RawRow {
    fn into_record(self, line: u64) -> CropResult<CropRecord> {
        let number = |column: &str, raw: &str| {
            parse_number(raw).map_err(|message| CropError::InvalidData {
                line,
                column: column.to_string(),
                message,
            })
        };

        Ok(CropRecord {
            duration_months: number(schema::DURATION, &self.duration_months)?,
            investment_per_acre: number(schema::INVESTMENT, &self.investment_per_acre)?,
            water_requirement: number(schema::WATER, &self.water_requirement)?,
            name: self.name,
            best_season: self.best_season,
            harvesting_time: self.harvesting_time,
            avg_selling_price: self.avg_selling_price,
            suitable_soil_type: self.suitable_soil_type,
            nitrogen_range: self.nitrogen_range,
            phosphorus_range: self.phosphorus_range,
            potassium_range: self.potassium_range,
            humidity_range: self.humidity_range,
            temperature_range: self.temperature_range,
            ph_range: self.ph_range,
        })
    }
}
