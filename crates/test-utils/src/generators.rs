//! Synthetic crop dataset generators.
//!
//! Values cycle through small fixed palettes so that every threshold and
//! bucket in a generated dataset is hit by several rows, which keeps filter
//! invariants meaningful on larger inputs.

use crop_common::CropRecord;

const SOILS: [&str; 5] = ["Clayey", "Loamy", "Sandy Loam", "Black Soil", "Alluvial, Clayey"];
const LEVELS: [&str; 3] = ["Low", "Medium", "High"];
const TEMPERATURES: [&str; 4] = ["10-20", "15-25", "20-30", "25-35"];
const PH: [&str; 3] = ["5.5-6.5", "6.0-7.0", "6.5-7.5"];

/// Creates `count` deterministic records named `Crop0`, `Crop1`, ...
///
/// Names repeat every `count / 2` rows so duplicate names are present.
///
/// # Example
///
/// ```
/// use test_utils::generate_records;
///
/// let records = generate_records(10);
/// assert_eq!(records.len(), 10);
/// assert_eq!(records[0].name, records[5].name);
/// ```
pub fn generate_records(count: usize) -> Vec<CropRecord> {
    let distinct_names = (count / 2).max(1);
    (0..count)
        .map(|i| CropRecord {
            name: format!("Crop{}", i % distinct_names),
            best_season: if i % 2 == 0 { "Kharif" } else { "Rabi" }.to_string(),
            duration_months: (i % 8 + 1) as f64,
            harvesting_time: "Any".to_string(),
            investment_per_acre: ((i % 7) * 5000 + 10000) as f64,
            avg_selling_price: ((i % 5) * 10000 + 20000).to_string(),
            suitable_soil_type: SOILS[i % SOILS.len()].to_string(),
            water_requirement: ((i % 6) * 400 + 600) as f64,
            nitrogen_range: LEVELS[i % LEVELS.len()].to_string(),
            phosphorus_range: LEVELS[(i / 3) % LEVELS.len()].to_string(),
            potassium_range: LEVELS[(i / 2) % LEVELS.len()].to_string(),
            humidity_range: LEVELS[(i + 1) % LEVELS.len()].to_string(),
            temperature_range: TEMPERATURES[i % TEMPERATURES.len()].to_string(),
            ph_range: PH[i % PH.len()].to_string(),
        })
        .collect()
}

/// Renders records as CSV text with the reference header.
///
/// Text cells containing a comma are quoted.
pub fn records_to_csv(records: &[CropRecord]) -> String {
    let quote = |s: &str| {
        if s.contains(',') || s.contains('"') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    };

    let mut out = String::from(crate::SAMPLE_HEADER);
    out.push('\n');
    for r in records {
        let cells = [
            quote(&r.name),
            quote(&r.best_season),
            r.duration_months.to_string(),
            quote(&r.harvesting_time),
            r.investment_per_acre.to_string(),
            quote(&r.avg_selling_price),
            quote(&r.suitable_soil_type),
            r.water_requirement.to_string(),
            quote(&r.nitrogen_range),
            quote(&r.phosphorus_range),
            quote(&r.potassium_range),
            quote(&r.humidity_range),
            quote(&r.temperature_range),
            quote(&r.ph_range),
        ];
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}
