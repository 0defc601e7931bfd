//! Common test fixtures for crop advisor tests.
//!
//! The sample dataset is small enough to reason about by hand. Notable rows:
//! - two "Rice" rows that differ in soil and season
//! - "Cotton" stores its investment with a thousands separator
//! - "Wheat" lists several soil types in one free-text cell

use crop_common::CropRecord;

/// Header line of the reference table.
pub const SAMPLE_HEADER: &str = "Crop,Best Season to Cultivate,Duration (Months),Harvesting Time,Investment per Acre (INR),Average Selling Price (INR per Acre),Suitable Soil Type,Water Requirement (liters per acre per day),Nitrogen Range (kg/acre),Phosphorus Range (kg/acre),Potassium Range (kg/acre),Humidity Level Range (%),Temperature Range (°C),pH Range";

/// Sample reference table with six rows.
pub const SAMPLE_CSV: &str = "Crop,Best Season to Cultivate,Duration (Months),Harvesting Time,Investment per Acre (INR),Average Selling Price (INR per Acre),Suitable Soil Type,Water Requirement (liters per acre per day),Nitrogen Range (kg/acre),Phosphorus Range (kg/acre),Potassium Range (kg/acre),Humidity Level Range (%),Temperature Range (°C),pH Range
Rice,Kharif,4,Oct-Nov,20000,45000,Clayey,2000,Medium,Low,Medium,High,20-35,5.5-6.5
Maize,Kharif,3,Sep-Oct,15000,30000,Loamy,1200,Medium,Medium,Low,Medium,18-27,5.5-7.0
Wheat,Rabi,5,Mar-Apr,18000,35000,\"Loamy, Clay Loam\",1500,High,Medium,Medium,Low,10-25,6.0-7.5
Cotton,Kharif,6,Oct-Jan,\"30,000\",60000,Black Soil,2500,High,High,High,Medium,21-30,6.0-8.0
Chickpea,Rabi,4,Feb-Mar,12000,28000,Sandy Loam,800,Low,Medium,Low,Low,15-25,6.0-7.5
Rice,Rabi,5,Mar-Apr,22000,47000,Alluvial,2200,Medium,Low,Medium,High,20-35,5.5-6.5
";

/// Number of data rows in [`SAMPLE_CSV`].
pub const SAMPLE_ROWS: usize = 6;

/// Builder for one-off crop records.
///
/// Every field starts from a neutral default so tests only spell out the
/// attributes they care about.
#[derive(Debug, Clone)]
pub struct CropBuilder {
    record: CropRecord,
}

impl CropBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            record: CropRecord {
                name: name.to_string(),
                best_season: "Kharif".to_string(),
                duration_months: 1.0,
                harvesting_time: "Any".to_string(),
                investment_per_acre: 1000.0,
                avg_selling_price: "0".to_string(),
                suitable_soil_type: "Loamy".to_string(),
                water_requirement: 100.0,
                nitrogen_range: "Low".to_string(),
                phosphorus_range: "Low".to_string(),
                potassium_range: "Low".to_string(),
                humidity_range: "Low".to_string(),
                temperature_range: "10-20".to_string(),
                ph_range: "6.0-7.0".to_string(),
            },
        }
    }

    pub fn duration(mut self, months: f64) -> Self {
        self.record.duration_months = months;
        self
    }

    pub fn investment(mut self, inr: f64) -> Self {
        self.record.investment_per_acre = inr;
        self
    }

    pub fn soil(mut self, soil: &str) -> Self {
        self.record.suitable_soil_type = soil.to_string();
        self
    }

    pub fn water(mut self, liters: f64) -> Self {
        self.record.water_requirement = liters;
        self
    }

    /// Set all six environment buckets at once.
    pub fn buckets(
        mut self,
        nitrogen: &str,
        phosphorus: &str,
        potassium: &str,
        humidity: &str,
        temperature: &str,
        ph: &str,
    ) -> Self {
        self.record.nitrogen_range = nitrogen.to_string();
        self.record.phosphorus_range = phosphorus.to_string();
        self.record.potassium_range = potassium.to_string();
        self.record.humidity_range = humidity.to_string();
        self.record.temperature_range = temperature.to_string();
        self.record.ph_range = ph.to_string();
        self
    }

    pub fn build(self) -> CropRecord {
        self.record
    }
}

/// The rice row used throughout the tests: 4 months, 20000 INR, clayey
/// soil, 2000 liters.
pub fn rice() -> CropRecord {
    CropBuilder::new("Rice")
        .duration(4.0)
        .investment(20000.0)
        .soil("Clayey")
        .water(2000.0)
        .buckets("Medium", "Low", "Medium", "High", "20-35", "5.5-6.5")
        .build()
}

/// The records of [`SAMPLE_CSV`] in file order.
pub fn sample_records() -> Vec<CropRecord> {
    let row = |name: &str,
               season: &str,
               duration: f64,
               harvest: &str,
               investment: f64,
               price: &str,
               soil: &str,
               water: f64,
               buckets: [&str; 6]| CropRecord {
        name: name.to_string(),
        best_season: season.to_string(),
        duration_months: duration,
        harvesting_time: harvest.to_string(),
        investment_per_acre: investment,
        avg_selling_price: price.to_string(),
        suitable_soil_type: soil.to_string(),
        water_requirement: water,
        nitrogen_range: buckets[0].to_string(),
        phosphorus_range: buckets[1].to_string(),
        potassium_range: buckets[2].to_string(),
        humidity_range: buckets[3].to_string(),
        temperature_range: buckets[4].to_string(),
        ph_range: buckets[5].to_string(),
    };

    vec![
        row("Rice", "Kharif", 4.0, "Oct-Nov", 20000.0, "45000", "Clayey", 2000.0,
            ["Medium", "Low", "Medium", "High", "20-35", "5.5-6.5"]),
        row("Maize", "Kharif", 3.0, "Sep-Oct", 15000.0, "30000", "Loamy", 1200.0,
            ["Medium", "Medium", "Low", "Medium", "18-27", "5.5-7.0"]),
        row("Wheat", "Rabi", 5.0, "Mar-Apr", 18000.0, "35000", "Loamy, Clay Loam", 1500.0,
            ["High", "Medium", "Medium", "Low", "10-25", "6.0-7.5"]),
        row("Cotton", "Kharif", 6.0, "Oct-Jan", 30000.0, "60000", "Black Soil", 2500.0,
            ["High", "High", "High", "Medium", "21-30", "6.0-8.0"]),
        row("Chickpea", "Rabi", 4.0, "Feb-Mar", 12000.0, "28000", "Sandy Loam", 800.0,
            ["Low", "Medium", "Low", "Low", "15-25", "6.0-7.5"]),
        row("Rice", "Rabi", 5.0, "Mar-Apr", 22000.0, "47000", "Alluvial", 2200.0,
            ["Medium", "Low", "Medium", "High", "20-35", "5.5-6.5"]),
    ]
}
