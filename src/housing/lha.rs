//! Local Housing Allowance rates by broad rental market area (BRMA)

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::Reader;

use crate::error::{CalculationError, EngineResult};
use crate::rates::LhaRates;

/// Default location of an LHA rate file
pub const DEFAULT_LHA_PATH: &str = "data/lha_rates.csv";

/// Weekly rates per BRMA: shared, 1, 2, 3, 4 bedrooms
const BUILTIN_RATES: &[(&str, [f64; 5])] = &[
    ("Central London", [194.84, 402.74, 498.08, 609.70, 777.00]),
    ("Inner North London", [172.60, 339.62, 431.51, 515.34, 647.67]),
    ("Outer South West London", [155.34, 287.67, 345.21, 414.25, 552.33]),
    ("Birmingham", [91.81, 172.60, 184.11, 207.12, 299.18]),
    ("Bristol", [109.32, 195.62, 241.64, 287.67, 368.22]),
    ("Cardiff", [98.96, 166.85, 195.62, 230.14, 299.18]),
    ("Central Greater Manchester", [97.81, 172.60, 195.62, 218.63, 276.16]),
    ("Leeds", [91.81, 155.34, 172.60, 195.62, 253.15]),
    ("Brighton and Hove", [117.37, 218.63, 276.16, 333.70, 414.25]),
    ("Glasgow", [86.30, 126.58, 155.34, 189.86, 276.16]),
];

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    brma: String,
    shared: f64,
    one_bed: f64,
    two_bed: f64,
    three_bed: f64,
    four_bed: f64,
}

impl CsvRow {
    fn into_rates(self) -> EngineResult<(String, LhaRates)> {
        let values = [self.shared, self.one_bed, self.two_bed, self.three_bed, self.four_bed];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(CalculationError::RateData(format!(
                "negative or non-numeric LHA rate for {}",
                self.brma
            )));
        }
        Ok((self.brma, rates_from(values)))
    }
}

fn rates_from(values: [f64; 5]) -> LhaRates {
    LhaRates {
        shared_rate: values[0],
        one_bed_rate: values[1],
        two_bed_rate: values[2],
        three_bed_rate: values[3],
        four_bed_rate: values[4],
    }
}

fn area_key(brma: &str) -> String {
    brma.trim().to_lowercase()
}

/// Weekly LHA amount converted to a calendar month
pub fn convert_lha_to_monthly(weekly: f64) -> f64 {
    weekly * 52.0 / 12.0
}

/// LHA lookup keyed by BRMA name
#[derive(Debug, Clone)]
pub struct LhaService {
    areas: HashMap<String, LhaRates>,
}

impl LhaService {
    /// Rates compiled into the crate
    pub fn builtin() -> Self {
        let areas = BUILTIN_RATES
            .iter()
            .map(|(name, values)| (area_key(name), rates_from(*values)))
            .collect();
        Self { areas }
    }

    /// Load rates from a CSV file with columns
    /// `brma,shared,one_bed,two_bed,three_bed,four_bed`
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let reader = Reader::from_path(path)?;
        Self::from_csv(reader)
    }

    /// Load rates from any reader
    pub fn from_reader<R: Read>(reader: R) -> EngineResult<Self> {
        Self::from_csv(Reader::from_reader(reader))
    }

    fn from_csv<R: Read>(mut reader: Reader<R>) -> EngineResult<Self> {
        let mut areas = HashMap::new();
        for result in reader.deserialize() {
            let row: CsvRow = result?;
            let (name, rates) = row.into_rates()?;
            areas.insert(area_key(&name), rates);
        }
        log::debug!("loaded LHA rates for {} area(s)", areas.len());
        Ok(Self { areas })
    }

    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    /// Every band for a BRMA, `None` when the area is not known
    pub fn get_all_lha_rates(&self, brma: &str) -> Option<&LhaRates> {
        self.areas.get(&area_key(brma))
    }

    /// Weekly LHA cap for a BRMA and bedroom entitlement
    pub fn get_lha_rate(&self, brma: &str, bedrooms: u32) -> Option<f64> {
        self.get_all_lha_rates(brma)
            .map(|rates| rates.for_bedrooms(bedrooms))
    }
}

impl Default for LhaService {
    fn default() -> Self {
        Self::builtin()
    }
}
