//! JSON-based rate table overrides
//!
//! The file is a JSON object keyed by tax year, each value a complete
//! `RateTable`:
//!
//! ```json
//! { "2025_26": { "standardAllowance": { ... }, "taperRate": 0.55, ... } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use super::{RateTable, TaxYear};
use crate::error::{CalculationError, EngineResult};

/// Parse rate overrides from a JSON string
pub fn parse_rate_overrides(json: &str) -> EngineResult<BTreeMap<TaxYear, RateTable>> {
    let tables: BTreeMap<TaxYear, RateTable> = serde_json::from_str(json)?;
    for (year, table) in &tables {
        if !(0.0..=1.0).contains(&table.taper_rate) {
            return Err(CalculationError::RateData(format!(
                "taper rate for {} must be between 0 and 1, found {}",
                year, table.taper_rate
            )));
        }
        if table.capital.tariff_band <= 0.0 {
            return Err(CalculationError::RateData(format!(
                "tariff band for {} must be positive",
                year
            )));
        }
    }
    Ok(tables)
}

/// Load rate overrides from a file
pub fn load_rate_overrides(path: &Path) -> EngineResult<BTreeMap<TaxYear, RateTable>> {
    let json = fs::read_to_string(path).map_err(|e| {
        CalculationError::RateData(format!("cannot read {}: {}", path.display(), e))
    })?;
    let tables = parse_rate_overrides(&json)?;
    log::debug!("loaded {} rate table override(s) from {}", tables.len(), path.display());
    Ok(tables)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::get_rates;

    fn override_json(taper: f64) -> String {
        let mut table = get_rates("2025_26").unwrap();
        table.taper_rate = taper;
        table.standard_allowance.single_over25 = 410.00;
        let mut map = BTreeMap::new();
        map.insert(TaxYear::Y2025_26, table);
        serde_json::to_string(&map).unwrap()
    }

    #[test]
    fn test_parse_overrides() {
        let tables = parse_rate_overrides(&override_json(0.5)).unwrap();
        let table = &tables[&TaxYear::Y2025_26];
        assert_eq!(table.standard_allowance.single_over25, 410.00);
        assert_eq!(table.taper_rate, 0.5);
    }

    #[test]
    fn test_rejects_unknown_year_key() {
        let json = override_json(0.55).replace("2025_26", "2030_31");
        let err = parse_rate_overrides(&json).unwrap_err();
        assert!(matches!(err, CalculationError::RateData(_)));
    }

    #[test]
    fn test_rejects_out_of_range_taper() {
        assert!(parse_rate_overrides(&override_json(1.5)).is_err());
    }

    #[test]
    fn test_missing_file_is_rate_data_error() {
        let err = load_rate_overrides(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, CalculationError::RateData(_)));
    }
}
