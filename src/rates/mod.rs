//! Per-tax-year rate tables for Universal Credit and Child Benefit

mod tables;
pub mod loader;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{CalculationError, EngineResult};

/// Supported tax years (6 April to 5 April)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaxYear {
    #[serde(rename = "2023_24")]
    Y2023_24,
    #[serde(rename = "2024_25")]
    Y2024_25,
    #[serde(rename = "2025_26")]
    Y2025_26,
}

impl TaxYear {
    pub const ALL: [TaxYear; 3] = [TaxYear::Y2023_24, TaxYear::Y2024_25, TaxYear::Y2025_26];

    /// Key used by the UI and in rate files
    pub fn as_str(&self) -> &'static str {
        match self {
            TaxYear::Y2023_24 => "2023_24",
            TaxYear::Y2024_25 => "2024_25",
            TaxYear::Y2025_26 => "2025_26",
        }
    }
}

impl fmt::Display for TaxYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaxYear {
    type Err = CalculationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TaxYear::ALL
            .iter()
            .copied()
            .find(|year| year.as_str() == s.trim())
            .ok_or_else(|| CalculationError::UnsupportedTaxYear(s.to_string()))
    }
}

/// Monthly standard allowance by household type and age band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardAllowanceRates {
    pub single_under25: f64,
    pub single_over25: f64,
    pub couple_under25: f64,
    pub couple_over25: f64,
}

/// Monthly child element, split at the two-child limit (6 April 2017)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildElementRates {
    pub pre_two_child_limit: f64,
    pub post_two_child_limit: f64,
}

/// Monthly disabled child add-on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisabledChildRates {
    pub lower: f64,
    pub higher: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildcareRates {
    /// Share of childcare costs reimbursed
    pub percentage: f64,
    pub max_one_child: f64,
    pub max_two_or_more: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkAllowanceRates {
    pub with_housing: f64,
    pub without_housing: f64,
}

/// Capital limits and tariff income bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalRules {
    pub lower_limit: f64,
    pub upper_limit: f64,
    pub tariff_band: f64,
    pub tariff_per_band: f64,
}

/// Annual qualifying-earnings band for workplace pension contributions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PensionThresholds {
    pub lower_earnings_limit: f64,
    pub upper_earnings_limit: f64,
}

/// Weekly LHA amounts by bedroom band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LhaRates {
    pub shared_rate: f64,
    pub one_bed_rate: f64,
    pub two_bed_rate: f64,
    pub three_bed_rate: f64,
    pub four_bed_rate: f64,
}

impl LhaRates {
    /// Weekly rate for a bedroom entitlement; 0 is the shared band and
    /// anything above four collapses to the four-bed band.
    pub fn for_bedrooms(&self, bedrooms: u32) -> f64 {
        match bedrooms {
            0 => self.shared_rate,
            1 => self.one_bed_rate,
            2 => self.two_bed_rate,
            3 => self.three_bed_rate,
            _ => self.four_bed_rate,
        }
    }
}

/// Hourly National Minimum / Living Wage bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimumWageRates {
    /// Age 21 and over
    pub adult: f64,
    pub age18_to20: f64,
    pub under18: f64,
    pub apprentice: f64,
}

impl MinimumWageRates {
    /// Hourly rate selected by age alone (apprentice rate is never chosen here)
    pub fn for_age(&self, age: u32) -> f64 {
        if age >= 21 {
            self.adult
        } else if age >= 18 {
            self.age18_to20
        } else {
            self.under18
        }
    }
}

/// Weekly Child Benefit rates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildBenefitRates {
    pub eldest: f64,
    pub additional: f64,
}

/// Every constant the calculators read for one tax year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateTable {
    pub standard_allowance: StandardAllowanceRates,
    pub child_element: ChildElementRates,
    pub disabled_child: DisabledChildRates,
    pub childcare: ChildcareRates,
    pub work_allowance: WorkAllowanceRates,
    pub taper_rate: f64,
    pub carer_element: f64,
    pub lcwra_element: f64,
    pub capital: CapitalRules,
    pub pension: PensionThresholds,
    pub lha_fallback: LhaRates,
    pub minimum_wage: MinimumWageRates,
    pub child_benefit: ChildBenefitRates,
}

/// Read-only map of rate tables keyed by tax year
#[derive(Debug, Clone)]
pub struct RateTables {
    tables: BTreeMap<TaxYear, RateTable>,
}

impl RateTables {
    /// Tables compiled into the crate
    pub fn builtin() -> Self {
        let tables = TaxYear::ALL
            .iter()
            .map(|&year| (year, tables::for_year(year)))
            .collect();
        Self { tables }
    }

    /// Built-in tables with any years present in the JSON file replaced
    pub fn from_json_path(path: &Path) -> EngineResult<Self> {
        let mut rates = Self::builtin();
        for (year, table) in loader::load_rate_overrides(path)? {
            rates.tables.insert(year, table);
        }
        Ok(rates)
    }

    pub fn get(&self, year: TaxYear) -> EngineResult<&RateTable> {
        self.tables
            .get(&year)
            .ok_or_else(|| CalculationError::UnsupportedTaxYear(year.to_string()))
    }

    /// Look up by the UI's tax-year key, e.g. `"2025_26"`
    pub fn get_by_key(&self, key: &str) -> EngineResult<&RateTable> {
        self.get(key.parse()?)
    }

    pub fn years(&self) -> impl Iterator<Item = TaxYear> + '_ {
        self.tables.keys().copied()
    }
}

impl Default for RateTables {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Built-in rate table for a tax-year key
pub fn get_rates(tax_year: &str) -> EngineResult<RateTable> {
    let year: TaxYear = tax_year.parse()?;
    Ok(tables::for_year(year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_year_parsing() {
        assert_eq!("2025_26".parse::<TaxYear>().unwrap(), TaxYear::Y2025_26);
        assert_eq!(" 2023_24 ".parse::<TaxYear>().unwrap(), TaxYear::Y2023_24);

        let err = "2019_20".parse::<TaxYear>().unwrap_err();
        assert!(matches!(err, CalculationError::UnsupportedTaxYear(ref y) if y == "2019_20"));
    }

    #[test]
    fn test_get_rates_unsupported_year_fails() {
        assert!(get_rates("2026_27").is_err());
        assert!(get_rates("").is_err());
    }

    #[test]
    fn test_builtin_tables_cover_every_year() {
        let rates = RateTables::builtin();
        assert_eq!(rates.years().count(), 3);

        let table = rates.get_by_key("2025_26").unwrap();
        assert_eq!(table.standard_allowance.single_over25, 400.14);
        assert_eq!(table.standard_allowance.couple_over25, 628.10);
        assert_eq!(table.child_element.pre_two_child_limit, 339.00);
        assert_eq!(table.child_element.post_two_child_limit, 292.81);
        assert_eq!(table.taper_rate, 0.55);
    }

    #[test]
    fn test_taper_and_capital_constant_across_years() {
        let rates = RateTables::builtin();
        for year in TaxYear::ALL {
            let table = rates.get(year).unwrap();
            assert_eq!(table.taper_rate, 0.55);
            assert_eq!(table.capital.lower_limit, 6_000.0);
            assert_eq!(table.capital.upper_limit, 16_000.0);
            assert_eq!(table.capital.tariff_per_band, 4.35);
            assert_eq!(table.pension.lower_earnings_limit, 6_240.0);
            assert_eq!(table.pension.upper_earnings_limit, 50_270.0);
        }
    }

    #[test]
    fn test_lha_band_collapse() {
        let rates = get_rates("2024_25").unwrap().lha_fallback;
        assert_eq!(rates.for_bedrooms(0), rates.shared_rate);
        assert_eq!(rates.for_bedrooms(3), rates.three_bed_rate);
        assert_eq!(rates.for_bedrooms(4), rates.four_bed_rate);
        assert_eq!(rates.for_bedrooms(9), rates.four_bed_rate);
    }

    #[test]
    fn test_minimum_wage_age_bands() {
        let wage = get_rates("2025_26").unwrap().minimum_wage;
        assert_eq!(wage.for_age(21), wage.adult);
        assert_eq!(wage.for_age(20), wage.age18_to20);
        assert_eq!(wage.for_age(18), wage.age18_to20);
        assert_eq!(wage.for_age(17), wage.under18);
    }
}
