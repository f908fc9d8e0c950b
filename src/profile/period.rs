//! Conversion of amounts collected per week / month / year to monthly figures

use serde::{Deserialize, Serialize};

/// Weeks per month used for every weekly conversion in the UI
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Fortnights per month used for benefit amounts
pub const FORTNIGHTS_PER_MONTH: f64 = 2.17;

/// Period an income or expense was entered in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomePeriod {
    PerWeek,
    #[default]
    PerMonth,
    PerYear,
    /// Anything unrecognised is treated as already monthly
    #[serde(other)]
    Unknown,
}

impl IncomePeriod {
    pub fn to_monthly(&self, amount: f64) -> f64 {
        match self {
            IncomePeriod::PerWeek => amount * WEEKS_PER_MONTH,
            IncomePeriod::PerYear => amount / 12.0,
            IncomePeriod::PerMonth | IncomePeriod::Unknown => amount,
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "per_week" => IncomePeriod::PerWeek,
            "per_month" => IncomePeriod::PerMonth,
            "per_year" => IncomePeriod::PerYear,
            _ => IncomePeriod::Unknown,
        }
    }
}

/// Convert an amount entered for the UI period key (`per_week`, `per_month`,
/// `per_year`) to a monthly amount
pub fn convert_to_monthly(amount: f64, period: &str) -> f64 {
    IncomePeriod::from_key(period).to_monthly(amount)
}

/// Period another benefit is paid in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitPeriod {
    Weekly,
    Fortnightly,
    #[default]
    Monthly,
    Yearly,
    #[serde(other)]
    Unknown,
}

impl BenefitPeriod {
    pub fn to_monthly(&self, amount: f64) -> f64 {
        match self {
            BenefitPeriod::Weekly => amount * WEEKS_PER_MONTH,
            BenefitPeriod::Fortnightly => amount * FORTNIGHTS_PER_MONTH,
            BenefitPeriod::Yearly => amount / 12.0,
            BenefitPeriod::Monthly | BenefitPeriod::Unknown => amount,
        }
    }
}
