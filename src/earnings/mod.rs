//! Earnings derivations: net pay, pension contributions, minimum income floor

mod mif;
mod net;

pub use mif::{
    calculate_minimum_income_floor, calculate_uc_earnings_threshold, minimum_wage_for_age,
    MinimumIncomeFloor,
};
pub use net::{
    calculate_pension_contribution, calculate_proper_net_earnings, monthly_income_tax,
    monthly_national_insurance, net_earnings_breakdown, NetEarningsBreakdown,
    DEFAULT_PENSION_PERCENTAGE, NI_MONTHLY_THRESHOLD, PERSONAL_ALLOWANCE,
};
