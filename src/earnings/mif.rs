//! Minimum Income Floor for self-employed claimants
//!
//! Assumed earnings are the expected weekly hours at the minimum wage for
//! the claimant's age. The figure is advisory: the Universal Credit
//! calculator reports it but still tapers actual earnings.

use serde::Serialize;

use crate::profile::WorkHours;
use crate::rates::MinimumWageRates;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimumIncomeFloor {
    pub uc_earnings_threshold: f64,
    pub income_used_for_uc: f64,
    pub mif_applies: bool,
    pub shortfall: f64,
}

/// Hourly minimum wage for an age (apprentice rate is never selected)
pub fn minimum_wage_for_age(age: u32, wages: &MinimumWageRates) -> f64 {
    wages.for_age(age)
}

/// Monthly earnings threshold for the expected work hours
pub fn calculate_uc_earnings_threshold(
    work_hours: WorkHours,
    age: u32,
    wages: &MinimumWageRates,
) -> f64 {
    if work_hours == WorkHours::None {
        return 0.0;
    }
    let weekly = work_hours.hours() as f64 * minimum_wage_for_age(age, wages);
    weekly * 52.0 / 12.0
}

/// Compare the threshold with actual monthly earnings
pub fn calculate_minimum_income_floor(
    work_hours: WorkHours,
    age: u32,
    actual_earnings: f64,
    wages: &MinimumWageRates,
) -> MinimumIncomeFloor {
    let threshold = calculate_uc_earnings_threshold(work_hours, age, wages);
    MinimumIncomeFloor {
        uc_earnings_threshold: threshold,
        income_used_for_uc: threshold.max(actual_earnings),
        mif_applies: threshold > actual_earnings,
        shortfall: (threshold - actual_earnings).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn wages() -> MinimumWageRates {
        MinimumWageRates {
            adult: 12.21,
            age18_to20: 10.00,
            under18: 7.55,
            apprentice: 7.55,
        }
    }

    #[test]
    fn test_zero_hours_has_no_threshold() {
        assert_eq!(calculate_uc_earnings_threshold(WorkHours::None, 30, &wages()), 0.0);
    }

    #[test]
    fn test_threshold_by_age_band() {
        let w = wages();
        assert_abs_diff_eq!(
            calculate_uc_earnings_threshold(WorkHours::ThirtyFive, 30, &w),
            35.0 * 12.21 * 52.0 / 12.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            calculate_uc_earnings_threshold(WorkHours::Sixteen, 19, &w),
            16.0 * 10.00 * 52.0 / 12.0,
            epsilon = 1e-9
        );
        assert_abs_diff_eq!(
            calculate_uc_earnings_threshold(WorkHours::Sixteen, 17, &w),
            16.0 * 7.55 * 52.0 / 12.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_floor_applies_when_earnings_below_threshold() {
        let mif = calculate_minimum_income_floor(WorkHours::ThirtyFive, 40, 800.0, &wages());
        let threshold = 35.0 * 12.21 * 52.0 / 12.0;

        assert!(mif.mif_applies);
        assert_abs_diff_eq!(mif.uc_earnings_threshold, threshold, epsilon = 1e-9);
        assert_abs_diff_eq!(mif.income_used_for_uc, threshold, epsilon = 1e-9);
        assert_abs_diff_eq!(mif.shortfall, threshold - 800.0, epsilon = 1e-9);
    }

    #[test]
    fn test_floor_does_not_apply_above_threshold() {
        let mif = calculate_minimum_income_floor(WorkHours::Sixteen, 40, 3_000.0, &wages());
        assert!(!mif.mif_applies);
        assert_eq!(mif.income_used_for_uc, 3_000.0);
        assert_eq!(mif.shortfall, 0.0);
    }
}
