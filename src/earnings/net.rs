//! Net monthly earnings after income tax, National Insurance and pension

use serde::Serialize;

use crate::profile::PensionType;
use crate::rates::PensionThresholds;

/// Annual personal allowance
pub const PERSONAL_ALLOWANCE: f64 = 12_570.0;
/// Width of the basic-rate band above the personal allowance
pub const BASIC_RATE_BAND: f64 = 37_700.0;
pub const BASIC_RATE: f64 = 0.20;
/// Applied to everything above the basic-rate band (no additional rate)
pub const HIGHER_RATE: f64 = 0.40;

/// Monthly primary threshold for employee National Insurance
pub const NI_MONTHLY_THRESHOLD: f64 = 1_048.0;
pub const NI_RATE: f64 = 0.08;

/// Pension percentage used when the claimant gave none
pub const DEFAULT_PENSION_PERCENTAGE: f64 = 3.0;

/// Deductions taken from one month's gross pay
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetEarningsBreakdown {
    pub gross: f64,
    pub income_tax: f64,
    pub national_insurance: f64,
    pub pension_contribution: f64,
    pub net: f64,
}

/// Income tax for a month, computed on the annualised gross
pub fn monthly_income_tax(monthly_gross: f64) -> f64 {
    let taxable = (monthly_gross * 12.0 - PERSONAL_ALLOWANCE).max(0.0);
    let basic = taxable.min(BASIC_RATE_BAND) * BASIC_RATE;
    let higher = (taxable - BASIC_RATE_BAND).max(0.0) * HIGHER_RATE;
    (basic + higher) / 12.0
}

/// Employee National Insurance for a month (no upper threshold)
pub fn monthly_national_insurance(monthly_gross: f64) -> f64 {
    (monthly_gross - NI_MONTHLY_THRESHOLD).max(0.0) * NI_RATE
}

/// Monthly pension contribution.
///
/// Nothing is paid when annual earnings are at or below the lower earnings
/// limit. A fixed amount passes through unchanged; a percentage applies
/// only to qualifying earnings between the lower and upper limits.
pub fn calculate_pension_contribution(
    monthly_gross: f64,
    pension_type: PensionType,
    pension_amount: f64,
    pension_percentage: f64,
    thresholds: &PensionThresholds,
) -> f64 {
    let annual = monthly_gross * 12.0;
    if annual <= thresholds.lower_earnings_limit {
        return 0.0;
    }

    match pension_type {
        PensionType::Amount => pension_amount,
        PensionType::Percentage => {
            let qualifying_annual =
                annual.min(thresholds.upper_earnings_limit) - thresholds.lower_earnings_limit;
            qualifying_annual / 12.0 * pension_percentage / 100.0
        }
    }
}

/// Full deduction breakdown for one month's gross pay
pub fn net_earnings_breakdown(
    monthly_gross: f64,
    pension_type: PensionType,
    pension_amount: f64,
    pension_percentage: Option<f64>,
    thresholds: &PensionThresholds,
) -> NetEarningsBreakdown {
    let income_tax = monthly_income_tax(monthly_gross);
    let national_insurance = monthly_national_insurance(monthly_gross);

    let pension_contribution = if pension_type == PensionType::Amount && pension_amount > 0.0 {
        pension_amount
    } else {
        calculate_pension_contribution(
            monthly_gross,
            PensionType::Percentage,
            0.0,
            pension_percentage.unwrap_or(DEFAULT_PENSION_PERCENTAGE),
            thresholds,
        )
    };

    let net = (monthly_gross - income_tax - national_insurance - pension_contribution).max(0.0);

    NetEarningsBreakdown {
        gross: monthly_gross,
        income_tax,
        national_insurance,
        pension_contribution,
        net,
    }
}

/// Net monthly earnings for an employee
pub fn calculate_proper_net_earnings(
    monthly_gross: f64,
    pension_type: PensionType,
    pension_amount: f64,
    pension_percentage: Option<f64>,
    thresholds: &PensionThresholds,
) -> f64 {
    net_earnings_breakdown(
        monthly_gross,
        pension_type,
        pension_amount,
        pension_percentage,
        thresholds,
    )
    .net
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn thresholds() -> PensionThresholds {
        PensionThresholds {
            lower_earnings_limit: 6_240.0,
            upper_earnings_limit: 50_270.0,
        }
    }

    #[test]
    fn test_income_tax_bands() {
        assert_eq!(monthly_income_tax(1_000.0), 0.0);
        // 24,000 a year: (24,000 - 12,570) * 20% / 12
        assert_abs_diff_eq!(monthly_income_tax(2_000.0), 190.5, epsilon = 1e-9);
        // 60,000 a year: 37,700 * 20% + 9,730 * 40%
        assert_abs_diff_eq!(
            monthly_income_tax(5_000.0),
            (7_540.0 + 3_892.0) / 12.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_national_insurance() {
        assert_eq!(monthly_national_insurance(1_000.0), 0.0);
        assert_abs_diff_eq!(monthly_national_insurance(2_048.0), 80.0, epsilon = 1e-9);
    }

    #[test]
    fn test_pension_zero_below_lower_limit() {
        let t = thresholds();
        assert_eq!(calculate_pension_contribution(500.0, PensionType::Percentage, 0.0, 5.0, &t), 0.0);
        assert_eq!(calculate_pension_contribution(520.0, PensionType::Amount, 50.0, 0.0, &t), 0.0);
    }

    #[test]
    fn test_pension_percentage_on_qualifying_band() {
        let t = thresholds();
        // 24,000 a year: (24,000 - 6,240) / 12 * 5%
        assert_abs_diff_eq!(
            calculate_pension_contribution(2_000.0, PensionType::Percentage, 0.0, 5.0, &t),
            74.0,
            epsilon = 1e-9
        );
        // Above the upper limit the band is capped at 44,030
        assert_abs_diff_eq!(
            calculate_pension_contribution(6_000.0, PensionType::Percentage, 0.0, 5.0, &t),
            44_030.0 / 12.0 * 0.05,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_pension_amount_not_banded() {
        let t = thresholds();
        assert_eq!(calculate_pension_contribution(6_000.0, PensionType::Amount, 400.0, 0.0, &t), 400.0);
    }

    #[test]
    fn test_net_earnings_default_three_percent() {
        let t = thresholds();
        let breakdown = net_earnings_breakdown(2_000.0, PensionType::Percentage, 0.0, None, &t);
        assert_abs_diff_eq!(breakdown.income_tax, 190.5, epsilon = 1e-9);
        assert_abs_diff_eq!(breakdown.national_insurance, 76.16, epsilon = 1e-9);
        assert_abs_diff_eq!(breakdown.pension_contribution, 44.4, epsilon = 1e-9);
        assert_abs_diff_eq!(breakdown.net, 2_000.0 - 190.5 - 76.16 - 44.4, epsilon = 1e-9);
    }

    #[test]
    fn test_net_earnings_zero_amount_falls_back_to_percentage() {
        let t = thresholds();
        let with_amount = calculate_proper_net_earnings(2_000.0, PensionType::Amount, 100.0, None, &t);
        let zero_amount = calculate_proper_net_earnings(2_000.0, PensionType::Amount, 0.0, Some(5.0), &t);

        assert_abs_diff_eq!(with_amount, 2_000.0 - 190.5 - 76.16 - 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(zero_amount, 2_000.0 - 190.5 - 76.16 - 74.0, epsilon = 1e-9);
    }

    #[test]
    fn test_net_earnings_never_negative() {
        let t = thresholds();
        assert_eq!(calculate_proper_net_earnings(600.0, PensionType::Amount, 5_000.0, None, &t), 0.0);
        assert_eq!(calculate_proper_net_earnings(0.0, PensionType::Percentage, 0.0, None, &t), 0.0);
    }
}
