//! Child Benefit and the High Income Child Benefit Charge advisory
//!
//! Child Benefit is not means-tested and is never folded into the
//! Universal Credit totals; `scenario::HouseholdSummary` adds the two for
//! display.

use serde::Serialize;

use crate::error::EngineResult;
use crate::profile::{AdultDetails, ClaimantProfile, EmploymentType, WEEKS_PER_MONTH};
use crate::rates::{ChildBenefitRates, RateTables};

/// Yearly income where the charge starts
pub const PARTIAL_CHARGE_THRESHOLD: f64 = 60_000.0;
/// Yearly income where the charge equals the whole benefit
pub const FULL_CHARGE_THRESHOLD: f64 = 80_000.0;
/// Income above the lower threshold per 1% of charge
const CHARGE_STEP: f64 = 200.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildBenefitRateType {
    Eldest,
    Additional,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildBenefitLine {
    /// 1 for the eldest child
    pub child: u32,
    pub rate_type: ChildBenefitRateType,
    pub weekly_amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildBenefitResult {
    pub weekly_amount: f64,
    pub monthly_amount: f64,
    pub yearly_amount: f64,
    pub breakdown: Vec<ChildBenefitLine>,
    pub total_children: u32,
    pub high_income_charge_message: Option<String>,
}

/// Yearly earnings estimate for one adult
pub fn estimated_yearly_earnings(adult: &AdultDetails) -> f64 {
    let employment = &adult.employment;
    match employment.employment_type {
        EmploymentType::NotWorking => 0.0,
        EmploymentType::Employed => employment.monthly_earnings * 12.0,
        EmploymentType::SelfEmployed => match &employment.business_accounts {
            Some(accounts) => accounts.yearly_profit().max(0.0),
            None => employment.monthly_earnings * 12.0,
        },
    }
}

/// Advisory text for the charge; `None` below the threshold
pub fn high_income_charge_message(yearly_income: f64) -> Option<String> {
    if yearly_income >= FULL_CHARGE_THRESHOLD {
        Some(format!(
            "Estimated income of £{:.0} is £80,000 or more: the High Income Child Benefit Charge \
             will equal all of your Child Benefit. You can still claim to protect your National \
             Insurance record and opt out of payments.",
            yearly_income
        ))
    } else if yearly_income >= PARTIAL_CHARGE_THRESHOLD {
        let percent = ((yearly_income - PARTIAL_CHARGE_THRESHOLD) / CHARGE_STEP).floor();
        Some(format!(
            "Estimated income of £{:.0} is over £60,000: you may have to pay a High Income Child \
             Benefit Charge of about {:.0}% of your Child Benefit.",
            yearly_income, percent
        ))
    } else {
        None
    }
}

/// Child Benefit calculator over read-only rate tables
#[derive(Debug, Clone, Default)]
pub struct ChildBenefitCalculator {
    rates: RateTables,
}

impl ChildBenefitCalculator {
    pub fn new(rates: RateTables) -> Self {
        Self { rates }
    }

    pub fn builtin() -> Self {
        Self::new(RateTables::builtin())
    }

    pub fn get_rates(&self, tax_year: &str) -> EngineResult<&ChildBenefitRates> {
        Ok(&self.rates.get_by_key(tax_year)?.child_benefit)
    }

    /// Eldest child at the eldest rate, every other child at the additional rate
    pub fn calculate_child_benefit(
        &self,
        profile: &ClaimantProfile,
        tax_year: &str,
    ) -> EngineResult<ChildBenefitResult> {
        let rates = self.get_rates(tax_year)?;
        let total_children = profile.children.count;

        let breakdown: Vec<ChildBenefitLine> = (1..=total_children)
            .map(|child| {
                let (rate_type, weekly_amount) = if child == 1 {
                    (ChildBenefitRateType::Eldest, rates.eldest)
                } else {
                    (ChildBenefitRateType::Additional, rates.additional)
                };
                ChildBenefitLine {
                    child,
                    rate_type,
                    weekly_amount,
                }
            })
            .collect();

        let weekly_amount: f64 = breakdown.iter().map(|line| line.weekly_amount).sum();

        let high_income_charge_message = if total_children > 0 {
            let highest_earnings = profile
                .adults()
                .iter()
                .map(|(_, adult)| estimated_yearly_earnings(adult))
                .fold(0.0, f64::max);
            high_income_charge_message(highest_earnings)
        } else {
            None
        };

        log::debug!(
            "child benefit for {} child(ren): {:.2} a week",
            total_children,
            weekly_amount
        );

        Ok(ChildBenefitResult {
            weekly_amount,
            monthly_amount: weekly_amount * WEEKS_PER_MONTH,
            yearly_amount: weekly_amount * 52.0,
            breakdown,
            total_children,
            high_income_charge_message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{BusinessAccounts, BusinessExpense, Circumstances, ExpenseCategory, IncomePeriod};
    use approx::assert_abs_diff_eq;

    fn profile_with_children(count: u32) -> ClaimantProfile {
        let mut profile = ClaimantProfile::new("2025_26");
        profile.children.count = count;
        profile
    }

    #[test]
    fn test_no_children() {
        let result = ChildBenefitCalculator::builtin()
            .calculate_child_benefit(&profile_with_children(0), "2025_26")
            .unwrap();
        assert_eq!(result.weekly_amount, 0.0);
        assert!(result.breakdown.is_empty());
        assert!(result.high_income_charge_message.is_none());
    }

    #[test]
    fn test_two_tier_schedule() {
        let result = ChildBenefitCalculator::builtin()
            .calculate_child_benefit(&profile_with_children(3), "2025_26")
            .unwrap();

        assert_eq!(result.total_children, 3);
        assert_eq!(result.breakdown[0].rate_type, ChildBenefitRateType::Eldest);
        assert_eq!(result.breakdown[2].rate_type, ChildBenefitRateType::Additional);

        let weekly = 26.05 + 2.0 * 17.25;
        assert_abs_diff_eq!(result.weekly_amount, weekly, epsilon = 1e-9);
        assert_abs_diff_eq!(result.monthly_amount, weekly * 4.33, epsilon = 1e-9);
        assert_abs_diff_eq!(result.yearly_amount, weekly * 52.0, epsilon = 1e-9);
    }

    #[test]
    fn test_rates_vary_by_year() {
        let calc = ChildBenefitCalculator::builtin();
        assert_eq!(calc.get_rates("2023_24").unwrap().eldest, 24.00);
        assert_eq!(calc.get_rates("2024_25").unwrap().additional, 16.95);
        assert!(calc.get_rates("2022_23").is_err());
    }

    #[test]
    fn test_charge_messages() {
        assert!(high_income_charge_message(59_999.0).is_none());

        let partial = high_income_charge_message(70_000.0).unwrap();
        assert!(partial.contains("50%"));

        assert!(high_income_charge_message(79_999.0).unwrap().contains("99%"));
        assert!(high_income_charge_message(80_000.0).unwrap().contains("all of your"));
    }

    #[test]
    fn test_charge_uses_higher_earner() {
        let mut profile = profile_with_children(1);
        profile.circumstances = Circumstances::Couple;
        profile.claimant.employment.employment_type = EmploymentType::Employed;
        profile.claimant.employment.monthly_earnings = 3_000.0;

        let mut partner = AdultDetails::default();
        partner.employment.employment_type = EmploymentType::Employed;
        partner.employment.monthly_earnings = 7_000.0;
        profile.partner = Some(partner);

        let result = ChildBenefitCalculator::builtin()
            .calculate_child_benefit(&profile, "2025_26")
            .unwrap();
        assert!(result.high_income_charge_message.unwrap().contains("all of your"));
    }

    #[test]
    fn test_self_employed_estimate_uses_accounts() {
        let mut adult = AdultDetails::default();
        adult.employment.employment_type = EmploymentType::SelfEmployed;
        adult.employment.monthly_earnings = 1_000.0;
        assert_eq!(estimated_yearly_earnings(&adult), 12_000.0);

        adult.employment.business_accounts = Some(BusinessAccounts {
            income: 1_500.0,
            income_period: IncomePeriod::PerWeek,
            expenses: vec![BusinessExpense {
                category: ExpenseCategory::Stock,
                amount: 10_000.0,
                period: IncomePeriod::PerYear,
            }],
        });
        assert_abs_diff_eq!(
            estimated_yearly_earnings(&adult),
            1_500.0 * 4.33 * 12.0 - 10_000.0,
            epsilon = 1e-6
        );
    }

    #[test]
    fn test_unsupported_year() {
        assert!(ChildBenefitCalculator::builtin()
            .calculate_child_benefit(&profile_with_children(1), "2030_31")
            .is_err());
    }
}
