//! Universal Credit calculation engine

use chrono::{DateTime, Utc};

use super::elements;
use super::result::{
    AdultMinimumIncomeFloor, CalculationBreakdown, CalculationResult, UniversalCreditAssessment,
};
use crate::earnings::{calculate_minimum_income_floor, calculate_pension_contribution};
use crate::error::EngineResult;
use crate::housing::LhaService;
use crate::profile::{ClaimantProfile, PensionType, WorkHours};
use crate::rates::{RateTable, RateTables, TaxYear};

/// Stateless calculator over read-only rate data
#[derive(Debug, Clone, Default)]
pub struct UniversalCreditCalculator {
    rates: RateTables,
    lha: LhaService,
}

impl UniversalCreditCalculator {
    pub fn new(rates: RateTables, lha: LhaService) -> Self {
        Self { rates, lha }
    }

    /// Calculator using the rate tables and LHA data compiled into the crate
    pub fn builtin() -> Self {
        Self::new(RateTables::builtin(), LhaService::builtin())
    }

    /// Calculate as of now
    pub fn calculate(&self, profile: &ClaimantProfile) -> CalculationResult {
        self.calculate_at(profile, Utc::now())
    }

    /// Calculate as of a fixed instant; failures become a `Failure` result
    pub fn calculate_at(&self, profile: &ClaimantProfile, now: DateTime<Utc>) -> CalculationResult {
        let result = self.try_calculate_at(profile, now);
        if let Err(err) = &result {
            log::warn!("calculation failed: {}", err);
        }
        result.into()
    }

    /// Calculate as of a fixed instant, returning the error to Rust callers
    pub fn try_calculate_at(
        &self,
        profile: &ClaimantProfile,
        now: DateTime<Utc>,
    ) -> EngineResult<UniversalCreditAssessment> {
        let tax_year: TaxYear = profile.tax_year.parse()?;
        let rates = self.rates.get(tax_year)?;
        profile.validate()?;

        let calculation = self.breakdown(profile, rates, now);
        let warnings = elements::warnings(profile);
        for warning in &warnings {
            log::warn!("{}", warning);
        }

        log::info!(
            "{} assessment: final amount {:.2}",
            tax_year,
            calculation.final_amount
        );

        Ok(UniversalCreditAssessment {
            tax_year,
            calculation,
            warnings,
            calculated_at: now,
        })
    }

    fn breakdown(
        &self,
        profile: &ClaimantProfile,
        rates: &RateTable,
        now: DateTime<Utc>,
    ) -> CalculationBreakdown {
        let today = now.date_naive();

        let standard_allowance = elements::standard_allowance(profile, rates);
        let housing = elements::housing_element(profile, rates, &self.lha);
        let child_element = elements::child_element(&profile.children, rates, today);
        let childcare_element = elements::childcare_element(&profile.children, rates);
        let carer_element = elements::carer_element(profile, rates);
        let lcwra_element = elements::lcwra_element(profile, rates);

        let total_elements = standard_allowance
            + housing.amount
            + child_element
            + childcare_element
            + carer_element
            + lcwra_element;

        log::debug!(
            "elements: standard {:.2}, housing {:.2}, child {:.2}, childcare {:.2}, carer {:.2}, lcwra {:.2}",
            standard_allowance,
            housing.amount,
            child_element,
            childcare_element,
            carer_element,
            lcwra_element
        );

        let work_allowance = elements::work_allowance(profile, rates);
        let earnings_reduction = elements::earnings_reduction(profile, rates, work_allowance);
        let (capital_deduction, capital_deduction_details) =
            elements::capital_deduction(profile.savings, total_elements, &rates.capital);
        let benefit_deduction = elements::benefit_deduction(profile);

        log::debug!(
            "deductions: work allowance {:.2}, earnings {:.2}, capital {:.2}, benefits {:.2}",
            work_allowance,
            earnings_reduction,
            capital_deduction,
            benefit_deduction
        );

        let final_amount =
            (total_elements - earnings_reduction - capital_deduction - benefit_deduction).max(0.0);

        CalculationBreakdown {
            standard_allowance,
            housing_element: housing.amount,
            child_element,
            childcare_element,
            carer_element,
            lcwra_element,
            total_elements,
            work_allowance,
            earnings_reduction,
            capital_deduction,
            capital_deduction_details,
            benefit_deduction,
            final_amount,
            lha_details: housing.lha_details,
            minimum_income_floor: minimum_income_floors(profile, rates),
        }
    }

    /// Pension contribution preview for a tax year, for use while the
    /// pension fields are still being collected
    pub fn pension_contribution_preview(
        &self,
        tax_year: &str,
        monthly_gross: f64,
        pension_type: PensionType,
        pension_amount: f64,
        pension_percentage: f64,
    ) -> EngineResult<f64> {
        let rates = self.rates.get_by_key(tax_year)?;
        Ok(calculate_pension_contribution(
            monthly_gross,
            pension_type,
            pension_amount,
            pension_percentage,
            &rates.pension,
        ))
    }
}

/// Advisory floor for each self-employed adult with expected hours; not
/// applied to the earnings reduction
fn minimum_income_floors(
    profile: &ClaimantProfile,
    rates: &RateTable,
) -> Vec<AdultMinimumIncomeFloor> {
    profile
        .adults()
        .iter()
        .filter(|(_, adult)| {
            adult.employment.is_self_employed() && adult.employment.work_hours != WorkHours::None
        })
        .map(|(role, adult)| AdultMinimumIncomeFloor {
            adult: *role,
            floor: calculate_minimum_income_floor(
                adult.employment.work_hours,
                adult.age,
                adult.employment.monthly_earnings,
                &rates.minimum_wage,
            ),
        })
        .collect()
}
