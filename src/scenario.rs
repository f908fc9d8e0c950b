//! Scenario runner for batch assessments
//!
//! Loads rate tables and LHA data once and shares them read-only across
//! every profile, so a batch can be fanned out over rayon's thread pool.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use serde::Serialize;

use crate::calculator::{CalculationResult, UniversalCreditCalculator};
use crate::child_benefit::{ChildBenefitCalculator, ChildBenefitResult};
use crate::housing::LhaService;
use crate::profile::ClaimantProfile;
use crate::rates::RateTables;

/// Universal Credit plus optional Child Benefit for one household
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdSummary {
    pub universal_credit: CalculationResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub child_benefit: Option<ChildBenefitResult>,
    /// UC final amount (0 on failure) plus monthly Child Benefit
    pub total_monthly: f64,
}

/// Pre-loaded runner for single and batch assessments
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let results = runner.run_batch_parallel(&profiles, Utc::now());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    calculator: UniversalCreditCalculator,
    child_benefit: ChildBenefitCalculator,
    include_child_benefit: bool,
}

impl ScenarioRunner {
    /// Runner over the built-in rate tables and LHA data
    pub fn new() -> Self {
        Self::with_data(RateTables::builtin(), LhaService::builtin())
    }

    pub fn with_data(rates: RateTables, lha: LhaService) -> Self {
        Self {
            child_benefit: ChildBenefitCalculator::new(rates.clone()),
            calculator: UniversalCreditCalculator::new(rates, lha),
            include_child_benefit: false,
        }
    }

    /// Add a Child Benefit estimate to every summary
    pub fn with_child_benefit(mut self, include: bool) -> Self {
        self.include_child_benefit = include;
        self
    }

    pub fn run(&self, profile: &ClaimantProfile, now: DateTime<Utc>) -> HouseholdSummary {
        let universal_credit = self.calculator.calculate_at(profile, now);

        let child_benefit = if self.include_child_benefit {
            match self
                .child_benefit
                .calculate_child_benefit(profile, &profile.tax_year)
            {
                Ok(result) => Some(result),
                Err(err) => {
                    log::warn!("child benefit skipped: {}", err);
                    None
                }
            }
        } else {
            None
        };

        let total_monthly = universal_credit.final_amount()
            + child_benefit.as_ref().map_or(0.0, |cb| cb.monthly_amount);

        HouseholdSummary {
            universal_credit,
            child_benefit,
            total_monthly,
        }
    }

    pub fn run_batch(&self, profiles: &[ClaimantProfile], now: DateTime<Utc>) -> Vec<HouseholdSummary> {
        profiles.iter().map(|p| self.run(p, now)).collect()
    }

    /// Same output as `run_batch`, in input order
    pub fn run_batch_parallel(
        &self,
        profiles: &[ClaimantProfile],
        now: DateTime<Utc>,
    ) -> Vec<HouseholdSummary> {
        log::info!("running {} profiles in parallel", profiles.len());
        profiles.par_iter().map(|p| self.run(p, now)).collect()
    }
}
