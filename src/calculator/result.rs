//! Output structures for a Universal Credit calculation

use chrono::{DateTime, Utc};
use serde::ser::Serializer;
use serde::Serialize;

use crate::earnings::MinimumIncomeFloor;
use crate::error::EngineResult;
use crate::profile::AdultRole;
use crate::rates::{LhaRates, TaxYear};

/// How the private-rent housing element was capped
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LhaDetails {
    pub bedroom_entitlement: u32,
    pub brma: Option<String>,
    /// The BRMA was missing or unknown and the flat fallback bands were used
    pub uses_fallback_rates: bool,
    #[serde(rename = "weeklyLHA")]
    pub weekly_lha: f64,
    #[serde(rename = "monthlyLHA")]
    pub monthly_lha: f64,
    /// Rent plus service charges
    pub actual_rent: f64,
    pub eligible_rent: f64,
    /// Rent the housing element does not cover
    pub shortfall: f64,
    pub rates: LhaRates,
}

/// Tariff income workings
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalDeductionDetails {
    pub savings: f64,
    pub lower_limit: f64,
    pub upper_limit: f64,
    /// Whole or part £250 bands above the lower limit
    pub tariff_bands: u32,
    pub tariff_income: f64,
    /// Capital over the upper limit removes the whole award
    pub exceeds_upper_limit: bool,
}

/// Advisory minimum income floor for one self-employed adult
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdultMinimumIncomeFloor {
    pub adult: AdultRole,
    #[serde(flatten)]
    pub floor: MinimumIncomeFloor,
}

/// Every element and deduction behind the final award
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationBreakdown {
    pub standard_allowance: f64,
    pub housing_element: f64,
    pub child_element: f64,
    pub childcare_element: f64,
    pub carer_element: f64,
    pub lcwra_element: f64,
    pub total_elements: f64,

    pub work_allowance: f64,
    pub earnings_reduction: f64,
    pub capital_deduction: f64,
    pub capital_deduction_details: CapitalDeductionDetails,
    pub benefit_deduction: f64,

    pub final_amount: f64,

    pub lha_details: Option<LhaDetails>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub minimum_income_floor: Vec<AdultMinimumIncomeFloor>,
}

impl CalculationBreakdown {
    pub fn total_deductions(&self) -> f64 {
        self.earnings_reduction + self.capital_deduction + self.benefit_deduction
    }
}

/// Successful assessment
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversalCreditAssessment {
    pub tax_year: TaxYear,
    pub calculation: CalculationBreakdown,
    pub warnings: Vec<String>,
    pub calculated_at: DateTime<Utc>,
}

/// Outcome handed back to the UI; never an error type
#[derive(Debug, Clone, PartialEq)]
pub enum CalculationResult {
    Success(UniversalCreditAssessment),
    Failure { errors: Vec<String> },
}

impl CalculationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CalculationResult::Success(_))
    }

    pub fn assessment(&self) -> Option<&UniversalCreditAssessment> {
        match self {
            CalculationResult::Success(assessment) => Some(assessment),
            CalculationResult::Failure { .. } => None,
        }
    }

    /// Final monthly award, 0 when the calculation failed
    pub fn final_amount(&self) -> f64 {
        self.assessment()
            .map_or(0.0, |a| a.calculation.final_amount)
    }

    pub fn errors(&self) -> &[String] {
        match self {
            CalculationResult::Success(_) => &[],
            CalculationResult::Failure { errors } => errors,
        }
    }
}

impl From<EngineResult<UniversalCreditAssessment>> for CalculationResult {
    fn from(result: EngineResult<UniversalCreditAssessment>) -> Self {
        match result {
            Ok(assessment) => CalculationResult::Success(assessment),
            Err(err) => CalculationResult::Failure {
                errors: vec![err.to_string()],
            },
        }
    }
}

/// Wire shape: `{success: true, ...assessment}` or `{success: false, errors}`
impl Serialize for CalculationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Wire<'a> {
            success: bool,
            #[serde(flatten)]
            assessment: Option<&'a UniversalCreditAssessment>,
            #[serde(skip_serializing_if = "Option::is_none")]
            errors: Option<&'a [String]>,
        }

        let wire = match self {
            CalculationResult::Success(assessment) => Wire {
                success: true,
                assessment: Some(assessment),
                errors: None,
            },
            CalculationResult::Failure { errors } => Wire {
                success: false,
                assessment: None,
                errors: Some(errors.as_slice()),
            },
        };
        wire.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalculationError;

    #[test]
    fn test_failure_serializes_errors_only() {
        let outcome: EngineResult<UniversalCreditAssessment> =
            Err(CalculationError::UnsupportedTaxYear("2019_20".into()));
        let result = CalculationResult::from(outcome);
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["errors"][0], "unsupported tax year: 2019_20");
        assert!(json.get("calculation").is_none());
        assert_eq!(result.final_amount(), 0.0);
    }
}
