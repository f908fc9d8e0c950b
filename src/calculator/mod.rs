//! Universal Credit calculator: elements, deductions and the final award

mod elements;
mod engine;
mod result;

pub use elements::{
    adult_net_earnings, benefit_deduction, capital_deduction, carer_element, child_element,
    childcare_element, earnings_reduction, housing_element, lcwra_element, standard_allowance,
    warnings, work_allowance, HousingElement,
};
pub use engine::UniversalCreditCalculator;
pub use result::{
    AdultMinimumIncomeFloor, CalculationBreakdown, CalculationResult, CapitalDeductionDetails,
    LhaDetails, UniversalCreditAssessment,
};
