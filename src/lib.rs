//! Benefits Engine - UK Universal Credit entitlement calculator
//!
//! This library provides:
//! - Tax-year rate tables (built-in, with JSON overrides)
//! - Claimant profile model and loading
//! - LHA lookup and bedroom entitlement
//! - Net earnings and minimum income floor
//! - Universal Credit elements, deductions and the final monthly award
//! - Child Benefit estimates and batch scenario runs

pub mod error;
pub mod rates;
pub mod profile;
pub mod housing;
pub mod earnings;
pub mod calculator;
pub mod child_benefit;
pub mod scenario;

// Re-export commonly used types
pub use error::{CalculationError, EngineResult};
pub use rates::{get_rates, RateTable, RateTables, TaxYear};
pub use profile::ClaimantProfile;
pub use housing::{calculate_bedroom_entitlement, LhaService};
pub use earnings::calculate_proper_net_earnings;
pub use calculator::{CalculationResult, UniversalCreditAssessment, UniversalCreditCalculator};
pub use child_benefit::{ChildBenefitCalculator, ChildBenefitResult};
pub use scenario::{HouseholdSummary, ScenarioRunner};
