//! Claimant profile data structures and loading

mod data;
mod period;
pub mod loader;

pub use data::{
    AdultDetails, AdultRole, AttendanceAllowanceRate, BusinessAccounts, BusinessExpense,
    ChildDisability, ChildGender, ChildrenDetails, Circumstances, ClaimantProfile,
    DisabilityBenefitType, DisabilityDetails, DisabledChildLevel, DlaCareRate, DlaMobilityRate,
    EmploymentDetails, EmploymentType, ExpenseCategory, HousingDetails, HousingStatus,
    LcwraStatus, PensionType, PipRate, TenantType, WorkHours, DEFAULT_AGE, MAX_CHILD_AGE,
};
pub use period::{
    convert_to_monthly, BenefitPeriod, IncomePeriod, FORTNIGHTS_PER_MONTH, WEEKS_PER_MONTH,
};
pub use loader::{load_profile, load_profile_from_reader, load_profiles, load_profiles_from_reader};
