//! Claimant profile records as collected by the UI
//!
//! Every monetary field is already monthly-normalised when it reaches the
//! Universal Credit calculator. Missing fields fall back to the defaults
//! documented on each field.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use super::period::{BenefitPeriod, IncomePeriod};
use crate::error::{CalculationError, EngineResult};

/// Age assumed when the UI did not supply one
pub const DEFAULT_AGE: u32 = 25;

/// Oldest child age accepted in `children.ages`
pub const MAX_CHILD_AGE: u32 = 25;

fn default_age() -> u32 {
    DEFAULT_AGE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Circumstances {
    #[default]
    Single,
    Couple,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingStatus {
    #[default]
    NoHousingCosts,
    Renting,
    Homeowner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantType {
    #[default]
    Social,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmploymentType {
    #[default]
    #[serde(rename = "not_working")]
    NotWorking,
    #[serde(rename = "employed")]
    Employed,
    #[serde(rename = "self-employed")]
    SelfEmployed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PensionType {
    Amount,
    #[default]
    Percentage,
}

/// Limited Capability for Work and Work-Related Activity status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LcwraStatus {
    #[default]
    No,
    Yes,
    /// Assessment pending; does not count for any element
    Waiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisabilityBenefitType {
    Pip,
    Dla,
    Aa,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipRate {
    Standard,
    Enhanced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DlaCareRate {
    Lowest,
    Middle,
    Highest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DlaMobilityRate {
    Lower,
    Higher,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttendanceAllowanceRate {
    Lower,
    Higher,
}

/// Weekly hours the claimant is expected to work, used by the minimum income floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum WorkHours {
    #[default]
    None,
    Sixteen,
    ThirtyFive,
}

impl WorkHours {
    pub fn hours(&self) -> u32 {
        match self {
            WorkHours::None => 0,
            WorkHours::Sixteen => 16,
            WorkHours::ThirtyFive => 35,
        }
    }
}

impl TryFrom<u32> for WorkHours {
    type Error = String;

    fn try_from(hours: u32) -> Result<Self, Self::Error> {
        match hours {
            0 => Ok(WorkHours::None),
            16 => Ok(WorkHours::Sixteen),
            35 => Ok(WorkHours::ThirtyFive),
            other => Err(format!("work hours must be 0, 16 or 35, found {}", other)),
        }
    }
}

impl From<WorkHours> for u32 {
    fn from(hours: WorkHours) -> Self {
        hours.hours()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Premises,
    Stock,
    Travel,
    Staff,
    ProfessionalFees,
    Insurance,
    Office,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessExpense {
    pub category: ExpenseCategory,
    pub amount: f64,
    #[serde(default)]
    pub period: IncomePeriod,
}

/// Itemised self-employment accounts, used only to estimate yearly earnings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BusinessAccounts {
    pub income: f64,
    pub income_period: IncomePeriod,
    pub expenses: Vec<BusinessExpense>,
}

impl BusinessAccounts {
    /// Income less every expense, each converted to a yearly figure
    pub fn yearly_profit(&self) -> f64 {
        let income = self.income_period.to_monthly(self.income) * 12.0;
        let expenses: f64 = self
            .expenses
            .iter()
            .map(|e| e.period.to_monthly(e.amount) * 12.0)
            .sum();
        income - expenses
    }
}

/// Employment and pension details for one adult
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmploymentDetails {
    pub employment_type: EmploymentType,

    /// Gross monthly earnings
    pub monthly_earnings: f64,

    pub pension_type: PensionType,

    /// Monthly pension contribution when `pension_type` is `amount`
    pub pension_amount: f64,

    /// Percentage of qualifying earnings (0-100); 3% when absent
    pub pension_percentage: Option<f64>,

    /// Net earnings typed in by the claimant; wins over everything else
    pub net_earnings_override: Option<f64>,

    /// Net earnings already computed by the UI
    pub calculated_net_earnings: Option<f64>,

    pub work_hours: WorkHours,

    pub business_accounts: Option<BusinessAccounts>,
}

impl EmploymentDetails {
    pub fn is_employed(&self) -> bool {
        self.employment_type == EmploymentType::Employed
    }

    pub fn is_self_employed(&self) -> bool {
        self.employment_type == EmploymentType::SelfEmployed
    }
}

/// Disability status and benefit claims for one adult
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DisabilityDetails {
    pub is_disabled: bool,
    pub claims_disability_benefits: bool,
    pub disability_benefit_type: Option<DisabilityBenefitType>,
    pub pip_daily_living_rate: Option<PipRate>,
    pub pip_mobility_rate: Option<PipRate>,
    pub dla_care_rate: Option<DlaCareRate>,
    pub dla_mobility_rate: Option<DlaMobilityRate>,
    pub aa_rate: Option<AttendanceAllowanceRate>,
    #[serde(rename = "hasLCWRA")]
    pub has_lcwra: LcwraStatus,
}

impl DisabilityDetails {
    pub fn has_lcwra(&self) -> bool {
        self.has_lcwra == LcwraStatus::Yes
    }

    /// A disability benefit is claimed and the benefit is named
    pub fn has_qualifying_benefit_claim(&self) -> bool {
        self.claims_disability_benefits && self.disability_benefit_type.is_some()
    }
}

/// One adult in the benefit unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdultDetails {
    #[serde(default = "default_age")]
    pub age: u32,
    pub employment: EmploymentDetails,
    pub disability: DisabilityDetails,
    pub is_carer: bool,
    /// The carer has opted to include the carer element
    pub include_carer_element: bool,
}

impl Default for AdultDetails {
    fn default() -> Self {
        Self {
            age: DEFAULT_AGE,
            employment: EmploymentDetails::default(),
            disability: DisabilityDetails::default(),
            is_carer: false,
            include_carer_element: false,
        }
    }
}

/// Which adult a per-adult figure belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdultRole {
    Claimant,
    Partner,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HousingDetails {
    pub housing_status: HousingStatus,
    pub tenant_type: TenantType,
    /// Broad rental market area; needed for private tenancies
    pub brma: Option<String>,
    /// Monthly rent
    pub rent: f64,
    /// Monthly eligible service charges
    pub service_charges: f64,
    /// Bedrooms in the home as declared
    pub bedrooms: Option<u32>,
    pub non_dependants: u32,
}

impl HousingDetails {
    pub fn is_renting(&self) -> bool {
        self.housing_status == HousingStatus::Renting
    }

    pub fn total_rent(&self) -> f64 {
        self.rent + self.service_charges
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChildGender {
    Male,
    Female,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisabledChildLevel {
    Lower,
    Higher,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChildDisability {
    pub has_disability: bool,
    #[serde(rename = "claimsDLA")]
    pub claims_dla: bool,
    pub care_rate: Option<DlaCareRate>,
    pub mobility_rate: Option<DlaMobilityRate>,
}

impl ChildDisability {
    /// Disabled child add-on this child attracts, if any
    pub fn addon_level(&self) -> Option<DisabledChildLevel> {
        if !(self.has_disability && self.claims_dla) {
            return None;
        }
        match self.care_rate {
            Some(DlaCareRate::Highest) => Some(DisabledChildLevel::Higher),
            _ => Some(DisabledChildLevel::Lower),
        }
    }
}

/// Children in the household; the per-child lists are parallel and may be
/// shorter than `count`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChildrenDetails {
    pub count: u32,
    /// Ages in years; `None` (or empty) triggers the legacy child element fallback
    pub ages: Option<Vec<u32>>,
    pub genders: Vec<ChildGender>,
    pub disabilities: Vec<ChildDisability>,
    /// Monthly childcare costs
    pub childcare_costs: f64,
}

impl ChildrenDetails {
    pub fn has_children(&self) -> bool {
        self.count > 0
    }

    /// Ages when supplied and non-empty
    pub fn known_ages(&self) -> Option<&[u32]> {
        self.ages.as_deref().filter(|ages| !ages.is_empty())
    }

    pub fn age_of(&self, index: usize) -> u32 {
        self.ages
            .as_ref()
            .and_then(|ages| ages.get(index).copied())
            .unwrap_or(0)
    }

    pub fn gender_of(&self, index: usize) -> ChildGender {
        self.genders.get(index).copied().unwrap_or_default()
    }
}

/// Everything the engine needs for one assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimantProfile {
    pub tax_year: String,
    #[serde(default)]
    pub circumstances: Circumstances,
    #[serde(default)]
    pub claimant: AdultDetails,
    /// Only read when `circumstances` is `couple`
    #[serde(default)]
    pub partner: Option<AdultDetails>,
    #[serde(default)]
    pub housing: HousingDetails,
    #[serde(default)]
    pub children: ChildrenDetails,
    /// Capital held
    #[serde(default)]
    pub savings: f64,
    #[serde(default)]
    pub other_benefits: f64,
    #[serde(default)]
    pub other_benefits_period: BenefitPeriod,
}

impl ClaimantProfile {
    /// Single claimant with every other field at its default
    pub fn new(tax_year: &str) -> Self {
        Self {
            tax_year: tax_year.to_string(),
            circumstances: Circumstances::Single,
            claimant: AdultDetails::default(),
            partner: None,
            housing: HousingDetails::default(),
            children: ChildrenDetails::default(),
            savings: 0.0,
            other_benefits: 0.0,
            other_benefits_period: BenefitPeriod::default(),
        }
    }

    pub fn is_couple(&self) -> bool {
        self.circumstances == Circumstances::Couple
    }

    /// Adults in the benefit unit. A couple without partner details gets a
    /// default partner (age 25, not working).
    pub fn adults(&self) -> Vec<(AdultRole, Cow<'_, AdultDetails>)> {
        let mut adults = vec![(AdultRole::Claimant, Cow::Borrowed(&self.claimant))];
        if self.is_couple() {
            let partner = match &self.partner {
                Some(partner) => Cow::Borrowed(partner),
                None => Cow::Owned(AdultDetails::default()),
            };
            adults.push((AdultRole::Partner, partner));
        }
        adults
    }

    /// Check preconditions before any element is computed
    pub fn validate(&self) -> EngineResult<()> {
        if !self.is_couple() && self.partner.is_some() {
            log::debug!("ignoring partner details on a single claim");
        }

        for (role, adult) in self.adults() {
            let employment = &adult.employment;
            check_amount(role_field(role, "monthlyEarnings"), employment.monthly_earnings)?;
            check_amount(role_field(role, "pensionAmount"), employment.pension_amount)?;
            if let Some(net) = employment.net_earnings_override {
                check_amount(role_field(role, "netEarningsOverride"), net)?;
            }
            if let Some(net) = employment.calculated_net_earnings {
                check_amount(role_field(role, "calculatedNetEarnings"), net)?;
            }
            if let Some(accounts) = &employment.business_accounts {
                check_amount(role_field(role, "businessAccounts.income"), accounts.income)?;
                for expense in &accounts.expenses {
                    check_amount(role_field(role, "businessAccounts.expenses"), expense.amount)?;
                }
            }
            if let Some(pct) = employment.pension_percentage {
                if !pct.is_finite() || !(0.0..=100.0).contains(&pct) {
                    return Err(CalculationError::invalid(
                        role_field(role, "pensionPercentage"),
                        format!("must be between 0 and 100, found {}", pct),
                    ));
                }
            }
        }

        check_amount("rent", self.housing.rent)?;
        check_amount("serviceCharges", self.housing.service_charges)?;
        check_amount("childcareCosts", self.children.childcare_costs)?;
        check_amount("savings", self.savings)?;
        check_amount("otherBenefits", self.other_benefits)?;

        let count = self.children.count as usize;
        let ages = self.children.ages.as_ref().map_or(0, Vec::len);
        if ages > count || self.children.genders.len() > count || self.children.disabilities.len() > count {
            return Err(CalculationError::invalid(
                "children",
                format!("per-child details exceed the declared count of {}", count),
            ));
        }

        if let Some(age) = self
            .children
            .ages
            .iter()
            .flatten()
            .find(|&&age| age > MAX_CHILD_AGE)
        {
            return Err(CalculationError::invalid(
                "children.ages",
                format!("child age must be at most {}, found {}", MAX_CHILD_AGE, age),
            ));
        }

        Ok(())
    }
}

fn role_field(role: AdultRole, field: &'static str) -> &'static str {
    match (role, field) {
        (AdultRole::Partner, "monthlyEarnings") => "partner.monthlyEarnings",
        (AdultRole::Partner, "pensionAmount") => "partner.pensionAmount",
        (AdultRole::Partner, "netEarningsOverride") => "partner.netEarningsOverride",
        (AdultRole::Partner, "calculatedNetEarnings") => "partner.calculatedNetEarnings",
        (AdultRole::Partner, "pensionPercentage") => "partner.pensionPercentage",
        (AdultRole::Partner, "businessAccounts.income") => "partner.businessAccounts.income",
        (AdultRole::Partner, "businessAccounts.expenses") => "partner.businessAccounts.expenses",
        _ => field,
    }
}

fn check_amount(field: &'static str, value: f64) -> EngineResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(CalculationError::invalid(
            field,
            format!("must be a non-negative amount, found {}", value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_json() {
        let profile: ClaimantProfile = serde_json::from_str(r#"{"taxYear":"2025_26"}"#).unwrap();
        assert_eq!(profile.circumstances, Circumstances::Single);
        assert_eq!(profile.claimant.age, DEFAULT_AGE);
        assert_eq!(profile.claimant.employment.employment_type, EmploymentType::NotWorking);
        assert_eq!(profile.children.count, 0);
        assert!(profile.children.known_ages().is_none());
    }

    #[test]
    fn test_nested_fields_use_ui_names() {
        let json = r#"{
            "taxYear": "2024_25",
            "circumstances": "couple",
            "claimant": {
                "age": 31,
                "employment": { "employmentType": "self-employed", "monthlyEarnings": 900, "workHours": 35 },
                "disability": { "hasLCWRA": "waiting" }
            },
            "partner": { "isCarer": true, "includeCarerElement": true },
            "children": { "count": 2, "ages": [3, 7], "genders": ["female", "dragon"] }
        }"#;
        let profile: ClaimantProfile = serde_json::from_str(json).unwrap();

        assert!(profile.is_couple());
        assert!(profile.claimant.employment.is_self_employed());
        assert_eq!(profile.claimant.employment.work_hours, WorkHours::ThirtyFive);
        assert_eq!(profile.claimant.disability.has_lcwra, LcwraStatus::Waiting);
        assert!(!profile.claimant.disability.has_lcwra());

        let partner = profile.partner.as_ref().unwrap();
        assert_eq!(partner.age, DEFAULT_AGE);
        assert!(partner.is_carer);

        assert_eq!(profile.children.gender_of(1), ChildGender::Unknown);
        assert_eq!(profile.children.gender_of(5), ChildGender::Unknown);
        assert_eq!(profile.children.age_of(1), 7);
        assert_eq!(profile.children.age_of(2), 0);
    }

    #[test]
    fn test_invalid_work_hours_rejected() {
        let json = r#"{"taxYear":"2025_26","claimant":{"employment":{"workHours":20}}}"#;
        assert!(serde_json::from_str::<ClaimantProfile>(json).is_err());
    }

    #[test]
    fn test_couple_without_partner_gets_default_partner() {
        let mut profile = ClaimantProfile::new("2025_26");
        profile.circumstances = Circumstances::Couple;

        let adults = profile.adults();
        assert_eq!(adults.len(), 2);
        assert_eq!(adults[1].0, AdultRole::Partner);
        assert_eq!(adults[1].1.age, DEFAULT_AGE);
    }

    #[test]
    fn test_single_ignores_partner() {
        let mut profile = ClaimantProfile::new("2025_26");
        profile.partner = Some(AdultDetails {
            age: 40,
            ..Default::default()
        });
        assert_eq!(profile.adults().len(), 1);
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_negative_amounts() {
        let mut profile = ClaimantProfile::new("2025_26");
        profile.savings = -1.0;
        let err = profile.validate().unwrap_err();
        assert!(matches!(err, CalculationError::InvalidProfile { field: "savings", .. }));

        let mut profile = ClaimantProfile::new("2025_26");
        profile.housing.rent = f64::NAN;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_bad_pension_percentage() {
        let mut profile = ClaimantProfile::new("2025_26");
        profile.circumstances = Circumstances::Couple;
        let mut partner = AdultDetails::default();
        partner.employment.pension_percentage = Some(120.0);
        profile.partner = Some(partner);

        let err = profile.validate().unwrap_err();
        assert!(matches!(
            err,
            CalculationError::InvalidProfile { field: "partner.pensionPercentage", .. }
        ));
    }

    #[test]
    fn test_validation_rejects_overlong_child_lists() {
        let mut profile = ClaimantProfile::new("2025_26");
        profile.children.count = 1;
        profile.children.ages = Some(vec![3, 5]);
        assert!(profile.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_unrealistic_child_ages() {
        let mut profile = ClaimantProfile::new("2025_26");
        profile.children.count = 2;
        profile.children.ages = Some(vec![4, MAX_CHILD_AGE]);
        assert!(profile.validate().is_ok());

        profile.children.ages = Some(vec![4, 2_147_483_648]);
        let err = profile.validate().unwrap_err();
        assert!(matches!(err, CalculationError::InvalidProfile { field: "children.ages", .. }));
    }

    #[test]
    fn test_validation_checks_business_accounts() {
        let mut profile = ClaimantProfile::new("2025_26");
        profile.claimant.employment.business_accounts = Some(BusinessAccounts {
            income: 2_000.0,
            income_period: IncomePeriod::PerMonth,
            expenses: vec![BusinessExpense {
                category: ExpenseCategory::Travel,
                amount: -50.0,
                period: IncomePeriod::PerMonth,
            }],
        });
        let err = profile.validate().unwrap_err();
        assert!(matches!(
            err,
            CalculationError::InvalidProfile { field: "businessAccounts.expenses", .. }
        ));

        if let Some(accounts) = profile.claimant.employment.business_accounts.as_mut() {
            accounts.expenses[0].amount = 50.0;
            accounts.income = f64::NAN;
        }
        let err = profile.validate().unwrap_err();
        assert!(matches!(
            err,
            CalculationError::InvalidProfile { field: "businessAccounts.income", .. }
        ));
    }

    #[test]
    fn test_child_disability_addon() {
        let none = ChildDisability {
            has_disability: true,
            ..Default::default()
        };
        assert_eq!(none.addon_level(), None);

        let lower = ChildDisability {
            has_disability: true,
            claims_dla: true,
            care_rate: Some(DlaCareRate::Middle),
            mobility_rate: None,
        };
        assert_eq!(lower.addon_level(), Some(DisabledChildLevel::Lower));

        let higher = ChildDisability {
            care_rate: Some(DlaCareRate::Highest),
            ..lower
        };
        assert_eq!(higher.addon_level(), Some(DisabledChildLevel::Higher));
    }

    #[test]
    fn test_business_accounts_yearly_profit() {
        let accounts = BusinessAccounts {
            income: 5_000.0,
            income_period: IncomePeriod::PerMonth,
            expenses: vec![
                BusinessExpense {
                    category: ExpenseCategory::Premises,
                    amount: 6_000.0,
                    period: IncomePeriod::PerYear,
                },
                BusinessExpense {
                    category: ExpenseCategory::Travel,
                    amount: 100.0,
                    period: IncomePeriod::PerMonth,
                },
            ],
        };
        assert!((accounts.yearly_profit() - (60_000.0 - 6_000.0 - 1_200.0)).abs() < 1e-9);
    }
}
