//! Individual Universal Credit elements and deductions
//!
//! Each function reads the profile and the year's rate table only; none
//! depends on another's output except where a figure is passed in.

use chrono::{Datelike, NaiveDate};

use super::result::{CapitalDeductionDetails, LhaDetails};
use crate::earnings::calculate_proper_net_earnings;
use crate::housing::{calculate_bedroom_entitlement, convert_lha_to_monthly, LhaService};
use crate::profile::{
    AdultDetails, ChildrenDetails, ClaimantProfile, DisabledChildLevel, EmploymentType,
    TenantType,
};
use crate::rates::{CapitalRules, RateTable};

/// Children born before this date keep the higher child element
const TWO_CHILD_LIMIT_START: (i32, u32, u32) = (2017, 4, 6);

const HIGH_EARNINGS_WARNING: f64 = 5_000.0;
const HIGH_SAVINGS_WARNING: f64 = 15_000.0;
const HIGH_RENT_WARNING: f64 = 2_000.0;

/// Age that selects the over-25 standard allowance
const STANDARD_ALLOWANCE_AGE: u32 = 25;

/// Single claimants use their own age, couples the elder partner's
pub fn standard_allowance(profile: &ClaimantProfile, rates: &RateTable) -> f64 {
    let sa = &rates.standard_allowance;
    let eldest = profile
        .adults()
        .iter()
        .map(|(_, adult)| adult.age)
        .max()
        .unwrap_or(profile.claimant.age);

    match (profile.is_couple(), eldest >= STANDARD_ALLOWANCE_AGE) {
        (false, false) => sa.single_under25,
        (false, true) => sa.single_over25,
        (true, false) => sa.couple_under25,
        (true, true) => sa.couple_over25,
    }
}

/// Housing element and, for private tenancies, the LHA workings
#[derive(Debug, Clone, PartialEq)]
pub struct HousingElement {
    pub amount: f64,
    pub lha_details: Option<LhaDetails>,
}

pub fn housing_element(
    profile: &ClaimantProfile,
    rates: &RateTable,
    lha: &LhaService,
) -> HousingElement {
    let housing = &profile.housing;
    if !housing.is_renting() {
        return HousingElement {
            amount: 0.0,
            lha_details: None,
        };
    }

    let actual_rent = housing.total_rent();
    if housing.tenant_type == TenantType::Social {
        return HousingElement {
            amount: actual_rent,
            lha_details: None,
        };
    }

    let bedrooms = calculate_bedroom_entitlement(profile.circumstances, &profile.children);
    let brma = housing
        .brma
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty());

    let (area_rates, uses_fallback_rates) = match brma.and_then(|b| lha.get_all_lha_rates(b)) {
        Some(found) => (found.clone(), false),
        None => {
            log::warn!(
                "no LHA rates for BRMA {:?}; using flat fallback bands",
                brma.unwrap_or("<unset>")
            );
            (rates.lha_fallback.clone(), true)
        }
    };

    let weekly_lha = area_rates.for_bedrooms(bedrooms);
    let monthly_lha = convert_lha_to_monthly(weekly_lha);
    let eligible_rent = actual_rent.min(monthly_lha);

    HousingElement {
        amount: eligible_rent,
        lha_details: Some(LhaDetails {
            bedroom_entitlement: bedrooms,
            brma: brma.map(str::to_string),
            uses_fallback_rates,
            weekly_lha,
            monthly_lha,
            actual_rent,
            eligible_rent,
            shortfall: (actual_rent - monthly_lha).max(0.0),
            rates: area_rates,
        }),
    }
}

/// Birth date estimated as the same day and month as `today`, `age` years
/// back; `None` when that date is outside chrono's range
fn approximate_birth_date(today: NaiveDate, age: u32) -> Option<NaiveDate> {
    let year = i32::try_from(age)
        .ok()
        .and_then(|age| today.year().checked_sub(age))?;
    today
        .with_year(year)
        // 29 February in a non-leap year
        .or_else(|| NaiveDate::from_ymd_opt(year, today.month(), 28))
}

fn born_before_two_child_limit(today: NaiveDate, age: u32) -> bool {
    match approximate_birth_date(today, age) {
        Some(birth) => (birth.year(), birth.month(), birth.day()) < TWO_CHILD_LIMIT_START,
        // too far back to represent
        None => true,
    }
}

/// Child element plus disabled child add-ons.
///
/// With ages, each child is placed either side of 6 April 2017 by an
/// approximate birth date. Without ages, the first child is treated as born
/// before the limit and every other child after it.
pub fn child_element(children: &ChildrenDetails, rates: &RateTable, today: NaiveDate) -> f64 {
    if !children.has_children() {
        return 0.0;
    }

    let ce = &rates.child_element;
    let count = children.count as usize;

    let base: f64 = match children.known_ages() {
        Some(_) => (0..count)
            .map(|i| {
                if born_before_two_child_limit(today, children.age_of(i)) {
                    ce.pre_two_child_limit
                } else {
                    ce.post_two_child_limit
                }
            })
            .sum(),
        None => ce.pre_two_child_limit + (count - 1) as f64 * ce.post_two_child_limit,
    };

    let disabled: f64 = children
        .disabilities
        .iter()
        .take(count)
        .filter_map(|d| d.addon_level())
        .map(|level| match level {
            DisabledChildLevel::Lower => rates.disabled_child.lower,
            DisabledChildLevel::Higher => rates.disabled_child.higher,
        })
        .sum();

    base + disabled
}

/// 85% of childcare costs up to the cap for the number of children
pub fn childcare_element(children: &ChildrenDetails, rates: &RateTable) -> f64 {
    if !children.has_children() || children.childcare_costs <= 0.0 {
        return 0.0;
    }
    let cc = &rates.childcare;
    let cap = if children.count == 1 {
        cc.max_one_child
    } else {
        cc.max_two_or_more
    };
    (children.childcare_costs * cc.percentage).min(cap)
}

/// One carer element per adult who is a carer and has opted in
pub fn carer_element(profile: &ClaimantProfile, rates: &RateTable) -> f64 {
    profile
        .adults()
        .iter()
        .filter(|(_, adult)| adult.is_carer && adult.include_carer_element)
        .count() as f64
        * rates.carer_element
}

/// One LCWRA element per adult with a confirmed LCWRA decision
pub fn lcwra_element(profile: &ClaimantProfile, rates: &RateTable) -> f64 {
    profile
        .adults()
        .iter()
        .filter(|(_, adult)| adult.disability.has_lcwra())
        .count() as f64
        * rates.lcwra_element
}

/// Work allowance: only for households with children, LCWRA, or a
/// disability benefit claim
pub fn work_allowance(profile: &ClaimantProfile, rates: &RateTable) -> f64 {
    let eligible = profile.children.has_children()
        || profile.adults().iter().any(|(_, adult)| {
            adult.disability.has_lcwra() || adult.disability.has_qualifying_benefit_claim()
        });
    if !eligible {
        return 0.0;
    }

    let housing = &profile.housing;
    if housing.is_renting() && housing.total_rent() > 0.0 {
        rates.work_allowance.with_housing
    } else {
        rates.work_allowance.without_housing
    }
}

/// Net monthly earnings counted for one adult.
///
/// Employees: override, then the UI's precomputed figure, then a fresh
/// calculation. Self-employed: gross earnings with no deductions.
pub fn adult_net_earnings(adult: &AdultDetails, rates: &RateTable) -> f64 {
    let employment = &adult.employment;
    match employment.employment_type {
        EmploymentType::NotWorking => 0.0,
        EmploymentType::SelfEmployed => employment.monthly_earnings,
        EmploymentType::Employed => employment
            .net_earnings_override
            .or(employment.calculated_net_earnings)
            .unwrap_or_else(|| {
                calculate_proper_net_earnings(
                    employment.monthly_earnings,
                    employment.pension_type,
                    employment.pension_amount,
                    employment.pension_percentage,
                    &rates.pension,
                )
            }),
    }
}

/// Combined net earnings above the work allowance, tapered
pub fn earnings_reduction(profile: &ClaimantProfile, rates: &RateTable, work_allowance: f64) -> f64 {
    let net: f64 = profile
        .adults()
        .iter()
        .map(|(_, adult)| adult_net_earnings(adult, rates))
        .sum();

    if net <= work_allowance {
        0.0
    } else {
        (net - work_allowance) * rates.taper_rate
    }
}

/// Tariff income from capital. Above the upper limit the deduction is the
/// whole of `total_elements`.
pub fn capital_deduction(
    savings: f64,
    total_elements: f64,
    rules: &CapitalRules,
) -> (f64, CapitalDeductionDetails) {
    let mut details = CapitalDeductionDetails {
        savings,
        lower_limit: rules.lower_limit,
        upper_limit: rules.upper_limit,
        tariff_bands: 0,
        tariff_income: 0.0,
        exceeds_upper_limit: false,
    };

    if savings <= rules.lower_limit {
        return (0.0, details);
    }

    if savings > rules.upper_limit {
        details.exceeds_upper_limit = true;
        return (total_elements, details);
    }

    let bands = ((savings - rules.lower_limit) / rules.tariff_band).ceil();
    details.tariff_bands = bands as u32;
    details.tariff_income = bands * rules.tariff_per_band;
    (details.tariff_income, details)
}

/// Other benefits normalised to a month
pub fn benefit_deduction(profile: &ClaimantProfile) -> f64 {
    profile.other_benefits_period.to_monthly(profile.other_benefits)
}

/// Advisory messages; never block a calculation
pub fn warnings(profile: &ClaimantProfile) -> Vec<String> {
    let mut warnings = Vec::new();

    let gross: f64 = profile
        .adults()
        .iter()
        .map(|(_, adult)| adult.employment.monthly_earnings)
        .sum();
    if gross > HIGH_EARNINGS_WARNING {
        warnings.push(format!(
            "Monthly earnings of £{:.2} are high; Universal Credit is unlikely to be payable",
            gross
        ));
    }

    if profile.savings > HIGH_SAVINGS_WARNING {
        warnings.push(format!(
            "Savings of £{:.2} are close to or above the £16,000 capital limit",
            profile.savings
        ));
    }

    if profile.housing.rent > HIGH_RENT_WARNING {
        warnings.push(format!(
            "Monthly rent of £{:.2} is high; check the amount entered",
            profile.housing.rent
        ));
    }

    warnings
}
