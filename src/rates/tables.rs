//! Built-in rate tables
//!
//! Monthly amounts unless noted. LHA fallback and Child Benefit are weekly,
//! minimum wage is hourly.

use super::{
    CapitalRules, ChildBenefitRates, ChildElementRates, ChildcareRates, DisabledChildRates,
    LhaRates, MinimumWageRates, PensionThresholds, RateTable, StandardAllowanceRates, TaxYear,
    WorkAllowanceRates,
};

const TAPER_RATE: f64 = 0.55;
const CHILDCARE_PERCENTAGE: f64 = 0.85;

fn capital_rules() -> CapitalRules {
    CapitalRules {
        lower_limit: 6_000.0,
        upper_limit: 16_000.0,
        tariff_band: 250.0,
        tariff_per_band: 4.35,
    }
}

fn pension_thresholds() -> PensionThresholds {
    PensionThresholds {
        lower_earnings_limit: 6_240.0,
        upper_earnings_limit: 50_270.0,
    }
}

pub(super) fn for_year(year: TaxYear) -> RateTable {
    match year {
        TaxYear::Y2023_24 => rates_2023_24(),
        TaxYear::Y2024_25 => rates_2024_25(),
        TaxYear::Y2025_26 => rates_2025_26(),
    }
}

fn rates_2023_24() -> RateTable {
    RateTable {
        standard_allowance: StandardAllowanceRates {
            single_under25: 292.11,
            single_over25: 368.74,
            couple_under25: 458.51,
            couple_over25: 578.82,
        },
        child_element: ChildElementRates {
            pre_two_child_limit: 315.00,
            post_two_child_limit: 269.58,
        },
        disabled_child: DisabledChildRates {
            lower: 146.31,
            higher: 456.89,
        },
        childcare: ChildcareRates {
            percentage: CHILDCARE_PERCENTAGE,
            max_one_child: 951.46,
            max_two_or_more: 1_631.10,
        },
        work_allowance: WorkAllowanceRates {
            with_housing: 379.00,
            without_housing: 631.00,
        },
        taper_rate: TAPER_RATE,
        carer_element: 185.86,
        lcwra_element: 390.06,
        capital: capital_rules(),
        pension: pension_thresholds(),
        lha_fallback: LhaRates {
            shared_rate: 85.00,
            one_bed_rate: 140.00,
            two_bed_rate: 170.00,
            three_bed_rate: 200.00,
            four_bed_rate: 260.00,
        },
        minimum_wage: MinimumWageRates {
            adult: 10.42,
            age18_to20: 7.49,
            under18: 5.28,
            apprentice: 5.28,
        },
        child_benefit: ChildBenefitRates {
            eldest: 24.00,
            additional: 15.90,
        },
    }
}

fn rates_2024_25() -> RateTable {
    RateTable {
        standard_allowance: StandardAllowanceRates {
            single_under25: 311.68,
            single_over25: 393.45,
            couple_under25: 489.23,
            couple_over25: 617.60,
        },
        child_element: ChildElementRates {
            pre_two_child_limit: 333.33,
            post_two_child_limit: 287.92,
        },
        disabled_child: DisabledChildRates {
            lower: 156.11,
            higher: 487.58,
        },
        childcare: ChildcareRates {
            percentage: CHILDCARE_PERCENTAGE,
            max_one_child: 1_014.63,
            max_two_or_more: 1_739.37,
        },
        work_allowance: WorkAllowanceRates {
            with_housing: 404.00,
            without_housing: 673.00,
        },
        taper_rate: TAPER_RATE,
        carer_element: 198.31,
        lcwra_element: 416.19,
        capital: capital_rules(),
        pension: pension_thresholds(),
        lha_fallback: LhaRates {
            shared_rate: 95.00,
            one_bed_rate: 165.00,
            two_bed_rate: 200.00,
            three_bed_rate: 235.00,
            four_bed_rate: 300.00,
        },
        minimum_wage: MinimumWageRates {
            adult: 11.44,
            age18_to20: 8.60,
            under18: 6.40,
            apprentice: 6.40,
        },
        child_benefit: ChildBenefitRates {
            eldest: 25.60,
            additional: 16.95,
        },
    }
}

fn rates_2025_26() -> RateTable {
    RateTable {
        standard_allowance: StandardAllowanceRates {
            single_under25: 316.98,
            single_over25: 400.14,
            couple_under25: 497.55,
            couple_over25: 628.10,
        },
        child_element: ChildElementRates {
            pre_two_child_limit: 339.00,
            post_two_child_limit: 292.81,
        },
        disabled_child: DisabledChildRates {
            lower: 158.76,
            higher: 495.87,
        },
        childcare: ChildcareRates {
            percentage: CHILDCARE_PERCENTAGE,
            max_one_child: 1_031.88,
            max_two_or_more: 1_768.94,
        },
        work_allowance: WorkAllowanceRates {
            with_housing: 411.00,
            without_housing: 684.00,
        },
        taper_rate: TAPER_RATE,
        carer_element: 201.68,
        lcwra_element: 423.27,
        capital: capital_rules(),
        pension: pension_thresholds(),
        // LHA rates were frozen for 2025/26
        lha_fallback: LhaRates {
            shared_rate: 95.00,
            one_bed_rate: 165.00,
            two_bed_rate: 200.00,
            three_bed_rate: 235.00,
            four_bed_rate: 300.00,
        },
        minimum_wage: MinimumWageRates {
            adult: 12.21,
            age18_to20: 10.00,
            under18: 7.55,
            apprentice: 7.55,
        },
        child_benefit: ChildBenefitRates {
            eldest: 26.05,
            additional: 17.25,
        },
    }
}
