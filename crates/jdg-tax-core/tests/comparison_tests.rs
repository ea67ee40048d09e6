use chrono::NaiveDate;
use jdg_tax_core::calendar::HORIZON_MONTHS;
use jdg_tax_core::report::calculate_comparison;
use jdg_tax_core::simulation::{
    compare_tax_forms, simulate_regime, OneTimeCost, Scenario, TaxComparisonInput,
};
use jdg_tax_core::tax_forms::lump_sum::RevenueByRate;
use jdg_tax_core::tax_forms::TaxForm;
use jdg_tax_core::{TaxEngineError, TaxYearParameters};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn constant_input(base: &str, start: NaiveDate) -> TaxComparisonInput {
    let month: RevenueByRate = [(dec!(0.085), dec!(50000))].into_iter().collect();
    TaxComparisonInput {
        base_month: base.parse().unwrap(),
        business_start_date: start,
        monthly_revenues: vec![dec!(50000); HORIZON_MONTHS],
        monthly_fixed_cost: dec!(5000),
        one_time_costs: vec![],
        lump_sum_revenues: vec![month; HORIZON_MONTHS],
    }
}

fn params() -> TaxYearParameters {
    TaxYearParameters::year_2025()
}

// ===========================================================================
// End-to-end: 50 000 revenue, 5 000 cost, 8.5% lump sum, start 2025-01-01
// ===========================================================================

#[test]
fn test_constant_business_known_totals() {
    let input = constant_input("2025-01", date(2025, 1, 1));
    let result = compare_tax_forms(&input, &params()).unwrap();

    // Social: 24 * 626.49 + 30 * 1860.88
    let social = dec!(70862.16);

    // Scale: 5 * tax(540000) = 5 * 145200, health 9% of income
    assert_eq!(
        result.tax_scale.total_net_income(),
        dec!(2700000) - dec!(726000) - dec!(243000) - social
    );
    // Linear: 19% and 4.9% of 45000 each month
    assert_eq!(result.linear_tax.total_net_income(), dec!(1983837.84));
    // Lump sum: 8.5% of 50000, fixed health 554.4288 per month
    assert_eq!(result.lump_sum.total_net_income(), dec!(2340872.112));

    for form in TaxForm::PRIORITY {
        assert!(result.simulation(form).total_net_income() > Decimal::ZERO, "{form}");
    }
    assert_eq!(result.best_form, TaxForm::LumpSum);
    assert!(!result.tie_break_applied);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_summaries_follow_stage_windows() {
    let input = constant_input("2025-01", date(2025, 1, 1));
    let result = compare_tax_forms(&input, &params()).unwrap();
    let s = &result.linear_tax.summaries;
    assert_eq!(s[0].social_contributions, dec!(0));
    assert_eq!(s[1].social_contributions, dec!(3758.94));
    assert_eq!(s[2].social_contributions, dec!(15035.76));
    assert_eq!(s[3].social_contributions, dec!(70862.16));
    assert_eq!(s[3].total_burden, s[3].total_contributions + s[3].tax);
    assert_eq!(s[3].net_income, s[3].income - s[3].total_burden);
}

// ===========================================================================
// One-time cost
// ===========================================================================

#[test]
fn test_one_time_cost_in_month_zero() {
    let base = constant_input("2025-01", date(2025, 1, 1));
    let mut with_cost = base.clone();
    with_cost.one_time_costs.push(OneTimeCost {
        month_index: 0,
        amount: dec!(10000),
    });

    let a = compare_tax_forms(&base, &params()).unwrap();
    let b = compare_tax_forms(&with_cost, &params()).unwrap();

    assert!(b.tax_scale.months[0].net_income < a.tax_scale.months[0].net_income);
    assert!(b.linear_tax.months[0].net_income < a.linear_tax.months[0].net_income);
    assert_eq!(b.lump_sum.months[0].tax, a.lump_sum.months[0].tax);
    assert_eq!(b.lump_sum.months[0].costs, dec!(15000));
    // fully deducted in its own month
    assert_eq!(b.linear_tax.months[0].tax, dec!(6650));
    assert_eq!(b.linear_tax.months[1].tax, a.linear_tax.months[1].tax);
}

// ===========================================================================
// Health contribution for a mid-year start
// ===========================================================================

#[test]
fn test_mid_year_health_matches_january_first_half() {
    let july = constant_input("2025-07", date(2025, 7, 1));
    let january = constant_input("2025-01", date(2025, 1, 1));
    let july = compare_tax_forms(&july, &params()).unwrap();
    let january = compare_tax_forms(&january, &params()).unwrap();

    for form in TaxForm::PRIORITY {
        let first_six = |r: &jdg_tax_core::simulation::ComparisonResult| -> Decimal {
            r.simulation(form).months[..6]
                .iter()
                .map(|m| m.health_contribution)
                .sum()
        };
        assert_eq!(first_six(&july), first_six(&january), "{form}");
    }
}

#[test]
fn test_partial_last_year_apportioned_over_its_months() {
    let input = constant_input("2025-07", date(2025, 7, 1));
    let result = compare_tax_forms(&input, &params()).unwrap();
    // 2030 holds six horizon months; 9% of 6 * 45000 spread over them
    let last_year: Decimal = result.tax_scale.months[54..]
        .iter()
        .map(|m| m.health_contribution)
        .sum();
    assert_eq!(last_year, dec!(24300));
    assert_eq!(result.tax_scale.months[59].month.to_string(), "2030-06");
}

// ===========================================================================
// Properties
// ===========================================================================

#[test]
fn test_two_rates_sum_like_two_single_rate_runs() {
    let p = params();
    let with_rates = |entries: &[(Decimal, Decimal)]| {
        let mut input = constant_input("2025-01", date(2025, 1, 1));
        let month: RevenueByRate = entries.iter().copied().collect();
        input.lump_sum_revenues = vec![month; HORIZON_MONTHS];
        let scenario_input = input;
        let scenario = Scenario::prepare(&scenario_input, &p).unwrap();
        simulate_regime(TaxForm::LumpSum, &scenario, &p)
    };
    let a = with_rates(&[(dec!(0.055), dec!(20000))]);
    let b = with_rates(&[(dec!(0.15), dec!(30000))]);
    let both = with_rates(&[(dec!(0.055), dec!(20000)), (dec!(0.15), dec!(30000))]);
    for i in 0..HORIZON_MONTHS {
        assert_eq!(both.months[i].tax, a.months[i].tax + b.months[i].tax);
    }
}

#[test]
fn test_net_identity_with_irregular_inputs() {
    let mut input = constant_input("2025-03", date(2024, 10, 20));
    for (i, revenue) in input.monthly_revenues.iter_mut().enumerate() {
        *revenue = Decimal::from((i as i64 * 7919) % 40000);
    }
    input.one_time_costs = vec![
        OneTimeCost {
            month_index: 3,
            amount: dec!(25000),
        },
        OneTimeCost {
            month_index: 40,
            amount: dec!(1234.56),
        },
    ];
    let result = compare_tax_forms(&input, &params()).unwrap();
    for form in TaxForm::PRIORITY {
        for m in &result.simulation(form).months {
            assert!(m.tax >= Decimal::ZERO);
            assert_eq!(
                m.net_income,
                m.revenue - m.costs - m.social_contribution - m.health_contribution - m.tax
            );
        }
    }
    // started five months before the base month
    assert_eq!(
        result.tax_scale.months[0].stage,
        jdg_tax_core::contributions::ContributionStage::StartRelief
    );
    assert_eq!(
        result.tax_scale.months[1].stage,
        jdg_tax_core::contributions::ContributionStage::Preferential
    );
    assert!(!result.warnings.is_empty());
}

// ===========================================================================
// Errors and warnings
// ===========================================================================

#[test]
fn test_no_partial_result_on_invalid_input() {
    let mut input = constant_input("2025-01", date(2025, 6, 1));
    input.monthly_revenues.truncate(12);
    // date ordering is checked first
    let err = compare_tax_forms(&input, &params()).unwrap_err();
    assert!(matches!(err, TaxEngineError::InvalidDateOrdering { .. }));
}

#[test]
fn test_invalid_parameter_set_rejected() {
    let input = constant_input("2025-01", date(2025, 1, 1));
    let mut p = params();
    p.linear.rate = dec!(1.5);
    assert!(compare_tax_forms(&input, &p).is_err());
}

#[test]
fn test_lump_sum_limit_warning() {
    let mut input = constant_input("2025-01", date(2025, 1, 1));
    let month: RevenueByRate = [(dec!(0.12), dec!(200000))].into_iter().collect();
    input.lump_sum_revenues = vec![month; HORIZON_MONTHS];
    let out = calculate_comparison(&input, &params()).unwrap();
    assert_eq!(out.warnings.len(), 5);
    assert!(out.warnings[0].contains("2025"));
}

#[test]
fn test_tax_book_limit_warning_per_year() {
    let mut input = constant_input("2025-01", date(2025, 1, 1));
    input.monthly_revenues = vec![dec!(200000); HORIZON_MONTHS];
    let result = compare_tax_forms(&input, &params()).unwrap();
    assert_eq!(result.warnings.len(), 5);
    for (warning, year) in result.warnings.iter().zip(2025..) {
        assert_eq!(
            warning,
            &format!(
                "Revenue of 2400000 PLN in {year} exceeds the tax book limit of 2000000 PLN"
            )
        );
    }
}

#[test]
fn test_loss_month_warning_counts_months() {
    let mut input = constant_input("2025-01", date(2025, 1, 1));
    input.monthly_revenues[3] = dec!(1000);
    input.monthly_revenues[10] = dec!(0);
    let result = compare_tax_forms(&input, &params()).unwrap();
    assert_eq!(
        result.warnings,
        vec!["2 month(s) have costs above revenue; no tax is due for them".to_string()]
    );
}

#[test]
fn test_oversized_amount_is_an_error_not_a_panic() {
    let mut input = constant_input("2025-01", date(2025, 1, 1));
    input.monthly_fixed_cost = dec!(0);
    input.monthly_revenues = vec![Decimal::MAX / dec!(20); HORIZON_MONTHS];
    let err = compare_tax_forms(&input, &params()).unwrap_err();
    assert!(matches!(err, TaxEngineError::InvalidInput { .. }));
    assert_eq!(err.field(), Some("monthly_revenues[0]"));
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_matches_sequential() {
    let input = constant_input("2025-01", date(2025, 1, 1));
    let p = params();
    let result = compare_tax_forms(&input, &p).unwrap();
    let scenario = Scenario::prepare(&input, &p).unwrap();
    for form in TaxForm::PRIORITY {
        let sequential = simulate_regime(form, &scenario, &p);
        assert_eq!(result.simulation(form).months, sequential.months);
    }
}
