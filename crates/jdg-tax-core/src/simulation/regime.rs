//! One tax form driven across the month grid.

use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::contributions::health::health_schedule;
use crate::contributions::social::monthly_contribution;
use crate::contributions::stage::ContributionStage;
use crate::params::{LinearParams, TaxScaleParams, TaxYearParameters};
use crate::simulation::input::Scenario;
use crate::simulation::summary::{period_summaries, PeriodSummary};
use crate::tax_forms::lump_sum::{self, RevenueByRate};
use crate::tax_forms::tax_scale::{self, YearToDate};
use crate::tax_forms::{linear, TaxForm};
use crate::types::Money;

/// One month of one tax form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyResult {
    pub month: YearMonth,
    pub offset: usize,
    pub stage: ContributionStage,
    pub revenue: Money,
    pub costs: Money,
    /// Revenue minus costs
    pub income: Money,
    pub social_contribution: Money,
    pub health_contribution: Money,
    pub tax: Money,
    /// Income minus contributions and tax
    pub net_income: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimeSimulation {
    pub form: TaxForm,
    pub months: Vec<MonthlyResult>,
    /// 6, 12, 30 and 60 month prefixes
    pub summaries: Vec<PeriodSummary>,
}

impl RegimeSimulation {
    /// Net income over the whole horizon.
    pub fn total_net_income(&self) -> Money {
        self.months.iter().map(|m| m.net_income).sum()
    }
}

/// Tax rules of one form with only the inputs that form reads.
enum TaxRule<'a> {
    TaxScale(&'a TaxScaleParams),
    Linear(&'a LinearParams),
    LumpSum(&'a [RevenueByRate]),
}

impl<'a> TaxRule<'a> {
    fn for_form(form: TaxForm, scenario: &Scenario<'a>, params: &'a TaxYearParameters) -> Self {
        match form {
            TaxForm::TaxScale => TaxRule::TaxScale(&params.tax_scale),
            TaxForm::LinearTax => TaxRule::Linear(&params.linear),
            TaxForm::LumpSum => TaxRule::LumpSum(&scenario.input.lump_sum_revenues),
        }
    }

    fn revenues(&self, scenario: &Scenario<'_>) -> Vec<Money> {
        match self {
            TaxRule::LumpSum(months) => months.iter().map(lump_sum::total_revenue).collect(),
            TaxRule::TaxScale(_) | TaxRule::Linear(_) => scenario.input.monthly_revenues.clone(),
        }
    }
}

/// Run one tax form over the scenario's sixty months.
///
/// Only the tax scale carries state between months: its year-to-date
/// accumulator is threaded through the loop as a value.
pub fn simulate_regime(
    form: TaxForm,
    scenario: &Scenario<'_>,
    params: &TaxYearParameters,
) -> RegimeSimulation {
    let rule = TaxRule::for_form(form, scenario, params);
    let revenues = rule.revenues(scenario);
    let incomes: Vec<Money> = revenues
        .iter()
        .zip(&scenario.costs)
        .map(|(revenue, cost)| *revenue - *cost)
        .collect();
    let health = health_schedule(form, &scenario.grid, &incomes, &params.health);

    let mut ytd = scenario
        .grid
        .first()
        .map(|m| YearToDate::opening(m.period.year()))
        .unwrap_or_else(|| YearToDate::opening(0));
    let mut months = Vec::with_capacity(scenario.grid.len());

    for month in &scenario.grid {
        let i = month.offset;
        let income = incomes[i];
        let tax = match &rule {
            TaxRule::TaxScale(p) => {
                let (tax, next) = tax_scale::monthly_tax(ytd, month.period, income, p);
                ytd = next;
                tax
            }
            TaxRule::Linear(p) => linear::monthly_tax(income, p),
            TaxRule::LumpSum(entries) => lump_sum::monthly_tax(&entries[i]),
        };
        let stage = scenario.stages[i];
        let social_contribution = monthly_contribution(stage, &params.social);
        let health_contribution = health[i];

        months.push(MonthlyResult {
            month: month.period,
            offset: i,
            stage,
            revenue: revenues[i],
            costs: scenario.costs[i],
            income,
            social_contribution,
            health_contribution,
            tax,
            net_income: income - social_contribution - health_contribution - tax,
        });
    }

    let summaries = period_summaries(&months);
    log::debug!(
        "simulated {} over {} months, net income {}",
        form.id(),
        months.len(),
        summaries.last().map(|s| s.net_income).unwrap_or_default()
    );

    RegimeSimulation {
        form,
        months,
        summaries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::HORIZON_MONTHS;
    use crate::simulation::input::{OneTimeCost, TaxComparisonInput};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn input() -> TaxComparisonInput {
        let month: RevenueByRate = [(dec!(0.085), dec!(50000))].into_iter().collect();
        TaxComparisonInput {
            base_month: "2025-01".parse().unwrap(),
            business_start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            monthly_revenues: vec![dec!(50000); HORIZON_MONTHS],
            monthly_fixed_cost: dec!(5000),
            one_time_costs: vec![],
            lump_sum_revenues: vec![month; HORIZON_MONTHS],
        }
    }

    fn run(form: TaxForm, input: &TaxComparisonInput) -> RegimeSimulation {
        let params = TaxYearParameters::year_2025();
        let scenario = Scenario::prepare(input, &params).unwrap();
        simulate_regime(form, &scenario, &params)
    }

    #[test]
    fn test_net_income_identity_every_month() {
        let input = input();
        for form in TaxForm::PRIORITY {
            let sim = run(form, &input);
            assert_eq!(sim.months.len(), 60);
            for m in &sim.months {
                assert_eq!(
                    m.net_income,
                    m.revenue - m.costs - m.social_contribution - m.health_contribution - m.tax,
                    "{form} {}",
                    m.month
                );
            }
        }
    }

    #[test]
    fn test_linear_first_month() {
        let sim = run(TaxForm::LinearTax, &input());
        let first = &sim.months[0];
        assert_eq!(first.income, dec!(45000));
        assert_eq!(first.tax, dec!(8550));
        assert_eq!(first.health_contribution, dec!(2205));
        assert_eq!(first.social_contribution, dec!(0));
        assert_eq!(first.net_income, dec!(34245));
    }

    #[test]
    fn test_tax_scale_first_year_matches_annual_tax() {
        let sim = run(TaxForm::TaxScale, &input());
        let params = TaxYearParameters::year_2025();
        let first_year: Decimal = sim.months[..12].iter().map(|m| m.tax).sum();
        assert_eq!(first_year, tax_scale::annual_tax(dec!(540000), &params.tax_scale));
        assert!(sim.months.iter().all(|m| m.tax >= Decimal::ZERO));
        // January again starts in the lower bracket
        assert_eq!(sim.months[12].tax, dec!(1800));
    }

    #[test]
    fn test_lump_sum_taxes_revenue_not_income() {
        let sim = run(TaxForm::LumpSum, &input());
        let first = &sim.months[0];
        assert_eq!(first.revenue, dec!(50000));
        assert_eq!(first.costs, dec!(5000));
        assert_eq!(first.income, dec!(45000));
        assert_eq!(first.tax, dec!(4250));
        assert_eq!(first.health_contribution, dec!(554.4288));
    }

    #[test]
    fn test_one_time_cost_lowers_month_zero() {
        let base = input();
        let mut with_cost = input();
        with_cost.one_time_costs.push(OneTimeCost {
            month_index: 0,
            amount: dec!(10000),
        });
        for form in [TaxForm::TaxScale, TaxForm::LinearTax] {
            let a = run(form, &base);
            let b = run(form, &with_cost);
            assert!(b.months[0].net_income < a.months[0].net_income, "{form}");
            assert!(b.months[0].tax < a.months[0].tax, "{form}");
        }
        let a = run(TaxForm::LumpSum, &base);
        let b = run(TaxForm::LumpSum, &with_cost);
        assert_eq!(a.months[0].tax, b.months[0].tax);
        assert_eq!(b.months[0].costs, dec!(15000));
    }

    #[test]
    fn test_stages_drive_social_contribution() {
        let sim = run(TaxForm::LinearTax, &input());
        assert_eq!(sim.months[5].social_contribution, dec!(0));
        assert_eq!(sim.months[6].social_contribution, dec!(626.49));
        assert_eq!(sim.months[29].social_contribution, dec!(626.49));
        assert_eq!(sim.months[30].social_contribution, dec!(1860.88));
    }

    #[test]
    fn test_loss_months_pay_no_tax() {
        let mut loss = input();
        loss.monthly_revenues = vec![dec!(1000); HORIZON_MONTHS];
        for form in [TaxForm::TaxScale, TaxForm::LinearTax] {
            let sim = run(form, &loss);
            assert!(sim.months.iter().all(|m| m.tax == Decimal::ZERO), "{form}");
            // health floor still applies
            assert_eq!(sim.months[0].health_contribution, dec!(314.955));
        }
    }

    #[test]
    fn test_total_matches_sixty_month_summary() {
        let sim = run(TaxForm::TaxScale, &input());
        assert_eq!(sim.summaries.len(), 4);
        assert_eq!(sim.total_net_income(), sim.summaries[3].net_income);
    }
}
