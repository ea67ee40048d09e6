//! Run all three tax forms and pick the one with the highest net income.
//!
//! Totals are compared at presentation precision (two decimal places). Equal
//! totals are resolved by [`TaxForm::PRIORITY`]: tax scale, then linear tax,
//! then lump sum.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::params::TaxYearParameters;
use crate::simulation::input::{Scenario, TaxComparisonInput};
use crate::simulation::regime::{simulate_regime, RegimeSimulation};
use crate::tax_forms::lump_sum;
use crate::tax_forms::TaxForm;
use crate::types::{round_money, Money};
use crate::TaxEngineResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub tax_scale: RegimeSimulation,
    pub linear_tax: RegimeSimulation,
    pub lump_sum: RegimeSimulation,
    pub best_form: TaxForm,
    /// True when the best total was shared and priority decided
    pub tie_break_applied: bool,
    pub description: String,
    pub warnings: Vec<String>,
}

impl ComparisonResult {
    pub fn simulation(&self, form: TaxForm) -> &RegimeSimulation {
        match form {
            TaxForm::TaxScale => &self.tax_scale,
            TaxForm::LinearTax => &self.linear_tax,
            TaxForm::LumpSum => &self.lump_sum,
        }
    }
}

/// Pick the highest total. Returns the winner and whether a tie was broken.
///
/// Totals are rounded to two places first so sub-grosz differences never
/// decide the outcome.
pub fn select_best(totals: &[(TaxForm, Money)]) -> Option<(TaxForm, bool)> {
    let mut ranked: Vec<(TaxForm, Money)> = totals
        .iter()
        .map(|(form, total)| (*form, round_money(*total)))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.priority().cmp(&b.0.priority())));
    let (best, best_total) = *ranked.first()?;
    let tie = ranked.iter().filter(|(_, t)| *t == best_total).count() > 1;
    Some((best, tie))
}

/// Numeric statement of the outcome. No advice, only the totals.
pub fn describe(best: TaxForm, tie: bool, totals: &[(TaxForm, Money)]) -> String {
    let amount = |form: TaxForm| {
        totals
            .iter()
            .find(|(f, _)| *f == form)
            .map(|(_, t)| round_money(*t))
            .unwrap_or_default()
    };
    let listed: Vec<String> = totals
        .iter()
        .map(|(form, total)| format!("{} {:.2} PLN", form.label(), round_money(*total)))
        .collect();
    let mut text = format!(
        "Highest 60-month net income: {} at {:.2} PLN. Totals: {}.",
        best.label(),
        amount(best),
        listed.join(", ")
    );
    if tie {
        text.push_str(" Equal totals are ordered tax scale, linear tax, lump sum.");
    }
    text
}

#[cfg(feature = "parallel")]
fn run_all(
    scenario: &Scenario<'_>,
    params: &TaxYearParameters,
) -> (RegimeSimulation, RegimeSimulation, RegimeSimulation) {
    let (tax_scale, (linear_tax, lump_sum)) = rayon::join(
        || simulate_regime(TaxForm::TaxScale, scenario, params),
        || {
            rayon::join(
                || simulate_regime(TaxForm::LinearTax, scenario, params),
                || simulate_regime(TaxForm::LumpSum, scenario, params),
            )
        },
    );
    (tax_scale, linear_tax, lump_sum)
}

#[cfg(not(feature = "parallel"))]
fn run_all(
    scenario: &Scenario<'_>,
    params: &TaxYearParameters,
) -> (RegimeSimulation, RegimeSimulation, RegimeSimulation) {
    (
        simulate_regime(TaxForm::TaxScale, scenario, params),
        simulate_regime(TaxForm::LinearTax, scenario, params),
        simulate_regime(TaxForm::LumpSum, scenario, params),
    )
}

/// Validate, simulate every tax form and select the best.
pub fn compare_tax_forms(
    input: &TaxComparisonInput,
    params: &TaxYearParameters,
) -> TaxEngineResult<ComparisonResult> {
    params.validate()?;
    let scenario = Scenario::prepare(input, params)?;
    let warnings = collect_warnings(&scenario, params);
    let (tax_scale, linear_tax, lump_sum) = run_all(&scenario, params);

    let totals: Vec<(TaxForm, Money)> = [&tax_scale, &linear_tax, &lump_sum]
        .iter()
        .map(|sim| (sim.form, sim.total_net_income()))
        .collect();
    let (best_form, tie_break_applied) =
        select_best(&totals).unwrap_or((TaxForm::PRIORITY[0], false));
    let description = describe(best_form, tie_break_applied, &totals);
    log::info!("{description}");

    Ok(ComparisonResult {
        tax_scale,
        linear_tax,
        lump_sum,
        best_form,
        tie_break_applied,
        description,
        warnings,
    })
}

/// Observations about the input that do not stop the calculation.
pub fn collect_warnings(scenario: &Scenario<'_>, params: &TaxYearParameters) -> Vec<String> {
    let mut warnings = Vec::new();
    let input = scenario.input;

    let mut revenue_by_year: BTreeMap<i32, Money> = BTreeMap::new();
    let mut lump_sum_by_year: BTreeMap<i32, Money> = BTreeMap::new();
    for m in &scenario.grid {
        let year = m.period.year();
        *revenue_by_year.entry(year).or_insert(Decimal::ZERO) += input.monthly_revenues[m.offset];
        *lump_sum_by_year.entry(year).or_insert(Decimal::ZERO) +=
            lump_sum::total_revenue(&input.lump_sum_revenues[m.offset]);
    }
    for (year, revenue) in &revenue_by_year {
        if *revenue > params.tax_book_revenue_limit {
            warnings.push(format!(
                "Revenue of {revenue} PLN in {year} exceeds the tax book limit of {} PLN",
                params.tax_book_revenue_limit
            ));
        }
    }
    for (year, revenue) in &lump_sum_by_year {
        if *revenue > params.lump_sum.revenue_limit {
            warnings.push(format!(
                "Lump-sum revenue of {revenue} PLN in {year} exceeds the limit of {} PLN",
                params.lump_sum.revenue_limit
            ));
        }
    }

    let loss_months = input
        .monthly_revenues
        .iter()
        .zip(&scenario.costs)
        .filter(|(revenue, cost)| *revenue < *cost)
        .count();
    if loss_months > 0 {
        warnings.push(format!(
            "{loss_months} month(s) have costs above revenue; no tax is due for them"
        ));
    }
    warnings
}
