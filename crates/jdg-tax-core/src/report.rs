//! Presentation of a comparison: per-form series rounded to two places,
//! wrapped in the standard computation envelope.

use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::contributions::stage::ContributionStage;
use crate::params::{LumpSumRate, TaxYearParameters};
use crate::simulation::compare::{compare_tax_forms, ComparisonResult};
use crate::simulation::input::TaxComparisonInput;
use crate::simulation::regime::{MonthlyResult, RegimeSimulation};
use crate::simulation::summary::PeriodSummary;
use crate::tax_forms::TaxForm;
use crate::types::{round_money, with_metadata, ComputationOutput, Money};
use crate::TaxEngineResult;

/// Sixty-month series for one tax form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxFormReport {
    pub form_name: TaxForm,
    pub months: Vec<String>,
    pub stages: Vec<ContributionStage>,
    pub monthly_revenue: Vec<Money>,
    pub monthly_costs: Vec<Money>,
    pub monthly_income: Vec<Money>,
    pub monthly_social_contribution: Vec<Money>,
    pub monthly_health_contribution: Vec<Money>,
    pub monthly_tax: Vec<Money>,
    pub monthly_net_income: Vec<Money>,
    pub summaries: Vec<PeriodSummary>,
}

impl TaxFormReport {
    pub fn from_simulation(sim: &RegimeSimulation) -> Self {
        let series = |f: fn(&MonthlyResult) -> Money| -> Vec<Money> {
            sim.months.iter().map(|m| round_money(f(m))).collect()
        };
        TaxFormReport {
            form_name: sim.form,
            months: sim.months.iter().map(|m| m.month.to_string()).collect(),
            stages: sim.months.iter().map(|m| m.stage).collect(),
            monthly_revenue: series(|m| m.revenue),
            monthly_costs: series(|m| m.costs),
            monthly_income: series(|m| m.income),
            monthly_social_contribution: series(|m| m.social_contribution),
            monthly_health_contribution: series(|m| m.health_contribution),
            monthly_tax: series(|m| m.tax),
            monthly_net_income: series(|m| m.net_income),
            summaries: sim.summaries.iter().map(PeriodSummary::rounded).collect(),
        }
    }
}

/// Output of a tax form comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub tax_scale: TaxFormReport,
    pub linear_tax: TaxFormReport,
    pub lump_sum: TaxFormReport,
    pub best_form: TaxForm,
    pub best_form_description: String,
    pub tie_break_applied: bool,
}

impl From<&ComparisonResult> for ComparisonReport {
    fn from(result: &ComparisonResult) -> Self {
        ComparisonReport {
            tax_scale: TaxFormReport::from_simulation(&result.tax_scale),
            linear_tax: TaxFormReport::from_simulation(&result.linear_tax),
            lump_sum: TaxFormReport::from_simulation(&result.lump_sum),
            best_form: result.best_form,
            best_form_description: result.description.clone(),
            tie_break_applied: result.tie_break_applied,
        }
    }
}

/// Compare the three tax forms over sixty months.
pub fn calculate_comparison(
    input: &TaxComparisonInput,
    params: &TaxYearParameters,
) -> TaxEngineResult<ComputationOutput<ComparisonReport>> {
    let start = Instant::now();
    let result = compare_tax_forms(input, params)?;
    let report = ComparisonReport::from(&result);

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Sixty-month comparison: tax scale, linear tax, lump sum with social and health contributions",
        &serde_json::json!({
            "base_month": input.base_month.to_string(),
            "business_start_date": input.business_start_date.to_string(),
            "monthly_fixed_cost": input.monthly_fixed_cost.to_string(),
            "one_time_costs": input.one_time_costs.len(),
            "tax_scale_accumulation": "year_to_date",
            "tie_break_order": TaxForm::PRIORITY.map(|f| f.id()),
        }),
        result.warnings.clone(),
        params.tax_year,
        elapsed,
        report,
    ))
}

/// The lump-sum rates a request may use
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateCatalogue {
    pub tax_year: i32,
    pub rates: Vec<LumpSumRate>,
    pub note: String,
}

pub fn rate_catalogue(params: &TaxYearParameters) -> RateCatalogue {
    RateCatalogue {
        tax_year: params.tax_year,
        rates: params.lump_sum.rates.clone(),
        note: "The applicable rate depends on the kind of activity; revenue is not classified automatically."
            .into(),
    }
}
