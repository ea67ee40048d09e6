use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use jdg_tax_core::calendar::{YearMonth, HORIZON_MONTHS};
use jdg_tax_core::report;
use jdg_tax_core::simulation::TaxComparisonInput;
use jdg_tax_core::tax_forms::lump_sum::RevenueByRate;

use super::load_params;
use crate::input;

/// Arguments for the tax form comparison
#[derive(Args)]
pub struct CompareArgs {
    /// Path to JSON request file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a tax-year parameter file (defaults to 2025)
    #[arg(long)]
    pub params: Option<String>,

    /// Business start date, YYYY-MM-DD
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// First month of the horizon, YYYY-MM (defaults to the start month)
    #[arg(long)]
    pub base_month: Option<YearMonth>,

    /// Revenue earned every month
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// Recurring monthly cost
    #[arg(long)]
    pub fixed_cost: Option<Decimal>,

    /// Lump-sum rate applied to the whole monthly revenue, e.g. 0.085
    #[arg(long)]
    pub lump_sum_rate: Option<Decimal>,
}

pub fn run_compare(args: CompareArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(args.params.as_deref())?;

    let request: TaxComparisonInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        data
    } else {
        let start = args
            .start_date
            .ok_or("--start-date is required (or provide --input)")?;
        let revenue = args
            .revenue
            .ok_or("--revenue is required (or provide --input)")?;
        let rate = args
            .lump_sum_rate
            .ok_or("--lump-sum-rate is required (or provide --input)")?;

        let month: RevenueByRate = [(rate, revenue)].into_iter().collect();
        TaxComparisonInput {
            base_month: args
                .base_month
                .unwrap_or_else(|| YearMonth::from_date(start)),
            business_start_date: start,
            monthly_revenues: vec![revenue; HORIZON_MONTHS],
            monthly_fixed_cost: args.fixed_cost.unwrap_or(Decimal::ZERO),
            one_time_costs: Vec::new(),
            lump_sum_revenues: vec![month; HORIZON_MONTHS],
        }
    };

    let result = report::calculate_comparison(&request, &params)?;
    Ok(serde_json::to_value(result)?)
}
