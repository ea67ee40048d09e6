//! Health contribution.
//!
//! Assessed per calendar year and spread over the months the business was
//! active in that year inside the horizon:
//!
//! - tax scale: 9% of annual income, at least the monthly floor per active month
//! - linear tax: 4.9% of annual income, same floor
//! - lump sum: a fixed amount per active month, independent of revenue

use rust_decimal::Decimal;

use crate::calendar::{months_by_year, GridMonth};
use crate::params::HealthParams;
use crate::tax_forms::TaxForm;
use crate::types::Money;

/// Health contribution for one contribution year.
pub fn annual_contribution(
    form: TaxForm,
    annual_income: Money,
    active_months: u32,
    params: &HealthParams,
) -> Money {
    let months = Decimal::from(active_months);
    let floor = params.monthly_floor() * months;
    match form {
        TaxForm::TaxScale => (annual_income * params.scale_rate).max(floor),
        TaxForm::LinearTax => (annual_income * params.linear_rate).max(floor),
        TaxForm::LumpSum => params.lump_sum_monthly() * months,
    }
}

/// Annual lump-sum health contribution for `months` months of activity.
pub fn annual_lump_sum(months: u32, params: &HealthParams) -> Money {
    annual_contribution(TaxForm::LumpSum, Decimal::ZERO, months, params)
}

/// Spread an annual amount evenly over `months` months.
///
/// The last month takes the division remainder so the parts always add up to
/// `annual` exactly.
pub fn apportion(annual: Money, months: usize) -> Vec<Money> {
    if months == 0 {
        return Vec::new();
    }
    let share = annual / Decimal::from(months);
    let mut parts = vec![share; months - 1];
    parts.push(annual - share * Decimal::from(months - 1));
    parts
}

/// Monthly health contribution for every grid month.
///
/// `incomes` is indexed by grid offset and only matters for the tax scale and
/// the linear tax.
pub fn health_schedule(
    form: TaxForm,
    grid: &[GridMonth],
    incomes: &[Money],
    params: &HealthParams,
) -> Vec<Money> {
    let mut schedule = vec![Decimal::ZERO; grid.len()];
    for (_, offsets) in months_by_year(grid) {
        let annual_income: Money = offsets.iter().map(|&i| incomes[i]).sum();
        let annual = annual_contribution(form, annual_income, offsets.len() as u32, params);
        for (&offset, part) in offsets.iter().zip(apportion(annual, offsets.len())) {
            schedule[offset] = part;
        }
    }
    schedule
}
