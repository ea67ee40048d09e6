use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::{build_grid, GridMonth, YearMonth, HORIZON_MONTHS};
use crate::contributions::stage::{stage_schedule, ContributionStage};
use crate::error::TaxEngineError;
use crate::params::TaxYearParameters;
use crate::tax_forms::lump_sum::{self, RevenueByRate};
use crate::types::{Money, MAX_AMOUNT};
use crate::TaxEngineResult;

/// A cost booked once, in the month at `month_index`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneTimeCost {
    /// 0-based offset into the horizon
    pub month_index: usize,
    pub amount: Money,
}

/// Input for a sixty-month tax form comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxComparisonInput {
    /// First month of the horizon
    pub base_month: YearMonth,
    /// Registration date of the business
    pub business_start_date: NaiveDate,
    /// Gross revenue per month for the tax scale and the linear tax
    pub monthly_revenues: Vec<Money>,
    /// Cost recurring every month
    pub monthly_fixed_cost: Money,
    #[serde(default)]
    pub one_time_costs: Vec<OneTimeCost>,
    /// Revenue per month split by lump-sum rate
    pub lump_sum_revenues: Vec<RevenueByRate>,
}

impl TaxComparisonInput {
    /// Check every constraint before any simulation runs.
    pub fn validate(&self, params: &TaxYearParameters) -> TaxEngineResult<()> {
        let start = YearMonth::from_date(self.business_start_date);
        if self.base_month < start {
            return Err(TaxEngineError::InvalidDateOrdering {
                field: "base_month".into(),
                reason: format!(
                    "base month {} precedes business start {}",
                    self.base_month, self.business_start_date
                ),
            });
        }

        check_horizon("monthly_revenues", self.monthly_revenues.len())?;
        check_horizon("lump_sum_revenues", self.lump_sum_revenues.len())?;

        for (i, revenue) in self.monthly_revenues.iter().enumerate() {
            check_amount(&format!("monthly_revenues[{i}]"), *revenue)?;
        }
        check_amount("monthly_fixed_cost", self.monthly_fixed_cost)?;

        for (i, cost) in self.one_time_costs.iter().enumerate() {
            if cost.month_index >= HORIZON_MONTHS {
                return Err(TaxEngineError::InvalidInput {
                    field: format!("one_time_costs[{i}].month_index"),
                    reason: format!(
                        "month index {} is outside 0..{HORIZON_MONTHS}",
                        cost.month_index
                    ),
                });
            }
            check_amount(&format!("one_time_costs[{i}].amount"), cost.amount)?;
        }

        for (i, month) in self.lump_sum_revenues.iter().enumerate() {
            lump_sum::validate_revenue(month, &format!("lump_sum_revenues[{i}]"), params)?;
        }
        Ok(())
    }

    /// Cost of every horizon month: the fixed cost plus that month's one-time costs.
    pub fn monthly_costs(&self) -> Vec<Money> {
        let mut costs = vec![self.monthly_fixed_cost; HORIZON_MONTHS];
        for cost in &self.one_time_costs {
            if let Some(slot) = costs.get_mut(cost.month_index) {
                *slot += cost.amount;
            }
        }
        costs
    }
}

fn check_horizon(field: &str, actual: usize) -> TaxEngineResult<()> {
    if actual != HORIZON_MONTHS {
        return Err(TaxEngineError::InvalidHorizonLength {
            field: field.into(),
            expected: HORIZON_MONTHS,
            actual,
        });
    }
    Ok(())
}

/// Amounts must be non-negative and at most [`MAX_AMOUNT`].
pub fn check_amount(field: &str, value: Money) -> TaxEngineResult<()> {
    if value < Decimal::ZERO {
        return Err(TaxEngineError::NegativeInput {
            field: field.into(),
            value,
        });
    }
    if value > MAX_AMOUNT {
        return Err(TaxEngineError::InvalidInput {
            field: field.into(),
            reason: format!("{value} exceeds the largest accepted amount {MAX_AMOUNT}"),
        });
    }
    Ok(())
}

/// A validated request with everything the regimes share.
#[derive(Debug, Clone)]
pub struct Scenario<'a> {
    pub input: &'a TaxComparisonInput,
    pub grid: Vec<GridMonth>,
    pub stages: Vec<ContributionStage>,
    pub costs: Vec<Money>,
}

impl<'a> Scenario<'a> {
    pub fn prepare(
        input: &'a TaxComparisonInput,
        params: &TaxYearParameters,
    ) -> TaxEngineResult<Self> {
        input.validate(params)?;
        let grid = build_grid(input.base_month, HORIZON_MONTHS);
        let stages = stage_schedule(input.business_start_date, &grid, &params.social)?;
        Ok(Scenario {
            input,
            grid,
            stages,
            costs: input.monthly_costs(),
        })
    }
}
