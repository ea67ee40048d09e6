//! Lump sum on recorded revenue.
//!
//! Revenue is split by rate; each bucket is taxed on its own and the results
//! are added. Costs never enter the base.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::error::TaxEngineError;
use crate::params::TaxYearParameters;
use crate::types::{Money, Rate, MAX_AMOUNT};
use crate::TaxEngineResult;

/// Revenue recorded in one month, keyed by the lump-sum rate it falls under.
pub type RevenueByRate = BTreeMap<Rate, Money>;

/// Tax for one month: the sum of `amount * rate` over every bucket.
pub fn monthly_tax(revenue_by_rate: &RevenueByRate) -> Money {
    revenue_by_rate
        .iter()
        .map(|(rate, amount)| *amount * *rate)
        .sum()
}

pub fn total_revenue(revenue_by_rate: &RevenueByRate) -> Money {
    revenue_by_rate.values().copied().sum()
}

/// Add up several months' buckets rate by rate.
pub fn aggregate_by_rate<'a, I>(months: I) -> RevenueByRate
where
    I: IntoIterator<Item = &'a RevenueByRate>,
{
    let mut totals = RevenueByRate::new();
    for month in months {
        for (rate, amount) in month {
            *totals.entry(*rate).or_insert(Decimal::ZERO) += *amount;
        }
    }
    totals
}

/// Reject rates outside the catalogue and amounts that are negative or above
/// [`MAX_AMOUNT`].
pub fn validate_revenue(
    revenue_by_rate: &RevenueByRate,
    field: &str,
    params: &TaxYearParameters,
) -> TaxEngineResult<()> {
    for (rate, amount) in revenue_by_rate {
        if *rate < Decimal::ZERO {
            return Err(TaxEngineError::InvalidRate {
                field: field.to_string(),
                rate: *rate,
                reason: "rate must not be negative".into(),
            });
        }
        if !params.is_allowed_lump_sum_rate(*rate) {
            return Err(TaxEngineError::InvalidRate {
                field: field.to_string(),
                rate: *rate,
                reason: format!("not an allowed lump-sum rate for {}", params.tax_year),
            });
        }
        if *amount < Decimal::ZERO {
            return Err(TaxEngineError::NegativeInput {
                field: format!("{field}[{rate}]"),
                value: *amount,
            });
        }
        if *amount > MAX_AMOUNT {
            return Err(TaxEngineError::InvalidInput {
                field: format!("{field}[{rate}]"),
                reason: format!("{amount} exceeds the largest accepted amount {MAX_AMOUNT}"),
            });
        }
    }
    Ok(())
}
