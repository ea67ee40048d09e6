use rust_decimal::Decimal;

use crate::params::LinearParams;
use crate::types::Money;

/// Flat tax on one month's income. Loss months owe nothing.
pub fn monthly_tax(income: Money, params: &LinearParams) -> Money {
    (income * params.rate).max(Decimal::ZERO)
}

/// Flat tax on a full-year income.
pub fn annual_tax(annual_income: Money, params: &LinearParams) -> Money {
    monthly_tax(annual_income, params)
}
