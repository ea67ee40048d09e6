use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::params::TaxScaleParams;
use crate::types::Money;

/// Tax due on a cumulative income under the two-bracket scale.
///
/// Zero up to the allowance, `rate_low` between the allowance and the
/// threshold, `rate_high` above the threshold. Continuous in `income`.
pub fn tax_on_income(income: Money, params: &TaxScaleParams) -> Money {
    if income <= params.tax_free_allowance {
        return Decimal::ZERO;
    }
    let lower_top = income.min(params.threshold);
    let lower = (lower_top - params.tax_free_allowance) * params.rate_low;
    let upper = if income > params.threshold {
        (income - params.threshold) * params.rate_high
    } else {
        Decimal::ZERO
    };
    lower + upper
}

/// Annual tax for a full-year income.
pub fn annual_tax(annual_income: Money, params: &TaxScaleParams) -> Money {
    tax_on_income(annual_income, params)
}

/// Year-to-date state carried from one month to the next.
///
/// The scale applies to the calendar year, so the accumulator resets when the
/// month loop crosses into January.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearToDate {
    pub year: i32,
    pub income: Money,
    pub tax_paid: Money,
}

impl YearToDate {
    pub fn opening(year: i32) -> Self {
        YearToDate {
            year,
            income: Decimal::ZERO,
            tax_paid: Decimal::ZERO,
        }
    }

    fn rolled_to(self, year: i32) -> Self {
        if year == self.year {
            self
        } else {
            Self::opening(year)
        }
    }
}

/// Tax for one month as the marginal increase of year-to-date tax.
///
/// Returns the month's tax and the accumulator for the next month. The
/// month's tax is `tax(ytd income) - tax already paid this year`, floored at
/// zero, rather than `tax(cum_t) - tax(cum_{t-1})`. The two agree while
/// year-to-date income only grows. After a loss month the difference form
/// would charge again for income that was already taxed; subtracting tax
/// paid charges only once cumulative tax passes what was paid.
pub fn monthly_tax(
    ytd: YearToDate,
    period: YearMonth,
    income: Money,
    params: &TaxScaleParams,
) -> (Money, YearToDate) {
    let prior = ytd.rolled_to(period.year());
    let cumulative = prior.income + income;
    let due = (tax_on_income(cumulative, params) - prior.tax_paid).max(Decimal::ZERO);
    let next = YearToDate {
        year: prior.year,
        income: cumulative,
        tax_paid: prior.tax_paid + due,
    };
    (due, next)
}
