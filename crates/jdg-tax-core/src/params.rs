//! Statutory parameters for one tax year.
//!
//! Every calculator receives a `&TaxYearParameters` explicitly. Nothing in the
//! engine reads tax constants from global state, so a different year's set can
//! be deserialised from JSON and passed in without touching calculation code.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::TaxEngineError;
use crate::types::{Money, Rate};
use crate::TaxEngineResult;

/// Progressive tax scale: allowance plus two marginal rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxScaleParams {
    /// Income taxed at 0%
    pub tax_free_allowance: Money,
    /// Upper bound of the lower bracket
    pub threshold: Money,
    pub rate_low: Rate,
    pub rate_high: Rate,
}

/// Linear (flat) tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearParams {
    pub rate: Rate,
}

/// One admissible lump-sum rate and the activity it covers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LumpSumRate {
    pub rate: Rate,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LumpSumParams {
    /// Rates a taxpayer may apply to recorded revenue
    pub rates: Vec<LumpSumRate>,
    /// Annual revenue ceiling for staying on the lump sum
    pub revenue_limit: Money,
}

/// Social (pension, disability, sickness, accident, labour fund) contributions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialParams {
    /// Length of the start-relief window, in elapsed months
    pub relief_months: u32,
    /// Length of the preferential window that follows start relief
    pub preferential_months: u32,
    pub relief_monthly: Money,
    pub preferential_monthly: Money,
    pub full_monthly: Money,
}

/// Health contribution rules per tax form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthParams {
    /// Share of income for the tax scale
    pub scale_rate: Rate,
    /// Share of income for the linear tax
    pub linear_rate: Rate,
    pub minimum_wage: Money,
    /// Fraction of the minimum wage forming the floor base
    pub floor_base_ratio: Rate,
    /// Rate applied to the floor base
    pub floor_rate: Rate,
    pub average_salary: Money,
    /// Fraction of the average salary forming the lump-sum base
    pub lump_sum_base_ratio: Rate,
    pub lump_sum_rate: Rate,
}

impl HealthParams {
    /// Monthly minimum for the tax scale and linear tax.
    pub fn monthly_floor(&self) -> Money {
        self.minimum_wage * self.floor_base_ratio * self.floor_rate
    }

    /// Fixed monthly lump-sum health contribution.
    pub fn lump_sum_monthly(&self) -> Money {
        self.average_salary * self.lump_sum_base_ratio * self.lump_sum_rate
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxYearParameters {
    pub tax_year: i32,
    pub tax_scale: TaxScaleParams,
    pub linear: LinearParams,
    pub lump_sum: LumpSumParams,
    /// Annual revenue ceiling for simplified book keeping
    pub tax_book_revenue_limit: Money,
    pub social: SocialParams,
    pub health: HealthParams,
}

impl TaxYearParameters {
    /// Rules in force for 2025.
    pub fn year_2025() -> Self {
        let rate = |rate: Rate, description: &str| LumpSumRate {
            rate,
            description: description.to_string(),
        };
        TaxYearParameters {
            tax_year: 2025,
            tax_scale: TaxScaleParams {
                tax_free_allowance: dec!(30000),
                threshold: dec!(120000),
                rate_low: dec!(0.12),
                rate_high: dec!(0.32),
            },
            linear: LinearParams { rate: dec!(0.19) },
            lump_sum: LumpSumParams {
                rates: vec![
                    rate(dec!(0.02), "Sale of goods and industrial products"),
                    rate(dec!(0.03), "Transport services, manufacturing"),
                    rate(dec!(0.055), "Software and IT services"),
                    rate(dec!(0.085), "Catering and trade"),
                    rate(dec!(0.10), "Liberal professions up to the revenue limit"),
                    rate(dec!(0.12), "Renovation and construction services"),
                    rate(dec!(0.14), "Liberal professions above the revenue limit"),
                    rate(dec!(0.15), "Intangible services, consulting"),
                    rate(dec!(0.17), "Liberal professions, top rate"),
                ],
                revenue_limit: dec!(2000000),
            },
            tax_book_revenue_limit: dec!(2000000),
            social: SocialParams {
                relief_months: 6,
                preferential_months: 24,
                relief_monthly: Decimal::ZERO,
                preferential_monthly: dec!(626.49),
                full_monthly: dec!(1860.88),
            },
            health: HealthParams {
                scale_rate: dec!(0.09),
                linear_rate: dec!(0.049),
                minimum_wage: dec!(4666),
                floor_base_ratio: dec!(0.75),
                floor_rate: dec!(0.09),
                average_salary: dec!(8213.76),
                lump_sum_base_ratio: dec!(0.75),
                lump_sum_rate: dec!(0.09),
            },
        }
    }

    pub fn is_allowed_lump_sum_rate(&self, rate: Rate) -> bool {
        self.lump_sum.rates.iter().any(|r| r.rate == rate)
    }

    /// Check the parameter set for internal consistency.
    pub fn validate(&self) -> TaxEngineResult<()> {
        let invalid = |field: &str, reason: &str| {
            Err(TaxEngineError::InvalidInput {
                field: field.into(),
                reason: reason.into(),
            })
        };
        let is_fraction = |r: Rate| r > Decimal::ZERO && r < Decimal::ONE;

        let scale = &self.tax_scale;
        if scale.tax_free_allowance < Decimal::ZERO {
            return invalid("tax_scale.tax_free_allowance", "must not be negative");
        }
        if scale.threshold <= scale.tax_free_allowance {
            return invalid("tax_scale.threshold", "must exceed the tax-free allowance");
        }
        if !is_fraction(scale.rate_low) || !is_fraction(scale.rate_high) {
            return invalid("tax_scale", "rates must lie strictly between 0 and 1");
        }
        if scale.rate_high <= scale.rate_low {
            return invalid("tax_scale.rate_high", "must exceed rate_low");
        }
        if !is_fraction(self.linear.rate) {
            return invalid("linear.rate", "must lie strictly between 0 and 1");
        }
        if self.lump_sum.rates.is_empty() {
            return invalid("lump_sum.rates", "at least one rate is required");
        }
        if let Some(bad) = self.lump_sum.rates.iter().find(|r| !is_fraction(r.rate)) {
            return Err(TaxEngineError::InvalidRate {
                field: "lump_sum.rates".into(),
                rate: bad.rate,
                reason: "must lie strictly between 0 and 1".into(),
            });
        }

        let social = &self.social;
        if social.relief_months == 0 || social.preferential_months == 0 {
            return invalid("social", "stage windows must be at least one month long");
        }
        if !(social.full_monthly > social.preferential_monthly
            && social.preferential_monthly >= social.relief_monthly
            && social.relief_monthly >= Decimal::ZERO)
        {
            return invalid(
                "social",
                "monthly amounts must satisfy full > preferential >= relief >= 0",
            );
        }

        let health = &self.health;
        if health.scale_rate <= Decimal::ZERO || health.linear_rate <= Decimal::ZERO {
            return invalid("health", "income rates must be positive");
        }
        if health.monthly_floor() <= Decimal::ZERO {
            return invalid("health", "monthly floor must be positive");
        }
        if health.lump_sum_monthly() <= Decimal::ZERO {
            return invalid("health", "lump-sum monthly amount must be positive");
        }
        Ok(())
    }
}

impl Default for TaxYearParameters {
    fn default() -> Self {
        Self::year_2025()
    }
}
