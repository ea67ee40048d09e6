use serde::{Deserialize, Serialize};

use crate::simulation::regime::MonthlyResult;
use crate::types::{round_money, Money};

/// Prefix lengths reported for every tax form, with their labels.
pub const SUMMARY_PERIODS: [(usize, &str); 4] = [
    (6, "After 6 months (end of start relief)"),
    (12, "After 12 months (first year)"),
    (30, "After 30 months (end of preferential contributions)"),
    (60, "After 60 months (5 years)"),
];

/// Totals over the first `months_count` months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodSummary {
    pub label: String,
    pub months_count: usize,
    pub revenue: Money,
    pub costs: Money,
    pub income: Money,
    pub social_contributions: Money,
    pub health_contributions: Money,
    pub tax: Money,
    /// Social plus health contributions
    pub total_contributions: Money,
    /// Contributions plus tax
    pub total_burden: Money,
    pub net_income: Money,
}

impl PeriodSummary {
    pub fn rounded(&self) -> Self {
        PeriodSummary {
            label: self.label.clone(),
            months_count: self.months_count,
            revenue: round_money(self.revenue),
            costs: round_money(self.costs),
            income: round_money(self.income),
            social_contributions: round_money(self.social_contributions),
            health_contributions: round_money(self.health_contributions),
            tax: round_money(self.tax),
            total_contributions: round_money(self.total_contributions),
            total_burden: round_money(self.total_burden),
            net_income: round_money(self.net_income),
        }
    }
}

/// Sum the leading `months_count` months. Shorter series are summed whole.
pub fn summarize(label: &str, months: &[MonthlyResult], months_count: usize) -> PeriodSummary {
    let period = &months[..months_count.min(months.len())];
    let total = |f: fn(&MonthlyResult) -> Money| -> Money { period.iter().map(f).sum() };

    let social = total(|m| m.social_contribution);
    let health = total(|m| m.health_contribution);
    let tax = total(|m| m.tax);

    PeriodSummary {
        label: label.to_string(),
        months_count: period.len(),
        revenue: total(|m| m.revenue),
        costs: total(|m| m.costs),
        income: total(|m| m.income),
        social_contributions: social,
        health_contributions: health,
        tax,
        total_contributions: social + health,
        total_burden: social + health + tax,
        net_income: total(|m| m.net_income),
    }
}

pub fn period_summaries(months: &[MonthlyResult]) -> Vec<PeriodSummary> {
    SUMMARY_PERIODS
        .iter()
        .map(|(count, label)| summarize(label, months, *count))
        .collect()
}
