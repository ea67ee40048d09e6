//! Social-contribution stage by elapsed months since business start.
//!
//! The start month is elapsed month 0 whatever its day. With the 2025
//! windows: months 0-5 are start relief, 6-29 preferential, 30 onwards full.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{GridMonth, YearMonth};
use crate::error::TaxEngineError;
use crate::params::SocialParams;
use crate::TaxEngineResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionStage {
    /// No social contribution due
    StartRelief,
    /// Reduced contribution base
    Preferential,
    Full,
}

/// Whole calendar months from the business-start month to `target`.
pub fn months_since_start(business_start: NaiveDate, target: YearMonth) -> TaxEngineResult<u32> {
    let start = YearMonth::from_date(business_start);
    let elapsed = target.ordinal() - start.ordinal();
    if elapsed < 0 {
        return Err(TaxEngineError::InvalidDateOrdering {
            field: "business_start_date".into(),
            reason: format!("month {target} precedes business start {business_start}"),
        });
    }
    u32::try_from(elapsed).map_err(|_| TaxEngineError::InvalidInput {
        field: "business_start_date".into(),
        reason: format!("{elapsed} elapsed months is out of range"),
    })
}

/// Stage for an elapsed-month count. Window ends are exclusive.
pub fn stage_for_elapsed(elapsed: u32, params: &SocialParams) -> ContributionStage {
    let relief_end = params.relief_months;
    let preferential_end = relief_end.saturating_add(params.preferential_months);
    if elapsed < relief_end {
        ContributionStage::StartRelief
    } else if elapsed < preferential_end {
        ContributionStage::Preferential
    } else {
        ContributionStage::Full
    }
}

pub fn resolve_stage(
    business_start: NaiveDate,
    target: YearMonth,
    params: &SocialParams,
) -> TaxEngineResult<ContributionStage> {
    let elapsed = months_since_start(business_start, target)?;
    Ok(stage_for_elapsed(elapsed, params))
}

/// Stage of every month in the grid.
pub fn stage_schedule(
    business_start: NaiveDate,
    grid: &[GridMonth],
    params: &SocialParams,
) -> TaxEngineResult<Vec<ContributionStage>> {
    grid.iter()
        .map(|m| resolve_stage(business_start, m.period, params))
        .collect()
}
