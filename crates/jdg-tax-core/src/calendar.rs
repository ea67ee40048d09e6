//! Calendar months and the simulation month grid.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::TaxEngineError;
use crate::TaxEngineResult;

/// Length of every simulation, in months.
pub const HORIZON_MONTHS: usize = 60;

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> TaxEngineResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(TaxEngineError::InvalidInput {
                field: "month".into(),
                reason: format!("month {month} is outside 1..=12"),
            });
        }
        Ok(YearMonth { year, month })
    }

    /// The month containing `date`; the day is discarded.
    pub fn from_date(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Months since year 0; differences give elapsed whole months.
    pub fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn from_ordinal(ordinal: i64) -> Self {
        YearMonth {
            year: ordinal.div_euclid(12) as i32,
            month: (ordinal.rem_euclid(12) + 1) as u32,
        }
    }

    pub fn plus_months(&self, months: usize) -> Self {
        Self::from_ordinal(self.ordinal() + months as i64)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = TaxEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || TaxEngineError::InvalidInput {
            field: "month".into(),
            reason: format!("'{s}' is not in YYYY-MM format"),
        };
        let (year, month) = s.trim().split_once('-').ok_or_else(malformed)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(malformed());
        }
        let year: i32 = year.parse().map_err(|_| malformed())?;
        let month: u32 = month.parse().map_err(|_| malformed())?;
        YearMonth::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = TaxEngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<YearMonth> for String {
    fn from(value: YearMonth) -> Self {
        value.to_string()
    }
}

/// One point of the simulation timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMonth {
    pub period: YearMonth,
    /// 0-based position from the horizon's first month
    pub offset: usize,
}

/// Consecutive calendar months starting at `base`.
pub fn build_grid(base: YearMonth, count: usize) -> Vec<GridMonth> {
    (0..count)
        .map(|offset| GridMonth {
            period: base.plus_months(offset),
            offset,
        })
        .collect()
}

/// Group grid offsets by calendar year, preserving order.
pub fn months_by_year(grid: &[GridMonth]) -> Vec<(i32, Vec<usize>)> {
    let mut years: Vec<(i32, Vec<usize>)> = Vec::new();
    for m in grid {
        let year = m.period.year();
        if let Some((last_year, offsets)) = years.last_mut() {
            if *last_year == year {
                offsets.push(m.offset);
                continue;
            }
        }
        years.push((year, vec![m.offset]));
    }
    years
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(s: &str) -> YearMonth {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let m = ym("2025-03");
        assert_eq!(m.year(), 2025);
        assert_eq!(m.month(), 3);
        assert_eq!(m.to_string(), "2025-03");
    }

    #[test]
    fn test_parse_rejects_bad_labels() {
        for bad in ["2025-13", "2025-00", "2025/01", "25-01", "2025-1", ""] {
            assert!(bad.parse::<YearMonth>().is_err(), "{bad} should fail");
        }
    }

    #[test]
    fn test_grid_crosses_year_boundary() {
        let grid = build_grid(ym("2025-11"), 4);
        let labels: Vec<String> = grid.iter().map(|m| m.period.to_string()).collect();
        assert_eq!(labels, vec!["2025-11", "2025-12", "2026-01", "2026-02"]);
        assert_eq!(grid[3].offset, 3);
    }

    #[test]
    fn test_full_horizon_grid() {
        let grid = build_grid(ym("2025-01"), HORIZON_MONTHS);
        assert_eq!(grid.len(), 60);
        assert_eq!(grid[0].period, ym("2025-01"));
        assert_eq!(grid[59].period, ym("2029-12"));
    }

    #[test]
    fn test_months_by_year_partial_years() {
        let grid = build_grid(ym("2025-07"), HORIZON_MONTHS);
        let years = months_by_year(&grid);
        assert_eq!(years.len(), 6);
        assert_eq!(years[0].0, 2025);
        assert_eq!(years[0].1.len(), 6);
        assert_eq!(years[5].0, 2030);
        assert_eq!(years[5].1, vec![54, 55, 56, 57, 58, 59]);
    }

    #[test]
    fn test_serde_as_string() {
        let m: YearMonth = serde_json::from_str("\"2030-06\"").unwrap();
        assert_eq!(m, ym("2030-06"));
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"2030-06\"");
        assert!(serde_json::from_str::<YearMonth>("\"June\"").is_err());
    }

    #[test]
    fn test_from_date_drops_day() {
        let d = NaiveDate::from_ymd_opt(2025, 2, 17).unwrap();
        assert_eq!(YearMonth::from_date(d), ym("2025-02"));
    }
}
