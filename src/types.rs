use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::LoanError;

/// calendar month label, ordered by year then month
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1 = january
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn from_date<D: Datelike>(date: &D) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self::from_date(&dt.date_naive())
    }

    /// label for the n-th scheduled month (1-based) of a schedule starting in january of `start_year`
    pub fn for_schedule_month(start_year: i32, month_index: u32) -> Self {
        let offset = month_index.saturating_sub(1);
        Self {
            year: start_year + (offset / 12) as i32,
            month: offset % 12 + 1,
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = LoanError;

    /// parse `YYYY-MM`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(&format!("{}-01", s.trim()), "%Y-%m-%d")
            .map(|date| YearMonth::from_date(&date))
            .map_err(|e| LoanError::invalid("visible_from", format!("expected YYYY-MM ({})", e)))
    }
}

/// denominator for the cumulative "percent of loan paid" figure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentBasis {
    /// principal before the one-time prepayment is netted out; the one-time
    /// prepayment counts as already paid
    #[default]
    OriginalPrincipal,
    /// the amortized principal; only scheduled flows count
    AmortizedPrincipal,
}
