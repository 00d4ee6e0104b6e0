use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Grouping key for one reporting period: a human label plus the date the
/// period starts on. Ordering always uses the date, never the label --
/// "Dec 2024" must sort before "Jan 2025" even though the strings do not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodBucket {
    pub label: String,
    pub starts_on: NaiveDate,
}

impl PeriodBucket {
    /// Bucket for the calendar month containing `date`, labeled like
    /// "Mar 2025".
    pub fn month_of(date: NaiveDate) -> PeriodBucket {
        let starts_on = date.with_day(1).unwrap_or(date);
        PeriodBucket {
            label: starts_on.format("%b %Y").to_string(),
            starts_on,
        }
    }

    /// School-term bucket, labeled like "Term 2, 2025".
    pub fn term(name: &str, year: i32, starts_on: NaiveDate) -> PeriodBucket {
        PeriodBucket {
            label: format!("{}, {}", name, year),
            starts_on,
        }
    }
}

/// One aggregated value for one period, ready for a chart axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub period: PeriodBucket,
    pub value: f64,
}

/// Orders already-aggregated period values chronologically.
///
/// The sort is stable, so points sharing a start date keep their input
/// order. Periods with no contributing point stay absent: inserting a zero
/// would turn "no data" into "zero performance", so callers wanting a
/// continuous axis zero-fill explicitly on their side.
pub fn build_trend(mut points: Vec<TrendPoint>) -> Vec<TrendPoint> {
    points.sort_by_key(|p| p.period.starts_on);
    points
}
