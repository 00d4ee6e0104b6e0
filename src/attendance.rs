use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::EngineError;
use crate::models::{AttendanceMark, AttendanceStatus};
use crate::trend::PeriodBucket;

/// Tally of marks by status. All three keys are always present so consumers
/// never need defensive lookups.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCounts {
    pub present: usize,
    pub absent: usize,
    pub late: usize,
}

impl StatusCounts {
    fn record(&mut self, status: AttendanceStatus) {
        match status {
            AttendanceStatus::Present => self.present += 1,
            AttendanceStatus::Absent => self.absent += 1,
            AttendanceStatus::Late => self.late += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.present + self.absent + self.late
    }

    fn rate(&self) -> f64 {
        100.0 * self.present as f64 / self.total() as f64
    }
}

/// Percentage of marked days with status `present`, over all marked days.
///
/// Order-independent, and an error on empty input: a student with no marks
/// has no rate, which is not the same as a rate of zero.
pub fn attendance_rate(marks: &[AttendanceMark]) -> Result<f64, EngineError> {
    if marks.is_empty() {
        return Err(EngineError::EmptyInput {
            what: "attendance rate",
        });
    }
    Ok(count_by_status(marks).rate())
}

pub fn count_by_status(marks: &[AttendanceMark]) -> StatusCounts {
    let mut counts = StatusCounts::default();
    for mark in marks {
        counts.record(mark.status);
    }
    counts
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAttendance {
    pub month: String,
    pub present: usize,
    pub absent: usize,
    pub late: usize,
    pub attendance_rate: f64,
}

/// Per-calendar-month tallies, one bucket per month that has at least one
/// mark.
///
/// Buckets are keyed and ordered by the first day of their month, so the
/// output is chronological regardless of input order or what the labels
/// would sort like as strings.
pub fn monthly_breakdown(marks: &[AttendanceMark]) -> Vec<MonthlyAttendance> {
    let mut months: BTreeMap<NaiveDate, StatusCounts> = BTreeMap::new();
    for mark in marks {
        let first = mark.date.with_day(1).unwrap_or(mark.date);
        months.entry(first).or_default().record(mark.status);
    }
    months
        .into_iter()
        .map(|(first, counts)| MonthlyAttendance {
            month: PeriodBucket::month_of(first).label,
            present: counts.present,
            absent: counts.absent,
            late: counts.late,
            // Buckets only exist for months with marks, so the total is
            // never zero here.
            attendance_rate: counts.rate(),
        })
        .collect()
}
