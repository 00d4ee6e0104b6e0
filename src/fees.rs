use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::EngineError;
use crate::models::FeeRecord;
use crate::trend::PeriodBucket;

/// Totals across a set of billed fee lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeCollection {
    pub total_due: f64,
    pub total_paid: f64,
    pub outstanding: f64,
    /// Paid over due, as a percentage. `None` when nothing was due -- a rate
    /// over zero owed is meaningless, and reporting 100% would hide that.
    pub collection_rate: Option<f64>,
}

/// Sums due and paid amounts and derives the outstanding balance and
/// collection rate. Empty input is an error, same policy as [`crate::stats::average`].
pub fn collection_summary(records: &[FeeRecord]) -> Result<FeeCollection, EngineError> {
    if records.is_empty() {
        return Err(EngineError::EmptyInput {
            what: "fee collection",
        });
    }
    let total_due: f64 = records.iter().map(|r| r.due).sum();
    let total_paid: f64 = records.iter().map(|r| r.paid).sum();
    Ok(FeeCollection {
        total_due,
        total_paid,
        outstanding: total_due - total_paid,
        collection_rate: rate(total_paid, total_due),
    })
}

fn rate(paid: f64, due: f64) -> Option<f64> {
    if due > 0.0 {
        Some(100.0 * paid / due)
    } else {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCollection {
    pub month: String,
    pub amount_paid: f64,
    pub outstanding: f64,
    pub collection_rate: Option<f64>,
}

/// Per-billing-month paid and outstanding amounts, chronologically ordered
/// the same way as the attendance breakdown.
pub fn monthly_collection(records: &[FeeRecord]) -> Vec<MonthlyCollection> {
    let mut months: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    for record in records {
        let first = record.billed_on.with_day(1).unwrap_or(record.billed_on);
        let entry = months.entry(first).or_insert((0.0, 0.0));
        entry.0 += record.due;
        entry.1 += record.paid;
    }
    months
        .into_iter()
        .map(|(first, (due, paid))| MonthlyCollection {
            month: PeriodBucket::month_of(first).label,
            amount_paid: paid,
            outstanding: due - paid,
            collection_rate: rate(paid, due),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fee(y: i32, m: u32, d: u32, due: f64, paid: f64) -> FeeRecord {
        FeeRecord {
            billed_on: NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            due,
            paid,
        }
    }

    #[test]
    fn summary_totals_and_rate() {
        let records = vec![
            fee(2025, 1, 10, 10_000.0, 6_000.0),
            fee(2025, 1, 20, 5_000.0, 5_000.0),
            fee(2025, 2, 5, 8_000.0, 2_000.0),
        ];
        let summary = collection_summary(&records).unwrap();
        assert_eq!(summary.total_due, 23_000.0);
        assert_eq!(summary.total_paid, 13_000.0);
        assert_eq!(summary.outstanding, 10_000.0);
        let rate = summary.collection_rate.unwrap();
        assert!((rate - 100.0 * 13_000.0 / 23_000.0).abs() < 1e-9);
    }

    #[test]
    fn empty_ledger_is_an_error() {
        assert!(matches!(
            collection_summary(&[]),
            Err(EngineError::EmptyInput { .. })
        ));
    }

    #[test]
    fn zero_due_means_no_rate() {
        let summary = collection_summary(&[fee(2025, 1, 1, 0.0, 0.0)]).unwrap();
        assert_eq!(summary.collection_rate, None);
    }

    #[test]
    fn monthly_buckets_are_chronological_and_self_contained() {
        let records = vec![
            fee(2025, 2, 5, 8_000.0, 2_000.0),
            fee(2024, 12, 12, 4_000.0, 4_000.0),
            fee(2025, 1, 10, 10_000.0, 6_000.0),
            fee(2025, 1, 20, 5_000.0, 5_000.0),
        ];
        let months = monthly_collection(&records);
        let labels: Vec<&str> = months.iter().map(|m| m.month.as_str()).collect();
        assert_eq!(labels, ["Dec 2024", "Jan 2025", "Feb 2025"]);

        assert_eq!(months[0].amount_paid, 4_000.0);
        assert_eq!(months[0].outstanding, 0.0);
        assert_eq!(months[0].collection_rate, Some(100.0));

        assert_eq!(months[1].amount_paid, 11_000.0);
        assert_eq!(months[1].outstanding, 4_000.0);

        assert_eq!(months[2].amount_paid, 2_000.0);
        assert_eq!(months[2].outstanding, 6_000.0);
        assert_eq!(months[2].collection_rate, Some(25.0));
    }
}
