//! Input records the engine aggregates over.
//!
//! These are plain value types handed in by the caller's data-access layer,
//! already scoped to the right student, class or term. The engine never
//! creates, stores or mutates them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One recorded score for a subject in a term, on the 0-100 scale.
///
/// Re-entering a grade supersedes the old record upstream; a collection
/// reaching the engine holds the records that count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRecord {
    pub subject: String,
    pub term: String,
    pub score: f64,
}

/// Daily attendance status. At most one mark per calendar day per student;
/// the storing layer upserts, so duplicates never reach the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceMark {
    pub date: NaiveDate,
    pub status: AttendanceStatus,
}

/// One billed fee line together with what has been paid against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeRecord {
    pub billed_on: NaiveDate,
    pub due: f64,
    pub paid: f64,
}
