use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::error::EngineError;
use crate::grade::{grade_for, LetterGrade, GRADES};
use crate::models::ScoredRecord;

/// Histogram over the twelve-grade scale.
///
/// Every grade key is always present, zero-filled, so consumers never need
/// defensive lookups. Serializes as a map in scale order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GradeDistribution {
    counts: [usize; 12],
}

impl GradeDistribution {
    pub fn record(&mut self, grade: LetterGrade) {
        self.counts[grade as usize] += 1;
    }

    pub fn count(&self, grade: LetterGrade) -> usize {
        self.counts[grade as usize]
    }

    /// Number of records counted; always equals the length of the input
    /// collection the distribution was built from.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (LetterGrade, usize)> + '_ {
        GRADES.into_iter().map(|g| (g, self.count(g)))
    }
}

impl Serialize for GradeDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(GRADES.len()))?;
        for (grade, count) in self.iter() {
            map.serialize_entry(grade.as_str(), &count)?;
        }
        map.end()
    }
}

/// Arithmetic mean of the scores.
///
/// Empty input is an error, never zero: "no data" must stay distinguishable
/// from a genuine zero average all the way to the screen.
pub fn average(records: &[ScoredRecord]) -> Result<f64, EngineError> {
    if records.is_empty() {
        return Err(EngineError::EmptyInput { what: "average" });
    }
    let sum: f64 = records.iter().map(|r| r.score).sum();
    Ok(sum / records.len() as f64)
}

/// Middle score, or the mean of the two middle scores for even counts.
pub fn median_score(records: &[ScoredRecord]) -> Result<f64, EngineError> {
    if records.is_empty() {
        return Err(EngineError::EmptyInput { what: "median" });
    }
    let mut sorted: Vec<f64> = records.iter().map(|r| r.score).collect();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    let n = sorted.len();
    Ok(if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[(n / 2) - 1] + sorted[n / 2]) / 2.0
    })
}

/// Buckets every record's derived letter grade. The letter is recomputed
/// from the score each time; nothing is read from the record but the number.
pub fn grade_distribution(records: &[ScoredRecord]) -> Result<GradeDistribution, EngineError> {
    let mut dist = GradeDistribution::default();
    for record in records {
        dist.record(grade_for(record.score)?);
    }
    Ok(dist)
}

/// The grade holding the largest bucket.
///
/// Ties go to the better grade: the scale is declared best-first, so a
/// strict-maximum scan settles ties without leaning on any map iteration
/// order. An all-zero distribution has no answer.
pub fn most_common_grade(dist: &GradeDistribution) -> Option<LetterGrade> {
    let mut best: Option<(LetterGrade, usize)> = None;
    for (grade, count) in dist.iter() {
        if count > 0 && best.map(|(_, c)| count > c).unwrap_or(true) {
            best = Some((grade, count));
        }
    }
    best.map(|(grade, _)| grade)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupAverage {
    pub group: String,
    pub average: f64,
    pub count: usize,
}

/// Partitions records by the caller's key and averages each partition.
///
/// Output follows first-seen-group order; callers wanting another order
/// re-sort. A record for which the extractor yields no key (or a blank one)
/// makes the partition ambiguous and fails the whole call.
pub fn group_averages<F>(
    records: &[ScoredRecord],
    key_fn: F,
) -> Result<Vec<GroupAverage>, EngineError>
where
    F: Fn(&ScoredRecord) -> Option<String>,
{
    let mut groups: Vec<GroupAverage> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();
    for (index, record) in records.iter().enumerate() {
        let key = match key_fn(record) {
            Some(k) if !k.trim().is_empty() => k,
            _ => return Err(EngineError::InvalidGroupKey { index }),
        };
        let slot = match slots.get(&key) {
            Some(&slot) => slot,
            None => {
                let slot = groups.len();
                groups.push(GroupAverage {
                    group: key.clone(),
                    average: 0.0,
                    count: 0,
                });
                slots.insert(key, slot);
                slot
            }
        };
        // `average` carries the running sum until the final divide.
        groups[slot].average += record.score;
        groups[slot].count += 1;
    }
    for group in &mut groups {
        group.average /= group.count as f64;
    }
    Ok(groups)
}

/// Share of records at or above `pass_mark`, as a percentage.
pub fn pass_rate(records: &[ScoredRecord], pass_mark: f64) -> Result<f64, EngineError> {
    if records.is_empty() {
        return Err(EngineError::EmptyInput { what: "pass rate" });
    }
    let passed = records.iter().filter(|r| r.score >= pass_mark).count();
    Ok(100.0 * passed as f64 / records.len() as f64)
}

/// On-demand summary of a score collection: computed, handed to the display
/// collaborator, discarded. Never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateResult {
    pub average: f64,
    pub median: f64,
    pub distribution: GradeDistribution,
    pub count: usize,
}

pub fn summarize(records: &[ScoredRecord]) -> Result<AggregateResult, EngineError> {
    Ok(AggregateResult {
        average: average(records)?,
        median: median_score(records)?,
        distribution: grade_distribution(records)?,
        count: records.len(),
    })
}
