use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EngineError;

/// The twelve-step letter scale, best grade first.
///
/// A letter grade is always derived from a numeric score via [`grade_for`];
/// it is never stored on its own, so a changed score can never leave a stale
/// letter behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    D,
    #[serde(rename = "D-")]
    DMinus,
    E,
}

/// Every grade in scale order, best first.
pub const GRADES: [LetterGrade; 12] = [
    LetterGrade::A,
    LetterGrade::AMinus,
    LetterGrade::BPlus,
    LetterGrade::B,
    LetterGrade::BMinus,
    LetterGrade::CPlus,
    LetterGrade::C,
    LetterGrade::CMinus,
    LetterGrade::DPlus,
    LetterGrade::D,
    LetterGrade::DMinus,
    LetterGrade::E,
];

impl LetterGrade {
    /// Inclusive lower score bound for this grade. E is the catch-all and
    /// also absorbs anything below zero.
    pub fn floor(self) -> f64 {
        match self {
            LetterGrade::A => 80.0,
            LetterGrade::AMinus => 75.0,
            LetterGrade::BPlus => 70.0,
            LetterGrade::B => 65.0,
            LetterGrade::BMinus => 60.0,
            LetterGrade::CPlus => 55.0,
            LetterGrade::C => 50.0,
            LetterGrade::CMinus => 45.0,
            LetterGrade::DPlus => 40.0,
            LetterGrade::D => 35.0,
            LetterGrade::DMinus => 30.0,
            LetterGrade::E => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LetterGrade::A => "A",
            LetterGrade::AMinus => "A-",
            LetterGrade::BPlus => "B+",
            LetterGrade::B => "B",
            LetterGrade::BMinus => "B-",
            LetterGrade::CPlus => "C+",
            LetterGrade::C => "C",
            LetterGrade::CMinus => "C-",
            LetterGrade::DPlus => "D+",
            LetterGrade::D => "D",
            LetterGrade::DMinus => "D-",
            LetterGrade::E => "E",
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a numeric score onto the letter scale.
///
/// Boundaries are lower-inclusive: 80.0 is an A, 79.999 an A-. Finite scores
/// outside [0,100] saturate to the end grades (above 100 is an A, below zero
/// an E); rejecting them belongs to the ingestion boundary, which has the
/// context to report which record was bad. Non-finite input is an error.
pub fn grade_for(score: f64) -> Result<LetterGrade, EngineError> {
    if !score.is_finite() {
        return Err(EngineError::InvalidScore { value: score });
    }
    Ok(GRADES
        .into_iter()
        .find(|g| score >= g.floor())
        .unwrap_or(LetterGrade::E))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_boundary_is_lower_inclusive() {
        let locks = [
            (80.0, LetterGrade::A),
            (75.0, LetterGrade::AMinus),
            (70.0, LetterGrade::BPlus),
            (65.0, LetterGrade::B),
            (60.0, LetterGrade::BMinus),
            (55.0, LetterGrade::CPlus),
            (50.0, LetterGrade::C),
            (45.0, LetterGrade::CMinus),
            (40.0, LetterGrade::DPlus),
            (35.0, LetterGrade::D),
            (30.0, LetterGrade::DMinus),
            (0.0, LetterGrade::E),
        ];
        for (score, expected) in locks {
            assert_eq!(grade_for(score).unwrap(), expected, "at {}", score);
        }
        // Just below each boundary falls into the next band down.
        assert_eq!(grade_for(79.999).unwrap(), LetterGrade::AMinus);
        assert_eq!(grade_for(74.999).unwrap(), LetterGrade::BPlus);
        assert_eq!(grade_for(54.999).unwrap(), LetterGrade::C);
        assert_eq!(grade_for(29.999).unwrap(), LetterGrade::E);
    }

    #[test]
    fn out_of_range_scores_saturate() {
        assert_eq!(grade_for(100.0).unwrap(), LetterGrade::A);
        assert_eq!(grade_for(105.5).unwrap(), LetterGrade::A);
        assert_eq!(grade_for(-3.0).unwrap(), LetterGrade::E);
    }

    #[test]
    fn non_finite_scores_are_rejected() {
        assert!(matches!(
            grade_for(f64::NAN),
            Err(EngineError::InvalidScore { .. })
        ));
        assert!(matches!(
            grade_for(f64::INFINITY),
            Err(EngineError::InvalidScore { .. })
        ));
    }

    #[test]
    fn scale_order_ranks_better_grades_first() {
        for window in GRADES.windows(2) {
            assert!(window[0] < window[1]);
            assert!(window[0].floor() > window[1].floor());
        }
    }

    #[test]
    fn wire_names_round_trip() {
        for grade in GRADES {
            let json = serde_json::to_string(&grade).unwrap();
            assert_eq!(json, format!("\"{}\"", grade.as_str()));
            let back: LetterGrade = serde_json::from_str(&json).unwrap();
            assert_eq!(back, grade);
        }
    }
}
