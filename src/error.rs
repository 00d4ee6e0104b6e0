use std::fmt;

/// Failures the aggregation engine can produce.
///
/// Aggregates never substitute defaults for bad input: an empty collection or
/// an unusable score is reported to the caller, and the caller decides what
/// the screen shows.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// A non-finite score reached the grade scale.
    InvalidScore { value: f64 },
    /// An aggregate was requested over an empty collection. Distinct from a
    /// legitimate zero result.
    EmptyInput { what: &'static str },
    /// A grouping key extractor produced no key for the record at `index`,
    /// leaving the partition ambiguous.
    InvalidGroupKey { index: usize },
}

impl EngineError {
    /// Stable code carried on the sidecar error envelope.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidScore { .. } => "invalid_score",
            EngineError::EmptyInput { .. } => "empty_input",
            EngineError::InvalidGroupKey { .. } => "invalid_group_key",
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidScore { value } => {
                write!(f, "score must be a finite number, got {}", value)
            }
            EngineError::EmptyInput { what } => {
                write!(f, "{} requires at least one record", what)
            }
            EngineError::InvalidGroupKey { index } => {
                write!(f, "record at index {} produced no group key", index)
            }
        }
    }
}

impl std::error::Error for EngineError {}
