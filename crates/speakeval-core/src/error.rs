//! Evaluation error types.
//!
//! The scoring and annotation functions themselves are total; these errors
//! come from the layers around them (batch lookups and policy validation).

use thiserror::Error;

/// Errors raised while setting up or running an evaluation.
#[derive(Debug, Error, PartialEq)]
pub enum EvalError {
    /// An attempt referenced an exercise id that is not in the set.
    #[error("unknown exercise: {0}")]
    UnknownExercise(String),

    /// A feedback threshold lies outside `[0.0, 1.0]`.
    #[error("feedback threshold `{name}` must be between 0.0 and 1.0, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },

    /// Feedback thresholds are not in descending order.
    #[error("feedback thresholds must satisfy excellent >= close >= show_correction")]
    ThresholdOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            EvalError::UnknownExercise("42".into()).to_string(),
            "unknown exercise: 42"
        );
        let err = EvalError::InvalidThreshold {
            name: "close",
            value: 1.5,
        };
        assert!(err.to_string().contains("`close`"));
    }
}
