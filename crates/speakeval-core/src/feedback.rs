//! Score-to-message policy layered on top of the core score.
//!
//! None of this affects scoring; it only decides what a presenter says and
//! whether the corrected answer is worth showing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EvalError;

/// Coarse feedback band for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTier {
    Excellent,
    Close,
    Fair,
    Retry,
}

impl FeedbackTier {
    /// Learner-facing message, if the band has one.
    pub fn message(self) -> Option<&'static str> {
        match self {
            FeedbackTier::Excellent => Some("Almost perfect!"),
            FeedbackTier::Close => Some("So close! Keep trying."),
            FeedbackTier::Fair => None,
            FeedbackTier::Retry => Some("Not quite. Give it another try!"),
        }
    }
}

impl fmt::Display for FeedbackTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackTier::Excellent => write!(f, "excellent"),
            FeedbackTier::Close => write!(f, "close"),
            FeedbackTier::Fair => write!(f, "fair"),
            FeedbackTier::Retry => write!(f, "retry"),
        }
    }
}

/// Thresholds (inclusive lower bounds) that split scores into tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeedbackPolicy {
    #[serde(default = "default_excellent")]
    pub excellent: f64,
    #[serde(default = "default_close")]
    pub close: f64,
    /// Below this the corrected answer is not shown.
    #[serde(default = "default_show_correction")]
    pub show_correction: f64,
}

fn default_excellent() -> f64 {
    0.90
}
fn default_close() -> f64 {
    0.85
}
fn default_show_correction() -> f64 {
    0.80
}

impl Default for FeedbackPolicy {
    fn default() -> Self {
        Self {
            excellent: default_excellent(),
            close: default_close(),
            show_correction: default_show_correction(),
        }
    }
}

impl FeedbackPolicy {
    pub fn tier(&self, score: f64) -> FeedbackTier {
        if score >= self.excellent {
            FeedbackTier::Excellent
        } else if score >= self.close {
            FeedbackTier::Close
        } else if score >= self.show_correction {
            FeedbackTier::Fair
        } else {
            FeedbackTier::Retry
        }
    }

    pub fn shows_correction(&self, score: f64) -> bool {
        score >= self.show_correction
    }

    pub fn validate(&self) -> Result<(), EvalError> {
        for (name, value) in [
            ("excellent", self.excellent),
            ("close", self.close),
            ("show_correction", self.show_correction),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(EvalError::InvalidThreshold { name, value });
            }
        }
        if self.excellent < self.close || self.close < self.show_correction {
            return Err(EvalError::ThresholdOrder);
        }
        Ok(())
    }
}
