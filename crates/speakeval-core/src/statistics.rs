//! Aggregate statistics over a batch of evaluated attempts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::AttemptResult;
use crate::feedback::FeedbackTier;

/// Whole-batch summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of successfully evaluated attempts.
    pub attempts: usize,
    /// Mean similarity score across all attempts.
    pub mean_score: f64,
    /// Attempts per feedback tier.
    pub tiers: BTreeMap<FeedbackTier, usize>,
    /// Per-level breakdown, keyed by level.
    pub per_level: BTreeMap<u32, LevelStats>,
}

/// Statistics for all attempts at one level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LevelStats {
    pub attempts: usize,
    pub mean_score: f64,
    pub best_score: f64,
    pub tiers: BTreeMap<FeedbackTier, usize>,
}

fn mean(total: f64, count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

/// Compute summary statistics for a set of results.
pub fn compute_summary(results: &[AttemptResult]) -> SummaryStats {
    let mut summary = SummaryStats::default();
    let mut total = 0.0;
    let mut level_totals: BTreeMap<u32, f64> = BTreeMap::new();

    for r in results {
        let score = r.evaluation.comparison.score;
        let tier = r.evaluation.tier;

        summary.attempts += 1;
        total += score;
        *summary.tiers.entry(tier).or_insert(0) += 1;

        let level = summary.per_level.entry(r.level).or_default();
        level.attempts += 1;
        level.best_score = level.best_score.max(score);
        *level.tiers.entry(tier).or_insert(0) += 1;
        *level_totals.entry(r.level).or_insert(0.0) += score;
    }

    summary.mean_score = mean(total, summary.attempts);
    for (level, stats) in summary.per_level.iter_mut() {
        stats.mean_score = mean(level_totals[level], stats.attempts);
    }

    summary
}
