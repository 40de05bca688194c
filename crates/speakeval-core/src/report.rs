//! Batch evaluation reports with JSON persistence.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::AttemptResult;
use crate::statistics::SummaryStats;

/// A complete batch evaluation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Where the exercises came from.
    pub source: String,
    /// Evaluated attempts, in input order.
    pub results: Vec<AttemptResult>,
    /// Attempts that could not be evaluated.
    #[serde(default)]
    pub failures: Vec<FailedAttempt>,
    /// Aggregate statistics.
    pub summary: SummaryStats,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// An attempt that produced no evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedAttempt {
    pub index: usize,
    pub exercise_id: String,
    pub error: String,
}

impl EvaluationReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: EvaluationReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Format the report as markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!(
            "**Summary:** {} attempts, mean score {:.1}%, {} failed\n\n",
            self.summary.attempts,
            self.summary.mean_score * 100.0,
            self.failures.len()
        ));

        if !self.summary.per_level.is_empty() {
            md.push_str("### Levels\n\n");
            md.push_str("| Level | Attempts | Mean | Best |\n");
            md.push_str("|-------|----------|------|------|\n");
            for (level, stats) in &self.summary.per_level {
                md.push_str(&format!(
                    "| {} | {} | {:.1}% | {:.1}% |\n",
                    level,
                    stats.attempts,
                    stats.mean_score * 100.0,
                    stats.best_score * 100.0
                ));
            }
            md.push('\n');
        }

        if !self.results.is_empty() {
            md.push_str("### Attempts\n\n");
            md.push_str("| # | Exercise | Score | Feedback | Corrected |\n");
            md.push_str("|---|----------|-------|----------|-----------|\n");
            for r in &self.results {
                let corrected = match (&r.evaluation.annotation, r.evaluation.show_correction) {
                    (Some(a), true) => a.render_plain(),
                    _ => "-".to_string(),
                };
                md.push_str(&format!(
                    "| {} | {} | {:.1}% | {} | {} |\n",
                    r.index,
                    r.exercise_id,
                    r.evaluation.comparison.score * 100.0,
                    r.evaluation.tier,
                    corrected.replace('|', "\\|")
                ));
            }
            md.push('\n');
        }

        if !self.failures.is_empty() {
            md.push_str("### Failures\n\n");
            for f in &self.failures {
                md.push_str(&format!("- #{} `{}`: {}\n", f.index, f.exercise_id, f.error));
            }
        }

        md
    }
}
