//! The `speakeval evaluate` command.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};

use speakeval_core::config::load_config_from;
use speakeval_core::engine::{Attempt, AttemptResult, BatchConfig, BatchEvaluator, ProgressReporter};
use speakeval_core::parser::load_exercise_path;
use speakeval_core::report::EvaluationReport;
use speakeval_report::write_html_report;

/// Console progress reporter.
struct ConsoleReporter;

impl ProgressReporter for ConsoleReporter {
    fn on_attempt_complete(&self, result: &AttemptResult) {
        eprintln!(
            "  Done: #{} {} {:.1}% [{}]",
            result.index,
            result.exercise_id,
            result.evaluation.comparison.score * 100.0,
            result.evaluation.tier,
        );
    }

    fn on_attempt_error(&self, index: usize, exercise_id: &str, error: &str) {
        eprintln!("  ERROR: #{index} {exercise_id}: {error}");
    }

    fn on_batch_complete(&self, total: usize, completed: usize, failed: usize, elapsed: Duration) {
        eprintln!(
            "\nComplete: {completed}/{total} evaluated, {failed} failed ({:.1}s)",
            elapsed.as_secs_f64()
        );
    }
}

fn load_attempts(path: &Path) -> Result<Vec<Attempt>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read attempts file: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("failed to parse attempts JSON: {}", path.display()))
}

pub async fn execute(
    exercises_path: Option<PathBuf>,
    attempts_path: PathBuf,
    output: Option<PathBuf>,
    format: String,
    parallelism: Option<usize>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let exercises_path = exercises_path
        .or(config.exercises.clone())
        .context("no exercises given (use --exercises or set `exercises` in the config)")?;
    let parallelism = parallelism.unwrap_or(config.parallelism);
    anyhow::ensure!(parallelism >= 1, "parallelism must be at least 1");
    let output = output.unwrap_or(config.output_dir.clone());

    let formats: Vec<&str> = if format == "all" {
        vec!["json", "html", "markdown"]
    } else {
        format.split(',').map(str::trim).collect()
    };
    for fmt in &formats {
        anyhow::ensure!(
            matches!(*fmt, "json" | "html" | "markdown" | "md"),
            "unknown format: {fmt}"
        );
    }

    let exercises = Arc::new(load_exercise_path(&exercises_path)?);
    let attempts = load_attempts(&attempts_path)?;

    eprintln!(
        "speakeval v{} — Evaluating {} attempts against {} exercises",
        env!("CARGO_PKG_VERSION"),
        attempts.len(),
        exercises.len()
    );
    eprintln!();

    let evaluator = BatchEvaluator::new(
        exercises,
        BatchConfig {
            parallelism,
            policy: config.feedback,
        },
    );
    let report = evaluator.run(&attempts, &ConsoleReporter).await?;

    print_summary(&report);

    std::fs::create_dir_all(&output)
        .with_context(|| format!("failed to create output directory: {}", output.display()))?;
    let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H%M%S");

    for fmt in &formats {
        match *fmt {
            "json" => {
                let path = output.join(format!("report-{timestamp}.json"));
                report.save_json(&path)?;
                eprintln!("Results saved to: {}", path.display());
            }
            "html" => {
                let path = output.join(format!("report-{timestamp}.html"));
                write_html_report(&report, &path)?;
                eprintln!("HTML report: {}", path.display());
            }
            _ => {
                let path = output.join(format!("report-{timestamp}.md"));
                std::fs::write(&path, report.to_markdown())
                    .with_context(|| format!("failed to write {}", path.display()))?;
                eprintln!("Markdown report: {}", path.display());
            }
        }
    }

    Ok(())
}

fn print_summary(report: &EvaluationReport) {
    use comfy_table::{Cell, Table};

    let mut table = Table::new();
    table.set_header(vec!["Level", "Attempts", "Mean", "Best"]);

    for (level, stats) in &report.summary.per_level {
        table.add_row(vec![
            Cell::new(level),
            Cell::new(stats.attempts),
            Cell::new(format!("{:.1}%", stats.mean_score * 100.0)),
            Cell::new(format!("{:.1}%", stats.best_score * 100.0)),
        ]);
    }

    eprintln!("\n{table}");
    eprintln!(
        "Overall: {} attempts, mean {:.1}%",
        report.summary.attempts,
        report.summary.mean_score * 100.0
    );
}
