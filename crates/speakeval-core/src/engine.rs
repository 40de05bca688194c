//! Evaluation orchestrator.
//!
//! [`evaluate`] scores and annotates one answer. [`BatchEvaluator`] runs many
//! attempts against an exercise set with bounded parallelism.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::Semaphore;
use uuid::Uuid;

use crate::annotate::{highlight_differences, Annotation};
use crate::compare::{compare_answers, ComparisonResult};
use crate::error::EvalError;
use crate::feedback::{FeedbackPolicy, FeedbackTier};
use crate::model::ExerciseSet;
use crate::report::{EvaluationReport, FailedAttempt};
use crate::statistics::compute_summary;

/// Everything a presenter needs for one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// The candidate as received.
    pub candidate: String,
    pub comparison: ComparisonResult,
    /// Word-level rendering against the best match; absent without references.
    pub annotation: Option<Annotation>,
    pub tier: FeedbackTier,
    /// Whether the policy considers the annotation worth showing.
    pub show_correction: bool,
}

/// Score `candidate` against `references` and annotate it against the best match.
pub fn evaluate<S: AsRef<str>>(
    candidate: &str,
    references: &[S],
    policy: &FeedbackPolicy,
) -> Evaluation {
    let comparison = compare_answers(candidate, references);
    let annotation = comparison
        .best_match
        .as_deref()
        .map(|best| highlight_differences(candidate, best));
    let tier = policy.tier(comparison.score);
    let show_correction = comparison.has_match() && policy.shows_correction(comparison.score);

    Evaluation {
        candidate: candidate.to_string(),
        comparison,
        annotation,
        tier,
        show_correction,
    }
}

/// One learner answer to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    #[serde(deserialize_with = "crate::model::id_from_string_or_number")]
    pub exercise_id: String,
    /// Transcribed answer. `None` means transcription produced nothing and is
    /// scored as an empty answer.
    #[serde(default)]
    pub transcript: Option<String>,
}

/// A successfully evaluated attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttemptResult {
    /// Position of the attempt in the input.
    pub index: usize,
    pub exercise_id: String,
    pub level: u32,
    pub prompt: String,
    pub evaluation: Evaluation,
}

/// Configuration for batch evaluation.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Maximum concurrent evaluations.
    pub parallelism: usize,
    pub policy: FeedbackPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallelism: 4,
            policy: FeedbackPolicy::default(),
        }
    }
}

/// Progress reporting trait.
pub trait ProgressReporter: Send + Sync {
    fn on_attempt_complete(&self, result: &AttemptResult);
    fn on_attempt_error(&self, index: usize, exercise_id: &str, error: &str);
    fn on_batch_complete(&self, total: usize, completed: usize, failed: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_attempt_complete(&self, _: &AttemptResult) {}
    fn on_attempt_error(&self, _: usize, _: &str, _: &str) {}
    fn on_batch_complete(&self, _: usize, _: usize, _: usize, _: Duration) {}
}

/// Evaluates batches of attempts against one exercise set.
pub struct BatchEvaluator {
    exercises: Arc<ExerciseSet>,
    config: BatchConfig,
}

impl BatchEvaluator {
    pub fn new(exercises: Arc<ExerciseSet>, config: BatchConfig) -> Self {
        Self { exercises, config }
    }

    /// Evaluate every attempt; results come back in input order.
    ///
    /// Attempts naming an unknown exercise are reported and recorded as
    /// failures, they do not abort the batch.
    pub async fn run(
        &self,
        attempts: &[Attempt],
        progress: &dyn ProgressReporter,
    ) -> Result<EvaluationReport> {
        self.config.policy.validate()?;
        anyhow::ensure!(self.config.parallelism >= 1, "parallelism must be at least 1");

        let start = Instant::now();
        let semaphore = Arc::new(Semaphore::new(self.config.parallelism));
        let mut failures = Vec::new();
        let mut futures = FuturesUnordered::new();

        for (index, attempt) in attempts.iter().enumerate() {
            let Some(exercise) = self.exercises.find(&attempt.exercise_id) else {
                let err = EvalError::UnknownExercise(attempt.exercise_id.clone());
                tracing::warn!("attempt #{index}: {err}");
                progress.on_attempt_error(index, &attempt.exercise_id, &err.to_string());
                failures.push(FailedAttempt {
                    index,
                    exercise_id: attempt.exercise_id.clone(),
                    error: err.to_string(),
                });
                continue;
            };

            let exercise = exercise.clone();
            let candidate = attempt.transcript.clone().unwrap_or_default();
            let policy = self.config.policy;
            let semaphore = Arc::clone(&semaphore);

            futures.push(async move {
                let exercise_id = exercise.id.clone();
                let inner = async move {
                    let _permit = semaphore
                        .acquire_owned()
                        .await
                        .map_err(|_| anyhow::anyhow!("semaphore closed"))?;

                    let evaluation = tokio::task::spawn_blocking(move || {
                        let evaluation = evaluate(&candidate, &exercise.references, &policy);
                        (exercise, evaluation)
                    })
                    .await?;

                    let (exercise, evaluation) = evaluation;
                    Ok::<_, anyhow::Error>(AttemptResult {
                        index,
                        exercise_id: exercise.id,
                        level: exercise.level,
                        prompt: exercise.prompt,
                        evaluation,
                    })
                };
                (index, exercise_id, inner.await)
            });
        }

        let total = attempts.len();
        let mut results = Vec::with_capacity(futures.len());

        while let Some((index, exercise_id, outcome)) = futures.next().await {
            match outcome {
                Ok(result) => {
                    progress.on_attempt_complete(&result);
                    results.push(result);
                }
                Err(e) => {
                    tracing::error!("evaluation failed for attempt #{index} ({exercise_id}): {e:#}");
                    progress.on_attempt_error(index, &exercise_id, &e.to_string());
                    failures.push(FailedAttempt {
                        index,
                        exercise_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        results.sort_by_key(|r| r.index);
        failures.sort_by_key(|f| f.index);

        let elapsed = start.elapsed();
        progress.on_batch_complete(total, results.len(), failures.len(), elapsed);
        tracing::info!(
            total,
            completed = results.len(),
            failed = failures.len(),
            "batch evaluation finished"
        );

        let summary = compute_summary(&results);

        Ok(EvaluationReport {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            source: self.exercises.source.clone(),
            results,
            failures,
            summary,
            duration_ms: elapsed.as_millis() as u64,
        })
    }
}
