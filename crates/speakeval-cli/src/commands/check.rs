//! The `speakeval check` command.

use std::path::PathBuf;

use anyhow::{Context, Result};

use speakeval_core::config::load_config_from;
use speakeval_core::engine::{evaluate, Evaluation};
use speakeval_core::parser::load_exercise_path;
use speakeval_report::annotation_html;

pub fn execute(
    candidate: String,
    references: Vec<String>,
    exercises: Option<PathBuf>,
    id: Option<String>,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;

    let references = match id {
        Some(id) => {
            anyhow::ensure!(
                references.is_empty(),
                "--id and --reference cannot be combined"
            );
            let path = exercises
                .or(config.exercises)
                .context("--id needs --exercises (or `exercises` in the config)")?;
            let set = load_exercise_path(&path)?;
            let exercise = set
                .find(&id)
                .with_context(|| format!("exercise '{id}' not found in {}", path.display()))?;
            exercise.references.clone()
        }
        None => references,
    };

    tracing::debug!(references = references.len(), "scoring candidate");
    let evaluation = evaluate(&candidate, &references, &config.feedback);

    match format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&evaluation)?),
        "html" => match &evaluation.annotation {
            Some(annotation) => println!("<div>{}</div>", annotation_html(annotation)),
            None => println!("<div><em>no reference available</em></div>"),
        },
        "text" => print_text(&evaluation),
        other => anyhow::bail!("unknown format: {other} (expected text, json or html)"),
    }

    Ok(())
}

fn print_text(evaluation: &Evaluation) {
    let comparison = &evaluation.comparison;
    let Some(best) = comparison.best_match.as_deref() else {
        println!("Score: 0.0%");
        println!("no reference available");
        return;
    };

    println!("Score: {:.1}%", comparison.score * 100.0);
    println!("Best match: {best}");
    if let Some(message) = evaluation.tier.message() {
        println!("{message}");
    }
    if evaluation.show_correction {
        if let Some(annotation) = &evaluation.annotation {
            println!("Corrected: {}", annotation.render_plain());
        }
    }
}
