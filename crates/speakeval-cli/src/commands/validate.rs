//! The `speakeval validate` command.

use std::path::PathBuf;

use anyhow::Result;

use speakeval_core::parser::{load_exercise_path, validate_exercises};

pub fn execute(exercises_path: PathBuf) -> Result<()> {
    let set = load_exercise_path(&exercises_path)?;

    println!(
        "Exercises: {} ({} exercises, levels {:?})",
        set.source,
        set.len(),
        set.levels()
    );

    let warnings = validate_exercises(&set);
    for w in &warnings {
        let prefix = w
            .exercise_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("All exercises valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
