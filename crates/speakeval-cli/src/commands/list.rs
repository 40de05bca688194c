//! The `speakeval list` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use speakeval_core::parser::load_exercise_path;

pub fn execute(exercises_path: PathBuf, level: Option<u32>) -> Result<()> {
    let set = load_exercise_path(&exercises_path)?;

    let shown: Vec<_> = set
        .exercises
        .iter()
        .filter(|e| level.map_or(true, |l| e.level == l))
        .collect();

    if shown.is_empty() {
        match level {
            Some(l) => println!("No exercises at level {l}."),
            None => println!("No exercises found."),
        }
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Level", "Prompt", "References"]);
    for exercise in shown {
        table.add_row(vec![
            Cell::new(&exercise.id),
            Cell::new(exercise.level),
            Cell::new(&exercise.prompt),
            Cell::new(exercise.references.len()),
        ]);
    }

    println!("{table}");
    Ok(())
}
