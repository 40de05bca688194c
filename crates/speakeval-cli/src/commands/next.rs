//! The `speakeval next` command.

use std::path::PathBuf;

use anyhow::Result;

use speakeval_core::parser::load_exercise_path;

pub fn execute(exercises_path: PathBuf, level: u32, after: Option<String>) -> Result<()> {
    let set = load_exercise_path(&exercises_path)?;

    let Some(exercise) = set.next_at_level(level, after.as_deref()) else {
        let levels = set.levels();
        anyhow::bail!("no exercises at level {level} (available levels: {levels:?})");
    };

    println!("[{}] (level {})", exercise.id, exercise.level);
    println!("{}", exercise.prompt);
    println!("{} acceptable answer(s)", exercise.references.len());

    Ok(())
}
