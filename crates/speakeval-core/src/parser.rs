//! Exercise file loading and validation.
//!
//! Exercise files are JSON (a bare array, or an object with an `exercises`
//! array) or TOML (`[[exercises]]` tables).

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Exercise, ExerciseSet};
use crate::normalize::normalize;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonExerciseFile {
    List(Vec<Exercise>),
    Wrapped { exercises: Vec<Exercise> },
}

#[derive(Debug, Deserialize)]
struct TomlExerciseFile {
    #[serde(default)]
    exercises: Vec<Exercise>,
}

/// Supported exercise file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Toml,
}

impl FileFormat {
    /// Guess the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Load one exercise file.
pub fn load_exercises(path: &Path) -> Result<ExerciseSet> {
    let format = FileFormat::from_path(path).with_context(|| {
        format!(
            "unsupported exercise file (expected .json or .toml): {}",
            path.display()
        )
    })?;
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read exercise file: {}", path.display()))?;

    parse_exercises_str(&content, format, path)
}

/// Parse exercise file contents (useful for testing).
pub fn parse_exercises_str(content: &str, format: FileFormat, source_path: &Path) -> Result<ExerciseSet> {
    let exercises = match format {
        FileFormat::Json => {
            let parsed: JsonExerciseFile = serde_json::from_str(content)
                .with_context(|| format!("failed to parse JSON: {}", source_path.display()))?;
            match parsed {
                JsonExerciseFile::List(exercises) => exercises,
                JsonExerciseFile::Wrapped { exercises } => exercises,
            }
        }
        FileFormat::Toml => {
            let parsed: TomlExerciseFile = toml::from_str(content)
                .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;
            parsed.exercises
        }
    };

    Ok(ExerciseSet::new(source_path.display().to_string(), exercises))
}

/// Recursively load every `.json`/`.toml` exercise file under `dir`.
///
/// Files that fail to parse are skipped with a warning. The result is one
/// merged set, in directory-walk order (entries sorted by name).
pub fn load_exercise_directory(dir: &Path) -> Result<ExerciseSet> {
    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.file_name());

    let mut set = ExerciseSet::new(dir.display().to_string(), Vec::new());
    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            set.extend(load_exercise_directory(&path)?);
        } else if FileFormat::from_path(&path).is_some() {
            match load_exercises(&path) {
                Ok(loaded) => set.extend(loaded),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(set)
}

/// Load a file or a directory, whichever `path` is.
pub fn load_exercise_path(path: &Path) -> Result<ExerciseSet> {
    if path.is_dir() {
        load_exercise_directory(path)
    } else {
        load_exercises(path)
    }
}

/// A warning from exercise validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The exercise ID (if applicable).
    pub exercise_id: Option<String>,
    /// Warning message.
    pub message: String,
}

/// Check an exercise set for entries that cannot be evaluated sensibly.
pub fn validate_exercises(set: &ExerciseSet) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    let mut seen_ids = HashSet::new();
    for ex in &set.exercises {
        if !seen_ids.insert(ex.id.as_str()) {
            warnings.push(ValidationWarning {
                exercise_id: Some(ex.id.clone()),
                message: format!("duplicate exercise ID: {}", ex.id),
            });
        }
    }

    for ex in &set.exercises {
        if ex.prompt.trim().is_empty() {
            warnings.push(ValidationWarning {
                exercise_id: Some(ex.id.clone()),
                message: "prompt is empty".into(),
            });
        }

        if ex.references.is_empty() {
            warnings.push(ValidationWarning {
                exercise_id: Some(ex.id.clone()),
                message: "no reference answers; attempts cannot be scored".into(),
            });
        }

        for (i, reference) in ex.references.iter().enumerate() {
            if normalize(reference).is_empty() {
                warnings.push(ValidationWarning {
                    exercise_id: Some(ex.id.clone()),
                    message: format!("reference #{} has no words after normalization", i + 1),
                });
            }
        }
    }

    if set.is_empty() {
        warnings.push(ValidationWarning {
            exercise_id: None,
            message: "no exercises found".into(),
        });
    }

    warnings
}
