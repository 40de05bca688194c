//! Exercise data model.
//!
//! An exercise pairs a source-language prompt with every translation that
//! should be accepted as correct. Field aliases let the loaders read the
//! `korean`/`english` layout used by existing sentence files.

use serde::{Deserialize, Deserializer, Serialize};

/// A single speaking exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier. Numeric ids in source files are read as strings.
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    /// Difficulty level used for grouping.
    #[serde(default = "default_level")]
    pub level: u32,
    /// The sentence shown (and spoken) to the learner.
    #[serde(alias = "korean")]
    pub prompt: String,
    /// Acceptable translations, in preference order.
    #[serde(default, alias = "english")]
    pub references: Vec<String>,
}

fn default_level() -> u32 {
    1
}

/// Accept an exercise id written as a JSON/TOML string or integer.
pub(crate) fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

/// An ordered collection of exercises.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSet {
    /// Where the exercises came from (file or directory name).
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub exercises: Vec<Exercise>,
}

impl ExerciseSet {
    pub fn new(source: impl Into<String>, exercises: Vec<Exercise>) -> Self {
        Self {
            source: source.into(),
            exercises,
        }
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    /// Distinct levels, ascending.
    pub fn levels(&self) -> Vec<u32> {
        let mut levels: Vec<u32> = self.exercises.iter().map(|e| e.level).collect();
        levels.sort_unstable();
        levels.dedup();
        levels
    }

    /// Exercises at `level`, in set order.
    pub fn at_level(&self, level: u32) -> Vec<&Exercise> {
        self.exercises.iter().filter(|e| e.level == level).collect()
    }

    /// First exercise with the given id.
    pub fn find(&self, id: &str) -> Option<&Exercise> {
        self.exercises.iter().find(|e| e.id == id)
    }

    /// The exercise after `current` within `level`, wrapping around.
    ///
    /// Starts from the first exercise of the level when `current` is `None`
    /// or not part of the level.
    pub fn next_at_level(&self, level: u32, current: Option<&str>) -> Option<&Exercise> {
        let pool = self.at_level(level);
        let position = current.and_then(|id| pool.iter().position(|e| e.id == id));
        match position {
            Some(i) => pool.get((i + 1) % pool.len()).copied(),
            None => pool.first().copied(),
        }
    }

    /// Append another set's exercises, keeping order.
    pub fn extend(&mut self, other: ExerciseSet) {
        self.exercises.extend(other.exercises);
    }
}
