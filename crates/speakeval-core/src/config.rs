//! speakeval configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::feedback::FeedbackPolicy;

/// Top-level speakeval configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeakevalConfig {
    /// Default exercise file or directory.
    #[serde(default)]
    pub exercises: Option<PathBuf>,
    /// Max concurrent evaluations in a batch.
    #[serde(default = "default_parallelism")]
    pub parallelism: usize,
    /// Output directory for reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Feedback thresholds.
    #[serde(default)]
    pub feedback: FeedbackPolicy,
}

fn default_parallelism() -> usize {
    4
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./speakeval-results")
}

impl Default for SpeakevalConfig {
    fn default() -> Self {
        Self {
            exercises: None,
            parallelism: default_parallelism(),
            output_dir: default_output_dir(),
            feedback: FeedbackPolicy::default(),
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are copied as-is and never rescanned. An unterminated
/// `${` is left in place.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(len) = rest[start + 2..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + 2 + len];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + 2 + len + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without an explicit path:
/// 1. `speakeval.toml` in the current directory
/// 2. `~/.config/speakeval/config.toml`
///
/// Environment variable overrides: `SPEAKEVAL_EXERCISES`, `SPEAKEVAL_PARALLELISM`.
pub fn load_config_from(path: Option<&Path>) -> Result<SpeakevalConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("speakeval.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let parsed = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            parsed
        }
        None => SpeakevalConfig::default(),
    };

    if let Ok(exercises) = std::env::var("SPEAKEVAL_EXERCISES") {
        config.exercises = Some(PathBuf::from(exercises));
    }
    if let Ok(parallelism) = std::env::var("SPEAKEVAL_PARALLELISM") {
        config.parallelism = parallelism
            .parse()
            .with_context(|| format!("invalid SPEAKEVAL_PARALLELISM: {parallelism}"))?;
    }

    config.exercises = config.exercises.as_deref().map(resolve_path);
    config.output_dir = resolve_path(&config.output_dir);

    config.feedback.validate()?;
    anyhow::ensure!(config.parallelism >= 1, "parallelism must be at least 1");

    Ok(config)
}

/// Parse a TOML config string without touching the environment.
pub fn parse_config_str(content: &str) -> Result<SpeakevalConfig> {
    Ok(toml::from_str::<SpeakevalConfig>(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("speakeval"))
}
