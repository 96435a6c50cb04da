//! Configuration loading from sort_race.toml
//!
//! The file is optional and discovered by walking up from the current directory. Every field has
//! a default, so a partial file only overrides what it names.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "sort_race.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),

    #[error("invalid duration {0:?}")]
    Duration(String),
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Pause after every comparison (e.g. "50ms"). "0ms" runs at full speed.
    #[serde(default = "default_pacing_delay")]
    pub pacing_delay: String,
    /// Give up waiting for a batch after this long. Waits forever when unset.
    #[serde(default)]
    pub timeout: Option<String>,
    /// How often the front end redraws run status.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            pacing_delay: default_pacing_delay(),
            timeout: None,
            refresh_interval: default_refresh_interval(),
        }
    }
}

impl EngineConfig {
    pub fn pacing_delay(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.pacing_delay)
    }

    pub fn timeout(&self) -> Result<Option<Duration>, ConfigError> {
        self.timeout.as_deref().map(parse_duration).transpose()
    }

    pub fn refresh_interval(&self) -> Result<Duration, ConfigError> {
        parse_duration(&self.refresh_interval)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InputConfig {
    /// Input used when none is given on the command line.
    #[serde(default = "default_values")]
    pub values: Vec<i32>,
    /// Length of generated random input.
    #[serde(default = "default_random_len")]
    pub random_len: usize,
    /// Generated values are drawn from `1..=random_max`.
    #[serde(default = "default_random_max")]
    pub random_max: i32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            values: default_values(),
            random_len: default_random_len(),
            random_max: default_random_max(),
        }
    }
}

fn default_pacing_delay() -> String {
    "50ms".to_string()
}
fn default_refresh_interval() -> String {
    "100ms".to_string()
}
fn default_values() -> Vec<i32> {
    vec![64, 34, 25, 12, 22, 11, 90, 88, 45, 50, 23, 67]
}
fn default_random_len() -> usize {
    12
}
fn default_random_max() -> i32 {
    100
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;

        // Surface bad durations at load time rather than when a batch starts.
        config.engine.pacing_delay()?;
        config.engine.timeout()?;
        config.engine.refresh_interval()?;

        Ok(config)
    }

    /// Loads the nearest `sort_race.toml` from the current directory or one of its ancestors.
    pub fn discover() -> Result<Option<Self>, ConfigError> {
        let Ok(mut dir) = std::env::current_dir() else {
            return Ok(None);
        };

        loop {
            let config_path = dir.join(CONFIG_FILE_NAME);
            if config_path.exists() {
                return Self::load(&config_path).map(Some);
            }
            if !dir.pop() {
                return Ok(None);
            }
        }
    }

    /// Generate a default configuration as TOML string
    pub fn default_toml() -> String {
        r#"# sort_race configuration

[engine]
# Pause after every comparison so the runs can be followed by eye
pacing_delay = "50ms"
# Give up waiting for a batch after this long (uncomment to enable)
# timeout = "5m"
# Status refresh interval of the terminal front end
refresh_interval = "100ms"

[input]
# Used when no values are given on the command line
values = [64, 34, 25, 12, 22, 11, 90, 88, 45, 50, 23, 67]
# Shape of --random input: random_len values from 1..=random_max
random_len = 12
random_max = 100
"#
        .to_string()
    }
}

/// Parses durations like "50ms", "1.5s", "2m". A bare number is taken as seconds.
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let invalid = || ConfigError::Duration(s.to_string());

    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let (num_part, unit_part) = trimmed
        .char_indices()
        .find(|(_, c)| c.is_alphabetic() || *c == 'µ')
        .map(|(i, _)| trimmed.split_at(i))
        .unwrap_or((trimmed, "s"));

    let value: f64 = num_part.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid());
    }

    let nanos_per_unit: u64 = match unit_part.trim().to_lowercase().as_str() {
        "ns" => 1,
        "us" | "µs" => 1_000,
        "ms" => 1_000_000,
        "s" => 1_000_000_000,
        "m" | "min" => 60_000_000_000,
        _ => return Err(invalid()),
    };

    Ok(Duration::from_nanos((value * nanos_per_unit as f64) as u64))
}
