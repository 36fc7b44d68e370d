use crate::error::{Result, TodozError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_LINE_WIDTH: usize = 80;
const MIN_LINE_WIDTH: usize = 20;

/// Configuration for todoz, stored in `<data-dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodozConfig {
    /// Maximum width of a rendered list line
    #[serde(default = "default_line_width")]
    pub line_width: usize,

    /// How long a deleted row stays visible (marked as removing) before it is
    /// actually removed, in interactive sessions. 0 removes immediately.
    #[serde(default)]
    pub removal_delay_ms: u64,
}

fn default_line_width() -> usize {
    DEFAULT_LINE_WIDTH
}

impl Default for TodozConfig {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            removal_delay_ms: 0,
        }
    }
}

/// Keys accepted by `todoz config`.
pub const CONFIG_KEYS: &[&str] = &["line-width", "removal-delay"];

impl TodozConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(TodozError::Io)?;
        let config: TodozConfig =
            serde_json::from_str(&content).map_err(TodozError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(TodozError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(TodozError::Serialization)?;
        fs::write(config_path, content).map_err(TodozError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "line-width" => Ok(self.line_width.to_string()),
            "removal-delay" => Ok(self.removal_delay_ms.to_string()),
            other => Err(unknown_key(other)),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "line-width" => {
                let width: usize = parse_number(key, value)?;
                if width < MIN_LINE_WIDTH {
                    return Err(TodozError::Api(format!(
                        "line-width must be at least {}",
                        MIN_LINE_WIDTH
                    )));
                }
                self.line_width = width;
            }
            "removal-delay" => self.removal_delay_ms = parse_number(key, value)?,
            other => return Err(unknown_key(other)),
        }
        Ok(())
    }

    /// All settings as `(key, value)` pairs, in display order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("line-width", self.line_width.to_string()),
            ("removal-delay", self.removal_delay_ms.to_string()),
        ]
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| TodozError::Api(format!("Invalid value for {}: {}", key, value)))
}

fn unknown_key(key: &str) -> TodozError {
    TodozError::Api(format!(
        "Unknown config key: {} (known keys: {})",
        key,
        CONFIG_KEYS.join(", ")
    ))
}
