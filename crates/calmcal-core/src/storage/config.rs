//! TOML-based application configuration.
//!
//! Stores:
//! - Planning preferences handed to the workload analyzer
//! - The slot finder's daytime window and search limits
//! - The optional remote metrics service
//! - Per-type subtask template overrides
//!
//! Configuration is stored at `~/.config/calmcal/config.toml`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::data_dir;
use crate::error::ConfigError;
use crate::preferences::{BreakFrequency, Preferences, TaskDistribution, WorkStyle};
use crate::scheduler::{SchedulerConfig, SlotFinder};
use crate::task::{SubtaskCatalog, SubtaskTemplate};

/// Preferences section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreferencesConfig {
    #[serde(default = "default_work_hours")]
    pub work_hours_per_day: f64,
    #[serde(default)]
    pub work_style: WorkStyle,
    #[serde(default)]
    pub break_frequency: BreakFrequency,
    #[serde(default)]
    pub task_distribution: TaskDistribution,
}

/// Remote metrics service configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricsConfig {
    /// Analyzer endpoint; metrics are computed locally when unset
    #[serde(default)]
    pub service_url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/calmcal/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub preferences: PreferencesConfig,
    #[serde(default)]
    pub scheduling: SchedulerConfig,
    #[serde(default)]
    pub metrics: MetricsConfig,
    /// Event type -> replacement subtask chain
    #[serde(default)]
    pub templates: BTreeMap<String, Vec<SubtaskTemplate>>,
}

fn default_work_hours() -> f64 {
    crate::preferences::DEFAULT_WORK_HOURS_PER_DAY
}
fn default_timeout_secs() -> u64 {
    10
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            work_hours_per_day: default_work_hours(),
            work_style: WorkStyle::default(),
            break_frequency: BreakFrequency::default(),
            task_distribution: TaskDistribution::default(),
        }
    }
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            service_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl MetricsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_some() {
                current = current.get_mut(part).ok_or_else(unknown)?;
                continue;
            }

            let obj = current.as_object_mut().ok_or_else(unknown)?;
            let existing = obj.get(part).ok_or_else(unknown)?;

            let new_value = match existing {
                serde_json::Value::Bool(_) => serde_json::Value::Bool(
                    value
                        .parse::<bool>()
                        .map_err(|e| invalid(e.to_string()))?,
                ),
                serde_json::Value::Number(_) => {
                    if let Ok(n) = value.parse::<u64>() {
                        serde_json::Value::Number(n.into())
                    } else {
                        value
                            .parse::<f64>()
                            .ok()
                            .and_then(serde_json::Number::from_f64)
                            .map(serde_json::Value::Number)
                            .ok_or_else(|| invalid(format!("cannot parse '{value}' as number")))?
                    }
                }
                serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                    serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                }
                _ if value.is_empty() => serde_json::Value::Null,
                _ => serde_json::Value::String(value.into()),
            };

            obj.insert(part.to_string(), new_value);
            return Ok(());
        }

        Err(unknown())
    }

    /// Default location of the config file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from an explicit path; a missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })
            }
        };
        let cfg: Config =
            toml::from_str(&content).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Persist to an explicit path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        tracing::debug!(path = %path.display(), "saved config");
        Ok(())
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scheduling
            .validate()
            .map_err(|message| ConfigError::InvalidValue {
                key: "scheduling".to_string(),
                message,
            })?;
        if let Some(raw) = &self.metrics.service_url {
            url::Url::parse(raw)?;
        }
        Ok(())
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by dot-separated key, in memory only.
    ///
    /// An empty value clears an optional string. The resulting config is
    /// validated before it replaces `self`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed
    /// into the field's type.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self)
            .map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Every leaf as `(dot.path, value)`, in key order.
    pub fn list(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Ok(json) = serde_json::to_value(self) {
            flatten("", &json, &mut out);
        }
        out
    }

    pub fn preferences(&self) -> Preferences {
        Preferences {
            work_hours_per_day: Some(self.preferences.work_hours_per_day),
            work_style: Some(self.preferences.work_style),
            break_frequency: Some(self.preferences.break_frequency),
            task_distribution: Some(self.preferences.task_distribution),
        }
    }

    pub fn slot_finder(&self) -> SlotFinder {
        SlotFinder::with_config(self.scheduling.clone())
    }

    /// Built-in templates with the configured overrides applied.
    pub fn catalog(&self) -> SubtaskCatalog {
        SubtaskCatalog::builtin().with_overrides(&self.templates)
    }
}

fn flatten(prefix: &str, value: &serde_json::Value, out: &mut Vec<(String, String)>) {
    match value {
        serde_json::Value::Object(map) if !map.is_empty() => {
            for (k, v) in map {
                let key = if prefix.is_empty() {
                    k.clone()
                } else {
                    format!("{prefix}.{k}")
                };
                flatten(&key, v, out);
            }
        }
        serde_json::Value::String(s) => out.push((prefix.to_string(), s.clone())),
        other => out.push((prefix.to_string(), other.to_string())),
    }
}
