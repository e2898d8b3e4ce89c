use crate::announce::DEFAULT_QUEUE_CAPACITY;
use crate::catalog::Catalog;
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_DB_PATH: &str = "fairway.db";
pub const DEFAULT_JUDGE_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DB_PATH),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    /// Program and arguments of the process judge.
    pub command: Vec<String>,
    pub timeout_ms: u64,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            command: Vec::new(),
            timeout_ms: DEFAULT_JUDGE_TIMEOUT_MS,
        }
    }
}

impl JudgeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnounceConfig {
    /// Without a webhook, records are only logged.
    pub webhook_url: Option<Url>,
    pub queue_capacity: usize,
}

impl Default for AnnounceConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FairwayConfig {
    pub database: DatabaseConfig,
    pub judge: JudgeConfig,
    pub announce: AnnounceConfig,
    pub catalog: Catalog,
}

impl FairwayConfig {
    /// Load from a YAML file, then apply environment overrides.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mut cfg = Self::from_yaml_str(&text)?;
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Defaults plus environment overrides; used when no file is given.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut cfg = Self::default();
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self, ConfigError> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply `FAIRWAY_*` overrides read through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("FAIRWAY_DB") {
            self.database.path = PathBuf::from(v);
        }

        if let Some(v) = lookup("FAIRWAY_WEBHOOK_URL") {
            if v.trim().is_empty() {
                self.announce.webhook_url = None;
            } else {
                let url = Url::parse(&v).map_err(|e| {
                    ConfigError::Invalid(format!("FAIRWAY_WEBHOOK_URL '{}': {}", v, e))
                })?;
                self.announce.webhook_url = Some(url);
            }
        }

        if let Some(v) = lookup("FAIRWAY_JUDGE_TIMEOUT_MS") {
            self.judge.timeout_ms = v.trim().parse().map_err(|_| {
                ConfigError::Invalid(format!("FAIRWAY_JUDGE_TIMEOUT_MS '{}' is not a number", v))
            })?;
        }

        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.judge.timeout_ms == 0 {
            return Err(ConfigError::Invalid("judge.timeout_ms must be > 0".into()));
        }
        if self.announce.queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "announce.queue_capacity must be > 0".into(),
            ));
        }
        if let Some(url) = &self.announce.webhook_url {
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::Invalid(format!(
                    "announce.webhook_url must be http(s), got '{}'",
                    url.scheme()
                )));
            }
        }
        self.catalog.validate().map_err(ConfigError::Invalid)
    }
}
