/*
[INPUT]:  YAML configuration file (optional)
[OUTPUT]: Parsed editor configuration with defaults applied
[POS]:    Configuration layer - timer and remote sample settings
[UPDATE]: When adding new configuration options
*/

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow, bail};
use serde::{Deserialize, Serialize};
use todo_timer_adapter::{ClientConfig, DEFAULT_SAMPLE_PATH};
use url::Url;

const CONFIG_DIR_NAME: &str = "todo-timer";
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Top-level configuration for the editor
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EditorConfig {
    pub timer: TimerConfig,
    pub remote: RemoteConfig,
}

/// Timer-mode configuration
///
/// `duration_secs` feeds both the countdown's tick count and the race timeout, so the
/// displayed countdown reaches 0 exactly when the prompt is raised.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimerConfig {
    /// Seconds a draft may stay in progress
    pub duration_secs: u32,
    /// Shown when time runs out
    pub prompt_message: String,
    /// Start with timer mode on
    pub start_enabled: bool,
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            duration_secs: 60,
            prompt_message: "You're running out of time. Discard your draft?".to_string(),
            start_enabled: false,
        }
    }
}

impl TimerConfig {
    /// Ticks emitted by one countdown.
    pub fn countdown_ticks(&self) -> u32 {
        self.duration_secs
    }

    /// Race timeout; a separate timer from the countdown, same length.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::from(self.duration_secs))
    }
}

/// Remote sample-data configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub base_url: String,
    pub path: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            path: DEFAULT_SAMPLE_PATH.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl RemoteConfig {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

impl EditorConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        Ok(config)
    }

    /// Load from an explicit path, or from the default location if it exists.
    ///
    /// A missing explicit file is an error; a missing default file yields defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => match default_config_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.timer.duration_secs == 0 {
            bail!("timer.duration_secs must be greater than zero");
        }
        if self.timer.prompt_message.trim().is_empty() {
            bail!("timer.prompt_message cannot be empty");
        }
        url_check(&self.remote.base_url)?;
        if !self.remote.path.starts_with('/') {
            return Err(anyhow!("remote.path must start with '/': {}", self.remote.path));
        }
        Ok(())
    }
}

fn url_check(raw: &str) -> Result<()> {
    let parsed = Url::parse(raw).with_context(|| format!("remote.base_url invalid: {raw}"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        bail!("remote.base_url must be http or https: {raw}");
    }
    Ok(())
}

/// `<config dir>/todo-timer/config.yaml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
