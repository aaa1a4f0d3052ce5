//! Configuration for Dispatch dispatchers.
//!
//! ```toml
//! [runtime]
//! label = "app.dispatch"
//!
//! [recorder]
//! run_on_main_inline = false
//! ```
//!
//! Every section and field is optional; absent values fall back to defaults.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Tracing label used when `[runtime].label` is not set.
pub const DEFAULT_LABEL: &str = "dispatch";

/// Serde helper for fields that default to `true`.
#[must_use]
pub const fn default_true() -> bool {
    true
}

fn default_label() -> String {
    DEFAULT_LABEL.to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DispatchConfig {
    /// Settings for the tokio-backed dispatcher.
    pub runtime: Option<RuntimeConfig>,
    /// Settings for the recording dispatcher used in tests.
    pub recorder: Option<RecorderConfig>,
}

/// ```toml
/// [runtime]
/// label = "uploads"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuntimeConfig {
    /// Attached to every tracing event the dispatcher emits.
    #[serde(default = "default_label")]
    pub label: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            label: default_label(),
        }
    }
}

/// ```toml
/// [recorder]
/// run_on_main_inline = false
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct RecorderConfig {
    /// Run main-queue tasks at dispatch time. When false they stay pending
    /// until the test replays them. Default: true.
    #[serde(default = "default_true")]
    pub run_on_main_inline: bool,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            run_on_main_inline: true,
        }
    }
}

impl DispatchConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Load the config at `path`. A missing file is `Ok(None)`.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No dispatch config file");
            return Ok(None);
        }

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match Self::from_toml_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn runtime(&self) -> RuntimeConfig {
        self.runtime.clone().unwrap_or_default()
    }

    #[must_use]
    pub fn recorder(&self) -> RecorderConfig {
        self.recorder.unwrap_or_default()
    }
}
