use crate::error::{CliError, Result};
use directories::ProjectDirs;
use pdbkit::core::devices::IDLE_THRESHOLD;
use pdbkit::core::metadata::DEFAULT_PH;
use pdbkit::remote::config::{RemoteConfig, RemoteConfigBuilder};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct PartialRemoteConfig {
    #[serde(rename = "structure-url", skip_serializing_if = "Option::is_none")]
    structure_url: Option<String>,
    #[serde(rename = "sequence-url", skip_serializing_if = "Option::is_none")]
    sequence_url: Option<String>,
    #[serde(rename = "removed-url", skip_serializing_if = "Option::is_none")]
    removed_url: Option<String>,
    #[serde(rename = "timeout-secs", skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
    #[serde(rename = "user-agent", skip_serializing_if = "Option::is_none")]
    user_agent: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct PartialDeviceConfig {
    #[serde(rename = "idle-threshold", skip_serializing_if = "Option::is_none")]
    idle_threshold: Option<f64>,
}

#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
struct PartialMetadataConfig {
    #[serde(rename = "default-ph", skip_serializing_if = "Option::is_none")]
    default_ph: Option<f64>,
}

/// The configuration file as written by the user; every key is optional.
#[derive(Deserialize, Serialize, Debug, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PartialAppConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    remote: Option<PartialRemoteConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    device: Option<PartialDeviceConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    metadata: Option<PartialMetadataConfig>,
}

/// Effective settings after merging defaults, the file and `--set` values.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub remote: RemoteConfig,
    pub idle_threshold: f64,
    pub default_ph: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            remote: RemoteConfig::default(),
            idle_threshold: IDLE_THRESHOLD,
            default_ph: DEFAULT_PH,
        }
    }
}

impl AppConfig {
    /// Renders the effective settings in configuration file syntax.
    pub fn to_toml(&self) -> Result<String> {
        let view = PartialAppConfig {
            remote: Some(PartialRemoteConfig {
                structure_url: Some(self.remote.structure_url.clone()),
                sequence_url: Some(self.remote.sequence_url.clone()),
                removed_url: Some(self.remote.removed_url.clone()),
                timeout_secs: Some(self.remote.timeout.as_secs()),
                user_agent: Some(self.remote.user_agent.clone()),
            }),
            device: Some(PartialDeviceConfig {
                idle_threshold: Some(self.idle_threshold),
            }),
            metadata: Some(PartialMetadataConfig {
                default_ph: Some(self.default_ph),
            }),
        };
        toml::to_string_pretty(&view)
            .map_err(|e| CliError::Config(format!("Cannot render configuration: {}", e)))
    }
}

/// Location of the configuration file in the OS-specific config directory.
pub fn default_config_path() -> Result<PathBuf> {
    ProjectDirs::from("edu", "caltech", "pdbkit")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .ok_or_else(|| CliError::Config("Could not determine config directory path.".to_string()))
}

/// Loads the configuration named by `--config`, or the default file if it exists.
///
/// An explicitly named file must exist; a missing default file yields the
/// built-in defaults.
pub fn load(explicit: Option<&Path>, set_values: &[String]) -> Result<AppConfig> {
    let partial = match explicit {
        Some(path) => PartialAppConfig::from_file(path)?,
        None => {
            let path = default_config_path()?;
            if path.exists() {
                PartialAppConfig::from_file(&path)?
            } else {
                debug!("No configuration file at {:?}, using defaults.", path);
                PartialAppConfig::default()
            }
        }
    };
    partial.merge(set_values)
}

impl PartialAppConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn merge(mut self, set_values: &[String]) -> Result<AppConfig> {
        self.apply_set_values(set_values)?;
        let defaults = AppConfig::default();

        let remote_file = self.remote.take().unwrap_or_default();
        let mut builder = RemoteConfigBuilder::new();
        if let Some(url) = remote_file.structure_url {
            builder = builder.structure_url(url);
        }
        if let Some(url) = remote_file.sequence_url {
            builder = builder.sequence_url(url);
        }
        if let Some(url) = remote_file.removed_url {
            builder = builder.removed_url(url);
        }
        if let Some(secs) = remote_file.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(agent) = remote_file.user_agent {
            builder = builder.user_agent(agent);
        }
        let remote = builder.build()?;

        let idle_threshold = self
            .device
            .take()
            .and_then(|d| d.idle_threshold)
            .unwrap_or(defaults.idle_threshold);
        if !(0.0..=1.0).contains(&idle_threshold) {
            return Err(CliError::Config(format!(
                "device.idle-threshold must be between 0 and 1, got {}",
                idle_threshold
            )));
        }

        let default_ph = self
            .metadata
            .take()
            .and_then(|m| m.default_ph)
            .unwrap_or(defaults.default_ph);

        Ok(AppConfig {
            remote,
            idle_threshold,
            default_ph,
        })
    }

    fn apply_set_values(&mut self, set_values: &[String]) -> Result<()> {
        for kv_pair in set_values {
            let (key, value_str) = kv_pair.split_once('=').ok_or_else(|| {
                CliError::Config(format!(
                    "Invalid --set format: '{}'. Expected KEY=VALUE.",
                    kv_pair
                ))
            })?;

            let invalid = |kind: &str| {
                CliError::Config(format!("Invalid {} value for {}: {}", kind, key, value_str))
            };

            match key {
                "remote.structure-url" => {
                    self.remote.get_or_insert_with(Default::default).structure_url =
                        Some(value_str.to_string());
                }
                "remote.sequence-url" => {
                    self.remote.get_or_insert_with(Default::default).sequence_url =
                        Some(value_str.to_string());
                }
                "remote.removed-url" => {
                    self.remote.get_or_insert_with(Default::default).removed_url =
                        Some(value_str.to_string());
                }
                "remote.timeout-secs" => {
                    self.remote.get_or_insert_with(Default::default).timeout_secs =
                        Some(value_str.parse().map_err(|_| invalid("integer"))?);
                }
                "remote.user-agent" => {
                    self.remote.get_or_insert_with(Default::default).user_agent =
                        Some(value_str.to_string());
                }
                "device.idle-threshold" => {
                    self.device.get_or_insert_with(Default::default).idle_threshold =
                        Some(value_str.parse().map_err(|_| invalid("float"))?);
                }
                "metadata.default-ph" => {
                    self.metadata.get_or_insert_with(Default::default).default_ph =
                        Some(value_str.parse().map_err(|_| invalid("float"))?);
                }
                _ => {
                    return Err(CliError::Config(format!(
                        "Unsupported configuration key for --set: '{}'",
                        key
                    )));
                }
            }
        }
        Ok(())
    }
}
