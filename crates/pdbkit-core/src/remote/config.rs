use std::time::Duration;
use thiserror::Error;

/// Placeholder substituted with the structure identifier in endpoint templates.
pub const ID_PLACEHOLDER: &str = "{id}";

pub const DEFAULT_STRUCTURE_URL: &str = "https://files.rcsb.org/download/{id}.pdb";
pub const DEFAULT_SEQUENCE_URL: &str = "https://www.rcsb.org/pdb/download/viewFastaFiles.do?structureIdList={id}&compressionType=uncompressed";
pub const DEFAULT_REMOVED_URL: &str = "https://www.rcsb.org/structure/removed/{id}";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Endpoint template '{0}' does not contain the '{{id}}' placeholder")]
    MissingPlaceholder(String),
    #[error("Timeout must be greater than zero")]
    ZeroTimeout,
}

/// Endpoint templates and HTTP settings used to reach the structure database.
///
/// Certificates are always validated.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteConfig {
    pub structure_url: String,
    pub sequence_url: String,
    pub removed_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            structure_url: DEFAULT_STRUCTURE_URL.to_string(),
            sequence_url: DEFAULT_SEQUENCE_URL.to_string(),
            removed_url: DEFAULT_REMOVED_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("pdbkit/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl RemoteConfig {
    pub fn structure_url(&self, pdb_id: &str) -> String {
        self.structure_url.replace(ID_PLACEHOLDER, pdb_id)
    }

    pub fn sequence_url(&self, pdb_id: &str) -> String {
        self.sequence_url.replace(ID_PLACEHOLDER, pdb_id)
    }

    pub fn removed_url(&self, pdb_id: &str) -> String {
        self.removed_url.replace(ID_PLACEHOLDER, pdb_id)
    }
}

#[derive(Default)]
pub struct RemoteConfigBuilder {
    structure_url: Option<String>,
    sequence_url: Option<String>,
    removed_url: Option<String>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl RemoteConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn structure_url(mut self, template: impl Into<String>) -> Self {
        self.structure_url = Some(template.into());
        self
    }
    pub fn sequence_url(mut self, template: impl Into<String>) -> Self {
        self.sequence_url = Some(template.into());
        self
    }
    pub fn removed_url(mut self, template: impl Into<String>) -> Self {
        self.removed_url = Some(template.into());
        self
    }
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Fills unset fields with defaults and validates the templates.
    pub fn build(self) -> Result<RemoteConfig, ConfigError> {
        let defaults = RemoteConfig::default();
        let config = RemoteConfig {
            structure_url: self.structure_url.unwrap_or(defaults.structure_url),
            sequence_url: self.sequence_url.unwrap_or(defaults.sequence_url),
            removed_url: self.removed_url.unwrap_or(defaults.removed_url),
            timeout: self.timeout.unwrap_or(defaults.timeout),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
        };

        for template in [
            &config.structure_url,
            &config.sequence_url,
            &config.removed_url,
        ] {
            if !template.contains(ID_PLACEHOLDER) {
                return Err(ConfigError::MissingPlaceholder(template.clone()));
            }
        }
        if config.timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(config)
    }
}
