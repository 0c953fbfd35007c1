use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::{Config, ResourceConfig};
use crate::resource::ActionTypes;

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl ConfigError {
    fn invalid(message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            message: message.into(),
        }
    }
}

impl Config {
    /// Returns the path to the configuration file.
    ///
    /// Uses `~/.config/crudsync/config.toml` on Unix/macOS,
    /// or equivalent on other platforms via `dirs::config_dir()`.
    /// Falls back to current directory if config_dir is unavailable.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("crudsync").join("config.toml")
    }

    /// Loads configuration from the default config file.
    ///
    /// - If the file doesn't exist, returns `Config::default()`.
    /// - If the file exists, parses it as TOML and validates.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(Config::default());
        }

        Self::load_from(&path)
    }

    /// Loads and validates configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Checks:
    /// - At least one resource is configured
    /// - Names, URLs and primary keys are non-empty
    /// - Resource names are unique
    /// - All resources share one reset kind
    /// - No two resources produce the same signal kind
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.resources.is_empty() {
            return Err(ConfigError::invalid("At least one resource must be configured"));
        }

        let mut names = HashSet::new();
        for resource in &self.resources {
            validate_resource(resource)?;
            if !names.insert(resource.name.as_str()) {
                return Err(ConfigError::invalid(format!(
                    "Resource '{}' is configured more than once",
                    resource.name
                )));
            }
        }

        let reset_kind = &self.resources[0].reset_kind;
        if let Some(other) = self.resources.iter().find(|r| &r.reset_kind != reset_kind) {
            return Err(ConfigError::invalid(format!(
                "Resource '{}' uses reset kind '{}' but '{}' uses '{}'",
                other.name, other.reset_kind, self.resources[0].name, reset_kind
            )));
        }

        let vocabularies: Vec<(&str, ActionTypes)> = self
            .resources
            .iter()
            .map(|r| (r.name.as_str(), r.action_types()))
            .collect();

        for (name, types) in &vocabularies {
            if let Some(kind) = types
                .resource_kinds()
                .into_iter()
                .find(|kind| *kind == types.reset_all)
            {
                return Err(ConfigError::invalid(format!(
                    "Resource '{}' signal '{}' collides with the reset kind",
                    name, kind
                )));
            }
        }

        for (i, (name, types)) in vocabularies.iter().enumerate() {
            for (other_name, other) in &vocabularies[i + 1..] {
                if let Some(kind) = types.collisions(other).first() {
                    return Err(ConfigError::invalid(format!(
                        "Resources '{}' and '{}' both produce signal '{}'",
                        name, other_name, kind
                    )));
                }
            }
        }

        Ok(())
    }

    /// Look up a resource by name.
    pub fn resource(&self, name: &str) -> Option<&ResourceConfig> {
        self.resources.iter().find(|r| r.name == name)
    }

    /// Names of all configured resources, in file order.
    pub fn resource_names(&self) -> Vec<&str> {
        self.resources.iter().map(|r| r.name.as_str()).collect()
    }
}

impl ResourceConfig {
    /// Signal vocabulary derived from this resource's names.
    pub fn action_types(&self) -> ActionTypes {
        ActionTypes::new(&self.name, self.plural.as_deref(), &self.reset_kind)
    }
}

fn validate_resource(resource: &ResourceConfig) -> Result<(), ConfigError> {
    if resource.name.trim().is_empty() {
        return Err(ConfigError::invalid("Resource name must not be empty"));
    }
    if resource.url.trim().is_empty() {
        return Err(ConfigError::invalid(format!(
            "Resource '{}' has an empty url",
            resource.name
        )));
    }
    if resource.primary_key.trim().is_empty() {
        return Err(ConfigError::invalid(format!(
            "Resource '{}' has an empty primary_key",
            resource.name
        )));
    }
    if resource.reset_kind.trim().is_empty() {
        return Err(ConfigError::invalid(format!(
            "Resource '{}' has an empty reset_kind",
            resource.name
        )));
    }
    if let Some(kind) = resource.action_types().duplicates().first() {
        return Err(ConfigError::invalid(format!(
            "Resource '{}' produces signal '{}' for two operations",
            resource.name, kind
        )));
    }
    Ok(())
}
