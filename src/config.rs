use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::auth::Access;
use crate::error::{GmailError, Result};

/// Mailbox alias for the authenticated user
pub const DEFAULT_USER_ID: &str = "me";

/// Provider-level settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Persisted OAuth2 token
    #[serde(default = "default_token_file")]
    pub token_file: PathBuf,
    /// OAuth2 application secret
    #[serde(default = "default_credentials_file")]
    pub credentials_file: PathBuf,
    /// Mailbox used when a resource does not name one
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default)]
    pub access: Access,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            token_file: default_token_file(),
            credentials_file: default_credentials_file(),
            user_id: default_user_id(),
            access: Access::default(),
        }
    }
}

fn default_token_file() -> PathBuf {
    PathBuf::from("token.json")
}

fn default_credentials_file() -> PathBuf {
    PathBuf::from("credentials.json")
}

fn default_user_id() -> String {
    DEFAULT_USER_ID.to_string()
}

impl ProviderConfig {
    pub async fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::warn!("Config file not found at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GmailError::ConfigError(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| GmailError::ConfigError(format!("Failed to parse config file: {}", e)))?;

        config.validate()?;

        tracing::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                GmailError::ConfigError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| GmailError::ConfigError(format!("Failed to serialize config: {}", e)))?;

        tokio::fs::write(path, content)
            .await
            .map_err(|e| GmailError::ConfigError(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Saved configuration to {:?}", path);
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(GmailError::ConfigError(
                "user_id cannot be empty".to_string(),
            ));
        }
        if self.token_file.as_os_str().is_empty() {
            return Err(GmailError::ConfigError(
                "token_file cannot be empty".to_string(),
            ));
        }
        if self.credentials_file.as_os_str().is_empty() {
            return Err(GmailError::ConfigError(
                "credentials_file cannot be empty".to_string(),
            ));
        }

        tracing::debug!("Configuration validation passed");
        Ok(())
    }

    /// Create an example configuration file
    pub async fn create_example(path: &Path) -> Result<()> {
        Self::default().save(path).await
    }
}
