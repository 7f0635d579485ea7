//! Provider session: the shared client handle and the default mailbox

use std::sync::Arc;
use tracing::info;

use crate::auth;
use crate::client::{GmailClient, HubGmailClient};
use crate::config::ProviderConfig;
use crate::error::Result;

/// Read-only state shared by every resource and data-source operation
#[derive(Clone)]
pub struct Provider {
    client: Arc<dyn GmailClient>,
    default_user_id: String,
}

impl Provider {
    pub fn new(client: Arc<dyn GmailClient>, default_user_id: impl Into<String>) -> Self {
        Self {
            client,
            default_user_id: default_user_id.into(),
        }
    }

    /// Authenticate with the configured credential and token files
    pub async fn configure(config: &ProviderConfig) -> Result<Self> {
        config.validate()?;

        let hub =
            auth::initialize_gmail_hub(&config.credentials_file, &config.token_file, config.access)
                .await?;

        info!(
            "Provider configured for mailbox '{}' ({} access)",
            config.user_id, config.access
        );
        Ok(Self::new(
            Arc::new(HubGmailClient::new(hub, config.access)),
            config.user_id.clone(),
        ))
    }

    pub fn client(&self) -> &dyn GmailClient {
        self.client.as_ref()
    }

    pub fn default_user_id(&self) -> &str {
        &self.default_user_id
    }

    /// Effective mailbox: a non-empty per-instance override, else the default
    pub fn user_id<'a>(&'a self, user_id: Option<&'a str>) -> &'a str {
        match user_id {
            Some(id) if !id.is_empty() => id,
            _ => &self.default_user_id,
        }
    }
}
