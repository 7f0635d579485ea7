//! `gmail_label` resource controller

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{Change, Resource, UpdatableResource};
use crate::color::validate_color;
use crate::error::{GmailError, Result};
use crate::mapper::{label_from_config, label_to_state};
use crate::models::{LabelConfig, LabelState};
use crate::provider::Provider;

/// Creates, reads, updates and deletes a single label
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelResource;

#[async_trait]
impl Resource for LabelResource {
    type Config = LabelConfig;
    type State = LabelState;

    const TYPE_NAME: &'static str = "gmail_label";

    fn user_id(config: &LabelConfig) -> Option<&str> {
        config.user_id.as_deref().filter(|id| !id.is_empty())
    }

    fn state_id(state: &LabelState) -> &str {
        &state.id
    }

    fn validate(config: &LabelConfig) -> Result<()> {
        validate_color(&config.color)
    }

    fn plan(prior: &LabelConfig, proposed: &LabelConfig) -> Change {
        if Self::user_id(prior) != Self::user_id(proposed) {
            Change::Replace
        } else if prior.name != proposed.name
            || prior.color != proposed.color
            || prior.visibility != proposed.visibility
        {
            Change::Update
        } else {
            Change::NoOp
        }
    }

    async fn create(&self, provider: &Provider, config: &LabelConfig) -> Result<LabelState> {
        Self::validate(config)?;
        let user_id = provider.user_id(config.user_id.as_deref());

        info!("Creating label '{}' for {}", config.name, user_id);
        let created = provider
            .client()
            .create_label(user_id, label_from_config(config))
            .await
            .map_err(|e| e.context(format!("failed to create label '{}'", config.name)))?;

        let id = created
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| GmailError::LabelError("Created label has no ID".to_string()))?;

        self.read(provider, config.user_id.as_deref(), &id)
            .await?
            .ok_or_else(|| {
                GmailError::LabelError(format!(
                    "label '{}' was created but could not be read back",
                    id
                ))
            })
    }

    async fn read(
        &self,
        provider: &Provider,
        user_id: Option<&str>,
        id: &str,
    ) -> Result<Option<LabelState>> {
        let user_id = provider.user_id(user_id);
        debug!("Reading label '{}' for {}", id, user_id);

        match provider.client().get_label(user_id, id).await {
            Ok(label) => Ok(Some(label_to_state(&label))),
            Err(e) if e.is_not_found() => {
                warn!("Label '{}' no longer exists, clearing it from state", id);
                Ok(None)
            }
            Err(e) => Err(e.context(format!("failed to read label '{}'", id))),
        }
    }

    async fn delete(&self, provider: &Provider, user_id: Option<&str>, id: &str) -> Result<()> {
        let user_id = provider.user_id(user_id);

        info!("Deleting label '{}' for {}", id, user_id);
        provider
            .client()
            .delete_label(user_id, id)
            .await
            .map_err(|e| e.context(format!("failed to delete label '{}'", id)))
    }
}

#[async_trait]
impl UpdatableResource for LabelResource {
    /// Computed counters are not refreshed here; they catch up on the next read.
    async fn update(&self, provider: &Provider, id: &str, config: &LabelConfig) -> Result<()> {
        Self::validate(config)?;
        let user_id = provider.user_id(config.user_id.as_deref());

        info!("Updating label '{}' for {}", id, user_id);
        provider
            .client()
            .update_label(user_id, id, label_from_config(config))
            .await
            .map_err(|e| e.context(format!("failed to update label '{}'", id)))?;

        Ok(())
    }
}
