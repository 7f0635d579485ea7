//! `gmail_filter` resource controller
//!
//! Gmail filters cannot be edited, so this resource has no update path and
//! any change to its config plans a replacement.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::{Change, Resource};
use crate::error::{GmailError, Result};
use crate::mapper::{filter_from_config, filter_to_state};
use crate::models::{FilterConfig, FilterState};
use crate::provider::Provider;

/// Creates, reads and deletes a single filter
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterResource;

#[async_trait]
impl Resource for FilterResource {
    type Config = FilterConfig;
    type State = FilterState;

    const TYPE_NAME: &'static str = "gmail_filter";

    fn user_id(config: &FilterConfig) -> Option<&str> {
        config.user_id.as_deref().filter(|id| !id.is_empty())
    }

    fn state_id(state: &FilterState) -> &str {
        &state.id
    }

    fn validate(_config: &FilterConfig) -> Result<()> {
        Ok(())
    }

    fn plan(prior: &FilterConfig, proposed: &FilterConfig) -> Change {
        if Self::user_id(prior) == Self::user_id(proposed)
            && prior.criteria == proposed.criteria
            && prior.action == proposed.action
        {
            Change::NoOp
        } else {
            Change::Replace
        }
    }

    async fn create(&self, provider: &Provider, config: &FilterConfig) -> Result<FilterState> {
        let user_id = provider.user_id(config.user_id.as_deref());

        info!("Creating filter for {}", user_id);
        let created = provider
            .client()
            .create_filter(user_id, filter_from_config(config))
            .await
            .map_err(|e| e.context("failed to create filter"))?;

        let id = created
            .id
            .filter(|id| !id.is_empty())
            .ok_or_else(|| GmailError::FilterError("Created filter has no ID".to_string()))?;
        debug!("Created filter '{}'", id);

        // The filter exists remotely from here on even if the read fails
        self.read(provider, config.user_id.as_deref(), &id)
            .await?
            .ok_or_else(|| {
                GmailError::FilterError(format!(
                    "filter '{}' was created but could not be read back",
                    id
                ))
            })
    }

    async fn read(
        &self,
        provider: &Provider,
        user_id: Option<&str>,
        id: &str,
    ) -> Result<Option<FilterState>> {
        let user_id = provider.user_id(user_id);
        debug!("Reading filter '{}' for {}", id, user_id);

        match provider.client().get_filter(user_id, id).await {
            Ok(filter) => Ok(Some(filter_to_state(&filter))),
            Err(e) if e.is_not_found() => {
                warn!("Filter '{}' no longer exists, clearing it from state", id);
                Ok(None)
            }
            Err(e) => Err(e.context(format!("failed to read filter '{}'", id))),
        }
    }

    async fn delete(&self, provider: &Provider, user_id: Option<&str>, id: &str) -> Result<()> {
        let user_id = provider.user_id(user_id);

        info!("Deleting filter '{}' for {}", id, user_id);
        provider
            .client()
            .delete_filter(user_id, id)
            .await
            .map_err(|e| e.context(format!("failed to delete filter '{}'", id)))
    }
}
