//! Read-only label data sources: lookup by name and full listing

use async_trait::async_trait;
use tracing::debug;

use crate::error::{GmailError, Result};
use crate::mapper::label_to_state;
use crate::models::{LabelLookupConfig, LabelState, LabelsConfig, LabelsState, LABELS_DATA_SOURCE_ID};
use crate::provider::Provider;

#[async_trait]
pub trait DataSource: Send + Sync {
    type Config: Send + Sync;
    type State: Send;

    /// Data source type name as registered with the host
    const TYPE_NAME: &'static str;

    async fn read(&self, provider: &Provider, config: &Self::Config) -> Result<Self::State>;
}

/// `gmail_label`: the single label with exactly the requested name
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelDataSource;

#[async_trait]
impl DataSource for LabelDataSource {
    type Config = LabelLookupConfig;
    type State = LabelState;

    const TYPE_NAME: &'static str = "gmail_label";

    async fn read(&self, provider: &Provider, config: &LabelLookupConfig) -> Result<LabelState> {
        let user_id = provider.user_id(config.user_id.as_deref());
        let name = config.name.as_str();

        let labels = provider
            .client()
            .list_labels(user_id)
            .await
            .map_err(|e| e.context("failed to get the list of labels"))?;

        let mut matches = labels
            .iter()
            .filter(|label| label.name.as_deref() == Some(name));

        let label = matches.next().ok_or_else(|| GmailError::LabelNotFound {
            name: name.to_string(),
        })?;
        if matches.next().is_some() {
            return Err(GmailError::AmbiguousLabel {
                name: name.to_string(),
            });
        }

        let state = label_to_state(label);
        if state.id.is_empty() {
            return Err(GmailError::LabelError(format!(
                "label '{}' was returned without an ID",
                name
            )));
        }

        debug!("Resolved label '{}' to '{}'", name, state.id);
        Ok(state)
    }
}

/// `gmail_labels`: every label of the mailbox, in API order
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelsDataSource;

#[async_trait]
impl DataSource for LabelsDataSource {
    type Config = LabelsConfig;
    type State = LabelsState;

    const TYPE_NAME: &'static str = "gmail_labels";

    async fn read(&self, provider: &Provider, config: &LabelsConfig) -> Result<LabelsState> {
        let user_id = provider.user_id(config.user_id.as_deref());

        let labels = provider
            .client()
            .list_labels(user_id)
            .await
            .map_err(|e| e.context("failed to get the list of labels"))?;

        debug!("Listed {} labels for {}", labels.len(), user_id);
        Ok(LabelsState {
            id: LABELS_DATA_SOURCE_ID.to_string(),
            labels: labels.iter().map(label_to_state).collect(),
        })
    }
}
