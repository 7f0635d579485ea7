//! Gmail API client for label and filter calls
//!
//! One trait method per API call, each scoped to a mailbox. No retry, backoff
//! or timeout is layered on top: a failed call is a failed operation.

use async_trait::async_trait;
use google_gmail1::{
    api::{Filter, Label},
    common, Gmail,
};
use tracing::debug;

use crate::auth::Access;
use crate::error::{GmailError, Result};

/// Trait defining the Gmail calls the provider makes, for easier testing
#[async_trait]
pub trait GmailClient: Send + Sync {
    /// List every label of the mailbox, in API order
    async fn list_labels(&self, user_id: &str) -> Result<Vec<Label>>;

    /// Get a label by ID
    async fn get_label(&self, user_id: &str, label_id: &str) -> Result<Label>;

    /// Create a label, returning it with its server-assigned ID
    async fn create_label(&self, user_id: &str, label: Label) -> Result<Label>;

    /// Replace every mutable field of a label
    async fn update_label(&self, user_id: &str, label_id: &str, label: Label) -> Result<Label>;

    /// Delete a label by ID
    async fn delete_label(&self, user_id: &str, label_id: &str) -> Result<()>;

    /// Get a filter by ID
    async fn get_filter(&self, user_id: &str, filter_id: &str) -> Result<Filter>;

    /// Create a filter, returning it with its server-assigned ID
    async fn create_filter(&self, user_id: &str, filter: Filter) -> Result<Filter>;

    /// Delete a filter by ID
    async fn delete_filter(&self, user_id: &str, filter_id: &str) -> Result<()>;
}

/// Gmail client backed by the generated API hub
pub struct HubGmailClient<C> {
    hub: Gmail<C>,
    access: Access,
}

impl<C> HubGmailClient<C> {
    /// Create a client whose calls request the scopes of `access`
    pub fn new(hub: Gmail<C>, access: Access) -> Self {
        Self { hub, access }
    }
}

#[async_trait]
impl<C> GmailClient for HubGmailClient<C>
where
    C: common::Connector,
{
    async fn list_labels(&self, user_id: &str) -> Result<Vec<Label>> {
        debug!("Calling Gmail API to list labels for {}", user_id);
        let (_, response) = self
            .hub
            .users()
            .labels_list(user_id)
            .add_scope(self.access.label_scope())
            .doit()
            .await?;

        let labels = response.labels.unwrap_or_default();
        debug!("Listed {} labels", labels.len());
        Ok(labels)
    }

    async fn get_label(&self, user_id: &str, label_id: &str) -> Result<Label> {
        let (_, label) = self
            .hub
            .users()
            .labels_get(user_id, label_id)
            .add_scope(self.access.label_scope())
            .doit()
            .await?;
        Ok(label)
    }

    async fn create_label(&self, user_id: &str, label: Label) -> Result<Label> {
        let (_, created) = self
            .hub
            .users()
            .labels_create(label, user_id)
            .add_scope(self.access.label_scope())
            .doit()
            .await?;

        if created.id.is_none() {
            return Err(GmailError::LabelError("Created label has no ID".to_string()));
        }
        Ok(created)
    }

    async fn update_label(&self, user_id: &str, label_id: &str, label: Label) -> Result<Label> {
        let (_, updated) = self
            .hub
            .users()
            .labels_update(label, user_id, label_id)
            .add_scope(self.access.label_scope())
            .doit()
            .await?;
        Ok(updated)
    }

    async fn delete_label(&self, user_id: &str, label_id: &str) -> Result<()> {
        self.hub
            .users()
            .labels_delete(user_id, label_id)
            .add_scope(self.access.label_scope())
            .doit()
            .await?;
        Ok(())
    }

    async fn get_filter(&self, user_id: &str, filter_id: &str) -> Result<Filter> {
        let (_, filter) = self
            .hub
            .users()
            .settings_filters_get(user_id, filter_id)
            .add_scope(self.access.filter_scope())
            .doit()
            .await?;
        Ok(filter)
    }

    async fn create_filter(&self, user_id: &str, filter: Filter) -> Result<Filter> {
        let (_, created) = self
            .hub
            .users()
            .settings_filters_create(filter, user_id)
            .add_scope(self.access.filter_scope())
            .doit()
            .await?;

        if created.id.is_none() {
            return Err(GmailError::FilterError("Created filter has no ID".to_string()));
        }
        Ok(created)
    }

    async fn delete_filter(&self, user_id: &str, filter_id: &str) -> Result<()> {
        self.hub
            .users()
            .settings_filters_delete(user_id, filter_id)
            .add_scope(self.access.filter_scope())
            .doit()
            .await?;
        Ok(())
    }
}
