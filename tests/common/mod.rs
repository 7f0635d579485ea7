//! Common test utilities and fixtures

#![allow(dead_code)]

use async_trait::async_trait;
use gmail_provider::client::GmailClient;
use gmail_provider::error::{GmailError, Result};
use gmail_provider::provider::Provider;
use google_gmail1::api::{Filter, Label, LabelColor};
use mockall::mock;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

mock! {
    pub Gmail {}

    #[async_trait]
    impl GmailClient for Gmail {
        async fn list_labels(&self, user_id: &str) -> Result<Vec<Label>>;
        async fn get_label(&self, user_id: &str, label_id: &str) -> Result<Label>;
        async fn create_label(&self, user_id: &str, label: Label) -> Result<Label>;
        async fn update_label(&self, user_id: &str, label_id: &str, label: Label) -> Result<Label>;
        async fn delete_label(&self, user_id: &str, label_id: &str) -> Result<()>;
        async fn get_filter(&self, user_id: &str, filter_id: &str) -> Result<Filter>;
        async fn create_filter(&self, user_id: &str, filter: Filter) -> Result<Filter>;
        async fn delete_filter(&self, user_id: &str, filter_id: &str) -> Result<()>;
    }
}

/// Provider over a mock, with "me" as default mailbox
pub fn mock_provider(mock: MockGmail) -> Provider {
    Provider::new(Arc::new(mock), "me")
}

/// The error Gmail returns for a missing entity
pub fn not_found() -> GmailError {
    GmailError::NotFound("HTTP 404: Requested entity was not found.".to_string())
}

/// Create an API label with a name and ID
pub fn api_label(id: &str, name: &str) -> Label {
    Label {
        id: Some(id.to_string()),
        name: Some(name.to_string()),
        type_: Some("user".to_string()),
        ..Default::default()
    }
}

/// Create an API label with colors and zeroed counters
pub fn colored_label(id: &str, name: &str, text: &str, background: &str) -> Label {
    Label {
        color: Some(LabelColor {
            text_color: Some(text.to_string()),
            background_color: Some(background.to_string()),
        }),
        messages_total: Some(0),
        messages_unread: Some(0),
        threads_total: Some(0),
        threads_unread: Some(0),
        ..api_label(id, name)
    }
}

#[derive(Default)]
struct Mailbox {
    labels: Vec<Label>,
    filters: Vec<Filter>,
}

/// In-memory Gmail keeping labels and filters per mailbox and logging calls
#[derive(Default)]
pub struct FakeGmail {
    mailboxes: Mutex<HashMap<String, Mailbox>>,
    next_id: Mutex<u32>,
    calls: Mutex<Vec<String>>,
}

impl FakeGmail {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seed a label directly, bypassing the call log
    pub fn insert_label(&self, user_id: &str, label: Label) {
        self.mailboxes
            .lock()
            .unwrap()
            .entry(user_id.to_string())
            .or_default()
            .labels
            .push(label);
    }

    /// Remove a label directly, as if deleted in the Gmail UI
    pub fn remove_label_out_of_band(&self, user_id: &str, label_id: &str) {
        if let Some(mailbox) = self.mailboxes.lock().unwrap().get_mut(user_id) {
            mailbox.labels.retain(|l| l.id.as_deref() != Some(label_id));
        }
    }

    /// Remove a filter directly, as if deleted in the Gmail UI
    pub fn remove_filter_out_of_band(&self, user_id: &str, filter_id: &str) {
        if let Some(mailbox) = self.mailboxes.lock().unwrap().get_mut(user_id) {
            mailbox.filters.retain(|f| f.id.as_deref() != Some(filter_id));
        }
    }

    pub fn labels(&self, user_id: &str) -> Vec<Label> {
        self.mailboxes
            .lock()
            .unwrap()
            .get(user_id)
            .map(|m| m.labels.clone())
            .unwrap_or_default()
    }

    pub fn filters(&self, user_id: &str) -> Vec<Filter> {
        self.mailboxes
            .lock()
            .unwrap()
            .get(user_id)
            .map(|m| m.filters.clone())
            .unwrap_or_default()
    }

    /// Calls made so far, as "method:user_id"
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, method: &str, user_id: &str) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{}:{}", method, user_id));
    }

    fn allocate_id(&self, prefix: &str) -> String {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        format!("{}_{}", prefix, *next)
    }
}

#[async_trait]
impl GmailClient for FakeGmail {
    async fn list_labels(&self, user_id: &str) -> Result<Vec<Label>> {
        self.record("list_labels", user_id);
        Ok(self.labels(user_id))
    }

    async fn get_label(&self, user_id: &str, label_id: &str) -> Result<Label> {
        self.record("get_label", user_id);
        self.labels(user_id)
            .into_iter()
            .find(|l| l.id.as_deref() == Some(label_id))
            .ok_or_else(not_found)
    }

    async fn create_label(&self, user_id: &str, label: Label) -> Result<Label> {
        self.record("create_label", user_id);
        let created = Label {
            id: Some(self.allocate_id("Label")),
            type_: Some("user".to_string()),
            messages_total: Some(0),
            messages_unread: Some(0),
            threads_total: Some(0),
            threads_unread: Some(0),
            ..label
        };
        self.insert_label(user_id, created.clone());
        Ok(created)
    }

    async fn update_label(&self, user_id: &str, label_id: &str, label: Label) -> Result<Label> {
        self.record("update_label", user_id);
        let mut mailboxes = self.mailboxes.lock().unwrap();
        let existing = mailboxes
            .get_mut(user_id)
            .and_then(|m| {
                m.labels
                    .iter_mut()
                    .find(|l| l.id.as_deref() == Some(label_id))
            })
            .ok_or_else(not_found)?;

        existing.name = label.name;
        existing.color = label.color;
        existing.message_list_visibility = label.message_list_visibility;
        existing.label_list_visibility = label.label_list_visibility;
        Ok(existing.clone())
    }

    async fn delete_label(&self, user_id: &str, label_id: &str) -> Result<()> {
        self.record("delete_label", user_id);
        let mut mailboxes = self.mailboxes.lock().unwrap();
        let mailbox = mailboxes.get_mut(user_id).ok_or_else(not_found)?;
        let before = mailbox.labels.len();
        mailbox.labels.retain(|l| l.id.as_deref() != Some(label_id));
        if mailbox.labels.len() == before {
            return Err(not_found());
        }
        Ok(())
    }

    async fn get_filter(&self, user_id: &str, filter_id: &str) -> Result<Filter> {
        self.record("get_filter", user_id);
        self.filters(user_id)
            .into_iter()
            .find(|f| f.id.as_deref() == Some(filter_id))
            .ok_or_else(not_found)
    }

    async fn create_filter(&self, user_id: &str, filter: Filter) -> Result<Filter> {
        self.record("create_filter", user_id);
        let created = Filter {
            id: Some(self.allocate_id("filter")),
            ..filter
        };
        self.mailboxes
            .lock()
            .unwrap()
            .entry(user_id.to_string())
            .or_default()
            .filters
            .push(created.clone());
        Ok(created)
    }

    async fn delete_filter(&self, user_id: &str, filter_id: &str) -> Result<()> {
        self.record("delete_filter", user_id);
        let mut mailboxes = self.mailboxes.lock().unwrap();
        let mailbox = mailboxes.get_mut(user_id).ok_or_else(not_found)?;
        let before = mailbox.filters.len();
        mailbox.filters.retain(|f| f.id.as_deref() != Some(filter_id));
        if mailbox.filters.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}

/// Provider over a shared fake, with "me" as default mailbox
pub fn fake_provider(fake: &Arc<FakeGmail>) -> Provider {
    Provider::new(fake.clone(), "me")
}
