//! Typed attribute records for resources and data sources
//!
//! Each record serializes to the flat attribute bag the host exchanges with the
//! provider. Absent string keys deserialize to `""`, the API's zero value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Identity given to every `gmail_labels` data source result
pub const LABELS_DATA_SOURCE_ID: &str = "labels";

/// Label color; each value is a palette hex string or `""` for unset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelColor {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub background: String,
}

impl LabelColor {
    pub fn new(text: impl Into<String>, background: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            background: background.into(),
        }
    }
}

/// Label visibility, carrying the API enum values verbatim
/// (`show`/`hide`, `labelShow`/`labelShowIfUnread`/`labelHide`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LabelVisibility {
    #[serde(default)]
    pub message_list: String,
    #[serde(default)]
    pub label_list: String,
}

/// Server-owned message or thread counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub total: i32,
    pub unread: i32,
}

/// Desired state of a `gmail_label` resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub name: String,
    pub color: LabelColor,
    #[serde(default)]
    pub visibility: LabelVisibility,
}

impl LabelConfig {
    pub fn new(name: impl Into<String>, color: LabelColor) -> Self {
        Self {
            user_id: None,
            name: name.into(),
            color,
            visibility: LabelVisibility::default(),
        }
    }
}

/// Observed state of a label, shared by the resource and both data sources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelState {
    pub id: String,
    pub name: String,
    pub messages: Counters,
    pub threads: Counters,
    pub visibility: LabelVisibility,
    pub color: LabelColor,
}

impl LabelState {
    /// The declared part of the state, as a config for the same mailbox
    pub fn to_config(&self, user_id: Option<String>) -> LabelConfig {
        LabelConfig {
            user_id,
            name: self.name.clone(),
            color: self.color.clone(),
            visibility: self.visibility.clone(),
        }
    }
}

/// What a filter matches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub negated_query: String,
    #[serde(default)]
    pub has_attachment: bool,
    #[serde(default)]
    pub exclude_chats: bool,
    #[serde(default)]
    pub size: i32,
    /// `larger` or `smaller`
    #[serde(default)]
    pub size_comparison: String,
}

/// What a filter does to matching messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterAction {
    #[serde(default)]
    pub add_labels: BTreeSet<String>,
    #[serde(default)]
    pub remove_labels: BTreeSet<String>,
    #[serde(default)]
    pub forward: String,
}

/// Desired state of a `gmail_filter` resource. Every field forces replacement.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub criteria: FilterCriteria,
    #[serde(flatten)]
    pub action: FilterAction,
}

/// Observed state of a filter
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub id: String,
    #[serde(flatten)]
    pub criteria: FilterCriteria,
    #[serde(flatten)]
    pub action: FilterAction,
}

impl FilterState {
    pub fn to_config(&self, user_id: Option<String>) -> FilterConfig {
        FilterConfig {
            user_id,
            criteria: self.criteria.clone(),
            action: self.action.clone(),
        }
    }
}

/// Query for the `gmail_label` data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelLookupConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub name: String,
}

/// Query for the `gmail_labels` data source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelsConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

/// Result of the `gmail_labels` data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelsState {
    pub id: String,
    pub labels: Vec<LabelState>,
}
