//! Gmail Provider
//!
//! Declarative management of Gmail labels and filters: desired state in,
//! Gmail REST API calls out, observed state back.
//!
//! # Overview
//!
//! - **Resources**: `gmail_label` (create, read, update, delete) and
//!   `gmail_filter` (create, read, delete; every change is a replacement)
//! - **Data sources**: `gmail_label` (lookup by exact name) and
//!   `gmail_labels` (every label of the mailbox)
//! - **Validation**: label colors are checked against Gmail's palette before
//!   any API call
//! - **Drift**: a read that finds the entity gone returns `None` instead of
//!   an error
//!
//! # Example Usage
//!
//! ```no_run
//! use gmail_provider::config::ProviderConfig;
//! use gmail_provider::models::{LabelColor, LabelConfig};
//! use gmail_provider::provider::Provider;
//! use gmail_provider::resources::{LabelResource, Resource};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let provider = Provider::configure(&ProviderConfig::default()).await?;
//!
//!     let config = LabelConfig::new("Work", LabelColor::new("#ffffff", "#16a766"));
//!     let state = LabelResource.create(&provider, &config).await?;
//!
//!     match LabelResource.read(&provider, None, &state.id).await? {
//!         Some(label) => println!("{} has {} messages", label.name, label.messages.total),
//!         None => println!("label was deleted out of band"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`auth`] - OAuth2 authentication and Gmail API hub construction
//! - [`client`] - Gmail API calls behind the [`GmailClient`] trait
//! - [`cli`] - Command-line interface
//! - [`color`] - Label color palette validation
//! - [`config`] - Provider configuration
//! - [`data_sources`] - Label lookup and listing
//! - [`error`] - Error types and result aliases
//! - [`mapper`] - Conversion between API objects and attribute records
//! - [`models`] - Typed attribute records
//! - [`provider`] - Shared client handle and mailbox resolution
//! - [`resources`] - Label and filter controllers
//! - [`schema`] - Attribute schemas

pub mod auth;
pub mod cli;
pub mod client;
pub mod color;
pub mod config;
pub mod data_sources;
pub mod error;
pub mod mapper;
pub mod models;
pub mod provider;
pub mod resources;
pub mod schema;

pub use error::{GmailError, Result};

pub use models::{
    Counters, FilterAction, FilterConfig, FilterCriteria, FilterState, LabelColor, LabelConfig,
    LabelLookupConfig, LabelState, LabelVisibility, LabelsConfig, LabelsState,
};

pub use client::{GmailClient, HubGmailClient};
pub use config::ProviderConfig;
pub use provider::Provider;

pub use data_sources::{DataSource, LabelDataSource, LabelsDataSource};
pub use resources::{Change, FilterResource, LabelResource, Resource, UpdatableResource};
