//! Command-line interface
//!
//! Drives the resource and data-source controllers directly. Configs are JSON
//! attribute objects read from a file (`-` for stdin); results go to stdout
//! as JSON.

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

use crate::error::Result;
use crate::schema::Schema;

#[derive(Parser, Debug)]
#[command(name = "gmail-provider")]
#[command(version)]
#[command(about = "Manage Gmail labels and filters as declared resources", long_about = None)]
pub struct Cli {
    /// Path to provider configuration file
    #[arg(short, long, default_value = "provider.toml")]
    pub config: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the provider, resource and data source schemas
    Schema,

    /// Generate example provider configuration file
    InitConfig {
        /// Path to create config file
        #[arg(short, long, default_value = "provider.toml")]
        output: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Manage a gmail_label resource
    Label {
        #[command(subcommand)]
        action: LabelCommand,
    },

    /// Manage a gmail_filter resource
    Filter {
        #[command(subcommand)]
        action: FilterCommand,
    },

    /// Query a data source
    Data {
        #[command(subcommand)]
        source: DataCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum LabelCommand {
    /// Create a label from a config file
    Create { file: PathBuf },

    /// Read a label; prints null if it no longer exists
    Read {
        id: String,
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Update a label in place
    Update { id: String, file: PathBuf },

    /// Plan and apply the change from a prior config to a new one
    Apply {
        id: String,
        /// Config the label currently has
        #[arg(long)]
        prior: PathBuf,
        file: PathBuf,
    },

    /// Delete a label
    Delete {
        id: String,
        #[arg(long)]
        user_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum FilterCommand {
    /// Create a filter from a config file
    Create { file: PathBuf },

    /// Read a filter; prints null if it no longer exists
    Read {
        id: String,
        #[arg(long)]
        user_id: Option<String>,
    },

    /// Replace a filter: delete it, then create one from the new config
    Replace {
        id: String,
        /// Config the filter currently has
        #[arg(long)]
        prior: PathBuf,
        file: PathBuf,
    },

    /// Delete a filter
    Delete {
        id: String,
        #[arg(long)]
        user_id: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum DataCommand {
    /// Look up one label by exact name
    Label {
        name: String,
        #[arg(long)]
        user_id: Option<String>,
    },

    /// List every label of the mailbox
    Labels {
        #[arg(long)]
        user_id: Option<String>,
    },
}

/// Read a JSON config, check it against `schema` and decode it
pub async fn read_config<T: DeserializeOwned>(path: &Path, schema: &Schema) -> Result<T> {
    let content = if path == Path::new("-") {
        let mut buffer = String::new();
        tokio::io::stdin().read_to_string(&mut buffer).await?;
        buffer
    } else {
        tokio::fs::read_to_string(path).await?
    };

    let value: serde_json::Value = serde_json::from_str(&content)?;
    schema.check_config(&value)?;
    Ok(serde_json::from_value(value)?)
}

/// Render a state (or `None` for an absent entity) as pretty JSON
pub fn render<T: Serialize>(state: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(state)?)
}
