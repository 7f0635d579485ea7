//! OAuth2 authentication and Gmail API hub construction

use google_gmail1::{hyper_rustls, hyper_util, yup_oauth2, Gmail};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

use crate::client::HubGmailClient;
use crate::error::{GmailError, Result};

/// Label management scope (list, get, create, update, delete)
pub const LABELS_SCOPE: &str = "https://www.googleapis.com/auth/gmail.labels";

/// Filter management scope
pub const SETTINGS_BASIC_SCOPE: &str = "https://www.googleapis.com/auth/gmail.settings.basic";

/// Read-only scope; mutating calls fail at the API layer with it
pub const READONLY_SCOPE: &str = "https://www.googleapis.com/auth/gmail.readonly";

/// Scopes requested by a read-write provider
pub const READ_WRITE_SCOPES: &[&str] = &[LABELS_SCOPE, SETTINGS_BASIC_SCOPE];

/// Scopes requested by a read-only provider
pub const READONLY_SCOPES: &[&str] = &[READONLY_SCOPE];

/// Type alias for the TLS connector the hub runs on
pub type HttpsConnector =
    hyper_rustls::HttpsConnector<hyper_util::client::legacy::connect::HttpConnector>;

/// Type alias for Gmail Hub to simplify type signatures
pub type GmailHub = Gmail<HttpsConnector>;

/// Client used by a configured provider
pub type ProductionGmailClient = HubGmailClient<HttpsConnector>;

/// Which OAuth scopes the provider asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    #[default]
    ReadWrite,
    ReadOnly,
}

impl Access {
    pub fn scopes(self) -> &'static [&'static str] {
        match self {
            Access::ReadWrite => READ_WRITE_SCOPES,
            Access::ReadOnly => READONLY_SCOPES,
        }
    }

    /// Scope attached to label calls
    pub fn label_scope(self) -> &'static str {
        match self {
            Access::ReadWrite => LABELS_SCOPE,
            Access::ReadOnly => READONLY_SCOPE,
        }
    }

    /// Scope attached to filter calls
    pub fn filter_scope(self) -> &'static str {
        match self {
            Access::ReadWrite => SETTINGS_BASIC_SCOPE,
            Access::ReadOnly => READONLY_SCOPE,
        }
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Access::ReadWrite => write!(f, "read_write"),
            Access::ReadOnly => write!(f, "read_only"),
        }
    }
}

/// Initialize Gmail API hub with OAuth2 authentication
///
/// Reads the application secret from `credentials_path` and the persisted
/// token from `token_path`. A missing or stale token falls back to the
/// installed-app browser flow and is written back to `token_path`.
pub async fn initialize_gmail_hub(
    credentials_path: &Path,
    token_path: &Path,
    access: Access,
) -> Result<GmailHub> {
    let secret = yup_oauth2::read_application_secret(credentials_path)
        .await
        .map_err(|e| GmailError::AuthError(format!("Failed to read credentials: {}", e)))?;

    let auth = yup_oauth2::InstalledFlowAuthenticator::builder(
        secret,
        yup_oauth2::InstalledFlowReturnMethod::HTTPRedirect,
    )
    .persist_tokens_to_disk(token_path)
    .build()
    .await
    .map_err(|e| GmailError::AuthError(format!("Failed to build authenticator: {}", e)))?;

    // Cache one token covering every scope the calls will ask for
    auth.token(access.scopes())
        .await
        .map_err(|e| GmailError::AuthError(format!("Failed to obtain token: {}", e)))?;

    let client = hyper_util::client::legacy::Client::builder(hyper_util::rt::TokioExecutor::new())
        .build(
            hyper_rustls::HttpsConnectorBuilder::new()
                .with_native_roots()
                .map_err(|e| GmailError::AuthError(format!("Failed to load TLS roots: {}", e)))?
                .https_or_http()
                .enable_http1()
                .build(),
        );

    Ok(Gmail::new(client, auth))
}
