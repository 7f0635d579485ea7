use thiserror::Error;

/// Type alias for Result with GmailError
pub type Result<T> = std::result::Result<T, GmailError>;

/// Error types for the Gmail provider
#[derive(Error, Debug)]
pub enum GmailError {
    /// Gmail API returned an error
    #[error("Gmail API error: {0}")]
    ApiError(String),

    /// Authentication failed
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Rate limit exceeded (429). Surfaced as-is, never retried here.
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Network-related error (connection issues, timeouts, etc.)
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Server returned 5xx error
    #[error("Server error (HTTP {status}): {message}")]
    ServerError { status: u16, message: String },

    /// Entity does not exist (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Forbidden (403), typically an insufficient OAuth scope
    #[error("Access forbidden: {0}")]
    Forbidden(String),

    /// Attribute validation failed before any API call was made
    #[error("Validation failed: {0}")]
    Validation(String),

    /// More than one label carries the requested name
    #[error("multiple labels have the name '{name}'")]
    AmbiguousLabel { name: String },

    /// No label carries the requested name
    #[error("no label has the name '{name}'")]
    LabelNotFound { name: String },

    /// Label-related errors
    #[error("Label error: {0}")]
    LabelError(String),

    /// Filter-related errors
    #[error("Filter error: {0}")]
    FilterError(String),

    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Any error wrapped with the operation that produced it
    #[error("{context}: {source}")]
    Operation {
        context: String,
        #[source]
        source: Box<GmailError>,
    },
}

impl GmailError {
    /// Wrap the error with the action and entity it happened on
    pub fn context(self, context: impl Into<String>) -> Self {
        GmailError::Operation {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// True when the remote entity does not exist, looking through any context
    pub fn is_not_found(&self) -> bool {
        match self {
            GmailError::NotFound(_) => true,
            GmailError::Operation { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Build an error from an HTTP status code and message
    pub fn from_status(status_code: u16, message: String) -> Self {
        match status_code {
            404 => GmailError::NotFound(message),
            400 => GmailError::BadRequest(message),
            401 => GmailError::AuthError(message),
            403 => GmailError::Forbidden(message),
            429 => GmailError::RateLimitExceeded(message),
            500..=599 => GmailError::ServerError {
                status: status_code,
                message,
            },
            _ => GmailError::ApiError(message),
        }
    }
}

/// Extract `(code, message)` from a Google JSON error body:
/// `{"error": {"code": 404, "message": "Requested entity was not found."}}`
fn json_error_status(value: &serde_json::Value) -> Option<(u16, String)> {
    let error = value.get("error")?;
    let code = error.get("code")?.as_u64()?;
    let code = u16::try_from(code).ok()?;
    let message = error
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or_default()
        .to_string();
    Some((code, message))
}

impl From<google_gmail1::Error> for GmailError {
    fn from(error: google_gmail1::Error) -> Self {
        match error {
            // Non-success response whose body was not JSON
            google_gmail1::Error::Failure(ref response) => {
                let status = response.status();
                let message = format!(
                    "HTTP {}: {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or("Unknown")
                );
                GmailError::from_status(status.as_u16(), message)
            }
            // Non-success response carrying Google's JSON error document
            google_gmail1::Error::BadRequest(ref value) => match json_error_status(value) {
                Some((code, message)) => {
                    GmailError::from_status(code, format!("HTTP {}: {}", code, message))
                }
                None => GmailError::BadRequest(value.to_string()),
            },
            google_gmail1::Error::HttpError(ref err) => {
                GmailError::NetworkError(format!("Connection error: {}", err))
            }
            google_gmail1::Error::Io(err) => GmailError::NetworkError(err.to_string()),
            google_gmail1::Error::MissingToken(ref err) => {
                GmailError::AuthError(format!("No token available: {}", err))
            }
            _ => GmailError::ApiError(error.to_string()),
        }
    }
}
