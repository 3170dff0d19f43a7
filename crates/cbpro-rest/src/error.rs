//! Error types for REST API operations

use cbpro_auth::AuthError;
use serde::Deserialize;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP request failed before a response was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Credentials could not be built or used for signing
    #[error("Credentials error: {0}")]
    Credentials(#[from] AuthError),

    /// Bad credentials or insufficient key scope
    #[error("Authentication failed ({status}): {message}")]
    Auth {
        /// HTTP status code
        status: u16,
        /// Message returned by the exchange
        message: String,
    },

    /// No such resource
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Message returned by the exchange
        message: String,
    },

    /// Input rejected before sending
    #[error("Validation error: {0}")]
    Validation(String),

    /// Failed to parse response
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Error body returned by the exchange on non-success responses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Messages the exchange sends with a 400 when the credentials are at fault
const CREDENTIAL_MESSAGES: &[&str] = &[
    "invalid api key",
    "invalid passphrase",
    "invalid signature",
    "request timestamp expired",
];

impl RestError {
    /// Classify a non-success response from its status and body
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .map(|b| b.message)
            .unwrap_or_else(|_| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("HTTP {}", status)
                } else {
                    trimmed.to_string()
                }
            });

        match status {
            401 | 403 => Self::Auth { status, message },
            404 => Self::NotFound(message),
            400 if Self::mentions_credentials(&message) => Self::Auth { status, message },
            _ => Self::Api { status, message },
        }
    }

    fn mentions_credentials(message: &str) -> bool {
        let message = message.trim();
        CREDENTIAL_MESSAGES
            .iter()
            .any(|known| message.eq_ignore_ascii_case(known))
    }

    /// HTTP status of the failed response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Auth { status, .. } | Self::Api { status, .. } => Some(*status),
            Self::NotFound(_) => Some(404),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if this error is an authentication or authorization failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Auth { .. } | Self::Credentials(_))
    }

    /// Check if the key lacks the permission scope for the endpoint
    ///
    /// The sandbox reports this for payment-method withdrawals as
    /// `403 {"message":"Invalid scope"}`.
    pub fn is_scope_denied(&self) -> bool {
        matches!(
            self,
            Self::Auth { status: 403, message } if message.to_ascii_lowercase().contains("scope")
        )
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        self.status() == Some(429)
    }

    /// Check if a higher layer could reasonably retry the request
    ///
    /// The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
