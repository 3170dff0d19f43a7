//! Error types for credential handling and signing

/// Errors that can occur while building credentials or signing requests
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// A required credential component was empty
    #[error("Missing credential: {0}")]
    MissingCredential(&'static str),

    /// Invalid API credentials
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    /// HMAC could not be initialised with the decoded secret
    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::EnvVarNotSet("COINBASE_PRO_VIEW_API_KEY".to_string());
        assert!(err.to_string().contains("COINBASE_PRO_VIEW_API_KEY"));

        let err = AuthError::MissingCredential("passphrase");
        assert_eq!(err.to_string(), "Missing credential: passphrase");
    }
}
