//! API credentials and request signing for Coinbase Pro
//!
//! Implements the HMAC-SHA256 scheme required by every private endpoint.
//!
//! # Security
//!
//! The decoded secret and the passphrase are stored using the `secrecy` crate
//! which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::trace;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the API key
pub const HEADER_KEY: &str = "CB-ACCESS-KEY";
/// Header carrying the base64 signature
pub const HEADER_SIGN: &str = "CB-ACCESS-SIGN";
/// Header carrying the signing timestamp (Unix seconds)
pub const HEADER_TIMESTAMP: &str = "CB-ACCESS-TIMESTAMP";
/// Header carrying the passphrase chosen when the key was created
pub const HEADER_PASSPHRASE: &str = "CB-ACCESS-PASSPHRASE";

/// API credentials for authenticated requests
///
/// The secret and passphrase are zeroized when the Credentials are dropped.
pub struct Credentials {
    /// API key (public)
    api_key: String,
    /// Secret (decoded from base64, zeroized on drop)
    secret: SecretBox<Vec<u8>>,
    /// Passphrase (zeroized on drop)
    passphrase: SecretBox<String>,
}

impl Credentials {
    /// Create new credentials
    ///
    /// # Arguments
    /// * `api_key` - Your API key
    /// * `api_secret` - Your API secret (base64 encoded string)
    /// * `passphrase` - The passphrase set when the key was created
    ///
    /// All three components are required. The secret is decoded once here so
    /// a malformed secret fails before any request is attempted.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl AsRef<str>,
        passphrase: impl Into<String>,
    ) -> AuthResult<Self> {
        let api_key = api_key.into();
        let api_secret = api_secret.as_ref();
        let passphrase = passphrase.into();

        if api_key.is_empty() {
            return Err(AuthError::MissingCredential("api_key"));
        }
        if api_secret.is_empty() {
            return Err(AuthError::MissingCredential("api_secret"));
        }
        if passphrase.is_empty() {
            return Err(AuthError::MissingCredential("passphrase"));
        }

        let decoded = BASE64.decode(api_secret).map_err(|e| {
            AuthError::InvalidCredentials(format!("Invalid base64 API secret: {}", e))
        })?;

        Ok(Self {
            api_key,
            secret: SecretBox::new(Box::new(decoded)),
            passphrase: SecretBox::new(Box::new(passphrase)),
        })
    }

    /// Create credentials from environment variables sharing a prefix
    ///
    /// Reads `{prefix}_API_KEY`, `{prefix}_API_KEY_SECRET` and
    /// `{prefix}_API_KEY_PASSPHRASE`, e.g. `COINBASE_PRO_VIEW_API_KEY`.
    pub fn from_env_prefix(prefix: &str) -> AuthResult<Self> {
        let read = |suffix: &str| {
            let name = format!("{}_{}", prefix, suffix);
            std::env::var(&name).map_err(|_| AuthError::EnvVarNotSet(name))
        };

        let api_key = read("API_KEY")?;
        let api_secret = read("API_KEY_SECRET")?;
        let passphrase = read("API_KEY_PASSPHRASE")?;

        Self::new(api_key, api_secret, passphrase)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Current Unix time in whole seconds, as sent in `CB-ACCESS-TIMESTAMP`
    ///
    /// The exchange rejects requests whose timestamp is more than 30 seconds
    /// away from its own clock.
    pub fn timestamp() -> String {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default()
            .to_string()
    }

    /// Sign a request
    ///
    /// Signature algorithm:
    /// 1. prehash = timestamp + METHOD + request_path + body
    /// 2. HMAC-SHA256(decoded secret, prehash)
    /// 3. Base64 encode result
    ///
    /// # Arguments
    /// * `timestamp` - Value sent in `CB-ACCESS-TIMESTAMP`
    /// * `method` - HTTP method, upper case
    /// * `request_path` - Path including the query string (e.g. "/transfers?type=withdraw")
    /// * `body` - Exact JSON body sent, or empty
    ///
    /// # Returns
    /// Base64-encoded signature
    pub fn sign(
        &self,
        timestamp: &str,
        method: &str,
        request_path: &str,
        body: &str,
    ) -> AuthResult<String> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret())
            .map_err(|e| AuthError::Signing(e.to_string()))?;
        mac.update(timestamp.as_bytes());
        mac.update(method.to_ascii_uppercase().as_bytes());
        mac.update(request_path.as_bytes());
        mac.update(body.as_bytes());

        Ok(BASE64.encode(mac.finalize().into_bytes()))
    }

    fn passphrase(&self) -> &str {
        self.passphrase.expose_secret()
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates new SecretBoxes with the same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            secret: SecretBox::new(Box::new(self.secret.expose_secret().clone())),
            passphrase: SecretBox::new(Box::new(self.passphrase.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field(
                "api_key",
                &format!("{}...", self.api_key.chars().take(8).collect::<String>()),
            )
            .field("secret", &"[REDACTED]")
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}

/// The four authentication headers for one request
#[derive(Clone)]
pub struct AuthHeaders {
    pub key: String,
    pub signature: String,
    pub timestamp: String,
    pub passphrase: String,
}

impl AuthHeaders {
    /// Header name/value pairs in the order the exchange documents them
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (HEADER_KEY, self.key.as_str()),
            (HEADER_SIGN, self.signature.as_str()),
            (HEADER_TIMESTAMP, self.timestamp.as_str()),
            (HEADER_PASSPHRASE, self.passphrase.as_str()),
        ]
        .into_iter()
    }
}

impl std::fmt::Debug for AuthHeaders {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthHeaders")
            .field("key", &self.key)
            .field("signature", &self.signature)
            .field("timestamp", &self.timestamp)
            .field("passphrase", &"[REDACTED]")
            .finish()
    }
}

/// Request signer for building authenticated requests
///
/// Captures the timestamp at creation so the signature and the
/// `CB-ACCESS-TIMESTAMP` header always agree.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    method: String,
    request_path: String,
    timestamp: String,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer
    pub fn new(
        credentials: &'a Credentials,
        method: impl Into<String>,
        request_path: impl Into<String>,
    ) -> Self {
        Self::with_timestamp(credentials, method, request_path, Credentials::timestamp())
    }

    /// Create a signer with a fixed timestamp
    pub fn with_timestamp(
        credentials: &'a Credentials,
        method: impl Into<String>,
        request_path: impl Into<String>,
        timestamp: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            method: method.into().to_ascii_uppercase(),
            request_path: request_path.into(),
            timestamp: timestamp.into(),
        }
    }

    /// Get the timestamp for this request
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign the request with the given body
    pub fn sign(&self, body: &str) -> AuthResult<String> {
        self.credentials
            .sign(&self.timestamp, &self.method, &self.request_path, body)
    }

    /// Build the full header set for the given body
    pub fn headers(&self, body: &str) -> AuthResult<AuthHeaders> {
        let signature = self.sign(body)?;
        trace!(method = %self.method, path = %self.request_path, "signed request");

        Ok(AuthHeaders {
            key: self.credentials.api_key().to_string(),
            signature,
            timestamp: self.timestamp.clone(),
            passphrase: self.credentials.passphrase().to_string(),
        })
    }
}
