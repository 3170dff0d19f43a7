//! Credentials and request signing for the Coinbase Pro REST API
//!
//! Every private request to the exchange carries four headers derived from an
//! API key, a base64 secret and a passphrase. This crate owns those
//! credentials and produces the header set for a given request.
//!
//! # Example
//!
//! ```no_run
//! use cbpro_auth::{Credentials, RequestSigner};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads COINBASE_PRO_VIEW_API_KEY, _API_KEY_SECRET and _API_KEY_PASSPHRASE
//!     let creds = Credentials::from_env_prefix("COINBASE_PRO_VIEW")?;
//!
//!     let signer = RequestSigner::new(&creds, "GET", "/accounts");
//!     let headers = signer.headers("")?;
//!     for (name, value) in headers.iter() {
//!         println!("{}: {}", name, value);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod credentials;
mod error;

pub use credentials::{
    AuthHeaders, Credentials, RequestSigner, HEADER_KEY, HEADER_PASSPHRASE, HEADER_SIGN,
    HEADER_TIMESTAMP,
};
pub use error::{AuthError, AuthResult};
