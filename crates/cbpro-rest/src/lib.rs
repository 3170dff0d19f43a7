//! REST API client for the Coinbase Pro cryptocurrency exchange
//!
//! This crate maps the exchange's REST endpoints onto typed async methods:
//! account balances, historic rates, transfers and order placement.
//!
//! # Features
//!
//! - **Market Data**: Candles, 24h stats, recent trades, tickers, products
//! - **Accounts**: Trading accounts and Coinbase funding accounts
//! - **Funding**: Transfer history, deposits, withdrawals, payment methods
//! - **Trading**: Place, inspect and cancel orders
//!
//! # Authentication
//!
//! Every request is signed with HMAC-SHA256 using the key, base64 secret and
//! passphrase issued by the exchange (see `cbpro-auth`).
//!
//! # Example
//!
//! ```no_run
//! use cbpro_rest::{ClientConfig, CoinbaseProClient, Credentials, Environment, Granularity};
//! use chrono::{Duration, Utc};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let creds = Credentials::from_env_prefix("COINBASE_PRO_VIEW")?;
//!     let client = CoinbaseProClient::with_config(
//!         creds,
//!         ClientConfig::for_environment(Environment::Sandbox),
//!     )?;
//!
//!     let end = Utc::now() - Duration::days(5);
//!     let start = end - Duration::days(5);
//!     let candles = client
//!         .get_historic_rates("BTC-USD", start, end, Granularity::OneDay)
//!         .await?;
//!     println!("{} daily candles", candles.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Errors
//!
//! Non-success responses are classified into [`RestError::Auth`],
//! [`RestError::NotFound`] and [`RestError::Api`]. The client never retries;
//! [`RestError::is_retryable`] tells a caller when retrying is reasonable.

pub mod client;
pub mod endpoints;
pub mod error;
pub mod types;

mod request;

// Re-export main types
pub use cbpro_auth::Credentials;
pub use client::{ClientConfig, CoinbaseProClient, Environment};
pub use endpoints::market::MAX_CANDLES_PER_REQUEST;
pub use error::{RestError, RestResult};

// Re-export resource types
pub use types::{
    expected_candle_count,
    // Market data
    Candle, Granularity, Product, ProductTicker, ServerTime, Stats24Hr, Trade,
    // Accounts
    Account, CoinbaseAccount,
    // Funding
    PaymentMethod, Transfer, TransferDetails, TransferReceipt, TransferType,
    // Trading
    Order, OrderRequest, OrderSide, OrderStatus, OrderType, TimeInForce,
};
