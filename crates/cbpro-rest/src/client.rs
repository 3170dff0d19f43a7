//! Main REST client implementation

use crate::endpoints::{AccountEndpoints, FundingEndpoints, MarketEndpoints, TradingEndpoints};
use crate::error::{RestError, RestResult};
use crate::request::ApiContext;
use crate::types::{
    Account, Candle, CoinbaseAccount, Granularity, Order, OrderRequest, OrderSide, PaymentMethod, Product,
    ProductTicker, ServerTime, Stats24Hr, Trade, Transfer, TransferReceipt,
};
use cbpro_auth::Credentials;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::info;

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default user agent
const DEFAULT_USER_AGENT: &str = concat!("cbpro-rest/", env!("CARGO_PKG_VERSION"));

/// Published API hosts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    /// Live trading
    Production,
    /// Public sandbox with test funds
    Sandbox,
}

impl Environment {
    /// Base URL of the REST API
    pub fn base_url(&self) -> &'static str {
        match self {
            Self::Production => "https://api.pro.coinbase.com",
            Self::Sandbox => "https://api-public.sandbox.pro.coinbase.com",
        }
    }
}

/// Coinbase Pro REST API client
///
/// Cheap to clone; clones share one connection pool.
///
/// # Example
///
/// ```no_run
/// use cbpro_rest::CoinbaseProClient;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = CoinbaseProClient::new(
///         "api-key",
///         "c2VjcmV0",
///         "passphrase",
///         "https://api-public.sandbox.pro.coinbase.com",
///     )?;
///
///     let btc = client.get_account("BTC").await?;
///     println!("BTC available: {}", btc.available);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct CoinbaseProClient {
    http_client: Client,
    base_url: String,
    credentials: Credentials,
}

impl CoinbaseProClient {
    /// Create a client from the four required inputs
    ///
    /// No network request is made.
    pub fn new(
        api_key: impl Into<String>,
        api_secret: impl AsRef<str>,
        passphrase: impl Into<String>,
        base_url: impl Into<String>,
    ) -> RestResult<Self> {
        let credentials = Credentials::new(api_key, api_secret, passphrase)?;
        Self::with_config(credentials, ClientConfig::new(base_url))
    }

    /// Create a client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> RestResult<Self> {
        let base_url = normalize_base_url(&config.base_url)?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .build()?;

        info!(base_url = %base_url, "Created Coinbase Pro REST client");

        Ok(Self {
            http_client,
            base_url,
            credentials,
        })
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// API key the client signs with
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    fn ctx(&self) -> ApiContext<'_> {
        ApiContext::new(&self.http_client, &self.base_url, &self.credentials)
    }

    // ========================================================================
    // Market Endpoints
    // ========================================================================

    /// Get market endpoints
    pub fn market(&self) -> MarketEndpoints<'_> {
        MarketEndpoints::new(self.ctx())
    }

    /// Get historic rates (candles) for `[start, end)`
    pub async fn get_historic_rates(
        &self,
        product_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        granularity: Granularity,
    ) -> RestResult<Vec<Candle>> {
        self.market()
            .get_historic_rates(product_id, start, end, granularity)
            .await
    }

    /// Get trailing 24 hour statistics for a product
    pub async fn get_24_hr_stats(&self, product_id: &str) -> RestResult<Stats24Hr> {
        self.market().get_24_hr_stats(product_id).await
    }

    /// Get the most recent trades for a product
    pub async fn get_latest_trades(&self, product_id: &str) -> RestResult<Vec<Trade>> {
        self.market().get_latest_trades(product_id).await
    }

    /// List tradable products
    pub async fn get_products(&self) -> RestResult<Vec<Product>> {
        self.market().get_products().await
    }

    /// Get last trade and best bid/ask for a product
    pub async fn get_product_ticker(&self, product_id: &str) -> RestResult<ProductTicker> {
        self.market().get_product_ticker(product_id).await
    }

    /// Get exchange server time
    pub async fn get_server_time(&self) -> RestResult<ServerTime> {
        self.market().get_server_time().await
    }

    // ========================================================================
    // Account Endpoints
    // ========================================================================

    /// Get account endpoints
    pub fn account(&self) -> AccountEndpoints<'_> {
        AccountEndpoints::new(self.ctx())
    }

    /// List trading accounts
    pub async fn get_accounts(&self) -> RestResult<Vec<Account>> {
        self.account().get_accounts().await
    }

    /// Get the trading account for a currency
    pub async fn get_account(&self, currency: &str) -> RestResult<Account> {
        self.account().get_account(currency).await
    }

    /// Get a trading account by ID
    pub async fn get_account_by_id(&self, account_id: &str) -> RestResult<Account> {
        self.account().get_account_by_id(account_id).await
    }

    /// List Coinbase funding accounts
    pub async fn get_coinbase_accounts(&self) -> RestResult<Vec<CoinbaseAccount>> {
        self.account().get_coinbase_accounts().await
    }

    /// Get the Coinbase funding account for a currency
    pub async fn get_coinbase_account(&self, currency: &str) -> RestResult<CoinbaseAccount> {
        self.account().get_coinbase_account(currency).await
    }

    // ========================================================================
    // Funding Endpoints
    // ========================================================================

    /// Get funding endpoints
    pub fn funding(&self) -> FundingEndpoints<'_> {
        FundingEndpoints::new(self.ctx())
    }

    /// List withdrawals, most recent first
    pub async fn get_withdrawals(&self) -> RestResult<Vec<Transfer>> {
        self.funding().get_withdrawals().await
    }

    /// List deposits, most recent first
    pub async fn get_deposits(&self) -> RestResult<Vec<Transfer>> {
        self.funding().get_deposits().await
    }

    /// List linked payment methods
    pub async fn get_payment_methods(&self) -> RestResult<Vec<PaymentMethod>> {
        self.funding().get_payment_methods().await
    }

    /// List linked payment methods for a currency
    pub async fn get_payment_methods_for_currency(
        &self,
        currency: &str,
    ) -> RestResult<Vec<PaymentMethod>> {
        self.funding()
            .get_payment_methods_for_currency(currency)
            .await
    }

    /// Deposit from a Coinbase funding account
    pub async fn deposit_from_coinbase_account(
        &self,
        amount: Decimal,
        currency: &str,
        coinbase_account_id: &str,
    ) -> RestResult<TransferReceipt> {
        self.funding()
            .deposit_from_coinbase_account(amount, currency, coinbase_account_id)
            .await
    }

    /// Withdraw to a linked payment method
    pub async fn withdraw_to_payment_method(
        &self,
        amount: Decimal,
        currency: &str,
        payment_method_id: &str,
    ) -> RestResult<Option<TransferReceipt>> {
        self.funding()
            .withdraw_to_payment_method(amount, currency, payment_method_id)
            .await
    }

    // ========================================================================
    // Trading Endpoints
    // ========================================================================

    /// Get trading endpoints
    pub fn trading(&self) -> TradingEndpoints<'_> {
        TradingEndpoints::new(self.ctx())
    }

    /// Place an order built with [`OrderRequest`]
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<Order> {
        self.trading().place_order(order).await
    }

    /// Place a limit order
    pub async fn place_limit_order(
        &self,
        product_id: &str,
        side: OrderSide,
        price: Decimal,
        size: Decimal,
    ) -> RestResult<Order> {
        self.trading()
            .place_limit_order(product_id, side, price, size)
            .await
    }

    /// Get an order by ID
    pub async fn get_order(&self, order_id: &str) -> RestResult<Order> {
        self.trading().get_order(order_id).await
    }

    /// Cancel an order by ID
    pub async fn cancel_order(&self, order_id: &str) -> RestResult<Vec<String>> {
        self.trading().cancel_order(order_id).await
    }

    /// Cancel all open orders, optionally for one product only
    pub async fn cancel_all_orders(&self, product_id: Option<&str>) -> RestResult<Vec<String>> {
        self.trading().cancel_all_orders(product_id).await
    }
}

impl std::fmt::Debug for CoinbaseProClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoinbaseProClient")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .finish()
    }
}

/// Validate the base URL and strip any trailing slash
fn normalize_base_url(raw: &str) -> RestResult<String> {
    let parsed = url::Url::parse(raw)
        .map_err(|e| RestError::Config(format!("invalid base URL {:?}: {}", raw, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(RestError::Config(format!(
            "base URL must be http or https, got {:?}",
            raw
        )));
    }
    if parsed.query().is_some() {
        return Err(RestError::Config(format!(
            "base URL must not carry a query string: {:?}",
            raw
        )));
    }

    Ok(raw.trim_end_matches('/').to_string())
}

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (no trailing path segments are added by the client)
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl ClientConfig {
    /// Create a configuration for an explicit base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: None,
        }
    }

    /// Create a configuration for a published environment
    pub fn for_environment(environment: Environment) -> Self {
        Self::new(environment.base_url())
    }

    /// Set timeout
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "Y29pbmJhc2UtcHJvLXRlc3Qtc2VjcmV0LTAxMjM0NTY3ODk=";

    #[test]
    fn test_client_new_requires_all_credentials() {
        let result = CoinbaseProClient::new("", SECRET, "pass", Environment::Sandbox.base_url());
        assert!(matches!(result, Err(RestError::Credentials(_))));

        let result = CoinbaseProClient::new("key", SECRET, "", Environment::Sandbox.base_url());
        assert!(matches!(result, Err(RestError::Credentials(_))));

        let result = CoinbaseProClient::new("key", "%%%", "pass", Environment::Sandbox.base_url());
        assert!(matches!(result, Err(RestError::Credentials(_))));
    }

    #[test]
    fn test_client_rejects_bad_base_url() {
        let result = CoinbaseProClient::new("key", SECRET, "pass", "not a url");
        assert!(matches!(result, Err(RestError::Config(_))));

        let result = CoinbaseProClient::new("key", SECRET, "pass", "ftp://example.com");
        assert!(matches!(result, Err(RestError::Config(_))));
    }

    #[test]
    fn test_trailing_slash_is_trimmed() {
        let client =
            CoinbaseProClient::new("key", SECRET, "pass", "https://api-public.sandbox.pro.coinbase.com/")
                .unwrap();
        assert_eq!(client.base_url(), "https://api-public.sandbox.pro.coinbase.com");
        assert_eq!(client.api_key(), "key");
    }

    #[test]
    fn test_debug_does_not_leak_secrets() {
        let client = CoinbaseProClient::new("key", SECRET, "hunter2", Environment::Sandbox.base_url())
            .unwrap();
        let debug = format!("{:?}", client);
        assert!(debug.contains("sandbox"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_client_config_builder() {
        let config = ClientConfig::for_environment(Environment::Production)
            .with_timeout(60)
            .with_user_agent("test-agent");

        assert_eq!(config.base_url, "https://api.pro.coinbase.com");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.user_agent, Some("test-agent".to_string()));
    }
}
