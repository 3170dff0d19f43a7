//! Types for Coinbase Pro REST API requests and responses

use crate::error::RestError;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Timestamp decoding for the two formats the exchange emits
///
/// Most endpoints use RFC 3339 (`2019-11-07T18:21:18.451585Z`); transfer
/// history uses `2019-11-07 18:21:18.451585+00`.
pub(crate) mod exchange_time {
    use chrono::{DateTime, Utc};
    use serde::{de, Deserialize, Deserializer};

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(raw)
            .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f%#z"))
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    pub fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw))),
        }
    }
}

// ============================================================================
// Market Data Types
// ============================================================================

/// Candle bucket width accepted by the candles endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    OneHour,
    SixHours,
    OneDay,
}

impl Granularity {
    /// All supported bucket sizes, smallest first
    pub const ALL: [Granularity; 6] = [
        Self::OneMinute,
        Self::FiveMinutes,
        Self::FifteenMinutes,
        Self::OneHour,
        Self::SixHours,
        Self::OneDay,
    ];

    /// Bucket width in seconds
    pub fn as_secs(&self) -> u32 {
        match self {
            Self::OneMinute => 60,
            Self::FiveMinutes => 300,
            Self::FifteenMinutes => 900,
            Self::OneHour => 3600,
            Self::SixHours => 21600,
            Self::OneDay => 86400,
        }
    }
}

impl TryFrom<u32> for Granularity {
    type Error = RestError;

    fn try_from(secs: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_secs() == secs)
            .ok_or_else(|| {
                RestError::Validation(format!(
                    "unsupported granularity {}s (expected one of 60, 300, 900, 3600, 21600, 86400)",
                    secs
                ))
            })
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_secs())
    }
}

/// Number of buckets covering `[start, end)` at the given granularity
///
/// This is the candle count returned when the exchange has data for the
/// whole range.
pub fn expected_candle_count(start: DateTime<Utc>, end: DateTime<Utc>, granularity: Granularity) -> u64 {
    let span = (end - start).num_milliseconds();
    if span <= 0 {
        return 0;
    }
    let step = i64::from(granularity.as_secs()) * 1000;
    ((span + step - 1) / step) as u64
}

/// One OHLCV bucket
///
/// The exchange sends candles as `[time, low, high, open, close, volume]`
/// arrays, newest bucket first.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawCandle")]
pub struct Candle {
    /// Bucket start time
    pub time: DateTime<Utc>,
    pub low: Decimal,
    pub high: Decimal,
    pub open: Decimal,
    pub close: Decimal,
    pub volume: Decimal,
}

#[derive(Deserialize)]
struct RawCandle(i64, Decimal, Decimal, Decimal, Decimal, Decimal);

impl TryFrom<RawCandle> for Candle {
    type Error = String;

    fn try_from(raw: RawCandle) -> Result<Self, Self::Error> {
        let RawCandle(time, low, high, open, close, volume) = raw;
        let time = DateTime::<Utc>::from_timestamp(time, 0)
            .ok_or_else(|| format!("candle time out of range: {}", time))?;

        Ok(Self {
            time,
            low,
            high,
            open,
            close,
            volume,
        })
    }
}

/// Trailing 24 hour statistics for a product
#[derive(Debug, Clone, Deserialize)]
pub struct Stats24Hr {
    pub open: Decimal,
    pub high: Decimal,
    pub low: Decimal,
    /// Volume in base currency
    pub volume: Decimal,
    /// Last trade price
    pub last: Decimal,
    #[serde(default)]
    pub volume_30day: Option<Decimal>,
}

/// Executed trade from the public trade history
#[derive(Debug, Clone, Deserialize)]
pub struct Trade {
    pub trade_id: u64,
    pub time: DateTime<Utc>,
    pub price: Decimal,
    pub size: Decimal,
    /// Side of the maker order
    pub side: OrderSide,
}

/// Tradable product
#[derive(Debug, Clone, Deserialize)]
pub struct Product {
    /// Product ID (e.g., "BTC-USD")
    pub id: String,
    pub base_currency: String,
    pub quote_currency: String,
    /// Minimum price increment
    pub quote_increment: Decimal,
    /// Minimum size increment
    #[serde(default)]
    pub base_increment: Option<Decimal>,
    #[serde(default)]
    pub base_min_size: Option<Decimal>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub trading_disabled: Option<bool>,
}

/// Snapshot of the last trade and best bid/ask
#[derive(Debug, Clone, Deserialize)]
pub struct ProductTicker {
    pub trade_id: u64,
    pub price: Decimal,
    pub size: Decimal,
    pub bid: Decimal,
    pub ask: Decimal,
    pub volume: Decimal,
    pub time: DateTime<Utc>,
}

impl ProductTicker {
    /// Get the mid price (average of bid and ask)
    pub fn mid_price(&self) -> Decimal {
        (self.bid + self.ask) / Decimal::TWO
    }

    /// Get the spread
    pub fn spread(&self) -> Decimal {
        self.ask - self.bid
    }
}

/// Exchange server time
#[derive(Debug, Clone, Deserialize)]
pub struct ServerTime {
    pub iso: DateTime<Utc>,
    /// Unix time with fractional seconds
    pub epoch: f64,
}

// ============================================================================
// Account Types
// ============================================================================

/// Trading account balance for one currency
#[derive(Debug, Clone, Deserialize)]
pub struct Account {
    pub id: String,
    pub currency: String,
    /// Total funds in the account
    pub balance: Decimal,
    /// Funds available to trade or withdraw
    pub available: Decimal,
    /// Funds on hold for open orders or pending withdrawals
    pub hold: Decimal,
    #[serde(default)]
    pub profile_id: Option<String>,
    #[serde(default)]
    pub trading_enabled: Option<bool>,
}

/// Funding account on the linked Coinbase wallet
#[derive(Debug, Clone, Deserialize)]
pub struct CoinbaseAccount {
    pub id: String,
    pub name: String,
    pub currency: String,
    pub balance: Decimal,
    /// Wallet type (e.g., "wallet", "fiat")
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub active: bool,
}

// ============================================================================
// Funding Types
// ============================================================================

/// Transfer kind filter for transfer history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferType {
    Deposit,
    Withdraw,
    #[serde(rename = "internal_deposit")]
    InternalDeposit,
    #[serde(rename = "internal_withdraw")]
    InternalWithdraw,
}

impl std::fmt::Display for TransferType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Deposit => "deposit",
            Self::Withdraw => "withdraw",
            Self::InternalDeposit => "internal_deposit",
            Self::InternalWithdraw => "internal_withdraw",
        };
        write!(f, "{}", s)
    }
}

/// Deposit or withdrawal history record
#[derive(Debug, Clone, Deserialize)]
pub struct Transfer {
    pub id: String,
    #[serde(rename = "type")]
    pub transfer_type: TransferType,
    pub amount: Decimal,
    /// Not every environment reports the currency at the top level
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "exchange_time::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "exchange_time::deserialize_opt")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "exchange_time::deserialize_opt")]
    pub canceled_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "exchange_time::deserialize_opt")]
    pub processed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub details: TransferDetails,
}

impl Transfer {
    /// Whether the transfer has been completed
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}

/// Payout or source references attached to a transfer
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransferDetails {
    #[serde(default)]
    pub coinbase_account_id: Option<String>,
    #[serde(default)]
    pub coinbase_transaction_id: Option<String>,
    #[serde(default)]
    pub coinbase_payment_method_id: Option<String>,
    #[serde(default)]
    pub crypto_address: Option<String>,
    #[serde(default)]
    pub crypto_transaction_hash: Option<String>,
    #[serde(default)]
    pub sent_to_address: Option<String>,
    #[serde(default)]
    pub fee: Option<String>,
    #[serde(default)]
    pub subtotal: Option<String>,
}

impl TransferDetails {
    /// Network or processing fee, if reported
    pub fn fee(&self) -> Option<Decimal> {
        self.fee.as_deref().and_then(|s| s.parse().ok())
    }
}

/// Confirmation returned when a deposit or withdrawal is created
#[derive(Debug, Clone, Deserialize)]
pub struct TransferReceipt {
    pub id: String,
    /// Echo of the requested amount
    pub amount: Decimal,
    pub currency: String,
    /// Expected payout time (withdrawals)
    #[serde(default, deserialize_with = "exchange_time::deserialize_opt")]
    pub payout_at: Option<DateTime<Utc>>,
}

/// Bank account, card or wallet linked to the user
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentMethod {
    pub id: String,
    /// Method type (e.g., "ach_bank_account", "fiat_account")
    #[serde(rename = "type")]
    pub method_type: String,
    pub name: String,
    pub currency: String,
    #[serde(default)]
    pub primary_buy: bool,
    #[serde(default)]
    pub primary_sell: bool,
    #[serde(default)]
    pub allow_buy: bool,
    #[serde(default)]
    pub allow_sell: bool,
    #[serde(default)]
    pub allow_deposit: bool,
    #[serde(default)]
    pub allow_withdraw: bool,
}

// ============================================================================
// Trading Types
// ============================================================================

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

impl FromStr for OrderSide {
    type Err = RestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "buy" => Ok(Self::Buy),
            "sell" => Ok(Self::Sell),
            other => Err(RestError::Validation(format!(
                "side must be \"buy\" or \"sell\", got {:?}",
                other
            ))),
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    /// Limit order
    Limit,
    /// Market order
    Market,
    /// Stop order
    Stop,
}

impl std::fmt::Display for OrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Limit => "limit",
            Self::Market => "market",
            Self::Stop => "stop",
        };
        write!(f, "{}", s)
    }
}

/// Time in force for limit orders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Good till cancelled
    #[serde(rename = "GTC")]
    GoodTillCancelled,
    /// Good till time
    #[serde(rename = "GTT")]
    GoodTillTime,
    /// Immediate or cancel
    #[serde(rename = "IOC")]
    ImmediateOrCancel,
    /// Fill or kill
    #[serde(rename = "FOK")]
    FillOrKill,
}

/// Lifecycle state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Received,
    Pending,
    Open,
    Active,
    Done,
    Rejected,
    #[serde(other)]
    Unknown,
}

/// Request to place an order
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    /// Order type
    #[serde(rename = "type")]
    pub order_type: OrderType,
    /// Product ID (e.g., "BTC-USD")
    pub product_id: String,
    /// Order side
    pub side: OrderSide,
    /// Price (limit orders only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    /// Amount of base currency
    pub size: Decimal,
    /// Time in force (limit orders only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_in_force: Option<TimeInForce>,
    /// Reject the order if it would take liquidity
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub post_only: bool,
    /// Caller-chosen order ID echoed on the feed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_oid: Option<String>,
}

impl OrderRequest {
    /// Create a limit order
    pub fn limit(product_id: impl Into<String>, side: OrderSide, price: Decimal, size: Decimal) -> Self {
        Self {
            order_type: OrderType::Limit,
            product_id: product_id.into(),
            side,
            price: Some(price),
            size,
            time_in_force: None,
            post_only: false,
            client_oid: None,
        }
    }

    /// Create a market order
    pub fn market(product_id: impl Into<String>, side: OrderSide, size: Decimal) -> Self {
        Self {
            order_type: OrderType::Market,
            product_id: product_id.into(),
            side,
            price: None,
            size,
            time_in_force: None,
            post_only: false,
            client_oid: None,
        }
    }

    /// Set time in force
    pub fn with_time_in_force(mut self, tif: TimeInForce) -> Self {
        self.time_in_force = Some(tif);
        self
    }

    /// Set as post-only (maker only)
    pub fn post_only(mut self) -> Self {
        self.post_only = true;
        self
    }

    /// Set client order ID
    pub fn with_client_oid(mut self, client_oid: impl Into<String>) -> Self {
        self.client_oid = Some(client_oid.into());
        self
    }

    /// Check the request before it is signed and sent
    pub fn validate(&self) -> Result<(), RestError> {
        if self.product_id.trim().is_empty() {
            return Err(RestError::Validation("product_id must not be empty".to_string()));
        }
        if self.size <= Decimal::ZERO {
            return Err(RestError::Validation(format!("size must be positive, got {}", self.size)));
        }

        match self.order_type {
            OrderType::Limit => match self.price {
                Some(price) if price > Decimal::ZERO => Ok(()),
                Some(price) => Err(RestError::Validation(format!(
                    "price must be positive, got {}",
                    price
                ))),
                None => Err(RestError::Validation("limit order requires a price".to_string())),
            },
            _ if self.post_only || self.time_in_force.is_some() => Err(RestError::Validation(
                format!("post_only and time_in_force apply to limit orders, not {}", self.order_type),
            )),
            _ => Ok(()),
        }
    }
}

/// Order snapshot
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: String,
    pub product_id: String,
    pub side: OrderSide,
    #[serde(rename = "type")]
    pub order_type: OrderType,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub size: Option<Decimal>,
    /// Amount of base currency filled so far
    #[serde(default)]
    pub filled_size: Decimal,
    #[serde(default)]
    pub fill_fees: Option<Decimal>,
    #[serde(default)]
    pub executed_value: Option<Decimal>,
    pub status: OrderStatus,
    #[serde(default)]
    pub settled: bool,
    #[serde(default)]
    pub post_only: bool,
    #[serde(default)]
    pub time_in_force: Option<TimeInForce>,
    #[serde(default, deserialize_with = "exchange_time::deserialize_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Whether the order is still resting on the book
    pub fn is_open(&self) -> bool {
        matches!(
            self.status,
            OrderStatus::Received | OrderStatus::Pending | OrderStatus::Open | OrderStatus::Active
        )
    }

    /// Portion of `size` not yet filled
    pub fn remaining_size(&self) -> Option<Decimal> {
        self.size.map(|size| size - self.filled_size)
    }
}

/// Body of a cancel response: one ID or a list of IDs
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum CancelResponse {
    One(String),
    Many(Vec<String>),
}

impl CancelResponse {
    pub(crate) fn into_ids(self) -> Vec<String> {
        match self {
            Self::One(id) => vec![id],
            Self::Many(ids) => ids,
        }
    }
}
