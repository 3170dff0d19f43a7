//! Live tests against the public sandbox
//!
//! Ignored by default. Each test reads a key set from the environment:
//!
//! | Prefix                          | Permissions     |
//! |---------------------------------|-----------------|
//! | `COINBASE_PRO_VIEW`             | view            |
//! | `COINBASE_PRO_TRANSFER_VIEW`    | view, transfer  |
//! | `COINBASE_PRO_TRADE`            | view, trade     |
//!
//! with `{PREFIX}_API_KEY`, `{PREFIX}_API_KEY_SECRET` and
//! `{PREFIX}_API_KEY_PASSPHRASE` set.
//!
//! Run with: `cargo test -p cbpro-rest --test sandbox -- --ignored`

use cbpro_rest::{
    expected_candle_count, ClientConfig, CoinbaseProClient, Credentials, Environment, Granularity,
    OrderSide, TransferType,
};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn sandbox_client(prefix: &str) -> CoinbaseProClient {
    let credentials = Credentials::from_env_prefix(prefix)
        .unwrap_or_else(|e| panic!("{prefix} credentials: {e}"));
    CoinbaseProClient::with_config(credentials, ClientConfig::for_environment(Environment::Sandbox))
        .expect("sandbox client")
}

#[tokio::test]
#[ignore = "requires sandbox credentials"]
async fn sandbox_get_accounts() {
    let client = sandbox_client("COINBASE_PRO_VIEW");

    let accounts = client.get_accounts().await.unwrap();
    assert!(!accounts.is_empty());

    let btc = client.get_account("BTC").await.unwrap();
    assert_eq!(btc.currency, "BTC");
    assert!(btc.available <= btc.balance);
}

#[tokio::test]
#[ignore = "requires sandbox credentials"]
async fn sandbox_get_withdrawals() {
    let client = sandbox_client("COINBASE_PRO_VIEW");

    let withdrawals = client.get_withdrawals().await.unwrap();
    assert!(!withdrawals.is_empty());
    assert!(withdrawals[0].amount > Decimal::ZERO);
    assert!(withdrawals
        .iter()
        .all(|w| w.transfer_type == TransferType::Withdraw && w.amount > Decimal::ZERO));
}

#[tokio::test]
#[ignore = "requires sandbox credentials"]
async fn sandbox_get_coinbase_account() {
    let client = sandbox_client("COINBASE_PRO_TRANSFER_VIEW");

    let accounts = client.get_coinbase_accounts().await.unwrap();
    assert!(!accounts.is_empty());

    let btc = client.get_coinbase_account("BTC").await.unwrap();
    assert_eq!(btc.currency, "BTC");
}

#[tokio::test]
#[ignore = "requires sandbox credentials"]
async fn sandbox_get_historic_rates() {
    let client = sandbox_client("COINBASE_PRO_VIEW");

    let start = Utc::now() - Duration::days(10);
    let end = Utc::now() - Duration::days(5);
    let candles = client
        .get_historic_rates("BTC-USD", start, end, Granularity::OneDay)
        .await
        .unwrap();

    assert_eq!(
        candles.len() as u64,
        expected_candle_count(start, end, Granularity::OneDay)
    );
}

#[tokio::test]
#[ignore = "requires sandbox credentials"]
async fn sandbox_get_24_hr_stats() {
    let client = sandbox_client("COINBASE_PRO_VIEW");

    let stats = client.get_24_hr_stats("BTC-USD").await.unwrap();
    assert!(stats.high > Decimal::ZERO);
}

#[tokio::test]
#[ignore = "requires sandbox credentials"]
async fn sandbox_get_latest_trades() {
    let client = sandbox_client("COINBASE_PRO_VIEW");

    let trades = client.get_latest_trades("BTC-USD").await.unwrap();
    assert!(!trades.is_empty());
}

#[tokio::test]
#[ignore = "requires sandbox credentials"]
async fn sandbox_get_payment_methods_for_currency() {
    let client = sandbox_client("COINBASE_PRO_TRANSFER_VIEW");

    let usd = client.get_payment_methods_for_currency("USD").await.unwrap();
    assert!(!usd.is_empty());
    assert!(usd.iter().all(|m| m.currency == "USD"));
}

#[tokio::test]
#[ignore = "requires sandbox credentials"]
async fn sandbox_deposit_from_coinbase_account() {
    let client = sandbox_client("COINBASE_PRO_TRANSFER_VIEW");

    let funding = client.get_coinbase_account("BTC").await.unwrap();
    let receipt = client
        .deposit_from_coinbase_account(dec!(0.00000001), "BTC", &funding.id)
        .await
        .unwrap();

    assert_eq!(receipt.amount, dec!(0.00000001));
    assert_eq!(receipt.currency, "BTC");
}

/// The sandbox answers 403 "Invalid scope" for withdrawals even with the
/// transfer permission, so this only passes against production keys.
#[tokio::test]
#[ignore = "sandbox rejects withdrawals with Invalid scope"]
async fn sandbox_withdraw_to_payment_method() {
    let client = sandbox_client("COINBASE_PRO_TRANSFER_VIEW");

    let methods = client.get_payment_methods_for_currency("USD").await.unwrap();
    let method = methods.first().expect("a USD payment method");

    let result = client
        .withdraw_to_payment_method(dec!(10), "USD", &method.id)
        .await;
    assert!(result.is_ok(), "withdrawal failed: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires sandbox credentials"]
async fn sandbox_place_limit_order() {
    let client = sandbox_client("COINBASE_PRO_TRADE");

    let order = client
        .place_limit_order("BTC-USD", OrderSide::Sell, dec!(999999999.39), dec!(0.01))
        .await
        .unwrap();

    assert_eq!(order.product_id, "BTC-USD");
    assert_eq!(order.side, OrderSide::Sell);
    assert_eq!(order.price, Some(dec!(999999999.39)));
    assert_eq!(order.size, Some(dec!(0.01)));
    assert_eq!(order.filled_size, Decimal::ZERO);

    let cancelled = client.cancel_order(&order.id).await.unwrap();
    assert!(cancelled.contains(&order.id));
}
