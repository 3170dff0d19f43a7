//! Common test utilities and fixtures for integration tests
//!
//! Response bodies mirror what the sandbox returns for each endpoint.

#![allow(dead_code)]

use cbpro_rest::{CoinbaseProClient, Credentials};
use serde_json::{json, Value};
use wiremock::{Match, MockServer, Request};

pub const API_KEY: &str = "3b8c0a5e3d1f4e7aa0f1c2d3e4f5a6b7";
/// base64("coinbase-pro-test-secret-0123456789")
pub const API_SECRET: &str = "Y29pbmJhc2UtcHJvLXRlc3Qtc2VjcmV0LTAxMjM0NTY3ODk=";
pub const PASSPHRASE: &str = "sandbox-passphrase";

pub const BTC_COINBASE_ACCOUNT_ID: &str = "95671473-4dda-5264-a654-fc6923e8a334";
pub const USD_PAYMENT_METHOD_ID: &str = "bc6d7162-d984-5ffa-963c-a493b1c1370b";

pub fn test_credentials() -> Credentials {
    Credentials::new(API_KEY, API_SECRET, PASSPHRASE).expect("valid test credentials")
}

/// Start a mock server and a client pointed at it
pub async fn setup() -> (MockServer, CoinbaseProClient) {
    let server = MockServer::start().await;
    let client = CoinbaseProClient::new(API_KEY, API_SECRET, PASSPHRASE, server.uri())
        .expect("client should build");
    (server, client)
}

/// Matches requests carrying a valid `CB-ACCESS-*` header set
///
/// Recomputes the signature from the received method, path, query and body.
pub struct SignedRequest {
    credentials: Credentials,
}

impl SignedRequest {
    pub fn new() -> Self {
        Self {
            credentials: test_credentials(),
        }
    }
}

fn header<'r>(request: &'r Request, name: &str) -> Option<&'r str> {
    request.headers.get(name).and_then(|v| v.to_str().ok())
}

impl Match for SignedRequest {
    fn matches(&self, request: &Request) -> bool {
        let (Some(key), Some(signature), Some(timestamp), Some(passphrase)) = (
            header(request, "CB-ACCESS-KEY"),
            header(request, "CB-ACCESS-SIGN"),
            header(request, "CB-ACCESS-TIMESTAMP"),
            header(request, "CB-ACCESS-PASSPHRASE"),
        ) else {
            return false;
        };

        let mut request_path = request.url.path().to_string();
        if let Some(query) = request.url.query() {
            request_path.push('?');
            request_path.push_str(query);
        }
        let body = std::str::from_utf8(&request.body).unwrap_or_default();

        let expected = self
            .credentials
            .sign(timestamp, request.method.as_str(), &request_path, body);

        key == API_KEY && passphrase == PASSPHRASE && expected.ok().as_deref() == Some(signature)
    }
}

pub fn accounts_json() -> Value {
    json!([
        {
            "id": "71452118-efc7-4cc4-8780-a5e22d4baa53",
            "currency": "BTC",
            "balance": "0.0000000000000000",
            "available": "0.0000000000000000",
            "hold": "0.0000000000000000",
            "profile_id": "75da88c5-05bf-4f54-bc85-5c775bd68254",
            "trading_enabled": true
        },
        {
            "id": "e316cb9a-0808-4fd7-8914-97829c1925de",
            "currency": "USD",
            "balance": "80.2301373066930000",
            "available": "79.2266348066930000",
            "hold": "1.0035025000000000",
            "profile_id": "75da88c5-05bf-4f54-bc85-5c775bd68254",
            "trading_enabled": true
        }
    ])
}

pub fn coinbase_accounts_json() -> Value {
    json!([
        {
            "id": "fc3a8a57-7142-542d-8436-95a3d82e1622",
            "name": "ETH Wallet",
            "balance": "0.00000000",
            "currency": "ETH",
            "type": "wallet",
            "primary": false,
            "active": true
        },
        {
            "id": BTC_COINBASE_ACCOUNT_ID,
            "name": "BTC Wallet",
            "balance": "9.97000000",
            "currency": "BTC",
            "type": "wallet",
            "primary": true,
            "active": true
        }
    ])
}

pub fn withdrawals_json() -> Value {
    json!([
        {
            "id": "6cca6a14-a5e3-4219-9542-86123fc9d6c3",
            "type": "withdraw",
            "created_at": "2019-06-18 01:37:48.78953+00",
            "completed_at": "2019-06-18 01:37:49.756147+00",
            "canceled_at": null,
            "processed_at": "2019-06-18 01:37:49.756147+00",
            "user_nonce": null,
            "amount": "1.00000000",
            "details": {
                "destination_tag": "",
                "sent_to_address": "3H6WzGhPhGmWwGz2dcrQJX8kEHcHD1oVnr",
                "coinbase_account_id": "fc3a8a57-7142-542d-8436-95a3d82e1622",
                "coinbase_withdrawal_id": "5d6a5d8b1d6e8c0a1a7b4a3c",
                "coinbase_transaction_id": "5d6a5d8c1d6e8c0a1a7b4a3d",
                "fee": "0.00004000",
                "subtotal": "0.99996000"
            }
        },
        {
            "id": "a1b2c3d4-a5e3-4219-9542-86123fc9d6c3",
            "type": "withdraw",
            "created_at": "2019-06-10 11:02:13.1234+00",
            "completed_at": null,
            "canceled_at": null,
            "processed_at": null,
            "amount": "0.50000000",
            "details": {}
        }
    ])
}

pub fn candles_json(count: usize, newest: i64) -> Value {
    let candles: Vec<Value> = (0..count as i64)
        .map(|i| {
            json!([
                newest - i * 86400,
                6500.01 + i as f64,
                6800.5,
                6600.25,
                6700.75,
                1234.56789
            ])
        })
        .collect();
    Value::Array(candles)
}

pub fn stats_json() -> Value {
    json!({
        "open": "6745.61000000",
        "high": "7292.11000000",
        "low": "6650.00000000",
        "volume": "26185.51325269",
        "last": "6813.19000000",
        "volume_30day": "1019451.11188405"
    })
}

pub fn trades_json() -> Value {
    json!([
        {
            "time": "2014-11-07T22:19:28.578544Z",
            "trade_id": 74,
            "price": "10.00000000",
            "size": "0.01000000",
            "side": "buy"
        },
        {
            "time": "2014-11-07T01:08:43.642366Z",
            "trade_id": 73,
            "price": "100.00000000",
            "size": "0.01000000",
            "side": "sell"
        }
    ])
}

pub fn payment_methods_json() -> Value {
    json!([
        {
            "id": USD_PAYMENT_METHOD_ID,
            "type": "fiat_account",
            "name": "USD Wallet",
            "currency": "USD",
            "primary_buy": false,
            "primary_sell": false,
            "allow_buy": true,
            "allow_sell": true,
            "allow_deposit": true,
            "allow_withdraw": true,
            "limits": {}
        },
        {
            "id": "e49c8d15-547b-464e-ac3d-4b9d20b360ec",
            "type": "ach_bank_account",
            "name": "Bank of America - eBan... ********7134",
            "currency": "USD",
            "primary_buy": true,
            "primary_sell": true,
            "allow_buy": true,
            "allow_sell": true,
            "allow_deposit": true,
            "allow_withdraw": true
        },
        {
            "id": "1c4a9bd5-5e4a-4e4b-9d4b-0c7c0b3c4d5e",
            "type": "fiat_account",
            "name": "EUR Wallet",
            "currency": "EUR",
            "allow_deposit": true,
            "allow_withdraw": false
        }
    ])
}

pub fn order_json(side: &str, price: &str, size: &str) -> Value {
    json!({
        "id": "d0c5340b-6d6c-49d9-b567-48c4bfca13d2",
        "price": price,
        "size": size,
        "product_id": "BTC-USD",
        "side": side,
        "stp": "dc",
        "type": "limit",
        "time_in_force": "GTC",
        "post_only": false,
        "created_at": "2016-12-08T20:02:28.53864Z",
        "fill_fees": "0.0000000000000000",
        "filled_size": "0.00000000",
        "executed_value": "0.0000000000000000",
        "status": "pending",
        "settled": false
    })
}
