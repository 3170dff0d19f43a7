//! Demo 3: Sandbox Deposit and Order
//!
//! Moves a single satoshi from the Coinbase BTC wallet into the trading
//! account, then rests a sell order far above the market and cancels it.
//!
//! Run: cargo run --bin sandbox_order
//!
//! Requires COINBASE_PRO_TRANSFER_VIEW_* and COINBASE_PRO_TRADE_* key sets.

use cbpro_rest::{ClientConfig, CoinbaseProClient, Credentials, Environment, OrderSide};
use colored::*;
use rust_decimal_macros::dec;

fn sandbox(prefix: &str) -> Result<CoinbaseProClient, Box<dyn std::error::Error>> {
    let credentials = Credentials::from_env_prefix(prefix)?;
    Ok(CoinbaseProClient::with_config(
        credentials,
        ClientConfig::for_environment(Environment::Sandbox),
    )?)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  SANDBOX DEPOSIT AND ORDER".cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let transfer = sandbox("COINBASE_PRO_TRANSFER_VIEW")?;
    let trade = sandbox("COINBASE_PRO_TRADE")?;

    let wallet = transfer.get_coinbase_account("BTC").await?;
    println!("{} Funding wallet {} holds {} BTC", "✓".green(), wallet.name, wallet.balance);

    let receipt = transfer
        .deposit_from_coinbase_account(dec!(0.00000001), "BTC", &wallet.id)
        .await?;
    println!(
        "{} Deposited {} {} (receipt {})",
        "✓".green(),
        receipt.amount,
        receipt.currency,
        receipt.id
    );

    let order = trade
        .place_limit_order("BTC-USD", OrderSide::Sell, dec!(999999999.39), dec!(0.01))
        .await?;
    println!(
        "{} Placed {} {} @ {} (status {:?}, filled {})",
        "✓".green(),
        order.side,
        order.size.unwrap_or_default(),
        order.price.unwrap_or_default(),
        order.status,
        order.filled_size
    );

    let cancelled = trade.cancel_order(&order.id).await?;
    println!("{} Cancelled {} order(s)", "✓".green(), cancelled.len());

    println!("\n{} Demo complete.", "✓".green());
    Ok(())
}
