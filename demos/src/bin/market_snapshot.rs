//! Demo 2: Market Snapshot
//!
//! Prints the ticker, 24 hour stats, a week of daily candles and the most
//! recent trades for one product.
//!
//! Run: cargo run --bin market_snapshot -- ETH-USD
//!
//! Requires COINBASE_PRO_VIEW_API_KEY, _API_KEY_SECRET and
//! _API_KEY_PASSPHRASE.

use cbpro_rest::{ClientConfig, CoinbaseProClient, Credentials, Environment, Granularity, OrderSide};
use chrono::{Duration, DurationRound, Utc};
use colored::*;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let product = std::env::args().nth(1).unwrap_or_else(|| "BTC-USD".to_string());

    println!("{}", "═".repeat(60).cyan());
    println!("{}", format!("  MARKET SNAPSHOT: {}", product).as_str().cyan().bold());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let credentials = Credentials::from_env_prefix("COINBASE_PRO_VIEW")?;
    let client = CoinbaseProClient::with_config(
        credentials,
        ClientConfig::for_environment(Environment::Sandbox),
    )?;

    let server_time = client.get_server_time().await?;
    let skew = Utc::now() - server_time.iso;
    println!("  {} {} (skew {}ms)", "Server time:".dimmed(), server_time.iso, skew.num_milliseconds());
    println!();

    let ticker = client.get_product_ticker(&product).await?;
    println!("  {} ${}", "BID:".yellow(), ticker.bid);
    println!("  {} ${}", "ASK:".yellow(), ticker.ask);
    println!("  {} ${}", "MID:".yellow(), ticker.mid_price());
    println!("  {} ${}", "SPREAD:".green(), ticker.spread());
    println!();

    let stats = client.get_24_hr_stats(&product).await?;
    let change = if stats.open.is_zero() {
        rust_decimal::Decimal::ZERO
    } else {
        (stats.last - stats.open) / stats.open * rust_decimal_macros::dec!(100)
    };
    println!("{}", "24h".yellow().bold());
    println!("  open {}  high {}  low {}  last {}", stats.open, stats.high, stats.low, stats.last);
    println!("  volume {}  change {:.2}%", stats.volume, change);
    println!();

    let end = Utc::now().duration_trunc(Duration::days(1))?;
    let start = end - Duration::days(7);
    let candles = client
        .get_historic_rates(&product, start, end, Granularity::OneDay)
        .await?;
    println!("{}", "Daily candles".yellow().bold());
    for candle in &candles {
        let close = if candle.close >= candle.open {
            candle.close.to_string().green()
        } else {
            candle.close.to_string().red()
        };
        println!(
            "  {}  O {:>12}  H {:>12}  L {:>12}  C {:>12}",
            candle.time.format("%Y-%m-%d"),
            candle.open,
            candle.high,
            candle.low,
            close
        );
    }
    println!();

    println!("{}", "Latest trades".yellow().bold());
    for trade in client.get_latest_trades(&product).await?.iter().take(10) {
        let side = match trade.side {
            OrderSide::Buy => "BUY ".green(),
            OrderSide::Sell => "SELL".red(),
        };
        println!(
            "  {}  {}  {:>14} @ {}",
            trade.time.format("%H:%M:%S%.3f"),
            side,
            trade.size,
            trade.price
        );
    }

    println!("\n{} Done.", "✓".green());
    Ok(())
}
