//! Demo 1: Account Overview
//!
//! Lists trading balances, funding accounts, payment methods and recent
//! withdrawals for a key with view and transfer permissions.
//!
//! Run: cargo run --bin account_overview
//!
//! Requires COINBASE_PRO_TRANSFER_VIEW_API_KEY, _API_KEY_SECRET and
//! _API_KEY_PASSPHRASE.

use cbpro_rest::{ClientConfig, CoinbaseProClient, Credentials, Environment};
use colored::*;
use rust_decimal::Decimal;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ACCOUNT OVERVIEW".cyan().bold());
    println!("{}", "  Coinbase Pro Sandbox".cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let credentials = Credentials::from_env_prefix("COINBASE_PRO_TRANSFER_VIEW")?;
    let client = CoinbaseProClient::with_config(
        credentials,
        ClientConfig::for_environment(Environment::Sandbox),
    )?;

    println!("{}", "Trading accounts".yellow().bold());
    for account in client.get_accounts().await? {
        if account.balance == Decimal::ZERO {
            continue;
        }
        println!(
            "  {:<6} balance {:>20}  available {:>20}  hold {:>12}",
            account.currency, account.balance, account.available, account.hold
        );
    }
    println!();

    println!("{}", "Coinbase funding accounts".yellow().bold());
    for account in client.get_coinbase_accounts().await? {
        let marker = if account.primary { "*".green() } else { " ".normal() };
        println!(
            "  {} {:<20} {:<6} {:>16}",
            marker, account.name, account.currency, account.balance
        );
    }
    println!();

    println!("{}", "Payment methods".yellow().bold());
    match client.get_payment_methods().await {
        Ok(methods) => {
            for method in methods {
                println!(
                    "  {:<40} {:<18} {}",
                    method.name,
                    method.method_type,
                    method.currency
                );
            }
        }
        Err(e) if e.is_scope_denied() => {
            println!("  {} key lacks the transfer permission", "✗".red())
        }
        Err(e) => return Err(e.into()),
    }
    println!();

    println!("{}", "Recent withdrawals".yellow().bold());
    let withdrawals = client.get_withdrawals().await?;
    if withdrawals.is_empty() {
        println!("  {}", "none".dimmed());
    }
    for withdrawal in withdrawals.iter().take(10) {
        let status = if withdrawal.is_completed() {
            "completed".green()
        } else {
            "pending".yellow()
        };
        let created = withdrawal
            .created_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "  {}  {:>14}  fee {:>12}  {}",
            created,
            withdrawal.amount,
            withdrawal.details.fee().unwrap_or_default(),
            status
        );
    }

    println!("\n{} Done.", "✓".green());
    Ok(())
}
