//! Funding endpoints for deposits, withdrawals and payment methods
//!
//! These endpoints require a key with the "transfer" permission, except the
//! transfer history which only needs "view".

use crate::error::{RestError, RestResult};
use crate::request::ApiContext;
use crate::types::{PaymentMethod, Transfer, TransferReceipt, TransferType};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Funding endpoints for deposits and withdrawals
pub struct FundingEndpoints<'a> {
    ctx: ApiContext<'a>,
}

#[derive(Serialize)]
struct TransfersQuery {
    #[serde(rename = "type")]
    transfer_type: TransferType,
}

#[derive(Debug, Serialize)]
struct CoinbaseDepositRequest<'r> {
    amount: Decimal,
    currency: &'r str,
    coinbase_account_id: &'r str,
}

#[derive(Debug, Serialize)]
struct PaymentMethodWithdrawalRequest<'r> {
    amount: Decimal,
    currency: &'r str,
    payment_method_id: &'r str,
}

fn check_amount(amount: Decimal) -> RestResult<()> {
    if amount <= Decimal::ZERO {
        return Err(RestError::Validation(format!(
            "amount must be positive, got {}",
            amount
        )));
    }
    Ok(())
}

fn check_non_empty(name: &str, value: &str) -> RestResult<()> {
    if value.trim().is_empty() {
        return Err(RestError::Validation(format!("{} must not be empty", name)));
    }
    Ok(())
}

impl<'a> FundingEndpoints<'a> {
    pub(crate) fn new(ctx: ApiContext<'a>) -> Self {
        Self { ctx }
    }

    /// List transfers of one kind, most recent first
    #[instrument(skip(self))]
    pub async fn get_transfers(&self, transfer_type: TransferType) -> RestResult<Vec<Transfer>> {
        debug!("Fetching {} transfers", transfer_type);
        self.ctx
            .get_with_query("/transfers", &TransfersQuery { transfer_type })
            .await
    }

    /// List withdrawals, most recent first
    pub async fn get_withdrawals(&self) -> RestResult<Vec<Transfer>> {
        self.get_transfers(TransferType::Withdraw).await
    }

    /// List deposits, most recent first
    pub async fn get_deposits(&self) -> RestResult<Vec<Transfer>> {
        self.get_transfers(TransferType::Deposit).await
    }

    /// List linked payment methods
    #[instrument(skip(self))]
    pub async fn get_payment_methods(&self) -> RestResult<Vec<PaymentMethod>> {
        self.ctx.get("/payment-methods").await
    }

    /// List linked payment methods denominated in one currency
    ///
    /// Filters the full list client-side. `currency` must match the
    /// exchange's upper-case code exactly, so `"usd"` matches nothing.
    #[instrument(skip(self))]
    pub async fn get_payment_methods_for_currency(&self, currency: &str) -> RestResult<Vec<PaymentMethod>> {
        let methods = self.get_payment_methods().await?;
        Ok(methods
            .into_iter()
            .filter(|m| m.currency == currency)
            .collect())
    }

    /// Move funds from a Coinbase funding account into the trading account
    ///
    /// # Arguments
    /// * `amount` - Amount to deposit, must be positive
    /// * `currency` - Currency of the funding account
    /// * `coinbase_account_id` - Funding account ID (from `get_coinbase_accounts`)
    ///
    /// The exchange echoes `amount` and `currency` in the receipt.
    #[instrument(skip(self))]
    pub async fn deposit_from_coinbase_account(
        &self,
        amount: Decimal,
        currency: &str,
        coinbase_account_id: &str,
    ) -> RestResult<TransferReceipt> {
        check_amount(amount)?;
        check_non_empty("currency", currency)?;
        check_non_empty("coinbase_account_id", coinbase_account_id)?;

        let request = CoinbaseDepositRequest {
            amount,
            currency,
            coinbase_account_id,
        };

        info!("Depositing {} {} from Coinbase account", amount, currency);
        self.ctx.post("/deposits/coinbase-account", &request).await
    }

    /// Withdraw funds to a linked payment method
    ///
    /// # Arguments
    /// * `amount` - Amount to withdraw, must be positive
    /// * `currency` - Currency to withdraw
    /// * `payment_method_id` - Payment method ID (from `get_payment_methods`)
    ///
    /// Returns `None` when the exchange acknowledges with an empty body. Keys
    /// without the withdrawal scope get `RestError::Auth`, see
    /// [`RestError::is_scope_denied`].
    #[instrument(skip(self))]
    pub async fn withdraw_to_payment_method(
        &self,
        amount: Decimal,
        currency: &str,
        payment_method_id: &str,
    ) -> RestResult<Option<TransferReceipt>> {
        check_amount(amount)?;
        check_non_empty("currency", currency)?;
        check_non_empty("payment_method_id", payment_method_id)?;

        let request = PaymentMethodWithdrawalRequest {
            amount,
            currency,
            payment_method_id,
        };

        info!("Withdrawing {} {} to payment method", amount, currency);
        self.ctx
            .post_optional("/withdrawals/payment-method", &request)
            .await
    }
}
