//! Account endpoints
//!
//! These endpoints require a key with the "view" permission.

use crate::error::{RestError, RestResult};
use crate::request::{path_segment, ApiContext};
use crate::types::{Account, CoinbaseAccount};
use tracing::{debug, instrument};

/// Trading and funding account endpoints
pub struct AccountEndpoints<'a> {
    ctx: ApiContext<'a>,
}

impl<'a> AccountEndpoints<'a> {
    pub(crate) fn new(ctx: ApiContext<'a>) -> Self {
        Self { ctx }
    }

    /// List trading accounts
    #[instrument(skip(self))]
    pub async fn get_accounts(&self) -> RestResult<Vec<Account>> {
        self.ctx.get("/accounts").await
    }

    /// Get the trading account holding a currency
    ///
    /// # Arguments
    /// * `currency` - Currency code (e.g., "BTC")
    #[instrument(skip(self))]
    pub async fn get_account(&self, currency: &str) -> RestResult<Account> {
        let accounts = self.get_accounts().await?;
        debug!("Matching {} accounts against {}", accounts.len(), currency);

        accounts
            .into_iter()
            .find(|a| a.currency == currency)
            .ok_or_else(|| RestError::NotFound(format!("no trading account for currency {}", currency)))
    }

    /// Get a trading account by ID
    #[instrument(skip(self))]
    pub async fn get_account_by_id(&self, account_id: &str) -> RestResult<Account> {
        let account_id = path_segment("account_id", account_id)?;
        self.ctx.get(&format!("/accounts/{}", account_id)).await
    }

    /// List funding accounts on the linked Coinbase wallet
    #[instrument(skip(self))]
    pub async fn get_coinbase_accounts(&self) -> RestResult<Vec<CoinbaseAccount>> {
        self.ctx.get("/coinbase-accounts").await
    }

    /// Get the funding account holding a currency
    ///
    /// # Arguments
    /// * `currency` - Currency code (e.g., "BTC")
    #[instrument(skip(self))]
    pub async fn get_coinbase_account(&self, currency: &str) -> RestResult<CoinbaseAccount> {
        let accounts = self.get_coinbase_accounts().await?;
        debug!("Matching {} funding accounts against {}", accounts.len(), currency);

        accounts
            .into_iter()
            .find(|a| a.currency == currency)
            .ok_or_else(|| RestError::NotFound(format!("no Coinbase account for currency {}", currency)))
    }
}
