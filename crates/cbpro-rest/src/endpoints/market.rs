//! Market data endpoints
//!
//! The exchange serves these without authentication, but requests are still
//! signed so one client covers every endpoint.

use crate::error::{RestError, RestResult};
use crate::request::{path_segment, ApiContext};
use crate::types::{
    expected_candle_count, Candle, Granularity, Product, ProductTicker, ServerTime, Stats24Hr,
    Trade,
};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::{debug, instrument};

/// Most buckets the candles endpoint returns for one request
pub const MAX_CANDLES_PER_REQUEST: u64 = 300;

/// Market data endpoints
pub struct MarketEndpoints<'a> {
    ctx: ApiContext<'a>,
}

#[derive(Serialize)]
struct CandlesQuery {
    start: String,
    end: String,
    granularity: u32,
}

impl<'a> MarketEndpoints<'a> {
    pub(crate) fn new(ctx: ApiContext<'a>) -> Self {
        Self { ctx }
    }

    /// Get server time
    #[instrument(skip(self))]
    pub async fn get_server_time(&self) -> RestResult<ServerTime> {
        debug!("Fetching server time");
        self.ctx.get("/time").await
    }

    /// List tradable products
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> RestResult<Vec<Product>> {
        debug!("Fetching products");
        self.ctx.get("/products").await
    }

    /// Get last trade and best bid/ask
    ///
    /// # Arguments
    /// * `product_id` - Product (e.g., "BTC-USD")
    #[instrument(skip(self))]
    pub async fn get_product_ticker(&self, product_id: &str) -> RestResult<ProductTicker> {
        let product_id = path_segment("product_id", product_id)?;
        debug!("Fetching ticker for {}", product_id);
        self.ctx
            .get(&format!("/products/{}/ticker", product_id))
            .await
    }

    /// Get historic rates (candles) for `[start, end)`
    ///
    /// # Arguments
    /// * `product_id` - Product (e.g., "BTC-USD")
    /// * `start` - Start of the range
    /// * `end` - End of the range, after `start`
    /// * `granularity` - Bucket width
    ///
    /// Candles are returned in exchange order (newest first). The range may
    /// cover at most [`MAX_CANDLES_PER_REQUEST`] buckets.
    #[instrument(skip(self))]
    pub async fn get_historic_rates(
        &self,
        product_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        granularity: Granularity,
    ) -> RestResult<Vec<Candle>> {
        let product_id = path_segment("product_id", product_id)?;

        if end <= start {
            return Err(RestError::Validation(format!(
                "end ({}) must be after start ({})",
                end, start
            )));
        }
        let buckets = expected_candle_count(start, end, granularity);
        if buckets > MAX_CANDLES_PER_REQUEST {
            return Err(RestError::Validation(format!(
                "range covers {} candles at {}s granularity, limit is {}",
                buckets, granularity, MAX_CANDLES_PER_REQUEST
            )));
        }

        let query = CandlesQuery {
            start: start.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            end: end.to_rfc3339_opts(SecondsFormat::AutoSi, true),
            granularity: granularity.as_secs(),
        };

        debug!("Fetching {} candles for {}", buckets, product_id);
        self.ctx
            .get_with_query(&format!("/products/{}/candles", product_id), &query)
            .await
    }

    /// Get trailing 24 hour statistics
    ///
    /// # Arguments
    /// * `product_id` - Product (e.g., "BTC-USD")
    #[instrument(skip(self))]
    pub async fn get_24_hr_stats(&self, product_id: &str) -> RestResult<Stats24Hr> {
        let product_id = path_segment("product_id", product_id)?;
        debug!("Fetching 24h stats for {}", product_id);
        self.ctx
            .get(&format!("/products/{}/stats", product_id))
            .await
    }

    /// Get the most recent trades, newest first
    ///
    /// # Arguments
    /// * `product_id` - Product (e.g., "BTC-USD")
    #[instrument(skip(self))]
    pub async fn get_latest_trades(&self, product_id: &str) -> RestResult<Vec<Trade>> {
        let product_id = path_segment("product_id", product_id)?;
        debug!("Fetching recent trades for {}", product_id);
        self.ctx
            .get(&format!("/products/{}/trades", product_id))
            .await
    }
}
