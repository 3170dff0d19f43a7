//! Trading endpoints for order management
//!
//! These endpoints require a key with the "trade" permission.

use crate::error::RestResult;
use crate::request::{path_segment, ApiContext};
use crate::types::{CancelResponse, Order, OrderRequest, OrderSide};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info, instrument};

/// Trading endpoints for order management
pub struct TradingEndpoints<'a> {
    ctx: ApiContext<'a>,
}

#[derive(Serialize)]
struct CancelAllQuery<'q> {
    #[serde(skip_serializing_if = "Option::is_none")]
    product_id: Option<&'q str>,
}

impl<'a> TradingEndpoints<'a> {
    pub(crate) fn new(ctx: ApiContext<'a>) -> Self {
        Self { ctx }
    }

    /// Place a new order
    ///
    /// # Arguments
    /// * `order` - Order request with all parameters
    ///
    /// # Returns
    /// Snapshot of the order as accepted by the exchange
    #[instrument(skip(self, order), fields(product = %order.product_id, side = %order.side, order_type = %order.order_type))]
    pub async fn place_order(&self, order: &OrderRequest) -> RestResult<Order> {
        order.validate()?;

        info!(
            "Placing {} {} order for {} {}",
            order.side, order.order_type, order.size, order.product_id
        );

        self.ctx.post("/orders", order).await
    }

    /// Place a limit order
    ///
    /// # Arguments
    /// * `product_id` - Product (e.g., "BTC-USD")
    /// * `side` - Buy or sell
    /// * `price` - Limit price, must be positive
    /// * `size` - Amount of base currency, must be positive
    pub async fn place_limit_order(
        &self,
        product_id: &str,
        side: OrderSide,
        price: Decimal,
        size: Decimal,
    ) -> RestResult<Order> {
        self.place_order(&OrderRequest::limit(product_id, side, price, size))
            .await
    }

    /// Get an order by ID
    #[instrument(skip(self))]
    pub async fn get_order(&self, order_id: &str) -> RestResult<Order> {
        let order_id = path_segment("order_id", order_id)?;
        self.ctx.get(&format!("/orders/{}", order_id)).await
    }

    /// Cancel an order
    ///
    /// # Returns
    /// IDs of the cancelled orders
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: &str) -> RestResult<Vec<String>> {
        let order_id = path_segment("order_id", order_id)?;
        debug!("Cancelling order {}", order_id);

        let response: CancelResponse = self
            .ctx
            .delete_with_query(&format!("/orders/{}", order_id), &())
            .await?;
        Ok(response.into_ids())
    }

    /// Cancel all open orders, optionally for one product only
    #[instrument(skip(self))]
    pub async fn cancel_all_orders(&self, product_id: Option<&str>) -> RestResult<Vec<String>> {
        if let Some(product_id) = product_id {
            path_segment("product_id", product_id)?;
        }
        debug!("Cancelling all open orders");

        let response: CancelResponse = self
            .ctx
            .delete_with_query("/orders", &CancelAllQuery { product_id })
            .await?;
        Ok(response.into_ids())
    }
}
