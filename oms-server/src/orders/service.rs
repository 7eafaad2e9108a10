//! Order service: create, confirm, cancel and update-and-reprice

use chrono::NaiveDate;
use rust_decimal::Decimal;
use shared::models::{OrderCreated, OrderDetail, OrderLine, OrderStatus};
use shared::util::now_millis;
use tracing::instrument;

use super::aggregate::aggregate_items;
use super::error::{OrderError, OrderResult};
use super::store::{NewOrder, OrderStore, OrderUnit};
use crate::pricing::{
    Discounts, OrderHistory, PriceBreakdown, PricedLine, calculate_discounts, materialize,
    resolve_total,
};

/// Result of a pricing pass over a new order
#[derive(Debug, Clone, PartialEq)]
pub struct PricedOrder {
    pub user_id: i64,
    pub lines: Vec<PricedLine>,
    pub discounts: Discounts,
    pub breakdown: PriceBreakdown,
}

/// Result of [`OrderService::update_and_reprice`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepriceOutcome {
    pub order_id: i64,
    /// New `total_price`, summed over the freshly inserted rows
    pub subtotal: Decimal,
    pub final_price: Decimal,
}

#[derive(Clone)]
pub struct OrderService<S> {
    store: S,
}

impl<S: OrderStore> OrderService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Run the three pricing stages without persisting anything
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn price_new_order(
        &self,
        user_id: i64,
        lines: &[OrderLine],
        as_of: NaiveDate,
    ) -> OrderResult<PricedOrder> {
        let mut unit = self.store.begin().await?;
        price_lines(&mut unit, user_id, lines, as_of).await
    }

    /// Price and persist a new order, its items and its user link atomically
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn create_order(
        &self,
        user_id: i64,
        lines: &[OrderLine],
        as_of: NaiveDate,
    ) -> OrderResult<OrderCreated> {
        let mut unit = self.store.begin().await?;

        if !unit.user_exists(user_id).await? {
            return Err(OrderError::UserNotFound(user_id));
        }

        let priced = price_lines(&mut unit, user_id, lines, as_of).await?;
        let breakdown = priced.breakdown;

        let order = unit
            .insert_order(NewOrder {
                user_id,
                total_price: breakdown.subtotal,
                final_price: breakdown.final_price,
                status: OrderStatus::Pending,
                now: now_millis(),
            })
            .await?;
        let items = unit.insert_order_items(order.id, &priced.lines).await?;
        unit.insert_user_order(user_id, order.id).await?;
        unit.commit().await?;

        tracing::info!(
            order_id = order.id,
            user_id,
            subtotal = %breakdown.subtotal,
            discount = %breakdown.total_discount,
            final_price = %breakdown.final_price,
            "Order created"
        );

        Ok(OrderCreated {
            detail: OrderDetail { order, items },
            discounts: breakdown.discount_lines(),
        })
    }

    /// `Pending -> Confirm`
    #[instrument(skip(self))]
    pub async fn confirm_order(&self, order_id: i64) -> OrderResult<()> {
        let mut unit = self.store.begin().await?;
        let order = unit
            .find_order(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))?;

        if order.status != OrderStatus::Pending {
            tracing::warn!(order_id, current = %order.status, "Confirm rejected");
            return Err(OrderError::InvalidTransition {
                current: order.status,
            });
        }

        unit.update_status(order_id, OrderStatus::Confirm, now_millis())
            .await?;
        unit.commit().await?;

        tracing::info!(order_id, "Order confirmed");
        Ok(())
    }

    /// Mark the order `Cancelled` and soft-delete it
    #[instrument(skip(self))]
    pub async fn cancel_order(&self, order_id: i64) -> OrderResult<()> {
        let mut unit = self.store.begin().await?;
        let order = unit
            .find_order_any(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))?;

        if order.is_deleted() {
            tracing::warn!(order_id, "Cancel rejected: already deleted");
            return Err(OrderError::AlreadyDeleted(order_id));
        }

        unit.mark_cancelled(order_id, now_millis()).await?;
        unit.commit().await?;

        tracing::info!(order_id, "Order cancelled");
        Ok(())
    }

    /// Replace all items of an order at current catalog prices and reprice it
    ///
    /// All-or-nothing: on any error the unit is dropped uncommitted and the
    /// order keeps its previous status, items and prices.
    #[instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn update_and_reprice(
        &self,
        order_id: i64,
        status: Option<OrderStatus>,
        lines: &[OrderLine],
        as_of: NaiveDate,
    ) -> OrderResult<RepriceOutcome> {
        let mut unit = self.store.begin().await?;
        let order = unit
            .find_order(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))?;
        let now = now_millis();

        if let Some(status) = status
            && status != order.status
        {
            unit.update_status(order_id, status, now).await?;
            tracing::debug!(order_id, from = %order.status, to = %status, "Status updated");
        }

        let materialized = materialize(&mut unit, lines)
            .await
            .map_err(|e| OrderError::from(e).item_as_invalid())?;
        let items = unit
            .replace_order_items(order_id, &materialized.lines)
            .await?;

        let subtotal: Decimal = items
            .iter()
            .map(|item| item.price * Decimal::from(item.quantity))
            .sum();

        // The order itself is live, exclude it so loyalty matches creation time
        let prior_orders = unit
            .count_user_orders(order.user_id)
            .await
            .map_err(|e| OrderError::Lookup(e.0))?
            .saturating_sub(1)
            .max(0);
        let discounts = Discounts::compute(prior_orders, &materialized.lines, as_of);
        let breakdown = resolve_total(subtotal, &discounts);

        unit.update_prices(order_id, subtotal, breakdown.final_price, now)
            .await?;
        unit.commit().await?;

        tracing::info!(
            order_id,
            items = items.len(),
            subtotal = %subtotal,
            final_price = %breakdown.final_price,
            "Order repriced"
        );

        Ok(RepriceOutcome {
            order_id,
            subtotal,
            final_price: breakdown.final_price,
        })
    }

    /// Non-deleted order with its raw items
    pub async fn get_order(&self, order_id: i64) -> OrderResult<OrderDetail> {
        self.store
            .load_order(order_id)
            .await?
            .ok_or(OrderError::OrderNotFound(order_id))
    }

    /// Every non-deleted order, duplicate item ids folded into one line
    pub async fn list_orders(&self) -> OrderResult<Vec<OrderDetail>> {
        let orders = self.store.load_orders().await?;
        orders
            .into_iter()
            .map(|detail| {
                Ok(OrderDetail {
                    order: detail.order,
                    items: aggregate_items(detail.items)?,
                })
            })
            .collect()
    }
}

async fn price_lines<U: OrderUnit>(
    unit: &mut U,
    user_id: i64,
    lines: &[OrderLine],
    as_of: NaiveDate,
) -> OrderResult<PricedOrder> {
    let materialized = materialize(&mut *unit, lines).await?;
    let discounts = calculate_discounts(&mut *unit, user_id, &materialized.lines, as_of).await?;
    let breakdown = resolve_total(materialized.subtotal, &discounts);

    Ok(PricedOrder {
        user_id,
        lines: materialized.lines,
        discounts,
        breakdown,
    })
}
