//! Order service scenarios against an in-memory store
//!
//! `MemoryStore` keeps one shared state. Each unit works on a private copy
//! and writes it back on commit, so a dropped or failed unit leaves the
//! shared state untouched.

use super::*;
use crate::pricing::{ItemPriceSource, LookupError, OrderHistory, PricedLine};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shared::models::{Order, OrderDetail, OrderItem, OrderLine, OrderStatus, UserOrder};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

mod test_update;

#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: HashSet<i64>,
    /// item id -> (price, deleted)
    items: HashMap<i64, (Decimal, bool)>,
    orders: BTreeMap<i64, Order>,
    order_items: Vec<OrderItem>,
    user_orders: Vec<UserOrder>,
    next_id: i64,
}

impl MemoryState {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn items_of(&self, order_id: i64) -> Vec<OrderItem> {
        self.order_items
            .iter()
            .filter(|item| item.order_id == order_id)
            .cloned()
            .collect()
    }

    fn insert_lines(&mut self, order_id: i64, lines: &[PricedLine]) -> Vec<OrderItem> {
        let mut inserted = Vec::with_capacity(lines.len());
        for line in lines {
            let item = OrderItem {
                id: self.next_id(),
                order_id,
                item_id: line.item_id,
                quantity: line.quantity,
                price: line.unit_price,
            };
            self.order_items.push(item.clone());
            inserted.push(item);
        }
        inserted
    }

    fn order_mut(&mut self, order_id: i64) -> Result<&mut Order, StoreError> {
        self.orders
            .get_mut(&order_id)
            .ok_or_else(|| StoreError::Backend(format!("order {order_id} missing")))
    }
}

#[derive(Clone, Default)]
struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    fail_commit: Arc<AtomicBool>,
    fail_lookups: Arc<AtomicBool>,
}

impl MemoryStore {
    fn add_user(&self, user_id: i64) {
        self.state.lock().unwrap().users.insert(user_id);
    }

    fn set_item(&self, item_id: i64, price: Decimal) {
        self.state
            .lock()
            .unwrap()
            .items
            .insert(item_id, (price, false));
    }

    fn delete_item(&self, item_id: i64) {
        if let Some(item) = self.state.lock().unwrap().items.get_mut(&item_id) {
            item.1 = true;
        }
    }

    /// Insert `count` live orders for `user_id` directly
    fn seed_orders(&self, user_id: i64, count: usize) {
        let mut state = self.state.lock().unwrap();
        for _ in 0..count {
            let id = state.next_id();
            state.orders.insert(id, order_row(id, user_id));
            let link = state.next_id();
            state.user_orders.push(UserOrder {
                id: link,
                user_id,
                order_id: id,
            });
        }
    }

    fn fail_next_commits(&self, fail: bool) {
        self.fail_commit.store(fail, Ordering::SeqCst);
    }

    fn fail_lookups(&self, fail: bool) {
        self.fail_lookups.store(fail, Ordering::SeqCst);
    }

    fn snapshot(&self) -> MemoryState {
        self.state.lock().unwrap().clone()
    }

    fn order(&self, order_id: i64) -> Order {
        self.snapshot().orders[&order_id].clone()
    }

    fn items(&self, order_id: i64) -> Vec<OrderItem> {
        self.snapshot().items_of(order_id)
    }
}

struct MemoryUnit {
    shared: Arc<Mutex<MemoryState>>,
    work: MemoryState,
    fail_commit: bool,
    fail_lookups: bool,
}

impl MemoryUnit {
    fn check_lookup(&self) -> Result<(), LookupError> {
        if self.fail_lookups {
            return Err(LookupError("lookup backend unavailable".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderStore for MemoryStore {
    type Unit = MemoryUnit;

    async fn begin(&self) -> Result<MemoryUnit, StoreError> {
        Ok(MemoryUnit {
            shared: self.state.clone(),
            work: self.snapshot(),
            fail_commit: self.fail_commit.load(Ordering::SeqCst),
            fail_lookups: self.fail_lookups.load(Ordering::SeqCst),
        })
    }

    async fn load_order(&self, order_id: i64) -> Result<Option<OrderDetail>, StoreError> {
        let state = self.snapshot();
        Ok(state
            .orders
            .get(&order_id)
            .filter(|order| !order.is_deleted())
            .map(|order| OrderDetail {
                order: order.clone(),
                items: state.items_of(order_id),
            }))
    }

    async fn load_orders(&self) -> Result<Vec<OrderDetail>, StoreError> {
        let state = self.snapshot();
        Ok(state
            .orders
            .values()
            .filter(|order| !order.is_deleted())
            .map(|order| OrderDetail {
                order: order.clone(),
                items: state.items_of(order.id),
            })
            .collect())
    }
}

#[async_trait]
impl ItemPriceSource for MemoryUnit {
    async fn item_price(&mut self, item_id: i64) -> Result<Option<Decimal>, LookupError> {
        self.check_lookup()?;
        Ok(self
            .work
            .items
            .get(&item_id)
            .filter(|(_, deleted)| !deleted)
            .map(|(price, _)| *price))
    }
}

#[async_trait]
impl OrderHistory for MemoryUnit {
    async fn count_user_orders(&mut self, user_id: i64) -> Result<i64, LookupError> {
        self.check_lookup()?;
        Ok(self
            .work
            .orders
            .values()
            .filter(|order| order.user_id == user_id && !order.is_deleted())
            .count() as i64)
    }
}

#[async_trait]
impl OrderUnit for MemoryUnit {
    async fn user_exists(&mut self, user_id: i64) -> Result<bool, StoreError> {
        Ok(self.work.users.contains(&user_id))
    }

    async fn find_order(&mut self, order_id: i64) -> Result<Option<Order>, StoreError> {
        Ok(self
            .work
            .orders
            .get(&order_id)
            .filter(|order| !order.is_deleted())
            .cloned())
    }

    async fn find_order_any(&mut self, order_id: i64) -> Result<Option<Order>, StoreError> {
        Ok(self.work.orders.get(&order_id).cloned())
    }

    async fn insert_order(&mut self, new: NewOrder) -> Result<Order, StoreError> {
        let id = self.work.next_id();
        let order = Order {
            id,
            user_id: new.user_id,
            total_price: new.total_price,
            final_price: new.final_price,
            status: new.status,
            created_at: new.now,
            updated_at: new.now,
            deleted_at: None,
        };
        self.work.orders.insert(id, order.clone());
        Ok(order)
    }

    async fn insert_order_items(
        &mut self,
        order_id: i64,
        lines: &[PricedLine],
    ) -> Result<Vec<OrderItem>, StoreError> {
        Ok(self.work.insert_lines(order_id, lines))
    }

    async fn insert_user_order(
        &mut self,
        user_id: i64,
        order_id: i64,
    ) -> Result<UserOrder, StoreError> {
        let link = UserOrder {
            id: self.work.next_id(),
            user_id,
            order_id,
        };
        self.work.user_orders.push(link.clone());
        Ok(link)
    }

    async fn replace_order_items(
        &mut self,
        order_id: i64,
        lines: &[PricedLine],
    ) -> Result<Vec<OrderItem>, StoreError> {
        self.work
            .order_items
            .retain(|item| item.order_id != order_id);
        Ok(self.work.insert_lines(order_id, lines))
    }

    async fn update_status(
        &mut self,
        order_id: i64,
        status: OrderStatus,
        now: i64,
    ) -> Result<(), StoreError> {
        let order = self.work.order_mut(order_id)?;
        order.status = status;
        order.updated_at = now;
        Ok(())
    }

    async fn update_prices(
        &mut self,
        order_id: i64,
        total_price: Decimal,
        final_price: Decimal,
        now: i64,
    ) -> Result<(), StoreError> {
        let order = self.work.order_mut(order_id)?;
        order.total_price = total_price;
        order.final_price = final_price;
        order.updated_at = now;
        Ok(())
    }

    async fn mark_cancelled(&mut self, order_id: i64, now: i64) -> Result<(), StoreError> {
        let order = self.work.order_mut(order_id)?;
        order.status = OrderStatus::Cancelled;
        order.deleted_at = Some(now);
        order.updated_at = now;
        Ok(())
    }

    async fn commit(self) -> Result<(), StoreError> {
        if self.fail_commit {
            return Err(StoreError::Commit("simulated serialization failure".into()));
        }
        *self.shared.lock().unwrap() = self.work;
        Ok(())
    }
}

// ========================================================================
// Helpers
// ========================================================================

const USER: i64 = 1;
const ITEM_A: i64 = 101;
const ITEM_B: i64 = 102;
const ITEM_C: i64 = 103;

fn order_row(id: i64, user_id: i64) -> Order {
    Order {
        id,
        user_id,
        total_price: Decimal::ZERO,
        final_price: Decimal::ZERO,
        status: OrderStatus::Pending,
        created_at: 0,
        updated_at: 0,
        deleted_at: None,
    }
}

/// Store with one user and items A = 12.00, B = 2.00, C = 7.50
fn setup() -> (MemoryStore, OrderService<MemoryStore>) {
    let store = MemoryStore::default();
    store.add_user(USER);
    store.set_item(ITEM_A, dec!(12.00));
    store.set_item(ITEM_B, dec!(2.00));
    store.set_item(ITEM_C, dec!(7.50));
    let service = OrderService::new(store.clone());
    (store, service)
}

fn line(item_id: i64, quantity: i32) -> OrderLine {
    OrderLine { item_id, quantity }
}

fn december(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, day).unwrap()
}

fn march(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

async fn create(service: &OrderService<MemoryStore>, lines: &[OrderLine]) -> Order {
    service
        .create_order(USER, lines, march(1))
        .await
        .unwrap()
        .detail
        .order
}
