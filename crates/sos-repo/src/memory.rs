use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use sos_types::domain::order::{Order, OrderDraft};
use sos_types::ports::order_store::{OrderStore, StoreError};

/// In-memory order table with the same identifier semantics as the durable
/// store: ids start at 1 and increase monotonically, never reused.
#[derive(Clone)]
pub struct InMemoryStore {
    map: Arc<DashMap<i64, Order>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderStore for InMemoryStore {
    async fn insert(&self, draft: &OrderDraft) -> Result<Order, StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let order = Order::from_draft(id, draft);
        self.map.insert(id, order.clone());
        Ok(order)
    }

    async fn get(&self, id: i64) -> Result<Option<Order>, StoreError> {
        Ok(self.map.get(&id).map(|r| r.clone()))
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let mut orders: Vec<Order> = self.map.iter().map(|kv| kv.value().clone()).collect();
        orders.sort_by_key(|o| o.record_id);
        Ok(orders)
    }
}
