use async_trait::async_trait;

use crate::domain::order::{Order, OrderDraft};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("store error: {0}")]
    Backend(String),
}

/// Durable table of orders. Implementations assign identifiers on insert via
/// their own auto-increment mechanism; identifiers are unique, immutable, and
/// strictly increasing by insertion order. Each operation is self-contained:
/// it acquires its own handle to the backing store and releases it on every
/// exit path.
#[async_trait]
pub trait OrderStore: Send + Sync + 'static {
    /// Appends one row and returns the stored record with its assigned
    /// identifier.
    async fn insert(&self, draft: &OrderDraft) -> Result<Order, StoreError>;

    /// Looks up a single row; `None` when no row matches.
    async fn get(&self, id: i64) -> Result<Option<Order>, StoreError>;

    /// Every row, ascending by identifier. An empty table yields an empty
    /// vec, not an error.
    async fn list(&self) -> Result<Vec<Order>, StoreError>;
}
