use crate::errors::AppError;
use sos_types::domain::due_date::{parse_due_date, to_canonical};
use sos_types::domain::order::{Order, OrderDraft, DUE_DATE_FIELD};
use sos_types::domain::validate::validate_now;
use sos_types::ports::order_store::OrderStore;

pub struct OrderService<S: OrderStore> {
    store: S,
}

impl<S: OrderStore> OrderService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Validates a candidate order against the wall clock and persists it.
    /// The due date is stored in canonical `MM/DD/YYYY` form regardless of
    /// which accepted format the client posted.
    pub async fn create_order(&self, mut draft: OrderDraft) -> Result<Order, AppError> {
        validate_now(&draft)?;
        // The validator guarantees the due date is present and parseable.
        if let Ok(Some(date)) = parse_due_date(draft.due_date().unwrap_or_default()) {
            draft.set(DUE_DATE_FIELD, to_canonical(date));
        }
        let order = self.store.insert(&draft).await?;
        tracing::info!(id = %order.id, "order created");
        Ok(order)
    }

    /// Looks up one order. A non-integer identifier is a bad request, not a
    /// not-found.
    pub async fn get_order(&self, id: &str) -> Result<Order, AppError> {
        let id: i64 = id
            .parse()
            .map_err(|_| AppError::BadRequest(format!("invalid order id: {id}")))?;
        match self.store.get(id).await? {
            Some(order) => Ok(order),
            None => Err(AppError::NotFound(format!("order {id}"))),
        }
    }

    pub async fn list_orders(&self) -> Result<Vec<Order>, AppError> {
        Ok(self.store.list().await?)
    }
}
