use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sos_types::domain::order::{Order, OrderDraft, ORDER_FIELDS};
use sos_types::ports::order_store::{OrderStore, StoreError};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{FromRow, SqlitePool};

/// File-backed order store. The schema is created only when the backing file
/// does not exist yet; an existing file is assumed to carry the right schema
/// (no verification, no migration).
pub struct SqliteStore {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct DbOrder {
    id: i64,
    name: String,
    address: String,
    city: String,
    state: String,
    zipcode: String,
    due_date: String,
    product_type: String,
}

const SELECT_COLUMNS: &str =
    "id, name, address, city, state, zipcode, dueDate AS due_date, productType AS product_type";

impl DbOrder {
    fn into_order(self) -> Order {
        Order {
            record_id: self.id,
            id: self.id.to_string(),
            name: self.name,
            address: self.address,
            city: self.city,
            state: self.state,
            zipcode: self.zipcode,
            due_date: self.due_date,
            product_type: self.product_type,
        }
    }
}

fn backend(e: impl std::fmt::Display) -> StoreError {
    StoreError::Backend(e.to_string())
}

impl SqliteStore {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let path = database_url.strip_prefix("sqlite://").unwrap_or(database_url);
        let mut fresh = true;
        if path != ":memory:" {
            let p = Path::new(path);
            fresh = !p.exists();
            if fresh {
                // create_dir_all tolerates already-existing directories; any
                // other failure aborts the bootstrap.
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        if fresh {
            let ddl = include_str!("../migrations/0001_create_orders.sql");
            sqlx::query(ddl).execute(&pool).await?;
            tracing::info!(db = %path, "created orders table");
        }

        Ok(Self { pool })
    }
}

#[async_trait]
impl OrderStore for SqliteStore {
    async fn insert(&self, draft: &OrderDraft) -> Result<Order, StoreError> {
        // One pooled connection per call, released on drop along every path.
        let mut conn = self.pool.acquire().await.map_err(backend)?;
        let mut query = sqlx::query(
            "INSERT INTO orders (name, address, city, state, zipcode, dueDate, productType)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        );
        for field in ORDER_FIELDS {
            query = query.bind(draft.field_or_default(field).to_owned());
        }
        let result = query.execute(&mut *conn).await.map_err(backend)?;
        Ok(Order::from_draft(result.last_insert_rowid(), draft))
    }

    async fn get(&self, id: i64) -> Result<Option<Order>, StoreError> {
        let mut conn = self.pool.acquire().await.map_err(backend)?;
        let row: Option<DbOrder> =
            sqlx::query_as(&format!("SELECT {SELECT_COLUMNS} FROM orders WHERE id = ?"))
                .bind(id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(backend)?;
        Ok(row.map(DbOrder::into_order))
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        let mut conn = self.pool.acquire().await.map_err(backend)?;
        let rows: Vec<DbOrder> =
            sqlx::query_as(&format!("SELECT {SELECT_COLUMNS} FROM orders ORDER BY id"))
                .fetch_all(&mut *conn)
                .await
                .map_err(backend)?;
        Ok(rows.into_iter().map(DbOrder::into_order).collect())
    }
}
