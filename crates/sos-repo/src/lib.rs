#[cfg(not(any(feature = "memory", feature = "sqlite")))]
compile_error!("Enable a store feature: `memory` or `sqlite`.");

use sos_types::domain::order::{Order, OrderDraft};
use sos_types::ports::order_store::{OrderStore, StoreError};

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Feature-selected order store for the application binary. When both
/// features are enabled the durable store wins; the in-memory adapter is then
/// only reachable directly, as a test double.
pub struct Repo {
    #[cfg(all(feature = "memory", not(feature = "sqlite")))]
    memory: memory::InMemoryStore,
    #[cfg(feature = "sqlite")]
    sqlite: sqlite::SqliteStore,
}

pub async fn build_repo(url: Option<&str>) -> anyhow::Result<Repo> {
    Repo::build_repo(url).await
}

impl Repo {
    #[cfg(all(feature = "memory", not(feature = "sqlite")))]
    pub async fn build_repo(_: Option<&str>) -> anyhow::Result<Self> {
        Ok(Self {
            memory: memory::InMemoryStore::new(),
        })
    }

    #[cfg(feature = "sqlite")]
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        let url = database_url.unwrap_or("sqlite://sos.db");
        let sqlite = sqlite::SqliteStore::new(url).await?;
        Ok(Self { sqlite })
    }
}

#[cfg(all(feature = "memory", not(feature = "sqlite")))]
#[async_trait::async_trait]
impl OrderStore for Repo {
    async fn insert(&self, draft: &OrderDraft) -> Result<Order, StoreError> {
        self.memory.insert(draft).await
    }

    async fn get(&self, id: i64) -> Result<Option<Order>, StoreError> {
        self.memory.get(id).await
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        self.memory.list().await
    }
}

#[cfg(feature = "sqlite")]
#[async_trait::async_trait]
impl OrderStore for Repo {
    async fn insert(&self, draft: &OrderDraft) -> Result<Order, StoreError> {
        self.sqlite.insert(draft).await
    }

    async fn get(&self, id: i64) -> Result<Option<Order>, StoreError> {
        self.sqlite.get(id).await
    }

    async fn list(&self) -> Result<Vec<Order>, StoreError> {
        self.sqlite.list().await
    }
}
