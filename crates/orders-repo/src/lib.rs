#[cfg(not(any(feature = "memory", feature = "sqlite")))]
compile_error!("Enable a repo feature: `memory` or `sqlite`.");

use orders_types::domain::order::{NewOrder, Order};
use orders_types::domain::page::{Page, PageRequest};
use orders_types::ports::order_repository::{OrderRepository, RepoError};

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://orders.db";

/// Store selected at startup from the enabled features and the database URL.
pub enum Repo {
    #[cfg(feature = "memory")]
    Memory(memory::InMemoryRepo),
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteRepo),
}

/// An explicit URL picks SQLite when it is compiled in; otherwise the
/// in-memory store is preferred, then SQLite at [`DEFAULT_DATABASE_URL`].
pub async fn build_repo(url: Option<&str>) -> anyhow::Result<Repo> {
    Repo::build_repo(url).await
}

impl Repo {
    pub async fn build_repo(database_url: Option<&str>) -> anyhow::Result<Self> {
        match database_url {
            #[cfg(feature = "sqlite")]
            Some(url) => Self::sqlite(url).await,
            _ => Self::fallback(database_url).await,
        }
    }

    #[cfg(feature = "sqlite")]
    async fn sqlite(url: &str) -> anyhow::Result<Self> {
        tracing::info!(url, "using sqlite order store");
        Ok(Self::Sqlite(sqlite::SqliteRepo::new(url).await?))
    }

    #[cfg(feature = "memory")]
    async fn fallback(_: Option<&str>) -> anyhow::Result<Self> {
        tracing::info!("using in-memory order store");
        Ok(Self::Memory(memory::InMemoryRepo::new()))
    }

    #[cfg(all(feature = "sqlite", not(feature = "memory")))]
    async fn fallback(database_url: Option<&str>) -> anyhow::Result<Self> {
        Self::sqlite(database_url.unwrap_or(DEFAULT_DATABASE_URL)).await
    }
}

macro_rules! dispatch {
    ($self:ident, $repo:ident => $call:expr) => {
        match $self {
            #[cfg(feature = "memory")]
            Repo::Memory($repo) => $call,
            #[cfg(feature = "sqlite")]
            Repo::Sqlite($repo) => $call,
        }
    };
}

#[async_trait::async_trait]
impl OrderRepository for Repo {
    async fn create(&self, order: NewOrder) -> Result<Order, RepoError> {
        dispatch!(self, r => r.create(order).await)
    }

    async fn get(&self, id: i64) -> Result<Option<Order>, RepoError> {
        dispatch!(self, r => r.get(id).await)
    }

    async fn list(&self, request: &PageRequest) -> Result<Page<Order>, RepoError> {
        dispatch!(self, r => r.list(request).await)
    }

    async fn update(&self, order: Order) -> Result<Option<Order>, RepoError> {
        dispatch!(self, r => r.update(order).await)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        dispatch!(self, r => r.delete(id).await)
    }
}
