use async_trait::async_trait;

use crate::domain::order::{NewOrder, Order};
use crate::domain::page::{Page, PageRequest};

#[derive(thiserror::Error, Debug)]
pub enum RepoError {
    #[error("db error: {0}")]
    DbError(String),
}

#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    /// Persists a new order and returns it with its generated id.
    async fn create(&self, order: NewOrder) -> Result<Order, RepoError>;
    async fn get(&self, id: i64) -> Result<Option<Order>, RepoError>;
    async fn list(&self, request: &PageRequest) -> Result<Page<Order>, RepoError>;
    /// Overwrites all mutable fields of the row with `order.id`.
    async fn update(&self, order: Order) -> Result<Option<Order>, RepoError>;
    async fn delete(&self, id: i64) -> Result<bool, RepoError>;
}
