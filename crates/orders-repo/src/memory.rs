use async_trait::async_trait;
use dashmap::DashMap;
use orders_types::domain::order::{NewOrder, Order};
use orders_types::domain::page::{compare_orders, Page, PageRequest};
use orders_types::ports::order_repository::{OrderRepository, RepoError};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

/// DashMap-backed store with an atomic id sequence starting at 1.
#[derive(Clone)]
pub struct InMemoryRepo {
    pub map: Arc<DashMap<i64, Order>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryRepo {
    pub fn new() -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }
}

impl Default for InMemoryRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OrderRepository for InMemoryRepo {
    async fn create(&self, order: NewOrder) -> Result<Order, RepoError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let order = order.with_id(id);
        self.map.insert(id, order.clone());
        Ok(order)
    }

    async fn get(&self, id: i64) -> Result<Option<Order>, RepoError> {
        Ok(self.map.get(&id).map(|r| r.clone()))
    }

    async fn list(&self, request: &PageRequest) -> Result<Page<Order>, RepoError> {
        let mut all: Vec<Order> = self.map.iter().map(|kv| kv.value().clone()).collect();
        all.sort_by(|a, b| compare_orders(a, b, &request.sort));
        let total = all.len() as u64;
        let content = all
            .into_iter()
            .skip(usize::try_from(request.offset()).unwrap_or(usize::MAX))
            .take(request.size as usize)
            .collect();
        Ok(Page::new(content, request, total))
    }

    async fn update(&self, order: Order) -> Result<Option<Order>, RepoError> {
        if let Some(mut v) = self.map.get_mut(&order.id) {
            *v = order;
            return Ok(Some(v.clone()));
        }
        Ok(None)
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        Ok(self.map.remove(&id).is_some())
    }
}
