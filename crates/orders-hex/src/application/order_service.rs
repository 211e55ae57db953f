use crate::errors::AppError;
use orders_types::domain::order::{Order, OrderInput};
use orders_types::domain::page::{Page, PageRequest};
use orders_types::ports::order_repository::OrderRepository;

pub struct OrderService<R: OrderRepository> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub async fn create_order(&self, input: OrderInput) -> Result<Order, AppError> {
        let new_order = input.validate()?;
        let order = self.repo.create(new_order).await?;
        tracing::info!(order_id = order.id, "order created");
        Ok(order)
    }

    pub async fn get_order(&self, id: i64) -> Result<Order, AppError> {
        match self.repo.get(id).await? {
            Some(o) => Ok(o),
            None => Err(AppError::NotFound(format!("order {}", id))),
        }
    }

    pub async fn list_orders(&self, request: PageRequest) -> Result<Page<Order>, AppError> {
        tracing::debug!(
            page = request.page,
            size = request.size,
            sort = %request.sort,
            "listing orders"
        );
        Ok(self.repo.list(&request).await?)
    }

    /// Full replacement of every mutable field. The payload is validated
    /// before the lookup, so a bad payload is rejected even for unknown ids.
    pub async fn update_order(&self, id: i64, input: OrderInput) -> Result<Order, AppError> {
        let fields = input.validate()?;
        let mut order = self.get_order(id).await?;
        order.replace_fields(fields);
        match self.repo.update(order).await? {
            Some(o) => {
                tracing::info!(order_id = id, "order updated");
                Ok(o)
            }
            None => Err(AppError::NotFound(format!("order {}", id))),
        }
    }

    pub async fn delete_order(&self, id: i64) -> Result<(), AppError> {
        let deleted = self.repo.delete(id).await?;
        if deleted {
            tracing::info!(order_id = id, "order deleted");
            Ok(())
        } else {
            Err(AppError::NotFound(format!("order {}", id)))
        }
    }
}
