use async_trait::async_trait;
use orders_types::domain::order::{NewOrder, Order};
use orders_types::domain::page::{Page, PageRequest};
use orders_types::ports::order_repository::{OrderRepository, RepoError};
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{FromRow, SqlitePool};
use std::str::FromStr;

pub struct SqliteRepo {
    pool: SqlitePool,
}

#[derive(FromRow)]
struct DbOrder {
    id: i64,
    customer_name: String,
    product: String,
    quantity: i32,
    price: f64,
    status: String,
}

impl From<DbOrder> for Order {
    fn from(row: DbOrder) -> Self {
        Order {
            id: row.id,
            customer_name: row.customer_name,
            product: row.product,
            quantity: row.quantity,
            price: row.price,
            status: row.status,
        }
    }
}

fn db_err(e: sqlx::Error) -> RepoError {
    RepoError::DbError(e.to_string())
}

const SELECT_COLUMNS: &str = "SELECT id, customer_name, product, quantity, price, status FROM orders";

impl SqliteRepo {
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = SqlitePool::connect_with(options).await?;

        let ddl = include_str!("../migrations/0001_create_orders.sql");
        sqlx::query(ddl).execute(&pool).await?;
        tracing::debug!(database_url, "sqlite order store ready");

        Ok(Self { pool })
    }
}

#[async_trait]
impl OrderRepository for SqliteRepo {
    async fn create(&self, order: NewOrder) -> Result<Order, RepoError> {
        let res = sqlx::query(
            "INSERT INTO orders (customer_name, product, quantity, price, status)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&order.customer_name)
        .bind(&order.product)
        .bind(order.quantity)
        .bind(order.price)
        .bind(&order.status)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        Ok(order.with_id(res.last_insert_rowid()))
    }

    async fn get(&self, id: i64) -> Result<Option<Order>, RepoError> {
        let row: Option<DbOrder> = sqlx::query_as(&format!("{SELECT_COLUMNS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(row.map(Order::from))
    }

    async fn list(&self, request: &PageRequest) -> Result<Page<Order>, RepoError> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await
            .map_err(db_err)?;

        // Column and direction come from closed enums, never from request text.
        let sql = format!(
            "{SELECT_COLUMNS} ORDER BY {} {}, id ASC LIMIT ? OFFSET ?",
            request.sort.field.column(),
            request.sort.direction.as_sql(),
        );
        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
        let rows: Vec<DbOrder> = sqlx::query_as(&sql)
            .bind(i64::from(request.size))
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(db_err)?;

        let content = rows.into_iter().map(Order::from).collect();
        Ok(Page::new(content, request, total.max(0) as u64))
    }

    async fn update(&self, order: Order) -> Result<Option<Order>, RepoError> {
        let updated = sqlx::query(
            "UPDATE orders SET customer_name = ?, product = ?, quantity = ?, price = ?, status = ?
             WHERE id = ?",
        )
        .bind(&order.customer_name)
        .bind(&order.product)
        .bind(order.quantity)
        .bind(order.price)
        .bind(&order.status)
        .bind(order.id)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;
        if updated.rows_affected() == 0 {
            return Ok(None);
        }
        self.get(order.id).await
    }

    async fn delete(&self, id: i64) -> Result<bool, RepoError> {
        let res = sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;
        Ok(res.rows_affected() > 0)
    }
}
