use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use studio_core::order::{NewOrder, Order, OrderStatus};
use studio_core::repository::{OrderRepository, RepoError, RepoResult};
use studio_shared::Masked;
use uuid::Uuid;

pub struct StoreOrderRepository {
    pool: PgPool,
}

impl StoreOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const ORDER_COLUMNS: &str = "id, package_id, package_name, price, discord_name, email, status, paypal_order_id, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: Uuid,
    package_id: Option<Uuid>,
    package_name: String,
    price: f64,
    discord_name: String,
    email: String,
    status: String,
    paypal_order_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepoError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Order {
            id: row.id,
            package_id: row.package_id,
            package_name: row.package_name,
            price: row.price,
            discord_name: row.discord_name,
            email: Masked(row.email),
            status: OrderStatus::parse(&row.status)?,
            paypal_order_id: row.paypal_order_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl OrderRepository for StoreOrderRepository {
    async fn create_order(&self, order: &NewOrder) -> RepoResult<Order> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            INSERT INTO orders (package_id, package_name, price, discord_name, email, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            ORDER_COLUMNS
        ))
        .bind(order.package_id)
        .bind(&order.package_name)
        .bind(order.price)
        .bind(&order.discord_name)
        .bind(order.email.expose())
        .bind(OrderStatus::Pending.as_str())
        .fetch_one(&self.pool)
        .await?;

        let order = Order::try_from(row)?;
        tracing::info!("Order {} created for package '{}'", order.id, order.package_name);
        Ok(order)
    }

    async fn list_orders(&self) -> RepoResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {} FROM orders ORDER BY created_at DESC",
            ORDER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    async fn update_order_status(&self, id: Uuid, status: OrderStatus) -> RepoResult<Option<Order>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "UPDATE orders SET status = $1, updated_at = NOW() WHERE id = $2 RETURNING {}",
            ORDER_COLUMNS
        ))
        .bind(status.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    async fn delete_order(&self, id: Uuid) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
