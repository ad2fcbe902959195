use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::order::model::{Order, OrderLine, OrderOwner};
use business::domain::order::repository::OrderRepository;
use business::domain::shared::value_objects::UserId;

use super::entity::{OrderEntity, OrderItemEntity};

pub struct OrderRepositoryPostgres {
    pool: PgPool,
}

impl OrderRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for OrderRepositoryPostgres {
    /// Order and lines are written in one transaction; a failed line insert
    /// rolls the order back as well.
    async fn create(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        let (user_id, guest_email, guest_phone) = match &order.owner {
            OrderOwner::User(user_id) => (Some(user_id.as_str()), None, None),
            OrderOwner::Guest { email, phone } => (None, Some(email.as_str()), Some(phone.as_str())),
        };

        sqlx::query(
            r#"INSERT INTO orders (id, user_id, guest_email, guest_phone, total_amount, shipping_address, status, payment_status, payment_reference, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)"#,
        )
        .bind(order.id)
        .bind(user_id)
        .bind(guest_email)
        .bind(guest_phone)
        .bind(order.total_amount.amount())
        .bind(&order.shipping_address)
        .bind(order.status.to_string())
        .bind(order.payment_status.to_string())
        .bind(&order.payment_reference)
        .bind(order.created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            tracing::error!("Failed to insert order {}: {}", order.id, e);
            RepositoryError::DatabaseError
        })?;

        for line in &order.lines {
            let quantity = i32::try_from(line.quantity).map_err(|_| RepositoryError::Persistence)?;
            sqlx::query(
                r#"INSERT INTO order_items (id, order_id, product_id, product_name, quantity, price)
                VALUES ($1, $2, $3, $4, $5, $6)"#,
            )
            .bind(line.id)
            .bind(line.order_id)
            .bind(line.product_id)
            .bind(&line.product_name)
            .bind(quantity)
            .bind(line.unit_price.amount())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                tracing::error!("Failed to insert line of order {}: {}", order.id, e);
                RepositoryError::DatabaseError
            })?;
        }

        tx.commit()
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(())
    }

    async fn get_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        let orders = sqlx::query_as::<_, OrderEntity>(
            r#"SELECT id, user_id, guest_email, guest_phone, total_amount, shipping_address, status, payment_status, payment_reference, created_at
            FROM orders WHERE user_id = $1 ORDER BY created_at DESC"#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let order_ids: Vec<Uuid> = orders.iter().map(|o| o.id).collect();
        let items = sqlx::query_as::<_, OrderItemEntity>(
            "SELECT id, order_id, product_id, product_name, quantity, price FROM order_items WHERE order_id = ANY($1)",
        )
        .bind(&order_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        let mut lines_by_order: HashMap<Uuid, Vec<OrderLine>> = HashMap::new();
        for item in items {
            lines_by_order
                .entry(item.order_id)
                .or_default()
                .push(item.into_domain());
        }

        Ok(orders
            .into_iter()
            .map(|o| {
                let lines = lines_by_order.remove(&o.id).unwrap_or_default();
                o.into_domain(lines)
            })
            .collect())
    }
}
