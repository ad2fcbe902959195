use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use business::domain::cart::model::{CartItem, CartLine};
use business::domain::cart::repository::CartRepository;
use business::domain::errors::RepositoryError;
use business::domain::shared::value_objects::UserId;

use super::entity::{CartItemEntity, CartLineEntity};

pub struct CartRepositoryPostgres {
    pool: PgPool,
}

impl CartRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn quantity_to_db(quantity: u32) -> Result<i32, RepositoryError> {
    i32::try_from(quantity).map_err(|_| RepositoryError::Persistence)
}

#[async_trait]
impl CartRepository for CartRepositoryPostgres {
    async fn get_lines(&self, user_id: &UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let entities = sqlx::query_as::<_, CartLineEntity>(
            r#"SELECT c.id, c.product_id, c.quantity, p.name, p.selling_price, p.original_price, p.image_url
            FROM cart_items c
            JOIN products p ON p.id = c.product_id
            WHERE c.user_id = $1
            ORDER BY c.created_at"#,
        )
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn find_by_product_id(
        &self,
        user_id: &UserId,
        product_id: Uuid,
    ) -> Result<Option<CartItem>, RepositoryError> {
        let entity = sqlx::query_as::<_, CartItemEntity>(
            "SELECT id, user_id, product_id, quantity, created_at FROM cart_items WHERE user_id = $1 AND product_id = $2",
        )
        .bind(user_id.as_str())
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entity.map(|e| e.into_domain()))
    }

    async fn insert(&self, item: &CartItem) -> Result<(), RepositoryError> {
        // A concurrent insert for the same product adds up instead of failing.
        sqlx::query(
            r#"INSERT INTO cart_items (id, user_id, product_id, quantity, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id, product_id) DO UPDATE SET
                quantity = cart_items.quantity + EXCLUDED.quantity"#,
        )
        .bind(item.id)
        .bind(item.user_id.as_str())
        .bind(item.product_id)
        .bind(quantity_to_db(item.quantity)?)
        .bind(item.created_at)
        .execute(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(())
    }

    async fn update_quantity(
        &self,
        id: Uuid,
        user_id: &UserId,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE cart_items SET quantity = $1 WHERE id = $2 AND user_id = $3")
            .bind(quantity_to_db(quantity)?)
            .bind(id)
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete(&self, id: Uuid, user_id: &UserId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_all(&self, user_id: &UserId) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
            .bind(user_id.as_str())
            .execute(&self.pool)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(result.rows_affected())
    }
}
