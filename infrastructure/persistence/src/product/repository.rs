use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::product::model::{Product, ProductImage};
use business::domain::product::repository::ProductRepository;

use super::entity::{PRODUCT_COLUMNS, ProductEntity, ProductImageEntity};

pub struct ProductRepositoryPostgres {
    pool: PgPool,
}

impl ProductRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Builds an `ILIKE` pattern matching `query` anywhere, with the pattern
/// metacharacters in `query` taken literally.
pub fn contains_pattern(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len() + 2);
    escaped.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl ProductRepository for ProductRepositoryPostgres {
    async fn get_active(&self) -> Result<Vec<Product>, RepositoryError> {
        let entities = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {} FROM products WHERE is_active ORDER BY created_at DESC",
            PRODUCT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn search_active(&self, query: &str) -> Result<Vec<Product>, RepositoryError> {
        let entities = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {} FROM products WHERE is_active AND name ILIKE $1 ORDER BY created_at DESC",
            PRODUCT_COLUMNS
        ))
        .bind(contains_pattern(query))
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn get_featured(&self, limit: u32) -> Result<Vec<Product>, RepositoryError> {
        let entities = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {} FROM products WHERE is_active ORDER BY display_order, created_at DESC LIMIT $1",
            PRODUCT_COLUMNS
        ))
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn get_active_by_id(&self, id: Uuid) -> Result<Product, RepositoryError> {
        let entity = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {} FROM products WHERE id = $1 AND is_active",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?
        .ok_or(RepositoryError::NotFound)?;

        Ok(entity.into_domain())
    }

    async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, RepositoryError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = sqlx::query_as::<_, ProductEntity>(&format!(
            "SELECT {} FROM products WHERE id = ANY($1)",
            PRODUCT_COLUMNS
        ))
        .bind(ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn get_images(&self, product_id: Uuid) -> Result<Vec<ProductImage>, RepositoryError> {
        let entities = sqlx::query_as::<_, ProductImageEntity>(
            "SELECT id, product_id, image_url, display_order FROM product_images WHERE product_id = $1 ORDER BY display_order",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }
}
