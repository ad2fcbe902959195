use async_trait::async_trait;
use sqlx::PgPool;

use business::domain::category::model::Category;
use business::domain::category::repository::CategoryRepository;
use business::domain::errors::RepositoryError;

use super::entity::CategoryEntity;

pub struct CategoryRepositoryPostgres {
    pool: PgPool,
}

impl CategoryRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for CategoryRepositoryPostgres {
    async fn get_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let entities = sqlx::query_as::<_, CategoryEntity>(
            "SELECT id, name, slug, image_url FROM categories ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }
}
