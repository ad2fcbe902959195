use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use business::domain::errors::RepositoryError;
use business::domain::payment::repository::SettingsRepository;

use super::entity::SettingEntity;

pub struct SettingsRepositoryPostgres {
    pool: PgPool,
}

impl SettingsRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SettingsRepository for SettingsRepositoryPostgres {
    async fn get_all(&self) -> Result<HashMap<String, String>, RepositoryError> {
        let entities = sqlx::query_as::<_, SettingEntity>("SELECT key, value FROM settings")
            .fetch_all(&self.pool)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entities.into_iter().map(|e| (e.key, e.value)).collect())
    }
}
