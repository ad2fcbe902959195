use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

/// Back-office key/value settings (`settings` table).
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get_all(&self) -> Result<HashMap<String, String>, RepositoryError>;
}
