use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::UserId;

use super::model::{CartItem, CartLine};

/// Server-persisted carts (`cart_items`), always scoped to one user.
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// The user's lines joined with their product snapshot, oldest first.
    async fn get_lines(&self, user_id: &UserId) -> Result<Vec<CartLine>, RepositoryError>;
    async fn find_by_product_id(
        &self,
        user_id: &UserId,
        product_id: Uuid,
    ) -> Result<Option<CartItem>, RepositoryError>;
    async fn insert(&self, item: &CartItem) -> Result<(), RepositoryError>;
    /// Fails with `NotFound` when no row matches `id` for this user.
    async fn update_quantity(
        &self,
        id: Uuid,
        user_id: &UserId,
        quantity: u32,
    ) -> Result<(), RepositoryError>;
    /// Fails with `NotFound` when no row matches `id` for this user.
    async fn delete(&self, id: Uuid, user_id: &UserId) -> Result<(), RepositoryError>;
    async fn delete_all(&self, user_id: &UserId) -> Result<u64, RepositoryError>;
}
