use async_trait::async_trait;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::UserId;

use super::model::Order;

#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Writes the order row and then one row per line.
    ///
    /// Adapters should make the two writes atomic. One that cannot may leave
    /// an order without lines when the second write fails; no compensating
    /// delete is issued.
    async fn create(&self, order: &Order) -> Result<(), RepositoryError>;
    /// A signed-in user's orders with their lines, newest first.
    async fn get_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError>;
}
