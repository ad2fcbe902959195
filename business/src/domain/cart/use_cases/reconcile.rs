use async_trait::async_trait;

use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::ReconcileSummary;
use crate::domain::shared::value_objects::{GuestSessionId, UserId};

pub struct ReconcileGuestCartParams {
    pub user_id: UserId,
    pub guest_session: GuestSessionId,
}

/// Folds the guest cart into the user's server cart on sign-in.
///
/// Entries are applied one at a time: an existing line for the product gets
/// the guest quantity added, otherwise a new line is inserted. The guest cart
/// is cleared only after every entry was applied. On failure it is left in
/// place and already-applied entries stay merged.
#[async_trait]
pub trait ReconcileGuestCartUseCase: Send + Sync {
    async fn execute(
        &self,
        params: ReconcileGuestCartParams,
    ) -> Result<ReconcileSummary, CartError>;
}
