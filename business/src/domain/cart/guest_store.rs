use std::sync::Arc;

use async_trait::async_trait;

use super::model::GuestCartEntry;
use crate::domain::shared::value_objects::GuestSessionId;

/// Well-known key the guest cart lives under, namespaced per session.
pub const GUEST_CART_KEY: &str = "guest_cart";

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store.quota_exceeded")]
    QuotaExceeded,
    #[error("store.unavailable")]
    Unavailable,
}

/// Client-local string storage (the browser storage analogue).
///
/// Values are read, written and removed as a whole.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Guest cart persistence on top of a [`KeyValueStore`].
///
/// The cart is one JSON list of `{id, product_id, quantity}`. Unreadable
/// content reads as an empty cart.
pub struct GuestCartStore {
    store: Arc<dyn KeyValueStore>,
}

impl GuestCartStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn key(session: &GuestSessionId) -> String {
        format!("{}:{}", GUEST_CART_KEY, session)
    }

    pub async fn load(&self, session: &GuestSessionId) -> Result<Vec<GuestCartEntry>, StoreError> {
        let Some(raw) = self.store.get(&Self::key(session)).await? else {
            return Ok(Vec::new());
        };
        let entries: Vec<GuestCartEntry> = serde_json::from_str(&raw).unwrap_or_default();
        Ok(normalize(entries))
    }

    pub async fn save(
        &self,
        session: &GuestSessionId,
        entries: &[GuestCartEntry],
    ) -> Result<(), StoreError> {
        let raw = serde_json::to_string(entries).map_err(|_| StoreError::Unavailable)?;
        self.store.set(&Self::key(session), &raw).await
    }

    pub async fn clear(&self, session: &GuestSessionId) -> Result<(), StoreError> {
        self.store.remove(&Self::key(session)).await
    }
}

/// Drops empty entries and folds duplicate products into the first entry.
fn normalize(entries: Vec<GuestCartEntry>) -> Vec<GuestCartEntry> {
    let mut normalized: Vec<GuestCartEntry> = Vec::with_capacity(entries.len());
    for entry in entries.into_iter().filter(|e| e.quantity > 0) {
        match normalized
            .iter_mut()
            .find(|e| e.product_id == entry.product_id)
        {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(entry.quantity),
            None => normalized.push(entry),
        }
    }
    normalized
}
