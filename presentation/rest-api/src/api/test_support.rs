use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use uuid::Uuid;

use business::domain::cart::guest_store::GuestCartStore;
use business::domain::cart::model::{CartItem, CartLine};
use business::domain::cart::repository::CartRepository;
use business::domain::errors::RepositoryError;
use business::domain::order::model::Order;
use business::domain::order::repository::OrderRepository;
use business::domain::payment::repository::SettingsRepository;
use business::domain::product::model::{Product, ProductImage};
use business::domain::product::repository::ProductRepository;
use business::domain::shared::value_objects::{Money, UserId};
use local_store::InMemoryStore;
use logger::TracingLogger;

use crate::api::session::SessionFactory;
use crate::setup::dependency_injection::session_factory;

pub const SAREE_ID: &str = "0b0c8a52-6f0e-4a43-9a52-6d3c5f1f5a01";
pub const DUPATTA_ID: &str = "0b0c8a52-6f0e-4a43-9a52-6d3c5f1f5a02";

mock! {
    pub CartRepo {}

    #[async_trait]
    impl CartRepository for CartRepo {
        async fn get_lines(&self, user_id: &UserId) -> Result<Vec<CartLine>, RepositoryError>;
        async fn find_by_product_id(
            &self,
            user_id: &UserId,
            product_id: Uuid,
        ) -> Result<Option<CartItem>, RepositoryError>;
        async fn insert(&self, item: &CartItem) -> Result<(), RepositoryError>;
        async fn update_quantity(
            &self,
            id: Uuid,
            user_id: &UserId,
            quantity: u32,
        ) -> Result<(), RepositoryError>;
        async fn delete(&self, id: Uuid, user_id: &UserId) -> Result<(), RepositoryError>;
        async fn delete_all(&self, user_id: &UserId) -> Result<u64, RepositoryError>;
    }
}

mock! {
    pub SettingsRepo {}

    #[async_trait]
    impl SettingsRepository for SettingsRepo {
        async fn get_all(&self) -> Result<HashMap<String, String>, RepositoryError>;
    }
}

fn product(id: &str, name: &str, selling: i64, original: i64) -> Product {
    Product::from_repository(
        Uuid::parse_str(id).unwrap(),
        name.to_string(),
        None,
        Money::from_rupees(selling),
        Money::from_rupees(original),
        None,
        None,
        true,
        0,
        Utc::now(),
        Utc::now(),
    )
}

/// Two active products: a saree at ₹500 and a dupatta at ₹300.
pub struct StaticCatalog {
    products: Vec<Product>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self {
            products: vec![
                product(SAREE_ID, "Cotton Saree", 500, 800),
                product(DUPATTA_ID, "Silk Dupatta", 300, 300),
            ],
        }
    }
}

#[async_trait]
impl ProductRepository for StaticCatalog {
    async fn get_active(&self) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.products.clone())
    }

    async fn search_active(&self, query: &str) -> Result<Vec<Product>, RepositoryError> {
        let query = query.to_lowercase();
        Ok(self
            .products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&query))
            .cloned()
            .collect())
    }

    async fn get_featured(&self, limit: u32) -> Result<Vec<Product>, RepositoryError> {
        Ok(self.products.iter().take(limit as usize).cloned().collect())
    }

    async fn get_active_by_id(&self, id: Uuid) -> Result<Product, RepositoryError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, RepositoryError> {
        Ok(self
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn get_images(&self, _product_id: Uuid) -> Result<Vec<ProductImage>, RepositoryError> {
        Ok(Vec::new())
    }
}

#[derive(Default)]
pub struct RecordingOrderRepository {
    orders: Mutex<Vec<Order>>,
}

#[async_trait]
impl OrderRepository for RecordingOrderRepository {
    async fn create(&self, order: &Order) -> Result<(), RepositoryError> {
        self.orders.lock().unwrap().push(order.clone());
        Ok(())
    }

    async fn get_by_user(&self, _user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        Ok(self.orders.lock().unwrap().clone())
    }
}

/// Server cart that is always empty; enough for sign-in and sign-out.
fn empty_cart_repository() -> MockCartRepo {
    let mut repo = MockCartRepo::new();
    repo.expect_get_lines().returning(|_| Ok(Vec::new()));
    repo.expect_find_by_product_id().returning(|_, _| Ok(None));
    repo.expect_insert().returning(|_| Ok(()));
    repo.expect_delete_all().returning(|_| Ok(0));
    repo
}

pub fn test_factory() -> SessionFactory {
    let mut settings = MockSettingsRepo::new();
    settings.expect_get_all().returning(|| Ok(HashMap::new()));

    session_factory(
        Arc::new(StaticCatalog::new()),
        Arc::new(empty_cart_repository()),
        Arc::new(RecordingOrderRepository::default()),
        Arc::new(settings),
        Arc::new(GuestCartStore::new(Arc::new(InMemoryStore::new(
            local_store::DEFAULT_QUOTA_BYTES,
        )))),
        Duration::from_secs(5),
        Arc::new(TracingLogger),
    )
}
