use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use uuid::Uuid;

use crate::application::cart::add_item::AddCartItemUseCaseImpl;
use crate::application::cart::clear::ClearCartUseCaseImpl;
use crate::application::cart::get::GetCartUseCaseImpl;
use crate::application::cart::reconcile::ReconcileGuestCartUseCaseImpl;
use crate::application::cart::remove_item::RemoveCartItemUseCaseImpl;
use crate::application::cart::session::CartUseCases;
use crate::application::cart::update_quantity::UpdateCartItemQuantityUseCaseImpl;
use crate::domain::cart::guest_store::{GuestCartStore, KeyValueStore, StoreError};
use crate::domain::cart::model::{CartItem, CartLine, ProductSnapshot};
use crate::domain::cart::repository::CartRepository;
use crate::domain::category::model::Category;
use crate::domain::category::repository::CategoryRepository;
use crate::domain::checkout::address::AddressForm;
use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::order::model::{Order, OrderOwner};
use crate::domain::order::repository::OrderRepository;
use crate::domain::payment::repository::SettingsRepository;
use crate::domain::product::model::{Product, ProductImage};
use crate::domain::product::repository::ProductRepository;
use crate::domain::shared::value_objects::{Money, UserId};

mock! {
    pub Log {}

    impl Logger for Log {
        fn info(&self, message: &str);
        fn warn(&self, message: &str);
        fn error(&self, message: &str);
        fn debug(&self, message: &str);
    }
}

mock! {
    pub ProductRepo {}

    #[async_trait]
    impl ProductRepository for ProductRepo {
        async fn get_active(&self) -> Result<Vec<Product>, RepositoryError>;
        async fn search_active(&self, query: &str) -> Result<Vec<Product>, RepositoryError>;
        async fn get_featured(&self, limit: u32) -> Result<Vec<Product>, RepositoryError>;
        async fn get_active_by_id(&self, id: Uuid) -> Result<Product, RepositoryError>;
        async fn get_by_ids(&self, ids: &[Uuid]) -> Result<Vec<Product>, RepositoryError>;
        async fn get_images(&self, product_id: Uuid) -> Result<Vec<ProductImage>, RepositoryError>;
    }
}

mock! {
    pub CategoryRepo {}

    #[async_trait]
    impl CategoryRepository for CategoryRepo {
        async fn get_all(&self) -> Result<Vec<Category>, RepositoryError>;
    }
}

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
    pub OrderRepo {}

    #[async_trait]
    impl OrderRepository for OrderRepo {
        async fn create(&self, order: &Order) -> Result<(), RepositoryError>;
        async fn get_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError>;
    }
}

mock! {
    pub SettingsRepo {}

    #[async_trait]
    impl SettingsRepository for SettingsRepo {
        async fn get_all(&self) -> Result<HashMap<String, String>, RepositoryError>;
    }
}

pub fn mock_logger() -> Arc<dyn Logger> {
    let mut logger = MockLog::new();
    logger.expect_info().returning(|_| ());
    logger.expect_warn().returning(|_| ());
    logger.expect_error().returning(|_| ());
    logger.expect_debug().returning(|_| ());
    Arc::new(logger)
}

pub fn product(name: &str, selling: i64, original: i64) -> Product {
    let now = Utc::now();
    Product::from_repository(
        Uuid::new_v4(),
        name.to_string(),
        None,
        Money::from_rupees(selling),
        Money::from_rupees(original),
        Some(format!("https://cdn.example.com/{}.jpg", name.to_lowercase())),
        None,
        true,
        0,
        now,
        now,
    )
}

pub fn filled_address() -> AddressForm {
    AddressForm {
        full_name: "Asha Rao".to_string(),
        email: "asha@example.com".to_string(),
        phone: "9876543210".to_string(),
        pincode: "530001".to_string(),
        city: "Visakhapatnam".to_string(),
        house_no: "12-4".to_string(),
        road_name: "Beach Road".to_string(),
        ..AddressForm::default()
    }
}

/// Key/value store held in memory, with an optional byte quota per value.
#[derive(Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            values: Mutex::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }

    pub fn put_raw(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.quota.is_some_and(|quota| value.len() > quota) {
            return Err(StoreError::QuotaExceeded);
        }
        self.put_raw(key, value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.values.lock().unwrap().remove(key);
        Ok(())
    }
}

/// Catalog served from a fixed list of products.
pub struct FakeCatalog {
    products: Vec<Product>,
}

impl FakeCatalog {
    pub fn new(products: Vec<Product>) -> Self {
        Self { products }
    }
}

#[async_trait]
impl ProductRepository for FakeCatalog {
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
            .find(|p| p.id == id && p.is_active)
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

/// Server cart kept in memory and joined against a fixed catalog.
pub struct FakeCartRepository {
    catalog: Vec<Product>,
    items: Mutex<Vec<CartItem>>,
}

impl FakeCartRepository {
    pub fn new(catalog: Vec<Product>) -> Self {
        Self {
            catalog,
            items: Mutex::new(Vec::new()),
        }
    }

    pub fn seed(&self, user_id: &UserId, product_id: Uuid, quantity: u32) -> Uuid {
        let item = CartItem::new(user_id.clone(), product_id, quantity).unwrap();
        let id = item.id;
        self.items.lock().unwrap().push(item);
        id
    }

    /// `(product_id, quantity)` per row of the user, oldest first.
    pub fn quantities(&self, user_id: &UserId) -> Vec<(Uuid, u32)> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| &i.user_id == user_id)
            .map(|i| (i.product_id, i.quantity))
            .collect()
    }
}

#[async_trait]
impl CartRepository for FakeCartRepository {
    async fn get_lines(&self, user_id: &UserId) -> Result<Vec<CartLine>, RepositoryError> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .filter(|i| &i.user_id == user_id)
            .filter_map(|i| {
                let product = self.catalog.iter().find(|p| p.id == i.product_id)?;
                Some(CartLine {
                    id: i.id,
                    product_id: i.product_id,
                    quantity: i.quantity,
                    product: ProductSnapshot::from(product),
                })
            })
            .collect())
    }

    async fn find_by_product_id(
        &self,
        user_id: &UserId,
        product_id: Uuid,
    ) -> Result<Option<CartItem>, RepositoryError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .find(|i| &i.user_id == user_id && i.product_id == product_id)
            .cloned())
    }

    async fn insert(&self, item: &CartItem) -> Result<(), RepositoryError> {
        self.items.lock().unwrap().push(item.clone());
        Ok(())
    }

    async fn update_quantity(
        &self,
        id: Uuid,
        user_id: &UserId,
        quantity: u32,
    ) -> Result<(), RepositoryError> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == id && &i.user_id == user_id)
            .ok_or(RepositoryError::NotFound)?;
        item.quantity = quantity;
        Ok(())
    }

    async fn delete(&self, id: Uuid, user_id: &UserId) -> Result<(), RepositoryError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| !(i.id == id && &i.user_id == user_id));
        if items.len() == before {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_all(&self, user_id: &UserId) -> Result<u64, RepositoryError> {
        let mut items = self.items.lock().unwrap();
        let before = items.len();
        items.retain(|i| &i.user_id != user_id);
        Ok((before - items.len()) as u64)
    }
}

#[derive(Default)]
pub struct FakeOrderRepository {
    orders: Mutex<Vec<Order>>,
}

impl FakeOrderRepository {
    pub fn orders(&self) -> Vec<Order> {
        self.orders.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderRepository for FakeOrderRepository {
    async fn create(&self, order: &Order) -> Result<(), RepositoryError> {
        self.orders.lock().unwrap().push(order.clone());
        Ok(())
    }

    async fn get_by_user(&self, user_id: &UserId) -> Result<Vec<Order>, RepositoryError> {
        let mut orders: Vec<Order> = self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| matches!(&o.owner, OrderOwner::User(id) if id == user_id))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}

/// Wires the real cart use cases over the given fakes.
pub fn cart_use_cases(
    catalog: Vec<Product>,
    repository: Arc<dyn CartRepository>,
    guest_store: Arc<GuestCartStore>,
) -> CartUseCases {
    let catalog: Arc<dyn ProductRepository> = Arc::new(FakeCatalog::new(catalog));
    let get = Arc::new(GetCartUseCaseImpl {
        repository: repository.clone(),
        product_repository: catalog.clone(),
        guest_store: guest_store.clone(),
        logger: mock_logger(),
    });
    let remove_item = Arc::new(RemoveCartItemUseCaseImpl {
        repository: repository.clone(),
        guest_store: guest_store.clone(),
        get_cart: get.clone(),
        logger: mock_logger(),
    });
    CartUseCases {
        get: get.clone(),
        add_item: Arc::new(AddCartItemUseCaseImpl {
            repository: repository.clone(),
            product_repository: catalog.clone(),
            guest_store: guest_store.clone(),
            get_cart: get.clone(),
            logger: mock_logger(),
        }),
        remove_item: remove_item.clone(),
        update_quantity: Arc::new(UpdateCartItemQuantityUseCaseImpl {
            repository: repository.clone(),
            guest_store: guest_store.clone(),
            get_cart: get,
            remove_item,
            logger: mock_logger(),
        }),
        clear: Arc::new(ClearCartUseCaseImpl {
            repository: repository.clone(),
            guest_store: guest_store.clone(),
            logger: mock_logger(),
        }),
        reconcile: Arc::new(ReconcileGuestCartUseCaseImpl {
            repository,
            product_repository: catalog,
            guest_store,
            logger: mock_logger(),
        }),
    }
}
