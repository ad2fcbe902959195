use std::sync::Arc;

use logger::TracingLogger;
use persistence::cart::repository::CartRepositoryPostgres;
use persistence::category::repository::CategoryRepositoryPostgres;
use persistence::order::repository::OrderRepositoryPostgres;
use persistence::product::repository::ProductRepositoryPostgres;
use persistence::settings::repository::SettingsRepositoryPostgres;

use local_store::{InMemoryStore, JsonFileStore};

use business::application::cart::add_item::AddCartItemUseCaseImpl;
use business::application::cart::clear::ClearCartUseCaseImpl;
use business::application::cart::get::GetCartUseCaseImpl;
use business::application::cart::reconcile::ReconcileGuestCartUseCaseImpl;
use business::application::cart::remove_item::RemoveCartItemUseCaseImpl;
use business::application::cart::session::CartUseCases;
use business::application::cart::update_quantity::UpdateCartItemQuantityUseCaseImpl;
use business::application::category::get_all::GetAllCategoriesUseCaseImpl;
use business::application::order::get_history::GetOrderHistoryUseCaseImpl;
use business::application::order::submit::SubmitOrderUseCaseImpl;
use business::application::payment::get_options::GetPaymentOptionsUseCaseImpl;
use business::application::product::get_all::GetAllProductsUseCaseImpl;
use business::application::product::get_by_id::GetProductByIdUseCaseImpl;
use business::application::product::get_home::GetHomeFeedUseCaseImpl;
use business::domain::cart::guest_store::{GuestCartStore, KeyValueStore};
use business::domain::cart::repository::CartRepository;
use business::domain::logger::Logger;
use business::domain::order::repository::OrderRepository;
use business::domain::payment::repository::SettingsRepository;
use business::domain::product::repository::ProductRepository;

use crate::api::session::{SessionFactory, SessionRegistry};
use crate::config::app_config::AppConfig;
use crate::config::auth_config::AuthConfig;
use crate::config::storage_config::StorageConfig;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub catalog_api: crate::api::catalog::routes::CatalogApi,
    pub cart_api: crate::api::cart::routes::CartApi,
    pub checkout_api: crate::api::checkout::routes::CheckoutApi,
    pub order_api: crate::api::order::routes::OrderApi,
    pub auth: AuthConfig,
}

impl DependencyContainer {
    pub async fn new(pool: sqlx::PgPool, config: &AppConfig) -> anyhow::Result<Self> {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
        let health_api = crate::api::health::routes::Api::new();

        // Infrastructure adapters
        let product_repository = Arc::new(ProductRepositoryPostgres::new(pool.clone()));
        let category_repository = Arc::new(CategoryRepositoryPostgres::new(pool.clone()));
        let cart_repository = Arc::new(CartRepositoryPostgres::new(pool.clone()));
        let order_repository = Arc::new(OrderRepositoryPostgres::new(pool.clone()));
        let settings_repository = Arc::new(SettingsRepositoryPostgres::new(pool));
        let guest_store = Arc::new(GuestCartStore::new(
            open_guest_store(&config.storage).await?,
        ));

        // Catalog use cases
        let get_home_use_case = Arc::new(GetHomeFeedUseCaseImpl {
            product_repository: product_repository.clone(),
            category_repository: category_repository.clone(),
            logger: logger.clone(),
        });
        let get_all_use_case = Arc::new(GetAllProductsUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let get_by_id_use_case = Arc::new(GetProductByIdUseCaseImpl {
            repository: product_repository.clone(),
            logger: logger.clone(),
        });
        let get_categories_use_case = Arc::new(GetAllCategoriesUseCaseImpl {
            repository: category_repository,
            logger: logger.clone(),
        });

        // Order use cases
        let get_history_use_case = Arc::new(GetOrderHistoryUseCaseImpl {
            repository: order_repository.clone(),
            logger: logger.clone(),
        });

        let factory = session_factory(
            product_repository,
            cart_repository,
            order_repository,
            settings_repository,
            guest_store,
            config.gateway.timeout,
            logger,
        );
        let registry = Arc::new(SessionRegistry::new(factory, config.auth.clone()));

        let catalog_api = crate::api::catalog::routes::CatalogApi::new(
            get_home_use_case,
            get_all_use_case,
            get_by_id_use_case,
            get_categories_use_case,
        );
        let cart_api = crate::api::cart::routes::CartApi::new(registry.clone());
        let checkout_api = crate::api::checkout::routes::CheckoutApi::new(registry);
        let order_api = crate::api::order::routes::OrderApi::new(get_history_use_case);

        Ok(Self {
            health_api,
            catalog_api,
            cart_api,
            checkout_api,
            order_api,
            auth: config.auth.clone(),
        })
    }
}

async fn open_guest_store(config: &StorageConfig) -> anyhow::Result<Arc<dyn KeyValueStore>> {
    match &config.dir {
        Some(dir) => {
            let store = JsonFileStore::open(dir, config.quota_bytes).await?;
            tracing::info!("Guest carts stored under {}", store.dir().display());
            Ok(Arc::new(store))
        }
        None => {
            tracing::info!("Guest carts kept in memory");
            Ok(Arc::new(InMemoryStore::new(config.quota_bytes)))
        }
    }
}

/// Wires the cart use cases a [`CartSession`](business::application::cart::session::CartSession) drives.
pub fn cart_use_cases(
    product_repository: Arc<dyn ProductRepository>,
    cart_repository: Arc<dyn CartRepository>,
    guest_store: Arc<GuestCartStore>,
    logger: Arc<dyn Logger>,
) -> CartUseCases {
    let get = Arc::new(GetCartUseCaseImpl {
        repository: cart_repository.clone(),
        product_repository: product_repository.clone(),
        guest_store: guest_store.clone(),
        logger: logger.clone(),
    });
    let remove_item = Arc::new(RemoveCartItemUseCaseImpl {
        repository: cart_repository.clone(),
        guest_store: guest_store.clone(),
        get_cart: get.clone(),
        logger: logger.clone(),
    });
    let add_item = Arc::new(AddCartItemUseCaseImpl {
        repository: cart_repository.clone(),
        product_repository: product_repository.clone(),
        guest_store: guest_store.clone(),
        get_cart: get.clone(),
        logger: logger.clone(),
    });
    let update_quantity = Arc::new(UpdateCartItemQuantityUseCaseImpl {
        repository: cart_repository.clone(),
        guest_store: guest_store.clone(),
        get_cart: get.clone(),
        remove_item: remove_item.clone(),
        logger: logger.clone(),
    });
    let clear = Arc::new(ClearCartUseCaseImpl {
        repository: cart_repository.clone(),
        guest_store: guest_store.clone(),
        logger: logger.clone(),
    });
    let reconcile = Arc::new(ReconcileGuestCartUseCaseImpl {
        repository: cart_repository,
        product_repository,
        guest_store,
        logger,
    });

    CartUseCases {
        get,
        add_item,
        remove_item,
        update_quantity,
        clear,
        reconcile,
    }
}

pub fn session_factory(
    product_repository: Arc<dyn ProductRepository>,
    cart_repository: Arc<dyn CartRepository>,
    order_repository: Arc<dyn OrderRepository>,
    settings_repository: Arc<dyn SettingsRepository>,
    guest_store: Arc<GuestCartStore>,
    timeout: std::time::Duration,
    logger: Arc<dyn Logger>,
) -> SessionFactory {
    let cart_use_cases = cart_use_cases(
        product_repository,
        cart_repository,
        guest_store.clone(),
        logger.clone(),
    );
    let submit_order = Arc::new(SubmitOrderUseCaseImpl {
        repository: order_repository,
        clear_cart: cart_use_cases.clear.clone(),
        logger: logger.clone(),
    });
    let payment_options = Arc::new(GetPaymentOptionsUseCaseImpl {
        settings_repository,
        logger: logger.clone(),
    });

    SessionFactory {
        cart_use_cases,
        guest_store,
        submit_order,
        payment_options,
        timeout,
        logger,
    }
}
