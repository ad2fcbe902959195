use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, watch};
use uuid::Uuid;

use crate::application::shared::deadline::with_deadline;
use crate::domain::cart::errors::CartError;
use crate::domain::cart::model::{Cart, CartOwner};
use crate::domain::cart::use_cases::add_item::{AddCartItemParams, AddCartItemUseCase};
use crate::domain::cart::use_cases::clear::{ClearCartParams, ClearCartUseCase};
use crate::domain::cart::use_cases::get::{GetCartParams, GetCartUseCase};
use crate::domain::cart::use_cases::reconcile::{
    ReconcileGuestCartParams, ReconcileGuestCartUseCase,
};
use crate::domain::cart::use_cases::remove_item::{RemoveCartItemParams, RemoveCartItemUseCase};
use crate::domain::cart::use_cases::update_quantity::{
    UpdateCartItemQuantityParams, UpdateCartItemQuantityUseCase,
};
use crate::domain::logger::Logger;
use crate::domain::shared::value_objects::{GuestSessionId, UserId};

/// The cart use cases a session drives. Shared by every session.
#[derive(Clone)]
pub struct CartUseCases {
    pub get: Arc<dyn GetCartUseCase>,
    pub add_item: Arc<dyn AddCartItemUseCase>,
    pub remove_item: Arc<dyn RemoveCartItemUseCase>,
    pub update_quantity: Arc<dyn UpdateCartItemQuantityUseCase>,
    pub clear: Arc<dyn ClearCartUseCase>,
    pub reconcile: Arc<dyn ReconcileGuestCartUseCase>,
}

/// Cart state of one client session.
///
/// Holds who is shopping and the last cart snapshot. Every operation takes the
/// session lock, so fetch, mutate and refetch never interleave for the same
/// session. Snapshots are published on a watch channel after each successful
/// operation.
pub struct CartSession {
    guest_session: GuestSessionId,
    identity: Mutex<Option<UserId>>,
    loading: AtomicBool,
    snapshot: watch::Sender<Cart>,
    use_cases: CartUseCases,
    timeout: Duration,
    logger: Arc<dyn Logger>,
}

struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

fn owner_of(guest_session: &GuestSessionId, identity: &Option<UserId>) -> CartOwner {
    match identity {
        Some(user_id) => CartOwner::User(user_id.clone()),
        None => CartOwner::Guest(guest_session.clone()),
    }
}

impl CartSession {
    pub fn new(
        guest_session: GuestSessionId,
        use_cases: CartUseCases,
        timeout: Duration,
        logger: Arc<dyn Logger>,
    ) -> Self {
        let (snapshot, _) = watch::channel(Cart::empty());
        Self {
            guest_session,
            identity: Mutex::new(None),
            loading: AtomicBool::new(false),
            snapshot,
            use_cases,
            timeout,
            logger,
        }
    }

    pub fn guest_session(&self) -> &GuestSessionId {
        &self.guest_session
    }

    pub async fn identity(&self) -> Option<UserId> {
        self.identity.lock().await.clone()
    }

    /// Last published snapshot. Totals are derived from it on read.
    pub fn cart(&self) -> Cart {
        self.snapshot.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.snapshot.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    pub async fn refresh(&self) -> Result<Cart, CartError> {
        let identity = self.identity.lock().await;
        self.fetch(owner_of(&self.guest_session, &identity)).await
    }

    /// Fresh cart paired with the owner it was read for. Both come from the
    /// same lock, so a concurrent sign-in cannot split them.
    pub async fn refresh_with_owner(&self) -> Result<(Cart, CartOwner), CartError> {
        let identity = self.identity.lock().await;
        let owner = owner_of(&self.guest_session, &identity);
        let cart = self.fetch(owner.clone()).await?;
        Ok((cart, owner))
    }

    /// Switches the session to `user_id`.
    ///
    /// Coming from a guest session, the guest cart is reconciled into the
    /// user's server cart before the first server fetch. When reconciliation
    /// fails the session stays a guest session, so the next sign-in retries.
    pub async fn sign_in(&self, user_id: UserId) -> Result<Cart, CartError> {
        let mut identity = self.identity.lock().await;
        if identity.as_ref() == Some(&user_id) {
            return self.fetch(CartOwner::User(user_id)).await;
        }

        if identity.is_none() {
            let _loading = LoadingGuard::raise(&self.loading);
            let summary = with_deadline(
                self.timeout,
                self.use_cases.reconcile.execute(ReconcileGuestCartParams {
                    user_id: user_id.clone(),
                    guest_session: self.guest_session.clone(),
                }),
            )
            .await
            .inspect_err(|e| {
                self.logger.error(&format!(
                    "Sign-in of {} on session {} kept as guest, reconciliation failed: {}",
                    user_id, self.guest_session, e
                ))
            })?;
            self.logger.debug(&format!(
                "Session {} reconciled: {} merged, {} inserted",
                self.guest_session, summary.merged, summary.inserted
            ));
        }

        self.logger.info(&format!(
            "Session {} signed in as {}",
            self.guest_session, user_id
        ));
        *identity = Some(user_id.clone());
        self.fetch(CartOwner::User(user_id)).await
    }

    pub async fn sign_out(&self) -> Result<Cart, CartError> {
        let mut identity = self.identity.lock().await;
        if let Some(user_id) = identity.take() {
            self.logger.info(&format!(
                "Session {} signed out from {}",
                self.guest_session, user_id
            ));
        }
        self.fetch(CartOwner::Guest(self.guest_session.clone()))
            .await
    }

    pub async fn add_item(&self, product_id: Uuid, quantity: u32) -> Result<Cart, CartError> {
        let identity = self.identity.lock().await;
        let params = AddCartItemParams {
            owner: owner_of(&self.guest_session, &identity),
            product_id,
            quantity,
        };
        let cart = with_deadline(self.timeout, self.use_cases.add_item.execute(params)).await?;
        Ok(self.publish(cart))
    }

    pub async fn remove_item(&self, line_id: Uuid) -> Result<Cart, CartError> {
        let identity = self.identity.lock().await;
        let params = RemoveCartItemParams {
            owner: owner_of(&self.guest_session, &identity),
            line_id,
        };
        let cart = with_deadline(self.timeout, self.use_cases.remove_item.execute(params)).await?;
        Ok(self.publish(cart))
    }

    pub async fn update_quantity(&self, line_id: Uuid, quantity: i64) -> Result<Cart, CartError> {
        let identity = self.identity.lock().await;
        let params = UpdateCartItemQuantityParams {
            owner: owner_of(&self.guest_session, &identity),
            line_id,
            quantity,
        };
        let cart = with_deadline(self.timeout, self.use_cases.update_quantity.execute(params))
            .await?;
        Ok(self.publish(cart))
    }

    pub async fn clear(&self) -> Result<Cart, CartError> {
        let identity = self.identity.lock().await;
        let params = ClearCartParams {
            owner: owner_of(&self.guest_session, &identity),
        };
        with_deadline(self.timeout, self.use_cases.clear.execute(params)).await?;
        Ok(self.publish(Cart::empty()))
    }

    async fn fetch(&self, owner: CartOwner) -> Result<Cart, CartError> {
        let _loading = LoadingGuard::raise(&self.loading);
        let cart = with_deadline(
            self.timeout,
            self.use_cases.get.execute(GetCartParams { owner }),
        )
        .await?;
        Ok(self.publish(cart))
    }

    fn publish(&self, cart: Cart) -> Cart {
        self.snapshot.send_replace(cart.clone());
        cart
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{FakeCartRepository, MemoryStore, cart_use_cases, product};
    use crate::application::test_support::mock_logger;
    use crate::domain::cart::guest_store::GuestCartStore;
    use crate::domain::cart::model::GuestCartEntry;
    use crate::domain::product::model::Product;
    use crate::domain::shared::value_objects::Money;

    struct Fixture {
        session: CartSession,
        repository: Arc<FakeCartRepository>,
        guest_store: Arc<GuestCartStore>,
    }

    fn fixture(catalog: Vec<Product>) -> Fixture {
        let repository = Arc::new(FakeCartRepository::new(catalog.clone()));
        let guest_store = Arc::new(GuestCartStore::new(Arc::new(MemoryStore::default())));
        let use_cases = cart_use_cases(catalog, repository.clone(), guest_store.clone());
        Fixture {
            session: CartSession::new(
                GuestSessionId::new("tab-1"),
                use_cases,
                Duration::from_secs(5),
                mock_logger(),
            ),
            repository,
            guest_store,
        }
    }

    #[tokio::test]
    async fn should_recompute_totals_after_each_guest_mutation() {
        let kettle = product("Kettle", 500, 800);
        let mug = product("Mug", 300, 450);
        let f = fixture(vec![kettle.clone(), mug.clone()]);

        f.session.add_item(kettle.id, 1).await.unwrap();
        let cart = f.session.add_item(mug.id, 2).await.unwrap();
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_amount(), Money::from_rupees(1100));

        let mug_line = cart.line_for_product(mug.id).unwrap().id;
        let cart = f.session.update_quantity(mug_line, 1).await.unwrap();
        assert_eq!(cart.total_items(), 2);
        assert_eq!(cart.total_amount(), Money::from_rupees(800));
        assert_eq!(f.session.cart(), cart);
    }

    #[tokio::test]
    async fn should_pair_cart_with_owner_it_was_read_for() {
        let kettle = product("Kettle", 500, 800);
        let f = fixture(vec![kettle.clone()]);
        f.session.add_item(kettle.id, 1).await.unwrap();

        let (cart, owner) = f.session.refresh_with_owner().await.unwrap();
        assert_eq!(owner, CartOwner::Guest(GuestSessionId::new("tab-1")));
        assert_eq!(cart.total_items(), 1);

        let user_id = UserId::new("u-1");
        f.session.sign_in(user_id.clone()).await.unwrap();
        let (cart, owner) = f.session.refresh_with_owner().await.unwrap();
        assert_eq!(owner, CartOwner::User(user_id.clone()));
        assert_eq!(f.repository.quantities(&user_id), vec![(kettle.id, 1)]);
        assert_eq!(cart.total_items(), 1);
    }

    #[tokio::test]
    async fn should_sign_in_when_guest_cart_holds_a_deleted_product() {
        let kettle = product("Kettle", 500, 800);
        let f = fixture(vec![kettle.clone()]);
        f.guest_store
            .save(
                &GuestSessionId::new("tab-1"),
                &[
                    GuestCartEntry::new(Uuid::new_v4(), 1).unwrap(),
                    GuestCartEntry::new(kettle.id, 2).unwrap(),
                ],
            )
            .await
            .unwrap();
        let user_id = UserId::new("u-1");

        let cart = f.session.sign_in(user_id.clone()).await.unwrap();

        assert_eq!(f.session.identity().await, Some(user_id.clone()));
        assert_eq!(f.repository.quantities(&user_id), vec![(kettle.id, 2)]);
        assert_eq!(cart.total_items(), 2);
        assert!(
            f.guest_store
                .load(&GuestSessionId::new("tab-1"))
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn should_reconcile_guest_cart_once_on_sign_in() {
        let p1 = product("Kettle", 500, 800);
        let p2 = product("Mug", 300, 450);
        let f = fixture(vec![p1.clone(), p2.clone()]);
        let user_id = UserId::new("u-1");
        f.repository.seed(&user_id, p1.id, 3);
        f.session.add_item(p1.id, 2).await.unwrap();
        f.session.add_item(p2.id, 1).await.unwrap();

        let cart = f.session.sign_in(user_id.clone()).await.unwrap();

        assert_eq!(f.session.identity().await, Some(user_id.clone()));
        assert_eq!(cart.line_for_product(p1.id).unwrap().quantity, 5);
        assert_eq!(cart.line_for_product(p2.id).unwrap().quantity, 1);
        assert!(
            f.guest_store
                .load(f.session.guest_session())
                .await
                .unwrap()
                .is_empty()
        );

        f.session.sign_in(user_id.clone()).await.unwrap();
        assert_eq!(
            f.repository.quantities(&user_id),
            vec![(p1.id, 5), (p2.id, 1)]
        );
        assert!(!f.session.is_loading());
    }

    #[tokio::test]
    async fn should_leave_server_cart_alone_when_signing_in_with_empty_guest_cart() {
        let p1 = product("Kettle", 500, 800);
        let f = fixture(vec![p1.clone()]);
        let user_id = UserId::new("u-1");
        f.repository.seed(&user_id, p1.id, 3);

        let cart = f.session.sign_in(user_id.clone()).await.unwrap();

        assert_eq!(cart.total_items(), 3);
        assert_eq!(f.repository.quantities(&user_id), vec![(p1.id, 3)]);
    }

    #[tokio::test]
    async fn should_publish_snapshots_to_subscribers() {
        let kettle = product("Kettle", 500, 800);
        let f = fixture(vec![kettle.clone()]);
        let mut receiver = f.session.subscribe();

        f.session.add_item(kettle.id, 2).await.unwrap();

        assert!(receiver.has_changed().unwrap());
        assert_eq!(receiver.borrow_and_update().total_items(), 2);
    }

    #[tokio::test]
    async fn should_return_to_guest_cart_on_sign_out() {
        let kettle = product("Kettle", 500, 800);
        let f = fixture(vec![kettle.clone()]);
        let user_id = UserId::new("u-1");
        f.repository.seed(&user_id, kettle.id, 4);
        f.session.sign_in(user_id).await.unwrap();

        let cart = f.session.sign_out().await.unwrap();

        assert!(cart.is_empty());
        assert_eq!(f.session.identity().await, None);
    }

    #[tokio::test]
    async fn should_empty_cart_on_clear() {
        let kettle = product("Kettle", 500, 800);
        let f = fixture(vec![kettle.clone()]);
        f.session.add_item(kettle.id, 2).await.unwrap();

        let cart = f.session.clear().await.unwrap();

        assert!(cart.is_empty());
        assert!(f.session.refresh().await.unwrap().is_empty());
    }
}
