use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use poem::Request;
use poem::http::StatusCode;
use poem_openapi::payload::Json;
use tokio::sync::RwLock;

use business::application::cart::session::{CartSession, CartUseCases};
use business::application::checkout::session::CheckoutSession;
use business::domain::cart::errors::CartError;
use business::domain::cart::guest_store::GuestCartStore;
use business::domain::logger::Logger;
use business::domain::order::use_cases::submit::SubmitOrderUseCase;
use business::domain::payment::use_cases::get_options::GetPaymentOptionsUseCase;
use business::domain::shared::value_objects::GuestSessionId;

use crate::api::error::{ErrorResponse, IntoErrorResponse, error_response};
use crate::api::security::{extract_bearer_token, verify_token};
use crate::config::auth_config::AuthConfig;

/// Header carrying the client-generated storefront session id.
pub const SESSION_HEADER: &str = "x-storefront-session";

const MAX_SESSION_ID_LEN: usize = 128;

/// Sessions untouched for this long are dropped, with their guest carts, on
/// the next new session.
const SESSION_IDLE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session.missing_id")]
    MissingId,
    #[error("session.invalid_id")]
    InvalidId,
    #[error("auth.invalid_token")]
    InvalidToken,
    #[error(transparent)]
    Cart(#[from] CartError),
}

impl IntoErrorResponse for SessionError {
    fn into_error_response(self) -> (StatusCode, Json<ErrorResponse>) {
        match self {
            SessionError::MissingId => error_response(
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "session.missing_id",
            ),
            SessionError::InvalidId => error_response(
                StatusCode::BAD_REQUEST,
                "ValidationError",
                "session.invalid_id",
            ),
            SessionError::InvalidToken => {
                error_response(StatusCode::UNAUTHORIZED, "Unauthorized", "auth.invalid_token")
            }
            SessionError::Cart(err) => err.into_error_response(),
        }
    }
}

/// Cart and checkout state of one client session.
#[derive(Clone)]
pub struct StorefrontSession {
    pub cart: Arc<CartSession>,
    pub checkout: Arc<CheckoutSession>,
}

/// Shared pieces every new session is built from.
pub struct SessionFactory {
    pub cart_use_cases: CartUseCases,
    pub guest_store: Arc<GuestCartStore>,
    pub submit_order: Arc<dyn SubmitOrderUseCase>,
    pub payment_options: Arc<dyn GetPaymentOptionsUseCase>,
    pub timeout: Duration,
    pub logger: Arc<dyn Logger>,
}

impl SessionFactory {
    fn create(&self, id: &str) -> StorefrontSession {
        let cart = Arc::new(CartSession::new(
            GuestSessionId::new(id),
            self.cart_use_cases.clone(),
            self.timeout,
            self.logger.clone(),
        ));
        let checkout = Arc::new(CheckoutSession::new(
            cart.clone(),
            self.submit_order.clone(),
            self.payment_options.clone(),
            self.timeout,
            self.logger.clone(),
        ));
        StorefrontSession { cart, checkout }
    }
}

struct Entry {
    session: StorefrontSession,
    last_seen: Instant,
}

/// Live storefront sessions keyed by the client's session id.
///
/// The identity of a session follows the bearer token of each request: a
/// token on a guest session signs it in (reconciling the guest cart), a
/// request without one signs it out.
pub struct SessionRegistry {
    sessions: RwLock<HashMap<String, Entry>>,
    factory: SessionFactory,
    auth: AuthConfig,
    idle_ttl: Duration,
}

impl SessionRegistry {
    pub fn new(factory: SessionFactory, auth: AuthConfig) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            factory,
            auth,
            idle_ttl: SESSION_IDLE_TTL,
        }
    }

    /// Looks up (or opens) the session of `id` and aligns its identity with
    /// the request's bearer token.
    pub async fn resolve(&self, id: &str, req: &Request) -> Result<StorefrontSession, SessionError> {
        let id = validate_session_id(id)?;
        let session = self.get_or_create(id).await;

        match extract_bearer_token(req) {
            Some(token) => {
                let user_id = verify_token(token, &self.auth).map_err(|e| {
                    tracing::warn!("Rejected token on session {id}: {e}");
                    SessionError::InvalidToken
                })?;
                if session.cart.identity().await.as_ref() != Some(&user_id) {
                    session.cart.sign_in(user_id).await?;
                }
            }
            None => {
                if session.cart.identity().await.is_some() {
                    session.cart.sign_out().await?;
                }
            }
        }

        Ok(session)
    }

    #[cfg(test)]
    fn with_idle_ttl(mut self, idle_ttl: Duration) -> Self {
        self.idle_ttl = idle_ttl;
        self
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn get_or_create(&self, id: &str) -> StorefrontSession {
        let mut sessions = self.sessions.write().await;
        let now = Instant::now();

        if let Some(entry) = sessions.get_mut(id) {
            entry.last_seen = now;
            return entry.session.clone();
        }

        let idle_ttl = self.idle_ttl;
        let mut evicted = Vec::new();
        sessions.retain(|key, entry| {
            let live = now.duration_since(entry.last_seen) < idle_ttl;
            if !live {
                evicted.push(GuestSessionId::new(key.as_str()));
            }
            live
        });
        // Still under the write lock, so a returning id cannot race the removal.
        for guest_session in &evicted {
            if let Err(e) = self.factory.guest_store.clear(guest_session).await {
                tracing::warn!("Failed to drop guest cart of evicted session {guest_session}: {e}");
            }
        }
        if !evicted.is_empty() {
            tracing::debug!("Evicted {} idle storefront sessions", evicted.len());
        }

        let session = self.factory.create(id);
        sessions.insert(
            id.to_string(),
            Entry {
                session: session.clone(),
                last_seen: now,
            },
        );
        tracing::debug!("Opened storefront session {id}");
        session
    }
}

fn validate_session_id(raw: &str) -> Result<&str, SessionError> {
    let id = raw.trim();
    if id.is_empty() {
        return Err(SessionError::MissingId);
    }
    if id.len() > MAX_SESSION_ID_LEN
        || !id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(SessionError::InvalidId);
    }
    Ok(id)
}
