use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, param::Header, param::Path, payload::Json};
use uuid::Uuid;

use business::domain::cart::errors::CartError;
use business::domain::cart::model::Cart;

use crate::api::cart::dto::{AddCartItemRequest, CartResponse, UpdateCartItemRequest};
use crate::api::error::{ErrorResponse, IntoErrorResponse, invalid_id};
use crate::api::session::{SessionRegistry, StorefrontSession};
use crate::api::tags::ApiTags;

pub struct CartApi {
    registry: Arc<SessionRegistry>,
}

impl CartApi {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    async fn respond(session: &StorefrontSession, result: Result<Cart, CartError>) -> CartApiResponse {
        match result {
            Ok(cart) => {
                let authenticated = session.cart.identity().await.is_some();
                CartApiResponse::Ok(Json(CartResponse::new(&cart, authenticated)))
            }
            Err(err) => CartApiResponse::from_error(err),
        }
    }
}

/// Cart API
///
/// The cart of the calling storefront session: a guest cart until the
/// request carries a bearer token, the user's server cart afterwards.
#[OpenApi]
impl CartApi {
    /// Get the cart
    #[oai(path = "/cart", method = "get", tag = "ApiTags::Cart")]
    async fn get_cart(
        &self,
        req: &Request,
        #[oai(name = "x-storefront-session")] session_id: Header<String>,
    ) -> CartApiResponse {
        let session = match self.registry.resolve(&session_id.0, req).await {
            Ok(session) => session,
            Err(err) => return CartApiResponse::from_error(err),
        };
        let result = session.cart.refresh().await;
        Self::respond(&session, result).await
    }

    /// Empty the cart
    #[oai(path = "/cart", method = "delete", tag = "ApiTags::Cart")]
    async fn clear_cart(
        &self,
        req: &Request,
        #[oai(name = "x-storefront-session")] session_id: Header<String>,
    ) -> CartApiResponse {
        let session = match self.registry.resolve(&session_id.0, req).await {
            Ok(session) => session,
            Err(err) => return CartApiResponse::from_error(err),
        };
        let result = session.cart.clear().await;
        Self::respond(&session, result).await
    }

    /// Add a product
    ///
    /// Adding a product already in the cart raises that line's quantity.
    #[oai(path = "/cart/items", method = "post", tag = "ApiTags::Cart")]
    async fn add_item(
        &self,
        req: &Request,
        #[oai(name = "x-storefront-session")] session_id: Header<String>,
        body: Json<AddCartItemRequest>,
    ) -> CartApiResponse {
        let session = match self.registry.resolve(&session_id.0, req).await {
            Ok(session) => session,
            Err(err) => return CartApiResponse::from_error(err),
        };
        let result = session
            .cart
            .add_item(body.0.product_id, body.0.quantity)
            .await;
        Self::respond(&session, result).await
    }

    /// Change a line's quantity
    ///
    /// A quantity of zero or less removes the line.
    #[oai(path = "/cart/items/:id", method = "put", tag = "ApiTags::Cart")]
    async fn update_item(
        &self,
        req: &Request,
        #[oai(name = "x-storefront-session")] session_id: Header<String>,
        id: Path<String>,
        body: Json<UpdateCartItemRequest>,
    ) -> CartApiResponse {
        let Ok(line_id) = Uuid::parse_str(&id.0) else {
            return CartApiResponse::from_error(invalid_id("cart.invalid_line_id"));
        };
        let session = match self.registry.resolve(&session_id.0, req).await {
            Ok(session) => session,
            Err(err) => return CartApiResponse::from_error(err),
        };
        let result = session.cart.update_quantity(line_id, body.0.quantity).await;
        Self::respond(&session, result).await
    }

    /// Remove a line
    #[oai(path = "/cart/items/:id", method = "delete", tag = "ApiTags::Cart")]
    async fn remove_item(
        &self,
        req: &Request,
        #[oai(name = "x-storefront-session")] session_id: Header<String>,
        id: Path<String>,
    ) -> CartApiResponse {
        let Ok(line_id) = Uuid::parse_str(&id.0) else {
            return CartApiResponse::from_error(invalid_id("cart.invalid_line_id"));
        };
        let session = match self.registry.resolve(&session_id.0, req).await {
            Ok(session) => session,
            Err(err) => return CartApiResponse::from_error(err),
        };
        let result = session.cart.remove_item(line_id).await;
        Self::respond(&session, result).await
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CartApiResponse {
    #[oai(status = 200)]
    Ok(Json<CartResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
    #[oai(status = 504)]
    GatewayTimeout(Json<ErrorResponse>),
}

impl CartApiResponse {
    fn from_error(err: impl IntoErrorResponse) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 => CartApiResponse::BadRequest(json),
            401 => CartApiResponse::Unauthorized(json),
            404 => CartApiResponse::NotFound(json),
            504 => CartApiResponse::GatewayTimeout(json),
            _ => CartApiResponse::InternalError(json),
        }
    }
}
