use std::future::Future;
use std::sync::Arc;

use poem::Request;
use poem_openapi::{OpenApi, param::Header, payload::Json};

use business::domain::checkout::address::AddressForm;
use business::domain::checkout::errors::CheckoutError;
use business::domain::checkout::flow::CheckoutFlow;
use business::domain::order::model::Order;
use business::domain::payment::model::PaymentMethod;

use crate::api::checkout::dto::{
    AddressRequest, CheckoutStateResponse, PaymentConfirmationRequest, PaymentOptionsResponse,
    SelectPaymentMethodRequest,
};
use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::order::dto::OrderResponse;
use crate::api::session::{SessionRegistry, StorefrontSession};
use crate::api::tags::ApiTags;

pub struct CheckoutApi {
    registry: Arc<SessionRegistry>,
}

impl CheckoutApi {
    pub fn new(registry: Arc<SessionRegistry>) -> Self {
        Self { registry }
    }

    /// Resolves the session, runs one flow operation and renders the new state.
    async fn step<F, Fut>(&self, req: &Request, session_id: &str, op: F) -> CheckoutApiResponse
    where
        F: FnOnce(StorefrontSession) -> Fut,
        Fut: Future<Output = Result<CheckoutFlow, CheckoutError>>,
    {
        let session = match self.registry.resolve(session_id, req).await {
            Ok(session) => session,
            Err(err) => return CheckoutApiResponse::from_error(err),
        };
        match op(session.clone()).await {
            Ok(flow) => CheckoutApiResponse::Ok(Json(state_of(&session, &flow).await)),
            Err(err) => CheckoutApiResponse::from_error(err),
        }
    }

    async fn place<F, Fut>(&self, req: &Request, session_id: &str, op: F) -> PlaceOrderResponse
    where
        F: FnOnce(StorefrontSession) -> Fut,
        Fut: Future<Output = Result<Order, CheckoutError>>,
    {
        let session = match self.registry.resolve(session_id, req).await {
            Ok(session) => session,
            Err(err) => return PlaceOrderResponse::from_error(err),
        };
        match op(session).await {
            Ok(order) => PlaceOrderResponse::Created(Json(order.into())),
            Err(err) => PlaceOrderResponse::from_error(err),
        }
    }
}

async fn state_of(session: &StorefrontSession, flow: &CheckoutFlow) -> CheckoutStateResponse {
    let authenticated = session.cart.identity().await.is_some();
    CheckoutStateResponse::new(flow, &session.cart.cart(), authenticated)
}

/// Checkout API
///
/// Address, summary and payment steps of the calling storefront session.
/// Steps only move forward once the current one is valid; going back keeps
/// what was typed.
#[OpenApi]
impl CheckoutApi {
    /// Current checkout state
    #[oai(path = "/checkout", method = "get", tag = "ApiTags::Checkout")]
    async fn get_checkout(
        &self,
        req: &Request,
        #[oai(name = "x-storefront-session")] session_id: Header<String>,
    ) -> CheckoutApiResponse {
        self.step(req, &session_id.0, |s| async move {
            s.cart.refresh().await?;
            Ok::<_, CheckoutError>(s.checkout.snapshot().await)
        })
        .await
    }

    /// Save the delivery address
    #[oai(path = "/checkout/address", method = "put", tag = "ApiTags::Checkout")]
    async fn update_address(
        &self,
        req: &Request,
        #[oai(name = "x-storefront-session")] session_id: Header<String>,
        body: Json<AddressRequest>,
    ) -> CheckoutApiResponse {
        let address = AddressForm::from(body.0);
        self.step(req, &session_id.0, |s| async move {
            s.checkout.update_address(address).await
        })
        .await
    }

    /// Continue to the order summary
    ///
    /// Requires a non-empty cart and every required address field.
    #[oai(path = "/checkout/summary", method = "post", tag = "ApiTags::Checkout")]
    async fn continue_to_summary(
        &self,
        req: &Request,
        #[oai(name = "x-storefront-session")] session_id: Header<String>,
    ) -> CheckoutApiResponse {
        self.step(req, &session_id.0, |s| async move {
            s.checkout.continue_to_summary().await
        })
        .await
    }

    /// Continue to payment
    #[oai(path = "/checkout/payment", method = "post", tag = "ApiTags::Checkout")]
    async fn continue_to_payment(
        &self,
        req: &Request,
        #[oai(name = "x-storefront-session")] session_id: Header<String>,
    ) -> CheckoutApiResponse {
        self.step(req, &session_id.0, |s| async move {
            s.checkout.continue_to_payment().await
        })
        .await
    }

    /// Go back one step
    #[oai(path = "/checkout/back", method = "post", tag = "ApiTags::Checkout")]
    async fn back(
        &self,
        req: &Request,
        #[oai(name = "x-storefront-session")] session_id: Header<String>,
    ) -> CheckoutApiResponse {
        self.step(req, &session_id.0, |s| async move { s.checkout.back().await })
            .await
    }

    /// Choose UPI or cash on delivery
    #[oai(
        path = "/checkout/payment-method",
        method = "put",
        tag = "ApiTags::Checkout"
    )]
    async fn select_payment_method(
        &self,
        req: &Request,
        #[oai(name = "x-storefront-session")] session_id: Header<String>,
        body: Json<SelectPaymentMethodRequest>,
    ) -> CheckoutApiResponse {
        let method = PaymentMethod::from(body.0.method);
        self.step(req, &session_id.0, |s| async move {
            s.checkout.select_payment_method(method).await
        })
        .await
    }

    /// Where and how much to pay
    ///
    /// The cart total, or the cash-on-delivery confirmation fee while that
    /// step is open.
    #[oai(
        path = "/checkout/payment-options",
        method = "get",
        tag = "ApiTags::Checkout"
    )]
    async fn payment_options(
        &self,
        req: &Request,
        #[oai(name = "x-storefront-session")] session_id: Header<String>,
    ) -> PaymentOptionsApiResponse {
        let session = match self.registry.resolve(&session_id.0, req).await {
            Ok(session) => session,
            Err(err) => return PaymentOptionsApiResponse::from_error(err),
        };
        match session.checkout.payment_options().await {
            Ok(options) => PaymentOptionsApiResponse::Ok(Json(options.into())),
            Err(err) => PaymentOptionsApiResponse::from_error(err),
        }
    }

    /// Confirm a UPI payment and place the order
    #[oai(path = "/checkout/upi", method = "post", tag = "ApiTags::Checkout")]
    async fn confirm_upi_payment(
        &self,
        req: &Request,
        #[oai(name = "x-storefront-session")] session_id: Header<String>,
        body: Json<PaymentConfirmationRequest>,
    ) -> PlaceOrderResponse {
        let PaymentConfirmationRequest { app, reference } = body.0;
        self.place(req, &session_id.0, |s| async move {
            s.checkout.confirm_upi_payment(app.into(), &reference).await
        })
        .await
    }

    /// Choose cash on delivery
    ///
    /// Opens the confirmation fee step; nothing is ordered yet.
    #[oai(path = "/checkout/cod", method = "post", tag = "ApiTags::Checkout")]
    async fn request_cash_on_delivery(
        &self,
        req: &Request,
        #[oai(name = "x-storefront-session")] session_id: Header<String>,
    ) -> CheckoutApiResponse {
        self.step(req, &session_id.0, |s| async move {
            s.checkout.request_cash_on_delivery().await
        })
        .await
    }

    /// Confirm the cash-on-delivery fee and place the order
    #[oai(
        path = "/checkout/cod/confirm",
        method = "post",
        tag = "ApiTags::Checkout"
    )]
    async fn confirm_cod_fee(
        &self,
        req: &Request,
        #[oai(name = "x-storefront-session")] session_id: Header<String>,
        body: Json<PaymentConfirmationRequest>,
    ) -> PlaceOrderResponse {
        let PaymentConfirmationRequest { app, reference } = body.0;
        self.place(req, &session_id.0, |s| async move {
            s.checkout.confirm_cod_fee(app.into(), &reference).await
        })
        .await
    }

    /// Back out of the cash-on-delivery fee
    #[oai(
        path = "/checkout/cod/decline",
        method = "post",
        tag = "ApiTags::Checkout"
    )]
    async fn decline_cash_on_delivery(
        &self,
        req: &Request,
        #[oai(name = "x-storefront-session")] session_id: Header<String>,
    ) -> CheckoutApiResponse {
        self.step(req, &session_id.0, |s| async move {
            s.checkout.decline_cash_on_delivery().await
        })
        .await
    }

    /// Start over
    #[oai(path = "/checkout/reset", method = "post", tag = "ApiTags::Checkout")]
    async fn reset(
        &self,
        req: &Request,
        #[oai(name = "x-storefront-session")] session_id: Header<String>,
    ) -> CheckoutApiResponse {
        self.step(req, &session_id.0, |s| async move {
            Ok::<_, CheckoutError>(s.checkout.reset().await)
        })
        .await
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum CheckoutApiResponse {
    #[oai(status = 200)]
    Ok(Json<CheckoutStateResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
    #[oai(status = 504)]
    GatewayTimeout(Json<ErrorResponse>),
}

impl CheckoutApiResponse {
    fn from_error(err: impl IntoErrorResponse) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 | 404 => CheckoutApiResponse::BadRequest(json),
            401 => CheckoutApiResponse::Unauthorized(json),
            409 => CheckoutApiResponse::Conflict(json),
            504 => CheckoutApiResponse::GatewayTimeout(json),
            _ => CheckoutApiResponse::InternalError(json),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum PlaceOrderResponse {
    #[oai(status = 201)]
    Created(Json<OrderResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 409)]
    Conflict(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
    #[oai(status = 504)]
    GatewayTimeout(Json<ErrorResponse>),
}

impl PlaceOrderResponse {
    fn from_error(err: impl IntoErrorResponse) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 | 404 => PlaceOrderResponse::BadRequest(json),
            401 => PlaceOrderResponse::Unauthorized(json),
            409 => PlaceOrderResponse::Conflict(json),
            504 => PlaceOrderResponse::GatewayTimeout(json),
            _ => PlaceOrderResponse::InternalError(json),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum PaymentOptionsApiResponse {
    #[oai(status = 200)]
    Ok(Json<PaymentOptionsResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 401)]
    Unauthorized(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
    #[oai(status = 504)]
    GatewayTimeout(Json<ErrorResponse>),
}

impl PaymentOptionsApiResponse {
    fn from_error(err: impl IntoErrorResponse) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            400 | 404 => PaymentOptionsApiResponse::BadRequest(json),
            401 => PaymentOptionsApiResponse::Unauthorized(json),
            504 => PaymentOptionsApiResponse::GatewayTimeout(json),
            _ => PaymentOptionsApiResponse::InternalError(json),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::cart::routes::CartApi;
    use crate::api::session::tests::test_registry;
    use crate::api::test_support::{DUPATTA_ID, SAREE_ID};
    use poem::http::StatusCode;
    use poem::test::TestClient;
    use poem_openapi::OpenApiService;
    use serde_json::json;

    const SESSION: &str = "tab-checkout";

    fn client() -> TestClient<poem::Route> {
        let registry = Arc::new(test_registry());
        let service = OpenApiService::new(
            (CartApi::new(registry.clone()), CheckoutApi::new(registry)),
            "test",
            "0",
        );
        TestClient::new(poem::Route::new().nest("/", service))
    }

    async fn fill_cart(client: &TestClient<poem::Route>) {
        for (product_id, quantity) in [(SAREE_ID, 1), (DUPATTA_ID, 2)] {
            client
                .post("/cart/items")
                .header("x-storefront-session", SESSION)
                .body_json(&json!({ "product_id": product_id, "quantity": quantity }))
                .send()
                .await
                .assert_status_is_ok();
        }
    }

    async fn post(client: &TestClient<poem::Route>, path: &str) -> poem::test::TestResponse {
        client
            .post(path)
            .header("x-storefront-session", SESSION)
            .send()
            .await
    }

    async fn reach_payment(client: &TestClient<poem::Route>) {
        fill_cart(client).await;
        client
            .put("/checkout/address")
            .header("x-storefront-session", SESSION)
            .body_json(&json!({
                "full_name": "Asha Rao",
                "email": "asha@example.com",
                "phone": "9876543210",
                "pincode": "530001",
                "city": "Visakhapatnam",
                "house_no": "12-4"
            }))
            .send()
            .await
            .assert_status_is_ok();
        post(client, "/checkout/summary").await.assert_status_is_ok();
        post(client, "/checkout/payment").await.assert_status_is_ok();
    }

    #[tokio::test]
    async fn should_place_guest_order_paid_over_upi() {
        let client = client();
        reach_payment(&client).await;

        let resp = client
            .post("/checkout/upi")
            .header("x-storefront-session", SESSION)
            .body_json(&json!({ "app": "gpay", "reference": "123456789012" }))
            .send()
            .await;

        resp.assert_status(StatusCode::CREATED);
        let body = resp.json().await;
        let order = body.value().object();
        order.get("total_amount").assert_string("1100.00");
        order.get("payment_status").assert_string("paid");
        order
            .get("payment_reference")
            .assert_string("UPI:GPAY:123456789012");
        order.get("lines").array().assert_len(2);

        let cart = client
            .get("/cart")
            .header("x-storefront-session", SESSION)
            .send()
            .await;
        cart.json()
            .await
            .value()
            .object()
            .get("total_items")
            .assert_i64(0);
    }

    #[tokio::test]
    async fn should_reject_payment_before_summary() {
        let client = client();
        fill_cart(&client).await;

        let resp = post(&client, "/checkout/payment").await;

        resp.assert_status(StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn should_keep_address_step_when_phone_missing() {
        let client = client();
        fill_cart(&client).await;
        client
            .put("/checkout/address")
            .header("x-storefront-session", SESSION)
            .body_json(&json!({
                "full_name": "Asha Rao",
                "email": "asha@example.com",
                "pincode": "530001",
                "city": "Visakhapatnam",
                "house_no": "12-4"
            }))
            .send()
            .await
            .assert_status_is_ok();

        let resp = post(&client, "/checkout/summary").await;

        resp.assert_status(StatusCode::BAD_REQUEST);
        let body = resp.json().await;
        let error = body.value().object();
        error
            .get("user_message")
            .assert_string("Please fill all required fields");
        error.get("fields").array().assert_len(1);

        let state = client
            .get("/checkout")
            .header("x-storefront-session", SESSION)
            .send()
            .await;
        state
            .json()
            .await
            .value()
            .object()
            .get("step")
            .assert_string("address");
    }

    #[tokio::test]
    async fn should_stay_on_payment_when_cod_declined() {
        let client = client();
        reach_payment(&client).await;

        post(&client, "/checkout/cod").await.assert_status_is_ok();
        let options = client
            .get("/checkout/payment-options")
            .header("x-storefront-session", SESSION)
            .send()
            .await;
        options
            .json()
            .await
            .value()
            .object()
            .get("amount")
            .assert_string("59.00");

        let resp = post(&client, "/checkout/cod/decline").await;

        resp.assert_status_is_ok();
        let body = resp.json().await;
        let state = body.value().object();
        state.get("step").assert_string("payment");
        state.get("cod_confirmation_open").assert_bool(false);
        state.get("cart").object().get("total_items").assert_i64(3);
    }

    #[tokio::test]
    async fn should_reject_short_transaction_reference() {
        let client = client();
        reach_payment(&client).await;

        let resp = client
            .post("/checkout/upi")
            .header("x-storefront-session", SESSION)
            .body_json(&json!({ "app": "phonepe", "reference": "12345" }))
            .send()
            .await;

        resp.assert_status(StatusCode::BAD_REQUEST);
    }
}
