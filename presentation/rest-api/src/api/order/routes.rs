use std::sync::Arc;

use poem_openapi::{OpenApi, payload::Json};

use business::domain::order::use_cases::get_history::{
    GetOrderHistoryParams, GetOrderHistoryUseCase,
};

use crate::api::error::{ErrorResponse, IntoErrorResponse};
use crate::api::order::dto::OrderResponse;
use crate::api::security::SupabaseBearer;
use crate::api::tags::ApiTags;

pub struct OrderApi {
    get_history_use_case: Arc<dyn GetOrderHistoryUseCase>,
}

impl OrderApi {
    pub fn new(get_history_use_case: Arc<dyn GetOrderHistoryUseCase>) -> Self {
        Self {
            get_history_use_case,
        }
    }
}

/// Order history API
#[OpenApi]
impl OrderApi {
    /// List my orders
    ///
    /// Orders of the signed-in user with their lines, newest first.
    #[oai(path = "/orders", method = "get", tag = "ApiTags::Orders")]
    async fn get_orders(&self, auth: SupabaseBearer) -> GetOrdersResponse {
        match self
            .get_history_use_case
            .execute(GetOrderHistoryParams { user_id: auth.0 })
            .await
        {
            Ok(orders) => {
                GetOrdersResponse::Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
            }
            Err(err) => GetOrdersResponse::from_error(err),
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetOrdersResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<OrderResponse>>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
    #[oai(status = 504)]
    GatewayTimeout(Json<ErrorResponse>),
}

impl GetOrdersResponse {
    fn from_error(err: impl IntoErrorResponse) -> Self {
        let (status, json) = err.into_error_response();
        match status.as_u16() {
            504 => GetOrdersResponse::GatewayTimeout(json),
            _ => GetOrdersResponse::InternalError(json),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::security::tests::{SECRET, auth_config, token_for};
    use async_trait::async_trait;
    use business::domain::errors::RepositoryError;
    use business::domain::order::errors::OrderError;
    use business::domain::order::model::Order;
    use business::domain::shared::value_objects::UserId;
    use mockall::mock;
    use poem::EndpointExt;
    use poem::http::StatusCode;
    use poem::http::header::AUTHORIZATION;
    use poem::test::TestClient;
    use poem_openapi::OpenApiService;

    mock! {
        pub History {}

        #[async_trait]
        impl GetOrderHistoryUseCase for History {
            async fn execute(&self, params: GetOrderHistoryParams) -> Result<Vec<Order>, OrderError>;
        }
    }

    fn client(history: MockHistory) -> TestClient<impl poem::Endpoint> {
        let service = OpenApiService::new(OrderApi::new(Arc::new(history)), "test", "0");
        TestClient::new(poem::Route::new().nest("/", service).data(auth_config()))
    }

    #[tokio::test]
    async fn should_require_bearer_token() {
        let mut history = MockHistory::new();
        history.expect_execute().never();

        let resp = client(history).get("/orders").send().await;

        resp.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn should_list_orders_of_token_subject() {
        let mut history = MockHistory::new();
        history
            .expect_execute()
            .withf(|params| params.user_id == UserId::new("user-1"))
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let token = token_for("user-1", "authenticated", 3600, SECRET);

        let resp = client(history)
            .get("/orders")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await;

        resp.assert_status_is_ok();
        resp.json().await.value().array().assert_len(0);
    }

    #[tokio::test]
    async fn should_report_gateway_timeout() {
        let mut history = MockHistory::new();
        history
            .expect_execute()
            .returning(|_| Err(OrderError::Repository(RepositoryError::Timeout)));
        let token = token_for("user-1", "authenticated", 3600, SECRET);

        let resp = client(history)
            .get("/orders")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await;

        resp.assert_status(StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn should_report_database_failure_as_internal_error() {
        let mut history = MockHistory::new();
        history
            .expect_execute()
            .returning(|_| Err(OrderError::Repository(RepositoryError::DatabaseError)));
        let token = token_for("user-1", "authenticated", 3600, SECRET);

        let resp = client(history)
            .get("/orders")
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await;

        resp.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
