use std::sync::Arc;

use poem_openapi::{OpenApi, param::Path, param::Query, payload::Json};
use uuid::Uuid;

use business::domain::category::use_cases::get_all::GetAllCategoriesUseCase;
use business::domain::product::use_cases::get_all::{GetAllProductsParams, GetAllProductsUseCase};
use business::domain::product::use_cases::get_by_id::{
    GetProductByIdParams, GetProductByIdUseCase,
};
use business::domain::product::use_cases::get_home::GetHomeFeedUseCase;

use crate::api::catalog::dto::{
    CategoryResponse, HomeFeedResponse, ProductDetailResponse, ProductResponse,
};
use crate::api::error::{ErrorResponse, IntoErrorResponse, invalid_id};
use crate::api::tags::ApiTags;

pub struct CatalogApi {
    get_home_use_case: Arc<dyn GetHomeFeedUseCase>,
    get_all_use_case: Arc<dyn GetAllProductsUseCase>,
    get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
    get_categories_use_case: Arc<dyn GetAllCategoriesUseCase>,
}

impl CatalogApi {
    pub fn new(
        get_home_use_case: Arc<dyn GetHomeFeedUseCase>,
        get_all_use_case: Arc<dyn GetAllProductsUseCase>,
        get_by_id_use_case: Arc<dyn GetProductByIdUseCase>,
        get_categories_use_case: Arc<dyn GetAllCategoriesUseCase>,
    ) -> Self {
        Self {
            get_home_use_case,
            get_all_use_case,
            get_by_id_use_case,
            get_categories_use_case,
        }
    }
}

/// Catalog API
///
/// Read-only storefront catalog: home feed, product listing and detail.
#[OpenApi]
impl CatalogApi {
    /// Home feed
    ///
    /// Categories by name plus the featured active products.
    #[oai(path = "/home", method = "get", tag = "ApiTags::Catalog")]
    async fn get_home(&self) -> GetHomeResponse {
        match self.get_home_use_case.execute().await {
            Ok(feed) => GetHomeResponse::Ok(Json(feed.into())),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetHomeResponse::InternalError(json)
            }
        }
    }

    /// List active products
    ///
    /// Newest first. `q` filters by name, case-insensitively.
    #[oai(path = "/products", method = "get", tag = "ApiTags::Catalog")]
    async fn get_all_products(&self, q: Query<Option<String>>) -> GetAllProductsResponse {
        match self
            .get_all_use_case
            .execute(GetAllProductsParams { query: q.0 })
            .await
        {
            Ok(products) => {
                let responses: Vec<ProductResponse> =
                    products.into_iter().map(|p| p.into()).collect();
                GetAllProductsResponse::Ok(Json(responses))
            }
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetAllProductsResponse::InternalError(json)
            }
        }
    }

    /// Get a product by ID
    ///
    /// Returns an active product with its gallery.
    #[oai(path = "/products/:id", method = "get", tag = "ApiTags::Catalog")]
    async fn get_product_by_id(&self, id: Path<String>) -> GetProductByIdResponse {
        let Ok(uuid) = Uuid::parse_str(&id.0) else {
            let (_, json) = invalid_id("product.invalid_id");
            return GetProductByIdResponse::BadRequest(json);
        };

        match self
            .get_by_id_use_case
            .execute(GetProductByIdParams { id: uuid })
            .await
        {
            Ok(detail) => GetProductByIdResponse::Ok(Json(detail.into())),
            Err(err) => {
                let (status, json) = err.into_error_response();
                match status.as_u16() {
                    404 => GetProductByIdResponse::NotFound(json),
                    _ => GetProductByIdResponse::InternalError(json),
                }
            }
        }
    }

    /// List categories
    #[oai(path = "/categories", method = "get", tag = "ApiTags::Catalog")]
    async fn get_categories(&self) -> GetCategoriesResponse {
        match self.get_categories_use_case.execute().await {
            Ok(categories) => GetCategoriesResponse::Ok(Json(
                categories.into_iter().map(CategoryResponse::from).collect(),
            )),
            Err(err) => {
                let (_status, json) = err.into_error_response();
                GetCategoriesResponse::InternalError(json)
            }
        }
    }
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetHomeResponse {
    #[oai(status = 200)]
    Ok(Json<HomeFeedResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetAllProductsResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<ProductResponse>>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetProductByIdResponse {
    #[oai(status = 200)]
    Ok(Json<ProductDetailResponse>),
    #[oai(status = 400)]
    BadRequest(Json<ErrorResponse>),
    #[oai(status = 404)]
    NotFound(Json<ErrorResponse>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}

#[derive(poem_openapi::ApiResponse)]
pub enum GetCategoriesResponse {
    #[oai(status = 200)]
    Ok(Json<Vec<CategoryResponse>>),
    #[oai(status = 500)]
    InternalError(Json<ErrorResponse>),
}
