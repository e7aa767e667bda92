use crate::Catalog;
use crate::model::{ListProducts, Product, ProductInput};
use atelier_derive::api_handler;
use atelier_identity::{AdminOnly, Authorized};
use atelier_kernel::domain::constants::{CATALOG_TAG, PRODUCT};
use atelier_kernel::security::resource::ResourceGuard;
use atelier_kernel::server::{ApiError, ApiState, ErrorBody, Json, Page, Pagination, Path, Query};
use atelier_kernel::time;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

#[api_handler(
    get,
    path = "/api/products",
    params(ListProducts),
    responses((status = OK, description = "Newest products first", body = Page<Product>)),
    tag = CATALOG_TAG,
)]
pub(crate) async fn list_products(
    State(state): State<ApiState>,
    Query(params): Query<ListProducts>,
) -> Result<Json<Page<Product>>, ApiError> {
    let catalog = state.try_get_slice::<Catalog>()?;
    let pagination = Pagination::new(params.page, params.limit);
    let brand = params.brand.map(|b| b.trim().to_owned()).filter(|b| !b.is_empty());
    Ok(Json(catalog.products.list(brand, params.available, pagination).await?))
}

#[api_handler(
    get,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses((status = OK, body = Product), (status = NOT_FOUND, body = ErrorBody)),
    tag = CATALOG_TAG,
)]
pub(crate) async fn get_product(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let catalog = state.try_get_slice::<Catalog>()?;
    let id = ResourceGuard::verify(id, PRODUCT)?;
    Ok(Json(catalog.products.get(&id).await?))
}

#[api_handler(
    post,
    path = "/api/admin/products",
    request_body = ProductInput,
    responses(
        (status = CREATED, body = Product),
        (status = BAD_REQUEST, body = ErrorBody),
        (status = CONFLICT, description = "SKU already used", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = CATALOG_TAG,
)]
pub(crate) async fn create_product(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Json(input): Json<ProductInput>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let catalog = state.try_get_slice::<Catalog>()?;
    let product = input.into_product(&state.config.storefront.currency, time::now())?;
    let stored = catalog.products.create(&product).await?;

    info!(id = %stored.id, sku = %stored.sku, by = auth.subject(), "Product created");
    Ok((StatusCode::CREATED, Json(stored)))
}

#[api_handler(
    put,
    path = "/api/admin/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = ProductInput,
    responses(
        (status = OK, body = Product),
        (status = BAD_REQUEST, body = ErrorBody),
        (status = NOT_FOUND, body = ErrorBody),
        (status = CONFLICT, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = CATALOG_TAG,
)]
pub(crate) async fn replace_product(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(input): Json<ProductInput>,
) -> Result<Json<Product>, ApiError> {
    let catalog = state.try_get_slice::<Catalog>()?;
    let id = ResourceGuard::verify(id, PRODUCT)?;
    let product = input.into_product(&state.config.storefront.currency, time::now())?;
    let stored = catalog.products.replace(&id, product).await?;

    info!(%id, sku = %stored.sku, by = auth.subject(), "Product replaced");
    Ok(Json(stored))
}

#[api_handler(
    delete,
    path = "/api/admin/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses((status = NO_CONTENT), (status = NOT_FOUND, body = ErrorBody)),
    security(("bearer" = [])),
    tag = CATALOG_TAG,
)]
pub(crate) async fn delete_product(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let catalog = state.try_get_slice::<Catalog>()?;
    let id = ResourceGuard::verify(id, PRODUCT)?;
    catalog.products.delete(&id).await?;

    info!(%id, by = auth.subject(), "Product deleted");
    Ok(StatusCode::NO_CONTENT)
}
