use crate::Catalog;
use crate::model::{Product, ProductSelection, ProductSelectionInput};
use crate::repository::Curation;
use atelier_derive::api_handler;
use atelier_identity::{AdminOnly, Authorized};
use atelier_kernel::domain::constants::CATALOG_TAG;
use atelier_kernel::server::{ApiError, ApiState, ErrorBody, Json};
use axum::extract::State;
use tracing::info;

async fn populated(state: &ApiState, kind: Curation) -> Result<Json<Vec<Product>>, ApiError> {
    let catalog = state.try_get_slice::<Catalog>()?;
    Ok(Json(catalog.curated_products(kind).await?))
}

async fn selection(state: &ApiState, kind: Curation) -> Result<Json<ProductSelection>, ApiError> {
    let catalog = state.try_get_slice::<Catalog>()?;
    Ok(Json(catalog.curation(kind).get().await?))
}

async fn replace(
    state: &ApiState,
    kind: Curation,
    subject: &str,
    input: ProductSelectionInput,
) -> Result<Json<ProductSelection>, ApiError> {
    let catalog = state.try_get_slice::<Catalog>()?;
    let stored = catalog.curate(kind, input.product_ids).await?;

    info!(list = ?kind, products = stored.product_ids.len(), by = subject, "Curated list saved");
    Ok(Json(stored))
}

#[api_handler(
    get,
    path = "/api/popup-products",
    responses((status = OK, description = "Popup products in curated order", body = [Product])),
    tag = CATALOG_TAG,
)]
pub(crate) async fn popup_products(State(state): State<ApiState>) -> Result<Json<Vec<Product>>, ApiError> {
    populated(&state, Curation::Popup).await
}

#[api_handler(
    get,
    path = "/api/sale-items",
    responses((status = OK, description = "Sale items in curated order", body = [Product])),
    tag = CATALOG_TAG,
)]
pub(crate) async fn sale_items(State(state): State<ApiState>) -> Result<Json<Vec<Product>>, ApiError> {
    populated(&state, Curation::SaleItems).await
}

#[api_handler(
    get,
    path = "/api/admin/popup-products",
    responses((status = OK, body = ProductSelection)),
    security(("bearer" = [])),
    tag = CATALOG_TAG,
)]
pub(crate) async fn get_popup_selection(
    _auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
) -> Result<Json<ProductSelection>, ApiError> {
    selection(&state, Curation::Popup).await
}

#[api_handler(
    put,
    path = "/api/admin/popup-products",
    request_body = ProductSelectionInput,
    responses(
        (status = OK, body = ProductSelection),
        (status = BAD_REQUEST, description = "Too many, duplicate or unknown ids", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = CATALOG_TAG,
)]
pub(crate) async fn put_popup_selection(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Json(input): Json<ProductSelectionInput>,
) -> Result<Json<ProductSelection>, ApiError> {
    replace(&state, Curation::Popup, auth.subject(), input).await
}

#[api_handler(
    get,
    path = "/api/admin/sale-items",
    responses((status = OK, body = ProductSelection)),
    security(("bearer" = [])),
    tag = CATALOG_TAG,
)]
pub(crate) async fn get_sale_selection(
    _auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
) -> Result<Json<ProductSelection>, ApiError> {
    selection(&state, Curation::SaleItems).await
}

#[api_handler(
    put,
    path = "/api/admin/sale-items",
    request_body = ProductSelectionInput,
    responses(
        (status = OK, body = ProductSelection),
        (status = BAD_REQUEST, description = "Too many, duplicate or unknown ids", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = CATALOG_TAG,
)]
pub(crate) async fn put_sale_selection(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Json(input): Json<ProductSelectionInput>,
) -> Result<Json<ProductSelection>, ApiError> {
    replace(&state, Curation::SaleItems, auth.subject(), input).await
}
