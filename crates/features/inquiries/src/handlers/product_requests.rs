use crate::Inquiries;
use crate::model::{ListProductRequests, NewProductRequest, ProductRequest, UpdateProductRequest};
use atelier_derive::api_handler;
use atelier_identity::{AdminOnly, Authorized, Backoffice};
use atelier_kernel::domain::constants::{INQUIRIES_TAG, PRODUCT_REQUEST};
use atelier_kernel::domain::events::ProductRequested;
use atelier_kernel::security::resource::ResourceGuard;
use atelier_kernel::server::{ApiError, ApiState, ErrorBody, Json, Page, Pagination, Path, Query};
use atelier_kernel::time;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

#[api_handler(
    post,
    path = "/api/product-requests",
    request_body = NewProductRequest,
    responses(
        (status = CREATED, description = "Request stored", body = ProductRequest),
        (status = BAD_REQUEST, body = ErrorBody),
    ),
    tag = INQUIRIES_TAG,
)]
pub(crate) async fn submit_product_request(
    State(state): State<ApiState>,
    Json(form): Json<NewProductRequest>,
) -> Result<(StatusCode, Json<ProductRequest>), ApiError> {
    let inquiries = state.try_get_slice::<Inquiries>()?;
    let stored = inquiries.product_requests.create(&form.into_request(time::now())?).await?;

    info!(id = %stored.id, brand = %stored.brand, "Product request received");
    state.publish(ProductRequested {
        id: stored.id.clone(),
        name: stored.name.clone(),
        email: stored.email.clone(),
        phone: stored.phone.clone(),
        brand: stored.brand.clone(),
        product_name: stored.product_name.clone(),
    });

    Ok((StatusCode::CREATED, Json(stored)))
}

#[api_handler(
    get,
    path = "/api/admin/product-requests",
    params(ListProductRequests),
    responses(
        (status = OK, description = "Newest requests first", body = Page<ProductRequest>),
        (status = UNAUTHORIZED, body = ErrorBody),
        (status = FORBIDDEN, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = INQUIRIES_TAG,
)]
pub(crate) async fn list_product_requests(
    _auth: Authorized<Backoffice>,
    State(state): State<ApiState>,
    Query(params): Query<ListProductRequests>,
) -> Result<Json<Page<ProductRequest>>, ApiError> {
    let inquiries = state.try_get_slice::<Inquiries>()?;
    let pagination = Pagination::new(params.page, params.limit);
    Ok(Json(inquiries.product_requests.list(params.status, pagination).await?))
}

#[api_handler(
    get,
    path = "/api/admin/product-requests/{id}",
    params(("id" = String, Path, description = "Product request id")),
    responses((status = OK, body = ProductRequest), (status = NOT_FOUND, body = ErrorBody)),
    security(("bearer" = [])),
    tag = INQUIRIES_TAG,
)]
pub(crate) async fn get_product_request(
    _auth: Authorized<Backoffice>,
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<ProductRequest>, ApiError> {
    let inquiries = state.try_get_slice::<Inquiries>()?;
    let id = ResourceGuard::verify(id, PRODUCT_REQUEST)?;
    Ok(Json(inquiries.product_requests.get(&id).await?))
}

#[api_handler(
    patch,
    path = "/api/admin/product-requests/{id}",
    params(("id" = String, Path, description = "Product request id")),
    request_body = UpdateProductRequest,
    responses(
        (status = OK, body = ProductRequest),
        (status = BAD_REQUEST, body = ErrorBody),
        (status = NOT_FOUND, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = INQUIRIES_TAG,
)]
pub(crate) async fn update_product_request(
    auth: Authorized<Backoffice>,
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(update): Json<UpdateProductRequest>,
) -> Result<Json<ProductRequest>, ApiError> {
    let inquiries = state.try_get_slice::<Inquiries>()?;
    let id = ResourceGuard::verify(id, PRODUCT_REQUEST)?;
    let current = inquiries.product_requests.get(&id).await?;
    let updated = inquiries.product_requests.replace(&update.apply(current, time::now())?).await?;

    info!(%id, status = %updated.status, by = auth.subject(), "Product request updated");
    Ok(Json(updated))
}

#[api_handler(
    delete,
    path = "/api/admin/product-requests/{id}",
    params(("id" = String, Path, description = "Product request id")),
    responses((status = NO_CONTENT, description = "Deleted"), (status = NOT_FOUND, body = ErrorBody)),
    security(("bearer" = [])),
    tag = INQUIRIES_TAG,
)]
pub(crate) async fn delete_product_request(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let inquiries = state.try_get_slice::<Inquiries>()?;
    let id = ResourceGuard::verify(id, PRODUCT_REQUEST)?;
    inquiries.product_requests.delete(&id).await?;

    info!(%id, by = auth.subject(), "Product request deleted");
    Ok(StatusCode::NO_CONTENT)
}
