use crate::Content;
use crate::model::{ContentBlock, ContentBlockInput};
use atelier_derive::api_handler;
use atelier_identity::{AdminOnly, Authorized};
use atelier_kernel::domain::constants::{CONTENT, CONTENT_TAG};
use atelier_kernel::security::resource::ResourceGuard;
use atelier_kernel::server::{ApiError, ApiState, ErrorBody, Json, Path};
use atelier_kernel::{time, validation};
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

#[api_handler(
    get,
    path = "/api/content",
    responses((status = OK, description = "Active content blocks", body = [ContentBlock])),
    tag = CONTENT_TAG,
)]
pub(crate) async fn list_active_blocks(State(state): State<ApiState>) -> Result<Json<Vec<ContentBlock>>, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    Ok(Json(content.blocks.list(true).await?))
}

#[api_handler(
    get,
    path = "/api/content/{key}",
    params(("key" = String, Path, description = "Content key")),
    responses(
        (status = OK, body = ContentBlock),
        (status = NOT_FOUND, description = "Unknown or inactive", body = ErrorBody),
    ),
    tag = CONTENT_TAG,
)]
pub(crate) async fn get_active_block(
    State(state): State<ApiState>,
    Path(key): Path<String>,
) -> Result<Json<ContentBlock>, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    let key = ResourceGuard::verify(key, CONTENT)?;
    Ok(Json(content.blocks.get(&key, true).await?))
}

#[api_handler(
    get,
    path = "/api/admin/content",
    responses((status = OK, description = "All content blocks", body = [ContentBlock])),
    security(("bearer" = [])),
    tag = CONTENT_TAG,
)]
pub(crate) async fn list_blocks(
    _auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
) -> Result<Json<Vec<ContentBlock>>, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    Ok(Json(content.blocks.list(false).await?))
}

#[api_handler(
    put,
    path = "/api/admin/content/{key}",
    params(("key" = String, Path, description = "Content key (slug)")),
    request_body = ContentBlockInput,
    responses(
        (status = OK, description = "Created or replaced", body = ContentBlock),
        (status = BAD_REQUEST, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = CONTENT_TAG,
)]
pub(crate) async fn put_block(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Path(key): Path<String>,
    Json(input): Json<ContentBlockInput>,
) -> Result<Json<ContentBlock>, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    let key = validation::slug("key", &key)?;
    let now = time::now();
    let stored = content.blocks.upsert(input.into_block(key, now, now)?).await?;

    info!(key = %stored.key, by = auth.subject(), "Content block saved");
    Ok(Json(stored))
}

#[api_handler(
    delete,
    path = "/api/admin/content/{key}",
    params(("key" = String, Path, description = "Content key")),
    responses((status = NO_CONTENT), (status = NOT_FOUND, body = ErrorBody)),
    security(("bearer" = [])),
    tag = CONTENT_TAG,
)]
pub(crate) async fn delete_block(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Path(key): Path<String>,
) -> Result<StatusCode, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    let key = ResourceGuard::verify(key, CONTENT)?;
    content.blocks.delete(&key).await?;

    info!(%key, by = auth.subject(), "Content block deleted");
    Ok(StatusCode::NO_CONTENT)
}
