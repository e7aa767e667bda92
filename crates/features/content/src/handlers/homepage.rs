use crate::Content;
use crate::model::{HomepageContent, HomepageContentInput};
use atelier_derive::api_handler;
use atelier_identity::{AdminOnly, Authorized};
use atelier_kernel::domain::constants::{CONTENT_TAG, HOMEPAGE_CONTENT};
use atelier_kernel::security::resource::ResourceGuard;
use atelier_kernel::server::{ApiError, ApiState, ErrorBody, Json, Path};
use atelier_kernel::{time, validation};
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

#[api_handler(
    get,
    path = "/api/homepage",
    responses((status = OK, description = "Active sections by position", body = [HomepageContent])),
    tag = CONTENT_TAG,
)]
pub(crate) async fn list_active_sections(
    State(state): State<ApiState>,
) -> Result<Json<Vec<HomepageContent>>, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    Ok(Json(content.homepage.list(true).await?))
}

#[api_handler(
    get,
    path = "/api/homepage/{section}",
    params(("section" = String, Path, description = "Section slug")),
    responses((status = OK, body = HomepageContent), (status = NOT_FOUND, body = ErrorBody)),
    tag = CONTENT_TAG,
)]
pub(crate) async fn get_active_section(
    State(state): State<ApiState>,
    Path(section): Path<String>,
) -> Result<Json<HomepageContent>, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    let section = ResourceGuard::verify(section, HOMEPAGE_CONTENT)?;
    Ok(Json(content.homepage.get(&section, true).await?))
}

#[api_handler(
    get,
    path = "/api/admin/homepage",
    responses((status = OK, body = [HomepageContent])),
    security(("bearer" = [])),
    tag = CONTENT_TAG,
)]
pub(crate) async fn list_sections(
    _auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
) -> Result<Json<Vec<HomepageContent>>, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    Ok(Json(content.homepage.list(false).await?))
}

#[api_handler(
    put,
    path = "/api/admin/homepage/{section}",
    params(("section" = String, Path, description = "Section slug")),
    request_body = HomepageContentInput,
    responses((status = OK, body = HomepageContent), (status = BAD_REQUEST, body = ErrorBody)),
    security(("bearer" = [])),
    tag = CONTENT_TAG,
)]
pub(crate) async fn put_section(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Path(section): Path<String>,
    Json(input): Json<HomepageContentInput>,
) -> Result<Json<HomepageContent>, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    let section = validation::slug("section", &section)?;
    let now = time::now();
    let stored = content.homepage.upsert(input.into_section(section, now, now)?).await?;

    info!(section = %stored.section, elements = stored.elements.len(), by = auth.subject(), "Homepage section saved");
    Ok(Json(stored))
}

#[api_handler(
    delete,
    path = "/api/admin/homepage/{section}",
    params(("section" = String, Path, description = "Section slug")),
    responses((status = NO_CONTENT), (status = NOT_FOUND, body = ErrorBody)),
    security(("bearer" = [])),
    tag = CONTENT_TAG,
)]
pub(crate) async fn delete_section(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Path(section): Path<String>,
) -> Result<StatusCode, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    let section = ResourceGuard::verify(section, HOMEPAGE_CONTENT)?;
    content.homepage.delete(&section).await?;

    info!(%section, by = auth.subject(), "Homepage section deleted");
    Ok(StatusCode::NO_CONTENT)
}
