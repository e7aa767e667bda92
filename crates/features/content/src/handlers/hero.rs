use crate::Content;
use crate::model::{HeroSection, HeroSectionInput};
use atelier_derive::api_handler;
use atelier_identity::{AdminOnly, Authorized};
use atelier_kernel::domain::constants::{CONTENT_TAG, HERO_SECTION};
use atelier_kernel::security::resource::ResourceGuard;
use atelier_kernel::server::{ApiError, ApiState, ErrorBody, Json, Path};
use atelier_kernel::time;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

#[api_handler(
    get,
    path = "/api/hero-sections",
    responses((status = OK, description = "Active sections by position", body = [HeroSection])),
    tag = CONTENT_TAG,
)]
pub(crate) async fn list_active_heroes(State(state): State<ApiState>) -> Result<Json<Vec<HeroSection>>, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    Ok(Json(content.heroes.list(true).await?))
}

#[api_handler(
    get,
    path = "/api/admin/hero-sections",
    responses((status = OK, body = [HeroSection])),
    security(("bearer" = [])),
    tag = CONTENT_TAG,
)]
pub(crate) async fn list_heroes(
    _auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
) -> Result<Json<Vec<HeroSection>>, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    Ok(Json(content.heroes.list(false).await?))
}

#[api_handler(
    post,
    path = "/api/admin/hero-sections",
    request_body = HeroSectionInput,
    responses((status = CREATED, body = HeroSection), (status = BAD_REQUEST, body = ErrorBody)),
    security(("bearer" = [])),
    tag = CONTENT_TAG,
)]
pub(crate) async fn create_hero(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Json(input): Json<HeroSectionInput>,
) -> Result<(StatusCode, Json<HeroSection>), ApiError> {
    let content = state.try_get_slice::<Content>()?;
    let now = time::now();
    let stored = content.heroes.create(&input.into_section(now, now)?).await?;

    info!(id = %stored.id, by = auth.subject(), "Hero section created");
    Ok((StatusCode::CREATED, Json(stored)))
}

#[api_handler(
    put,
    path = "/api/admin/hero-sections/{id}",
    params(("id" = String, Path, description = "Hero section id")),
    request_body = HeroSectionInput,
    responses(
        (status = OK, body = HeroSection),
        (status = BAD_REQUEST, body = ErrorBody),
        (status = NOT_FOUND, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = CONTENT_TAG,
)]
pub(crate) async fn replace_hero(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(input): Json<HeroSectionInput>,
) -> Result<Json<HeroSection>, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    let id = ResourceGuard::verify(id, HERO_SECTION)?;
    let now = time::now();
    let stored = content.heroes.replace(&id, input.into_section(now, now)?).await?;

    info!(%id, by = auth.subject(), "Hero section replaced");
    Ok(Json(stored))
}

#[api_handler(
    delete,
    path = "/api/admin/hero-sections/{id}",
    params(("id" = String, Path, description = "Hero section id")),
    responses((status = NO_CONTENT), (status = NOT_FOUND, body = ErrorBody)),
    security(("bearer" = [])),
    tag = CONTENT_TAG,
)]
pub(crate) async fn delete_hero(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    let id = ResourceGuard::verify(id, HERO_SECTION)?;
    content.heroes.delete(&id).await?;

    info!(%id, by = auth.subject(), "Hero section deleted");
    Ok(StatusCode::NO_CONTENT)
}
