use crate::Navigation;
use crate::model::{Menu, MenuInput};
use atelier_derive::api_handler;
use atelier_identity::{AdminOnly, Authorized};
use atelier_kernel::domain::constants::{MENU, NAVIGATION_TAG};
use atelier_kernel::security::resource::ResourceGuard;
use atelier_kernel::server::{ApiError, ApiState, ErrorBody, Json, Path};
use atelier_kernel::{time, validation};
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

#[api_handler(
    get,
    path = "/api/menus",
    responses((status = OK, body = [Menu])),
    tag = NAVIGATION_TAG,
)]
pub(crate) async fn list_menus(State(state): State<ApiState>) -> Result<Json<Vec<Menu>>, ApiError> {
    let navigation = state.try_get_slice::<Navigation>()?;
    Ok(Json(navigation.menus.list().await?))
}

#[api_handler(
    get,
    path = "/api/menus/{name}",
    params(("name" = String, Path, description = "Menu name")),
    responses((status = OK, body = Menu), (status = NOT_FOUND, body = ErrorBody)),
    tag = NAVIGATION_TAG,
)]
pub(crate) async fn get_menu(
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> Result<Json<Menu>, ApiError> {
    let navigation = state.try_get_slice::<Navigation>()?;
    let name = ResourceGuard::verify(name, MENU)?;
    Ok(Json(navigation.menus.get(&name).await?))
}

#[api_handler(
    put,
    path = "/api/admin/menus/{name}",
    params(("name" = String, Path, description = "Menu name (slug)")),
    request_body = MenuInput,
    responses((status = OK, body = Menu), (status = BAD_REQUEST, body = ErrorBody)),
    security(("bearer" = [])),
    tag = NAVIGATION_TAG,
)]
pub(crate) async fn put_menu(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Path(name): Path<String>,
    Json(input): Json<MenuInput>,
) -> Result<Json<Menu>, ApiError> {
    let navigation = state.try_get_slice::<Navigation>()?;
    let name = validation::slug("name", &name)?;
    let stored = navigation.menus.upsert(input.into_menu(name, time::now())?).await?;

    info!(name = %stored.name, items = stored.items.len(), by = auth.subject(), "Menu saved");
    Ok(Json(stored))
}

#[api_handler(
    delete,
    path = "/api/admin/menus/{name}",
    params(("name" = String, Path, description = "Menu name")),
    responses((status = NO_CONTENT), (status = NOT_FOUND, body = ErrorBody)),
    security(("bearer" = [])),
    tag = NAVIGATION_TAG,
)]
pub(crate) async fn delete_menu(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
    let navigation = state.try_get_slice::<Navigation>()?;
    let name = ResourceGuard::verify(name, MENU)?;
    navigation.menus.delete(&name).await?;

    info!(%name, by = auth.subject(), "Menu deleted");
    Ok(StatusCode::NO_CONTENT)
}
