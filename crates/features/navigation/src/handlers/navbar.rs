use crate::Navigation;
use crate::model::{Navbar, NavbarInput};
use atelier_derive::api_handler;
use atelier_identity::{AdminOnly, Authorized};
use atelier_kernel::domain::constants::NAVIGATION_TAG;
use atelier_kernel::server::{ApiError, ApiState, ErrorBody, Json};
use atelier_kernel::time;
use axum::extract::State;
use tracing::info;

#[api_handler(
    get,
    path = "/api/navbar",
    responses((status = OK, description = "Saved navbar, empty when never saved", body = Navbar)),
    tag = NAVIGATION_TAG,
)]
pub(crate) async fn get_navbar(State(state): State<ApiState>) -> Result<Json<Navbar>, ApiError> {
    let navigation = state.try_get_slice::<Navigation>()?;
    Ok(Json(navigation.navbar.get().await?))
}

#[api_handler(
    put,
    path = "/api/admin/navbar",
    request_body = NavbarInput,
    responses((status = OK, body = Navbar), (status = BAD_REQUEST, body = ErrorBody)),
    security(("bearer" = [])),
    tag = NAVIGATION_TAG,
)]
pub(crate) async fn put_navbar(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Json(input): Json<NavbarInput>,
) -> Result<Json<Navbar>, ApiError> {
    let navigation = state.try_get_slice::<Navigation>()?;
    let stored = navigation.navbar.save(&input.into_navbar(time::now())?).await?;

    info!(items = stored.items.len(), by = auth.subject(), "Navbar saved");
    Ok(Json(stored))
}
