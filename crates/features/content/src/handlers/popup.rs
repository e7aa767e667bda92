use crate::Content;
use crate::model::{SignupPopup, SignupPopupInput};
use atelier_derive::api_handler;
use atelier_identity::{AdminOnly, Authorized};
use atelier_kernel::domain::constants::CONTENT_TAG;
use atelier_kernel::server::{ApiError, ApiState, ErrorBody, Json};
use atelier_kernel::time;
use axum::extract::State;
use tracing::info;

#[api_handler(
    get,
    path = "/api/signup-popup",
    responses((status = OK, description = "Current configuration, disabled when never saved", body = SignupPopup)),
    tag = CONTENT_TAG,
)]
pub(crate) async fn get_signup_popup(State(state): State<ApiState>) -> Result<Json<SignupPopup>, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    Ok(Json(content.popup.get().await?))
}

#[api_handler(
    put,
    path = "/api/admin/signup-popup",
    request_body = SignupPopupInput,
    responses((status = OK, body = SignupPopup), (status = BAD_REQUEST, body = ErrorBody)),
    security(("bearer" = [])),
    tag = CONTENT_TAG,
)]
pub(crate) async fn put_signup_popup(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Json(input): Json<SignupPopupInput>,
) -> Result<Json<SignupPopup>, ApiError> {
    let content = state.try_get_slice::<Content>()?;
    let stored = content.popup.save(&input.into_popup(time::now())?).await?;

    info!(enabled = stored.enabled, by = auth.subject(), "Signup popup saved");
    Ok(Json(stored))
}
