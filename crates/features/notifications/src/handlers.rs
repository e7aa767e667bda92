use crate::Notifications;
use crate::model::{BulkSms, BulkSmsReport, ListSmsLogs, SendSms, SmsLog};
use crate::phone;
use atelier_derive::api_handler;
use atelier_identity::{AdminOnly, Authorized};
use atelier_kernel::domain::constants::NOTIFICATIONS_TAG;
use atelier_kernel::server::{ApiError, ApiState, ErrorBody, Json, Page, Pagination, Query};
use axum::extract::State;
use tracing::info;

#[api_handler(
    post,
    path = "/api/admin/sms/send",
    request_body = SendSms,
    responses(
        (status = OK, description = "Message accepted by the provider", body = SmsLog),
        (status = BAD_REQUEST, description = "Invalid number or body", body = ErrorBody),
        (status = TOO_MANY_REQUESTS, description = "Recipient window is full", body = ErrorBody),
        (status = BAD_GATEWAY, description = "Provider failure", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = NOTIFICATIONS_TAG,
)]
pub(crate) async fn send_sms(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Json(input): Json<SendSms>,
) -> Result<Json<SmsLog>, ApiError> {
    let notifications = state.try_get_slice::<Notifications>()?;
    info!(by = auth.subject(), "Manual SMS requested");
    Ok(Json(notifications.send(&input.to, &input.body).await?))
}

#[api_handler(
    post,
    path = "/api/admin/sms/bulk",
    request_body = BulkSms,
    responses(
        (status = OK, description = "One result per recipient", body = BulkSmsReport),
        (status = BAD_REQUEST, description = "Invalid body or recipient count", body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = NOTIFICATIONS_TAG,
)]
pub(crate) async fn send_bulk_sms(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Json(input): Json<BulkSms>,
) -> Result<Json<BulkSmsReport>, ApiError> {
    let notifications = state.try_get_slice::<Notifications>()?;
    info!(recipients = input.recipients.len(), by = auth.subject(), "Bulk SMS requested");
    Ok(Json(notifications.send_bulk(&input.recipients, &input.body).await?))
}

#[api_handler(
    get,
    path = "/api/admin/sms/logs",
    params(ListSmsLogs),
    responses((status = OK, description = "Newest attempts first", body = Page<SmsLog>)),
    security(("bearer" = [])),
    tag = NOTIFICATIONS_TAG,
)]
pub(crate) async fn list_sms_logs(
    _auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Query(params): Query<ListSmsLogs>,
) -> Result<Json<Page<SmsLog>>, ApiError> {
    let notifications = state.try_get_slice::<Notifications>()?;
    let pagination = Pagination::new(params.page, params.limit);
    let to = params
        .to
        .map(|raw| phone::normalize(&raw).unwrap_or_else(|_| raw.trim().to_owned()))
        .filter(|to| !to.is_empty());
    Ok(Json(notifications.logs.list(params.status, to, pagination).await?))
}
