use crate::Inquiries;
use crate::model::{
    ListQuoteRequests, NewQuoteRequest, QuoteRequest, QuoteTracking, TrackQuote, UpdateQuoteRequest,
};
use atelier_derive::api_handler;
use atelier_identity::{AdminOnly, Authorized, Backoffice};
use atelier_kernel::domain::constants::{INQUIRIES_TAG, QUOTE_REQUEST};
use atelier_kernel::domain::events::{QuoteRequested, QuoteUpdated};
use atelier_kernel::security::resource::ResourceGuard;
use atelier_kernel::server::{ApiError, ApiState, ErrorBody, Json, Page, Pagination, Path, Query};
use atelier_kernel::time;
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

#[api_handler(
    post,
    path = "/api/quote-requests",
    request_body = NewQuoteRequest,
    responses(
        (status = CREATED, description = "Quote request stored with its reference number", body = QuoteRequest),
        (status = BAD_REQUEST, body = ErrorBody),
    ),
    tag = INQUIRIES_TAG,
)]
pub(crate) async fn submit_quote_request(
    State(state): State<ApiState>,
    Json(form): Json<NewQuoteRequest>,
) -> Result<(StatusCode, Json<QuoteRequest>), ApiError> {
    let inquiries = state.try_get_slice::<Inquiries>()?;
    let stored = inquiries.quotes.create(form.into_request(time::now())?).await?;

    info!(id = %stored.id, reference = %stored.reference_number, "Quote request received");
    state.publish(QuoteRequested {
        id: stored.id.clone(),
        reference_number: stored.reference_number.clone(),
        name: stored.name.clone(),
        email: stored.email.clone(),
        phone: stored.phone.clone(),
        product_name: stored.product_name.clone(),
        message: stored.message.clone(),
    });

    Ok((StatusCode::CREATED, Json(stored)))
}

#[api_handler(
    get,
    path = "/api/quote-requests/track",
    params(TrackQuote),
    responses(
        (status = OK, body = QuoteTracking),
        (status = NOT_FOUND, description = "Unknown reference or email mismatch", body = ErrorBody),
    ),
    tag = INQUIRIES_TAG,
)]
pub(crate) async fn track_quote_request(
    State(state): State<ApiState>,
    Query(params): Query<TrackQuote>,
) -> Result<Json<QuoteTracking>, ApiError> {
    let inquiries = state.try_get_slice::<Inquiries>()?;
    let quote = inquiries.quotes.track(&params.reference, &params.email).await?;
    Ok(Json(quote.into()))
}

#[api_handler(
    get,
    path = "/api/admin/quote-requests",
    params(ListQuoteRequests),
    responses(
        (status = OK, description = "Newest quotes first", body = Page<QuoteRequest>),
        (status = UNAUTHORIZED, body = ErrorBody),
        (status = FORBIDDEN, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = INQUIRIES_TAG,
)]
pub(crate) async fn list_quote_requests(
    _auth: Authorized<Backoffice>,
    State(state): State<ApiState>,
    Query(params): Query<ListQuoteRequests>,
) -> Result<Json<Page<QuoteRequest>>, ApiError> {
    let inquiries = state.try_get_slice::<Inquiries>()?;
    let pagination = Pagination::new(params.page, params.limit);
    Ok(Json(inquiries.quotes.list(params.status, pagination).await?))
}

#[api_handler(
    get,
    path = "/api/admin/quote-requests/{id}",
    params(("id" = String, Path, description = "Quote request id")),
    responses((status = OK, body = QuoteRequest), (status = NOT_FOUND, body = ErrorBody)),
    security(("bearer" = [])),
    tag = INQUIRIES_TAG,
)]
pub(crate) async fn get_quote_request(
    _auth: Authorized<Backoffice>,
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<QuoteRequest>, ApiError> {
    let inquiries = state.try_get_slice::<Inquiries>()?;
    let id = ResourceGuard::verify(id, QUOTE_REQUEST)?;
    Ok(Json(inquiries.quotes.get(&id).await?))
}

#[api_handler(
    patch,
    path = "/api/admin/quote-requests/{id}",
    params(("id" = String, Path, description = "Quote request id")),
    request_body = UpdateQuoteRequest,
    responses(
        (status = OK, body = QuoteRequest),
        (status = BAD_REQUEST, description = "Quoting without a price", body = ErrorBody),
        (status = NOT_FOUND, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = INQUIRIES_TAG,
)]
pub(crate) async fn update_quote_request(
    auth: Authorized<Backoffice>,
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(update): Json<UpdateQuoteRequest>,
) -> Result<Json<QuoteRequest>, ApiError> {
    let inquiries = state.try_get_slice::<Inquiries>()?;
    let id = ResourceGuard::verify(id, QUOTE_REQUEST)?;
    let current = inquiries.quotes.get(&id).await?;
    let previous = current.status;
    let updated = inquiries.quotes.replace(&update.apply(current, time::now())?).await?;

    info!(
        %id,
        reference = %updated.reference_number,
        status = %updated.status,
        by = auth.subject(),
        "Quote request updated"
    );
    if updated.status != previous {
        state.publish(QuoteUpdated {
            id: updated.id.clone(),
            reference_number: updated.reference_number.clone(),
            name: updated.name.clone(),
            email: updated.email.clone(),
            product_name: updated.product_name.clone(),
            status: updated.status.to_string(),
            quoted_price_cents: updated.quoted_price_cents,
        });
    }

    Ok(Json(updated))
}

#[api_handler(
    delete,
    path = "/api/admin/quote-requests/{id}",
    params(("id" = String, Path, description = "Quote request id")),
    responses((status = NO_CONTENT, description = "Deleted"), (status = NOT_FOUND, body = ErrorBody)),
    security(("bearer" = [])),
    tag = INQUIRIES_TAG,
)]
pub(crate) async fn delete_quote_request(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let inquiries = state.try_get_slice::<Inquiries>()?;
    let id = ResourceGuard::verify(id, QUOTE_REQUEST)?;
    inquiries.quotes.delete(&id).await?;

    info!(%id, by = auth.subject(), "Quote request deleted");
    Ok(StatusCode::NO_CONTENT)
}
