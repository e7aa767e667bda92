use crate::Contact;
use crate::model::{ContactSubmission, ListSubmissions, NewContactSubmission, UpdateSubmissionStatus};
use atelier_derive::api_handler;
use atelier_identity::{AdminOnly, Authorized, Backoffice};
use atelier_kernel::domain::constants::{CONTACT_SUBMISSION, CONTACT_TAG};
use atelier_kernel::domain::events::ContactSubmitted;
use atelier_kernel::security::resource::ResourceGuard;
use atelier_kernel::server::{ApiError, ApiState, ErrorBody, Json, Page, Pagination, Path, Query};
use axum::extract::State;
use axum::http::StatusCode;
use tracing::info;

#[api_handler(
    post,
    path = "/api/contact",
    request_body = NewContactSubmission,
    responses(
        (status = CREATED, description = "Submission stored", body = ContactSubmission),
        (status = BAD_REQUEST, description = "Invalid form", body = ErrorBody),
    ),
    tag = CONTACT_TAG,
)]
pub(crate) async fn submit_contact(
    State(state): State<ApiState>,
    Json(form): Json<NewContactSubmission>,
) -> Result<(StatusCode, Json<ContactSubmission>), ApiError> {
    let contact = state.try_get_slice::<Contact>()?;
    let stored = contact.submissions.create(&form.into_submission()?).await?;

    info!(id = %stored.id, "Contact submission received");
    state.publish(ContactSubmitted {
        id: stored.id.clone(),
        name: stored.name.clone(),
        email: stored.email.clone(),
        subject: stored.subject.clone(),
    });

    Ok((StatusCode::CREATED, Json(stored)))
}

#[api_handler(
    get,
    path = "/api/admin/contact",
    params(ListSubmissions),
    responses(
        (status = OK, description = "Newest submissions first", body = Page<ContactSubmission>),
        (status = UNAUTHORIZED, body = ErrorBody),
        (status = FORBIDDEN, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = CONTACT_TAG,
)]
pub(crate) async fn list_submissions(
    _auth: Authorized<Backoffice>,
    State(state): State<ApiState>,
    Query(params): Query<ListSubmissions>,
) -> Result<Json<Page<ContactSubmission>>, ApiError> {
    let contact = state.try_get_slice::<Contact>()?;
    let pagination = Pagination::new(params.page, params.limit);
    Ok(Json(contact.submissions.list(params.status, pagination).await?))
}

#[api_handler(
    get,
    path = "/api/admin/contact/{id}",
    params(("id" = String, Path, description = "Submission id")),
    responses(
        (status = OK, body = ContactSubmission),
        (status = NOT_FOUND, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = CONTACT_TAG,
)]
pub(crate) async fn get_submission(
    _auth: Authorized<Backoffice>,
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<ContactSubmission>, ApiError> {
    let contact = state.try_get_slice::<Contact>()?;
    let id = ResourceGuard::verify(id, CONTACT_SUBMISSION)?;
    Ok(Json(contact.submissions.get(&id).await?))
}

#[api_handler(
    patch,
    path = "/api/admin/contact/{id}",
    params(("id" = String, Path, description = "Submission id")),
    request_body = UpdateSubmissionStatus,
    responses(
        (status = OK, body = ContactSubmission),
        (status = NOT_FOUND, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = CONTACT_TAG,
)]
pub(crate) async fn update_submission_status(
    auth: Authorized<Backoffice>,
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(update): Json<UpdateSubmissionStatus>,
) -> Result<Json<ContactSubmission>, ApiError> {
    let contact = state.try_get_slice::<Contact>()?;
    let id = ResourceGuard::verify(id, CONTACT_SUBMISSION)?;
    let updated = contact.submissions.set_status(&id, update.status).await?;

    info!(%id, status = %update.status, by = auth.subject(), "Contact submission triaged");
    Ok(Json(updated))
}

#[api_handler(
    delete,
    path = "/api/admin/contact/{id}",
    params(("id" = String, Path, description = "Submission id")),
    responses(
        (status = NO_CONTENT, description = "Deleted"),
        (status = NOT_FOUND, body = ErrorBody),
    ),
    security(("bearer" = [])),
    tag = CONTACT_TAG,
)]
pub(crate) async fn delete_submission(
    auth: Authorized<AdminOnly>,
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let contact = state.try_get_slice::<Contact>()?;
    let id = ResourceGuard::verify(id, CONTACT_SUBMISSION)?;
    contact.submissions.delete(&id).await?;

    info!(%id, by = auth.subject(), "Contact submission deleted");
    Ok(StatusCode::NO_CONTENT)
}
