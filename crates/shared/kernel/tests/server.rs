#![cfg(feature = "server")]

use atelier_database::Database;
use atelier_kernel::domain::config::ApiConfig;
use atelier_kernel::server::router::system_router;
use atelier_kernel::server::{ApiError, ApiState, Json, Pagination, Query};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn state() -> ApiState {
    let db = Database::builder().url("mem://").session("kernel", "tests").init().await.unwrap();
    ApiState::builder().config(ApiConfig::default()).db(db).build().unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), 64 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[derive(Debug, serde::Deserialize)]
struct Echo {
    name: String,
}

#[derive(Debug, serde::Deserialize)]
struct ListQuery {
    page: Option<u32>,
    limit: Option<u32>,
}

async fn echo(Query(query): Query<ListQuery>, Json(echo): Json<Echo>) -> Result<Json<Value>, ApiError> {
    if echo.name == "boom" {
        return Err(ApiError::from("database exploded"));
    }
    let pagination = Pagination::new(query.page, query.limit);
    Ok(Json(json!({ "name": echo.name, "limit": pagination.limit() })))
}

fn echo_app() -> Router {
    Router::new().route("/echo", post(echo))
}

fn post_json(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri).header("content-type", "application/json").body(Body::from(body.to_owned())).unwrap()
}

#[tokio::test]
async fn health_reports_up_without_caching() {
    let app: Router = system_router().with_state(state().await).split_for_parts().0;

    let response =
        app.oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["cache-control"], "no-store, no-cache, must-revalidate");
    let body = body_json(response).await;
    assert_eq!(body["status"], "up");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn extractors_reject_with_uniform_body() {
    let response = echo_app().oneshot(post_json("/echo", "{not json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["status"], "fail");

    let response = echo_app().oneshot(post_json("/echo?limit=many", r#"{"name":"a"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = echo_app().oneshot(post_json("/echo?limit=500", r#"{"name":"a"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "name": "a", "limit": 100 }));
}

#[tokio::test]
async fn server_errors_hide_details() {
    let response = echo_app().oneshot(post_json("/echo", r#"{"name":"boom"}"#)).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "status": "error", "message": "Internal server error" })
    );
}

#[tokio::test]
async fn client_errors_expose_their_message() {
    let response = ApiError::not_found("Menu 'footer' not found").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        body_json(response).await,
        json!({ "status": "fail", "message": "Menu 'footer' not found" })
    );

    let response = ApiError::from_status(429, "slow down").into_response();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn missing_slice_is_a_server_error() {
    #[derive(Debug)]
    struct Unregistered;
    impl atelier_kernel::domain::registry::FeatureSlice for Unregistered {
        fn name(&self) -> &'static str {
            "unregistered"
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    let state = state().await;
    let err: ApiError = state.try_get_slice::<Unregistered>().unwrap_err().into();
    assert_eq!(err.status_code(), 500);
}

#[derive(Debug)]
struct Probe;

impl atelier_kernel::domain::registry::FeatureSlice for Probe {
    fn name(&self) -> &'static str {
        "probe"
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }
}

#[tokio::test]
async fn slices_are_registered_once_by_type() {
    use atelier_kernel::domain::registry::InitializedSlice;

    let db = Database::builder().url("mem://").session("kernel", "slices").init().await.unwrap();
    let state = ApiState::builder()
        .config(ApiConfig::default())
        .db(db.clone())
        .register_slice(InitializedSlice::new(Probe))
        .build()
        .unwrap();
    assert_eq!(state.slice_names(), vec!["probe"]);
    assert!(state.get_slice::<Probe>().is_some());

    let duplicate = ApiState::builder()
        .config(ApiConfig::default())
        .db(db)
        .register_slices([InitializedSlice::new(Probe), InitializedSlice::new(Probe)])
        .build();
    assert!(duplicate.is_err());
}
