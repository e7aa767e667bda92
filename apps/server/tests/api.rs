use atelier::domain::config::ApiConfig;
use atelier::domain::roles::Role;
use atelier_server::Server;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestServer {
    router: Router,
    admin: String,
}

async fn server() -> TestServer {
    let mut config = ApiConfig::default();
    config.database.namespace = "test".to_owned();
    config.database.database = "server".to_owned();
    config.security.identity.jwt.secret = "server-tests-secret-0123456789".to_owned();

    let admin = atelier::features::identity::build(&config).unwrap().issue("root", Role::Admin).unwrap();
    let server = Server::builder().config(config).build().await.unwrap();
    TestServer { router: server.router(), admin }
}

impl TestServer {
    async fn raw(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, String) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            },
            None => Body::empty(),
        };

        let response = self.router.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn call(&self, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let (status, text) = self.raw(method, uri, token, body).await;
        let json = if text.is_empty() { Value::Null } else { serde_json::from_str(&text).unwrap() };
        (status, json)
    }
}

#[tokio::test]
async fn health_reports_up() {
    let app = server().await;

    let (status, body) = app.call(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn api_reference_lists_every_slice() {
    let app = server().await;

    let (status, page) = app.raw(Method::GET, "/api", None, None).await;
    assert_eq!(status, StatusCode::OK);
    for path in [
        "/api/contact",
        "/api/menus",
        "/api/navbar",
        "/api/hero-sections",
        "/api/homepage",
        "/api/signup-popup",
        "/api/products",
        "/api/quote-requests/track",
        "/api/admin/sms/send",
    ] {
        assert!(page.contains(path), "missing {path}");
    }
    assert!(page.contains("bearer"));
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let app = server().await;
    let (status, _) = app.raw(Method::GET, "/api/nothing-here", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn quote_for_catalog_product_can_be_tracked() {
    let app = server().await;

    let (status, product) = app
        .call(
            Method::POST,
            "/api/admin/products",
            Some(&app.admin),
            Some(json!({
                "sku": "hb-30",
                "name": "Birkin 30",
                "brand": "Hermes",
                "priceCents": 2_350_000,
                "condition": "excellent"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{product}");
    let product_id = product["id"].as_str().unwrap();

    let (status, quote) = app
        .call(
            Method::POST,
            "/api/quote-requests",
            None,
            Some(json!({
                "name": "Grace",
                "email": "grace@example.com",
                "productId": product_id,
                "productName": "Birkin 30"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{quote}");
    assert_eq!(quote["productId"], product_id);

    let reference = quote["referenceNumber"].as_str().unwrap();
    let (status, tracked) = app
        .call(
            Method::GET,
            &format!("/api/quote-requests/track?reference={reference}&email=grace%40example.com"),
            None,
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{tracked}");
    assert_eq!(tracked["status"], "pending");
    assert_eq!(tracked["productName"], "Birkin 30");
}

#[tokio::test]
async fn malformed_json_uses_the_error_body() {
    let app = server().await;

    let (status, text) = app.raw(Method::POST, "/api/contact", None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(body["status"], "fail");
}
