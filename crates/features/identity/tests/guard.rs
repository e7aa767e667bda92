use atelier_database::Database;
use atelier_identity::{AdminOnly, Authorized, Backoffice, Identity};
use atelier_kernel::domain::config::ApiConfig;
use atelier_kernel::domain::registry::InitializedSlice;
use atelier_kernel::domain::roles::Role;
use atelier_kernel::server::ApiState;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::routing::get;
use tower::ServiceExt;

fn config() -> ApiConfig {
    let mut config = ApiConfig::default();
    config.security.identity.jwt.secret = "guard-test-secret-0123456789".to_owned();
    config
}

async fn app() -> (Router, Identity) {
    let config = config();
    let identity = atelier_identity::build(&config).unwrap();
    let database = Database::builder().url("mem://").session("test", "identity").init().await.unwrap();
    let state = ApiState::builder()
        .config(config)
        .db(database)
        .register_slice(InitializedSlice::new(identity.clone()))
        .build()
        .unwrap();

    let router = Router::new()
        .route("/admin", get(|auth: Authorized<AdminOnly>| async move { auth.claims.sub }))
        .route("/backoffice", get(|auth: Authorized<Backoffice>| async move { auth.claims.sub }))
        .with_state(state);
    (router, identity)
}

async fn call(router: &Router, uri: &str, token: Option<&str>) -> StatusCode {
    let mut request = Request::builder().uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let response = router.clone().oneshot(request.body(Body::empty()).unwrap()).await.unwrap();
    response.status()
}

#[tokio::test]
async fn missing_or_garbage_tokens_are_unauthorized() {
    let (router, _) = app().await;

    assert_eq!(call(&router, "/admin", None).await, StatusCode::UNAUTHORIZED);
    assert_eq!(call(&router, "/admin", Some("not-a-jwt")).await, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn roles_are_checked_per_policy() {
    let (router, identity) = app().await;
    let admin = identity.issue("root", Role::Admin).unwrap();
    let staff = identity.issue("clerk", Role::Staff).unwrap();
    let customer = identity.issue("buyer", Role::Customer).unwrap();

    assert_eq!(call(&router, "/admin", Some(&admin)).await, StatusCode::OK);
    assert_eq!(call(&router, "/admin", Some(&staff)).await, StatusCode::FORBIDDEN);
    assert_eq!(call(&router, "/backoffice", Some(&staff)).await, StatusCode::OK);
    assert_eq!(call(&router, "/backoffice", Some(&admin)).await, StatusCode::OK);
    assert_eq!(call(&router, "/backoffice", Some(&customer)).await, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn tokens_from_another_deployment_are_rejected() {
    let (router, _) = app().await;
    let mut other = config();
    other.security.identity.jwt.secret = "some-other-deployment-secret".to_owned();
    let foreign = atelier_identity::build(&other).unwrap().issue("root", Role::Admin).unwrap();

    assert_eq!(call(&router, "/admin", Some(&foreign)).await, StatusCode::UNAUTHORIZED);
}

#[test]
fn default_development_secret_is_accepted_but_short_ones_are_not() {
    assert!(atelier_identity::build(&ApiConfig::default()).is_ok());

    let mut weak = config();
    weak.security.identity.jwt.secret = "tiny".to_owned();
    assert!(atelier_identity::build(&weak).is_err());
}
