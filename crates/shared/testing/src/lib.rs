//! # Atelier Testing
//!
//! In-memory harness for slice integration tests: a `mem://` store with the slice's
//! migrations, an [`ApiState`] holding the identity slice plus the slice under test,
//! and bearer tokens for every role.

use atelier_database::{Database, Migration};
use atelier_event_bus::EventBus;
use atelier_kernel::domain::config::ApiConfig;
use atelier_kernel::domain::registry::InitializedSlice;
use atelier_kernel::domain::roles::Role;
use atelier_kernel::server::ApiState;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use utoipa_axum::router::OpenApiRouter;

/// One slice mounted on an in-memory store, with tokens for each role.
#[derive(Debug, Clone)]
pub struct TestApp {
    pub router: Router,
    pub events: EventBus,
    pub database: Database,
    pub admin: String,
    pub staff: String,
    pub customer: String,
}

impl TestApp {
    /// Builds the harness for the slice called `name`.
    ///
    /// # Panics
    /// When the store, the migrations or the state registry fail to initialize.
    pub async fn spawn<F>(
        name: &'static str,
        migrations: &[Migration],
        router: OpenApiRouter<ApiState>,
        init: F,
    ) -> Self
    where
        F: FnOnce(&Database) -> InitializedSlice,
    {
        let mut config = ApiConfig::default();
        config.security.identity.jwt.secret = format!("{name}-tests-secret-0123456789");

        let database = Database::builder()
            .url("mem://")
            .session("test", name)
            .migrations(migrations.iter().cloned())
            .init()
            .await
            .expect("in-memory store");
        let identity = atelier_identity::build(&config).expect("identity keys");
        let events = EventBus::new();

        let state = ApiState::builder()
            .config(config.clone())
            .db(database.clone())
            .events(events.clone())
            .register_slice(atelier_identity::init(&config).expect("identity slice"))
            .register_slice(init(&database))
            .build()
            .expect("api state");

        let (router, _) = router.split_for_parts();
        let token = |subject: &str, role| identity.issue(subject, role).expect("signed token");
        Self {
            router: router.with_state(state),
            events,
            database,
            admin: token("root", Role::Admin),
            staff: token("clerk", Role::Staff),
            customer: token("buyer", Role::Customer),
        }
    }

    /// Sends one request; an empty response body comes back as [`Value::Null`].
    ///
    /// # Panics
    /// When the router fails or the response body is not JSON.
    pub async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
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

        let request = request.body(body).expect("request");
        let response = self.router.clone().oneshot(request).await.expect("infallible router");
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.expect("body");
        let json =
            if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).expect("json body") };
        (status, json)
    }
}
