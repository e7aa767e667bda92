#![allow(dead_code)]

use atelier_database::Database;
use atelier_event_bus::EventBus;
use atelier_kernel::domain::config::ApiConfig;
use atelier_kernel::domain::roles::Role;
use atelier_kernel::server::ApiState;
use atelier_notifications::Notifications;
use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;

pub const ACCOUNT_SID: &str = "AC0123456789";

pub struct TestApp {
    pub router: Router,
    pub events: EventBus,
    pub notifications: Notifications,
    pub admin: String,
    pub staff: String,
}

/// Configuration with both channels pointed at `mock_uri`.
pub fn config(mock_uri: &str) -> ApiConfig {
    let mut config = ApiConfig::default();
    config.security.identity.jwt.secret = "notifications-tests-secret-0123".to_owned();

    let sms = &mut config.notifications.sms;
    sms.enabled = true;
    sms.api_url = mock_uri.to_owned();
    sms.account_sid = ACCOUNT_SID.to_owned();
    sms.auth_token = "token".to_owned();
    sms.from_number = "+15005550006".to_owned();
    sms.rate_limit.max_messages = 2;

    let mail = &mut config.notifications.mail;
    mail.enabled = true;
    mail.api_url = mock_uri.to_owned();
    mail.api_key = "mail-key".to_owned();

    config.notifications.admin_email = Some("desk@atelier.example".to_owned());
    config.notifications.admin_phone = Some("(415) 555-0199".to_owned());
    config
}

/// Default channels (log only) with a usable signing secret.
pub fn disabled() -> ApiConfig {
    let mut config = ApiConfig::default();
    config.security.identity.jwt.secret = "notifications-tests-secret-0123".to_owned();
    config
}

pub async fn app(config: ApiConfig) -> TestApp {
    let database = Database::builder()
        .url("mem://")
        .session("test", "notifications")
        .migrations(atelier_notifications::MIGRATIONS.iter().cloned())
        .init()
        .await
        .unwrap();
    let identity = atelier_identity::build(&config).unwrap();
    let notifications = atelier_notifications::build(&config, &database).unwrap();
    let events = EventBus::new();

    let state = ApiState::builder()
        .config(config.clone())
        .db(database.clone())
        .events(events.clone())
        .register_slice(atelier_identity::init(&config).unwrap())
        .register_slice(atelier_kernel::domain::registry::InitializedSlice::new(notifications.clone()))
        .build()
        .unwrap();

    let (router, _) = atelier_notifications::router().split_for_parts();
    TestApp {
        router: router.with_state(state),
        events,
        notifications,
        admin: identity.issue("root", Role::Admin).unwrap(),
        staff: identity.issue("clerk", Role::Staff).unwrap(),
    }
}

impl TestApp {
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

        let response = self.router.clone().oneshot(request.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }
}
