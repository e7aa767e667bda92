mod common;

use atelier_kernel::domain::events::{QuoteRequested, QuoteUpdated};
use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{basic_auth, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MESSAGES_PATH: &str = "/2010-04-01/Accounts/AC0123456789/Messages.json";

async fn sms_accepting(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(MESSAGES_PATH))
        .and(basic_auth(common::ACCOUNT_SID, "token"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "sid": "SM123", "status": "queued" })))
        .mount(server)
        .await;
}

async fn mail_accepting(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/emails"))
        .and(header("authorization", "Bearer mail-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "mail-1" })))
        .mount(server)
        .await;
}

async fn wait_for_requests(server: &MockServer, expected: usize) -> Vec<wiremock::Request> {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let received = server.received_requests().await.unwrap_or_default();
            if received.len() >= expected {
                return received;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("provider calls arrive")
}

#[tokio::test]
async fn send_normalises_number_and_records_provider_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MESSAGES_PATH))
        .and(body_string_contains("To=%2B14155550100"))
        .and(body_string_contains("From=%2B15005550006"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "sid": "SM123" })))
        .expect(1)
        .mount(&server)
        .await;
    let app = common::app(common::config(&server.uri())).await;

    let (status, body) = app
        .call(
            Method::POST,
            "/api/admin/sms/send",
            Some(&app.admin),
            Some(json!({ "to": "(415) 555-0100", "body": "Your Kelly is ready for pickup" })),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["status"], "sent");
    assert_eq!(body["to"], "+14155550100");
    assert_eq!(body["providerMessageId"], "SM123");
}

#[tokio::test]
async fn invalid_number_is_logged_and_rejected() {
    let server = MockServer::start().await;
    sms_accepting(&server).await;
    let app = common::app(common::config(&server.uri())).await;

    let (status, body) = app
        .call(Method::POST, "/api/admin/sms/send", Some(&app.admin), Some(json!({ "to": "555-0100", "body": "hi" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "fail");

    let (_, logs) = app.call(Method::GET, "/api/admin/sms/logs?status=invalid", Some(&app.admin), None).await;
    assert_eq!(logs["total"], 1);
    assert_eq!(logs["items"][0]["to"], "555-0100");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn recipient_window_is_enforced() {
    let server = MockServer::start().await;
    sms_accepting(&server).await;
    let app = common::app(common::config(&server.uri())).await;
    let send = json!({ "to": "+44 20 7946 0958", "body": "Private viewing tomorrow" });

    for _ in 0..2 {
        let (status, _) =
            app.call(Method::POST, "/api/admin/sms/send", Some(&app.admin), Some(send.clone())).await;
        assert_eq!(status, StatusCode::OK);
        tokio::time::sleep(Duration::from_millis(3)).await;
    }
    let (status, _) = app.call(Method::POST, "/api/admin/sms/send", Some(&app.admin), Some(send)).await;
    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);

    let (_, logs) = app
        .call(Method::GET, "/api/admin/sms/logs?to=%2B442079460958", Some(&app.admin), None)
        .await;
    assert_eq!(logs["total"], 3);
    assert_eq!(logs["items"][0]["status"], "rate_limited");
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn provider_rejection_is_a_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(MESSAGES_PATH))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "code": 21211, "message": "The 'To' number is not valid" })),
        )
        .mount(&server)
        .await;
    let app = common::app(common::config(&server.uri())).await;

    let (status, body) = app
        .call(Method::POST, "/api/admin/sms/send", Some(&app.admin), Some(json!({ "to": "+14155550100", "body": "hi" })))
        .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["status"], "error");

    let (_, logs) = app.call(Method::GET, "/api/admin/sms/logs?status=failed", Some(&app.admin), None).await;
    assert_eq!(logs["total"], 1);
    let error = logs["items"][0]["error"].as_str().unwrap();
    assert!(error.contains("21211"), "{error}");
}

#[tokio::test]
async fn bulk_reports_each_recipient_in_order() {
    let server = MockServer::start().await;
    sms_accepting(&server).await;
    let app = common::app(common::config(&server.uri())).await;

    let (status, report) = app
        .call(
            Method::POST,
            "/api/admin/sms/bulk",
            Some(&app.admin),
            Some(json!({
                "recipients": ["4155550100", "not a number", "+33612345678"],
                "body": "Private sale starts now"
            })),
        )
        .await;

    assert_eq!(status, StatusCode::OK, "{report}");
    assert_eq!(report["total"], 3);
    assert_eq!(report["sent"], 2);
    assert_eq!(report["failed"], 1);
    let statuses: Vec<&str> =
        report["results"].as_array().unwrap().iter().map(|r| r["status"].as_str().unwrap()).collect();
    assert_eq!(statuses, vec!["sent", "invalid", "sent"]);
}

#[tokio::test]
async fn bulk_limits_are_checked_before_sending() {
    let server = MockServer::start().await;
    sms_accepting(&server).await;
    let app = common::app(common::config(&server.uri())).await;

    let too_many: Vec<String> = (0..101).map(|i| format!("+1415555{i:04}")).collect();
    let (status, _) = app
        .call(
            Method::POST,
            "/api/admin/sms/bulk",
            Some(&app.admin),
            Some(json!({ "recipients": too_many, "body": "hi" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .call(
            Method::POST,
            "/api/admin/sms/bulk",
            Some(&app.admin),
            Some(json!({ "recipients": ["+14155550100"], "body": "   " })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "body must not be empty");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn sms_routes_are_admin_only() {
    let app = common::app(common::disabled()).await;

    let (status, _) = app.call(Method::GET, "/api/admin/sms/logs", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = app.call(Method::GET, "/api/admin/sms/logs", Some(&app.staff), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn disabled_channels_only_log() {
    let app = common::app(common::disabled()).await;

    let (status, body) = app
        .call(Method::POST, "/api/admin/sms/send", Some(&app.admin), Some(json!({ "to": "+14155550100", "body": "hi" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "sent");
    assert!(body.get("providerMessageId").is_none());
}

#[tokio::test]
async fn quote_request_triggers_confirmation_and_admin_alerts() {
    let server = MockServer::start().await;
    sms_accepting(&server).await;
    mail_accepting(&server).await;
    let app = common::app(common::config(&server.uri())).await;
    let _tasks = atelier_notifications::spawn_listeners(&app.events, &app.notifications).unwrap();

    app.events
        .publish(QuoteRequested {
            id: "q1".to_owned(),
            reference_number: "QR-261018-7KQ2ZD".to_owned(),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            phone: None,
            product_name: "Birkin 30".to_owned(),
            message: None,
        })
        .unwrap();

    let received = wait_for_requests(&server, 3).await;
    let mails: Vec<serde_json::Value> = received
        .iter()
        .filter(|r| r.url.path() == "/emails")
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect();
    let mut recipients: Vec<&str> = mails.iter().map(|m| m["to"][0].as_str().unwrap()).collect();
    recipients.sort_unstable();
    assert_eq!(recipients, vec!["ada@example.com", "desk@atelier.example"]);

    let sms: Vec<_> = received.iter().filter(|r| r.url.path() == MESSAGES_PATH).collect();
    assert_eq!(sms.len(), 1);
    assert!(String::from_utf8_lossy(&sms[0].body).contains("To=%2B14155550199"));
}

#[tokio::test]
async fn only_quoted_updates_email_the_customer() {
    let server = MockServer::start().await;
    mail_accepting(&server).await;
    let app = common::app(common::config(&server.uri())).await;
    let _tasks = atelier_notifications::spawn_listeners(&app.events, &app.notifications).unwrap();

    let update = |status: &str| QuoteUpdated {
        id: "q1".to_owned(),
        reference_number: "QR-261018-7KQ2ZD".to_owned(),
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        product_name: "Birkin 30".to_owned(),
        status: status.to_owned(),
        quoted_price_cents: Some(2_350_000),
    };
    app.events.publish(update("reviewing")).unwrap();
    app.events.publish(update("quoted")).unwrap();

    let received = wait_for_requests(&server, 1).await;
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(server.received_requests().await.unwrap().len(), 1);

    let mail: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(mail["subject"], "Your quote QR-261018-7KQ2ZD is ready");
    assert!(mail["text"].as_str().unwrap().contains("USD 23,500.00"));
}
