use atelier::domain::config::ApiConfig;
use atelier::features;
use atelier_database::Database;
use atelier_event_bus::EventBus;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn every_enabled_slice_is_initialized() {
    let config = ApiConfig::default();
    let database = Database::builder()
        .url("mem://")
        .session("test", "platform")
        .migrations(atelier::migrations())
        .init()
        .await
        .unwrap();
    let events = EventBus::new();

    let platform = atelier::init(&config, &database, &events).unwrap();

    let mut names: Vec<&str> = platform.slices.iter().map(|slice| slice.name).collect();
    names.sort_unstable();
    let mut enabled = features::ENABLED.to_vec();
    enabled.sort_unstable();
    assert_eq!(names, enabled);
    assert!(!platform.listeners.is_empty());

    events.shutdown();
    for listener in platform.listeners {
        listener.await.unwrap();
    }
}

#[tokio::test]
async fn migrations_are_versioned_per_slice() {
    let migrations = atelier::migrations();
    let mut keys: Vec<(&str, &str)> = migrations.iter().map(|m| (m.slice, m.version)).collect();
    let total = keys.len();
    keys.sort_unstable();
    keys.dedup();
    assert_eq!(keys.len(), total);

    let database =
        Database::builder().url("mem://").session("test", "rerun").init().await.unwrap();
    let first = database.migrate(&migrations).await.unwrap();
    assert_eq!(first.applied.len(), total);
    let second = database.migrate(&migrations).await.unwrap();
    assert!(second.applied.is_empty());
}

#[test]
fn short_secret_fails_bootstrap_before_serving() {
    let mut config = ApiConfig::default();
    config.security.identity.jwt.secret = "short".to_owned();
    assert!(atelier::features::identity::build(&config).is_err());
    assert!(features::is_enabled("inquiries"));
    assert!(!features::is_enabled("licensing"));
}
