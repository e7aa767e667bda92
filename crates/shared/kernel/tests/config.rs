use atelier_kernel::config::load_config;
use atelier_kernel::domain::config::ApiConfig;
use serial_test::serial;
use std::io::Write;

#[test]
#[serial]
fn missing_default_file_falls_back_to_defaults() {
    let cfg: ApiConfig = load_config(None::<&str>).expect("defaults");
    assert_eq!(cfg.server.port, 5080);
    assert_eq!(cfg.database.url, "mem://");
}

#[test]
#[serial]
fn explicit_file_must_exist() {
    let result = load_config::<ApiConfig>(Some("/definitely/not/here/server.toml"));
    assert!(result.is_err());
}

#[test]
#[serial]
fn file_values_fill_the_tree() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
        [server]
        port = 8080

        [notifications.sms]
        enabled = true
        from_number = "+15550000000"
        "#
    )
    .unwrap();

    let cfg: ApiConfig = load_config(Some(file.path())).expect("config loads");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.server.shutdown_grace_seconds, 30);
    assert!(cfg.notifications.sms.enabled);
    assert_eq!(cfg.notifications.sms.from_number, "+15550000000");
    assert_eq!(cfg.notifications.sms.rate_limit.max_messages, 5);
}
