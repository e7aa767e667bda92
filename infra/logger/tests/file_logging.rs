use atelier_logger::{LevelFilter, Logger};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn file_logging_writes_json_lines() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");

    let logger = Logger::builder()
        .name("atelier-file-logging")
        .console(false)
        .path(&log_dir)
        .json_file()
        .level(LevelFilter::INFO)
        .init()?;
    assert!(logger.writes_file());

    tracing::info!(reference = "QR-260101-ABCDEF", "quote request stored");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    let line = contents.lines().find(|l| l.contains("QR-260101-ABCDEF")).expect("event logged");
    assert!(line.starts_with('{'), "file output should be JSON: {line}");

    Ok(())
}
