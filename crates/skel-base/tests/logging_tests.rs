use log::Log;
use skel_base::logging::{init_file_logger, init_stdout_logger, FileLogger, StdoutLogger};
use std::fs;

fn record_at<'a>(args: std::fmt::Arguments<'a>) -> log::Record<'a> {
    log::RecordBuilder::new()
        .level(log::Level::Error)
        .target("test")
        .file(Some("session.rs"))
        .line(Some(100))
        .args(args)
        .build()
}

#[test]
fn test_stdout_logger_logs_without_panicking() {
    let logger = StdoutLogger;
    logger.log(&record_at(format_args!("tick skipped")));
    logger.flush();
}

#[test]
fn test_file_logger_creates_directory() {
    let dir = std::env::temp_dir().join(format!("skel-log-test-{}-dir", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    let _logger = FileLogger::new(&dir).unwrap();
    assert!(dir.is_dir());

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_file_logger_line_format() {
    let dir = std::env::temp_dir().join(format!("skel-log-test-{}-write", std::process::id()));
    let _ = fs::remove_dir_all(&dir);

    let logger = FileLogger::new(&dir).unwrap();
    logger.log(&record_at(format_args!("frame length mismatch")));
    logger.flush();

    let entries: Vec<_> = fs::read_dir(&dir).unwrap().filter_map(|e| e.ok()).collect();
    assert_eq!(entries.len(), 1);

    let content = fs::read_to_string(entries[0].path()).unwrap();
    assert!(content.contains("[ERROR]"));
    assert!(content.contains("thread:"));
    assert!(content.contains("session.rs:100"));
    assert!(content.contains("frame length mismatch"));

    fs::remove_dir_all(&dir).ok();
}

#[test]
fn test_init_stdout_logger_enables_info() {
    init_stdout_logger();
    assert!(log::max_level() >= log::LevelFilter::Info);
    log::info!("logger installed");
}

#[test]
fn test_init_file_logger_invalid_dir_returns_error() {
    assert!(init_file_logger("/proc/nonexistent/path").is_err());
}
