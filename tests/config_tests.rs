//! Configuration module unit tests

use revenue_estimator::config::Settings;
use std::env;
use std::sync::{Mutex, MutexGuard};

// Tests in this file mutate process-wide environment variables.
static ENV_LOCK: Mutex<()> = Mutex::new(());

const VARS: [&str; 7] = [
    "SERVER_HOST",
    "SERVER_PORT",
    "MAX_REQUEST_SIZE",
    "ALLOWED_ORIGINS",
    "CORS_ENABLED",
    "RUST_LOG",
    "LOG_FORMAT",
];

/// Take the env lock and start from a clean environment
fn lock_env() -> MutexGuard<'static, ()> {
    let guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    for var in &VARS {
        env::remove_var(var);
    }
    guard
}

#[test]
fn test_settings_defaults() {
    let _guard = lock_env();

    let settings = Settings::new().unwrap();
    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.server.port, 8082);
    assert_eq!(settings.request.max_request_size, 1_048_576);
    assert!(settings.security.cors_enabled);
    assert!(settings.allows_any_origin());
    assert_eq!(settings.logging.level, "info");
    assert_eq!(settings.logging.format, "text");
}

#[test]
fn test_settings_from_env() {
    let _guard = lock_env();
    env::set_var("SERVER_HOST", "127.0.0.1");
    env::set_var("SERVER_PORT", "9090");
    env::set_var("MAX_REQUEST_SIZE", "2048");
    env::set_var("ALLOWED_ORIGINS", "https://pricing.example.com, https://admin.example.com");
    env::set_var("LOG_FORMAT", "json");
    env::set_var("RUST_LOG", "debug");

    let settings = Settings::new().unwrap();
    assert_eq!(settings.bind_address(), "127.0.0.1:9090");
    assert_eq!(settings.request.max_request_size, 2048);
    assert_eq!(
        settings.security.allowed_origins,
        vec!["https://pricing.example.com", "https://admin.example.com"]
    );
    assert!(!settings.allows_any_origin());
    assert_eq!(settings.logging.format, "json");
    assert_eq!(settings.logging.level, "debug");
}

#[test]
fn test_settings_invalid_port() {
    let _guard = lock_env();
    env::set_var("SERVER_PORT", "0");

    let error = Settings::new().unwrap_err();
    assert!(error.to_string().contains("Port number cannot be 0"));

    env::set_var("SERVER_PORT", "not-a-port");
    let error = Settings::new().unwrap_err();
    assert!(error.to_string().contains("Invalid port number"));
}

#[test]
fn test_settings_invalid_request_size() {
    let _guard = lock_env();
    env::set_var("MAX_REQUEST_SIZE", "0");

    let error = Settings::new().unwrap_err();
    assert!(error.to_string().contains("Maximum request size cannot be 0"));
}

#[test]
fn test_settings_invalid_log_level() {
    let _guard = lock_env();
    env::set_var("RUST_LOG", "loud");

    let error = Settings::new().unwrap_err();
    assert!(error.to_string().contains("Invalid log level"));
}

#[test]
fn test_settings_invalid_log_format() {
    let _guard = lock_env();
    env::set_var("LOG_FORMAT", "xml");

    let error = Settings::new().unwrap_err();
    assert!(error.to_string().contains("Invalid log format"));
}

#[test]
fn test_settings_invalid_cors_flag() {
    let _guard = lock_env();
    env::set_var("CORS_ENABLED", "maybe");

    let error = Settings::new().unwrap_err();
    assert!(error.to_string().contains("Invalid CORS enabled flag"));
}
