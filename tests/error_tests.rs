//! Error handling module unit tests

use axum::http::StatusCode;
use axum::response::IntoResponse;
use revenue_estimator::utils::error::helpers::*;
use revenue_estimator::utils::error::*;

#[test]
fn test_app_error_status_codes() {
    let test_cases = vec![
        (AppError::Validation("test".to_string()), StatusCode::BAD_REQUEST),
        (AppError::NotFound("test".to_string()), StatusCode::NOT_FOUND),
        (AppError::PayloadTooLarge, StatusCode::PAYLOAD_TOO_LARGE),
    ];

    for (error, expected_status) in test_cases {
        assert_eq!(error.status_code(), expected_status);
    }
}

#[test]
fn test_app_error_types() {
    let test_cases = vec![
        (AppError::Validation("test".to_string()), "invalid_request_error"),
        (AppError::PayloadTooLarge, "invalid_request_error"),
        (AppError::NotFound("test".to_string()), "not_found_error"),
    ];

    for (error, expected_type) in test_cases {
        assert_eq!(error.error_type(), expected_type);
    }
}

#[test]
fn test_helpers() {
    assert!(matches!(validation_error("Missing field"), AppError::Validation(_)));
    assert!(matches!(not_found_error("No route"), AppError::NotFound(_)));
}

#[test]
fn test_error_response_json() {
    let response = validation_error("pricingModel is required").to_error_response();
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["type"], "error");
    assert_eq!(json["error"]["type"], "invalid_request_error");
    assert_eq!(
        json["error"]["message"],
        "Request validation failed: pricingModel is required"
    );
}

#[test]
fn test_into_response_status() {
    let response = validation_error("bad").into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = AppError::PayloadTooLarge.into_response();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);

    let response = not_found_error("No route for GET /").into_response();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_validation_context() {
    let result: Result<(), std::fmt::Error> = Err(std::fmt::Error);
    match result.validation_context("Invalid estimate request") {
        Err(AppError::Validation(msg)) => assert!(msg.starts_with("Invalid estimate request")),
        other => panic!("Expected validation error, got {:?}", other),
    }
}
