use crate::ApiError;

use notes_auth::AuthError;
use notes_core::FieldValidator;
use notes_db::DbError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use googletest::prelude::*;
use http::StatusCode;
use http_body_util::BodyExt;
use serde_json::Value;

async fn render(error: ApiError) -> (StatusCode, Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn given_not_found_when_rendered_then_404_envelope() {
    // When
    let (status, json) = render(ApiError::not_found("Note does not exist")).await;

    // Then
    assert_that!(status, eq(StatusCode::NOT_FOUND));
    assert_that!(json["success"], eq(&Value::Bool(false)));
    assert_that!(json["statusCode"], eq(&Value::from(404)));
    assert_that!(json["message"], eq(&Value::from("Note does not exist")));
    assert_that!(json.get("error"), none());
}

#[tokio::test]
async fn given_validation_failure_when_rendered_then_400_with_field_detail() {
    // Given
    let core_error = FieldValidator::required_text(Some("ab"), "title", 3, 128).unwrap_err();

    // When
    let (status, json) = render(ApiError::from(core_error)).await;

    // Then
    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_that!(json["success"], eq(&Value::Bool(false)));
    assert_that!(json["error"]["key"], eq(&Value::from("title")));
    assert_that!(json["error"]["value"], eq(&Value::from("ab")));
    assert_that!(
        json["error"]["message"],
        eq(&Value::from("title must be at least 3 characters"))
    );
    assert_that!(json["message"], eq(&json["error"]["message"]));
}

#[tokio::test]
async fn given_internal_error_when_rendered_then_detail_not_leaked() {
    let (status, json) = render(ApiError::internal("connection refused at /var/db")).await;

    assert_that!(status, eq(StatusCode::INTERNAL_SERVER_ERROR));
    let message = json["message"].as_str().unwrap();
    assert_that!(message, not(contains_substring("/var/db")));
}

#[tokio::test]
async fn given_missing_token_when_unauthenticated_then_401_no_token_message() {
    let (status, json) = render(ApiError::unauthenticated(AuthError::no_token())).await;

    assert_that!(status, eq(StatusCode::UNAUTHORIZED));
    assert_that!(json["message"], eq(&Value::from("No token provided")));
}

#[tokio::test]
async fn given_any_verification_failure_when_unauthenticated_then_generic_401() {
    // Given
    let causes = vec![
        AuthError::invalid_token("bad signature"),
        AuthError::ExpiredToken {
            location: ErrorLocation::from(Location::caller()),
        },
        AuthError::UntrustedIssuer {
            issuer: "https://evil.example.com/".into(),
            location: ErrorLocation::from(Location::caller()),
        },
        AuthError::key_lookup("connect timeout"),
        AuthError::user_not_found(),
        AuthError::from(DbError::Migration {
            message: "disk full".into(),
            location: ErrorLocation::from(Location::caller()),
        }),
    ];

    for cause in causes {
        // When
        let (status, json) = render(ApiError::unauthenticated(cause)).await;

        // Then
        assert_that!(status, eq(StatusCode::UNAUTHORIZED));
        assert_that!(json["message"], eq(&Value::from("Token verification failed")));
    }
}

#[tokio::test]
async fn given_conflict_after_retry_when_unauthenticated_then_409() {
    let cause = AuthError::ConflictRetry {
        field: "email".into(),
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, _) = render(ApiError::unauthenticated(cause)).await;

    assert_that!(status, eq(StatusCode::CONFLICT));
}

#[tokio::test]
async fn given_account_errors_when_converted_then_original_status_and_messages() {
    let registered = AuthError::EmailAlreadyRegistered {
        email: "ann@x.com".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let wrong_password = AuthError::IncorrectPassword {
        location: ErrorLocation::from(Location::caller()),
    };

    let (status, json) = render(ApiError::from(registered)).await;
    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_that!(json["message"], eq(&Value::from("ann@x.com is already registered!")));

    let (status, json) = render(ApiError::from(wrong_password)).await;
    assert_that!(status, eq(StatusCode::BAD_REQUEST));
    assert_that!(json["message"], eq(&Value::from("Incorrect password!")));

    let (status, json) = render(ApiError::from(AuthError::user_not_found())).await;
    assert_that!(status, eq(StatusCode::NOT_FOUND));
    assert_that!(json["message"], eq(&Value::from("User not found!")));
}

#[test]
fn given_duplicate_title_when_described_then_field_and_value_named() {
    let error = ApiError::duplicate("title", "Groceries");

    assert_that!(
        error.to_string(),
        contains_substring("A field value already exists. Field: \"title\", Value: \"Groceries\"")
    );
    assert_that!(error.status_code(), eq(StatusCode::BAD_REQUEST));
}
