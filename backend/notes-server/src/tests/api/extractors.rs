use crate::{ApiError, CurrentUser, NoteId};

use axum::{
    Router,
    body::Body,
    extract::FromRequestParts,
    http::{Request, StatusCode},
    routing::get,
};
use googletest::prelude::*;
use http_body_util::BodyExt;
use notes_core::User;
use tower::ServiceExt;

#[tokio::test]
async fn given_user_in_extensions_when_extracted_then_returned() {
    // Given
    let user = User::new_local("Ann".into(), "ann@x.com", "hash".into());
    let mut request = Request::builder().body(Body::empty()).unwrap();
    request.extensions_mut().insert(CurrentUser(user.clone()));
    let (mut parts, _body) = request.into_parts();

    // When
    let extracted = CurrentUser::from_request_parts(&mut parts, &()).await;

    // Then
    assert_that!(extracted.map(|CurrentUser(u)| u.id), ok(eq(&user.id)));
}

#[tokio::test]
async fn given_no_user_in_extensions_when_extracted_then_401() {
    let request = Request::builder().body(Body::empty()).unwrap();
    let (mut parts, _body) = request.into_parts();

    let extracted = CurrentUser::from_request_parts(&mut parts, &()).await;

    let status = extracted.map(|_| ()).map_err(|e: ApiError| e.status_code());
    assert_that!(status, err(eq(StatusCode::UNAUTHORIZED)));
}

async fn echo(NoteId(id): NoteId) -> String {
    id.to_string()
}

fn id_router() -> Router {
    Router::new().route("/notes/{id}", get(echo))
}

#[tokio::test]
async fn given_uuid_segment_when_extracted_then_parsed() {
    let id = uuid::Uuid::new_v4();

    let response = id_router()
        .oneshot(
            Request::builder()
                .uri(format!("/notes/{}", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_that!(response.status(), eq(StatusCode::OK));
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_that!(String::from_utf8(body.to_vec()).unwrap(), eq(&id.to_string()));
}

#[tokio::test]
async fn given_non_uuid_segment_when_extracted_then_400_names_the_id() {
    // When
    let response = id_router()
        .oneshot(
            Request::builder()
                .uri("/notes/not-an-id")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Then
    assert_that!(response.status(), eq(StatusCode::BAD_REQUEST));
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_that!(
        json["message"].as_str(),
        some(eq("Id not-an-id in url parameter is not a valid id"))
    );
}
