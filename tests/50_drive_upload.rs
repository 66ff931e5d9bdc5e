mod common;

use anyhow::Result;
use axum::http::{header, Method, StatusCode};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header as header_eq, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{request, token, token_with_drive, TestApp};

const UPLOAD: &str = "/upload/drive/v3/files";

#[tokio::test]
async fn upload_creates_text_file_with_callers_token() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(UPLOAD))
        .and(query_param("uploadType", "multipart"))
        .and(header_eq("authorization", "Bearer drive-token-1"))
        .and(body_string_contains(r#""mimeType":"text/plain""#))
        .and(body_string_contains(r#""name":"t""#))
        .and(body_string_contains("hello from notes"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "file-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let app = TestApp::with_drive_url(&server.uri());
    let res = app
        .send(request(
            Method::POST,
            "/drive/upload",
            Some(&token_with_drive("u1", "drive-token-1")),
            Some(json!({"title": "t", "content": "hello from notes"})),
        ))
        .await?;

    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.is_empty(), "success body should be empty");
    Ok(())
}

#[tokio::test]
async fn upload_forwards_remote_success_status() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(UPLOAD))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "file-2"})))
        .mount(&server)
        .await;

    let app = TestApp::with_drive_url(&server.uri());
    let res = app
        .send(request(
            Method::POST,
            "/drive/upload",
            Some(&token_with_drive("u1", "tok")),
            Some(json!({"title": "t", "content": "c"})),
        ))
        .await?;

    assert_eq!(res.status, StatusCode::CREATED);
    assert!(res.body.is_empty());
    Ok(())
}

#[tokio::test]
async fn upload_forwards_remote_error_body() -> Result<()> {
    let remote_error = json!({
        "error": {
            "code": 403,
            "message": "Insufficient Permission",
            "errors": [{"reason": "insufficientPermissions"}]
        }
    });

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(UPLOAD))
        .respond_with(ResponseTemplate::new(403).set_body_json(remote_error.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let app = TestApp::with_drive_url(&server.uri());
    let res = app
        .send(request(
            Method::POST,
            "/drive/upload",
            Some(&token_with_drive("u1", "expired")),
            Some(json!({"title": "t", "content": "c"})),
        ))
        .await?;

    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.json(), remote_error);
    Ok(())
}

#[tokio::test]
async fn upload_forwards_plain_text_error() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(UPLOAD))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let app = TestApp::with_drive_url(&server.uri());
    let res = app
        .send(request(
            Method::POST,
            "/drive/upload",
            Some(&token_with_drive("u1", "tok")),
            Some(json!({"title": "t", "content": "c"})),
        ))
        .await?;

    assert_eq!(res.status, StatusCode::BAD_GATEWAY);
    assert_eq!(res.body, b"upstream exploded");
    let content_type = res
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("text/plain"), "got {}", content_type);
    Ok(())
}

#[tokio::test]
async fn upload_without_drive_token_never_calls_remote() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let app = TestApp::with_drive_url(&server.uri());
    let res = app
        .send(request(
            Method::POST,
            "/drive/upload",
            Some(&token("u1")),
            Some(json!({"title": "t", "content": "c"})),
        ))
        .await?;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.json()["code"], "UNAUTHORIZED");
    Ok(())
}

#[tokio::test]
async fn upload_without_session_is_rejected() -> Result<()> {
    let app = TestApp::new();

    let res = app
        .send(request(
            Method::POST,
            "/drive/upload",
            None,
            Some(json!({"title": "t", "content": "c"})),
        ))
        .await?;

    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn upload_requires_title_and_content() -> Result<()> {
    let app = TestApp::new();

    let res = app
        .send(request(
            Method::POST,
            "/drive/upload",
            Some(&token_with_drive("u1", "tok")),
            Some(json!({"title": "t"})),
        ))
        .await?;

    assert_eq!(res.status, StatusCode::BAD_REQUEST);
    assert_eq!(res.json()["code"], "INVALID_JSON");
    Ok(())
}

#[tokio::test]
async fn unreachable_drive_is_500() -> Result<()> {
    let app = TestApp::new();

    let res = app
        .send(request(
            Method::POST,
            "/drive/upload",
            Some(&token_with_drive("u1", "tok")),
            Some(json!({"title": "t", "content": "c"})),
        ))
        .await?;

    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.json()["code"], "INTERNAL_SERVER_ERROR");
    Ok(())
}
