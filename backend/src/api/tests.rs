//! Router-level tests running requests through the full middleware stack
//! against the seeded in-memory store.

use crate::app_router;
use crate::repositories::MemoryStore;
use crate::services::AppState;
use crate::utils::jwt::JwtUtils;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> Router {
    let store = Arc::new(MemoryStore::seeded());
    let state = AppState::new(
        store.clone(),
        store,
        JwtUtils::new("router-test-signing-key", 86400),
    );
    app_router(state)
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, location, body)
}

async fn login(app: &Router, email: &str, secret: &str) -> String {
    let (status, _, body) = send(
        app,
        request(
            "POST",
            "/accounts/login",
            None,
            Some(json!({ "email": email, "secret": secret })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["token"].as_str().unwrap().to_string()
}

async fn admin_token(app: &Router) -> String {
    login(app, "adm@test.com", "123456").await
}

async fn editor_token(app: &Router) -> String {
    login(app, "editor@test.com", "123456").await
}

#[tokio::test]
async fn test_root_is_public() {
    let app = test_app();
    let (status, _, body) = send(&app, request("GET", "/", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn test_login_returns_identity_and_token() {
    let app = test_app();
    let (status, _, body) = send(
        &app,
        request(
            "POST",
            "/accounts/login",
            None,
            Some(json!({ "email": "adm@test.com", "secret": "123456" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "adm@test.com");
    assert_eq!(body["data"]["role"], "Admin");
    assert!(!body["data"]["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_login_with_wrong_secret_is_unauthenticated() {
    let app = test_app();
    let (status, _, body) = send(
        &app,
        request(
            "POST",
            "/accounts/login",
            None,
            Some(json!({ "email": "adm@test.com", "secret": "wrong" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["error_type"], "unauthenticated");
}

#[tokio::test]
async fn test_protected_routes_require_a_valid_token() {
    let app = test_app();

    let (status, _, _) = send(&app, request("GET", "/vehicles", None, None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = send(&app, request("GET", "/accounts", Some("not-a-jwt"), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // Signed with a different key
    let foreign = JwtUtils::new("another-key", 86400);
    let account = crate::database::models::Account {
        id: 1,
        email: "adm@test.com".to_string(),
        secret: "123456".to_string(),
        role: crate::database::models::Role::Admin,
    };
    let token = foreign.generate_token(Some(&account)).unwrap();
    let (status, _, _) = send(&app, request("GET", "/accounts", Some(&token), None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_editor_cannot_manage_accounts() {
    let app = test_app();
    let token = editor_token(&app).await;

    let (status, _, body) = send(&app, request("GET", "/accounts", Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["error_type"], "forbidden");

    let (status, _, _) = send(&app, request("GET", "/accounts/1", Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_lists_accounts_by_page() {
    let app = test_app();
    let token = admin_token(&app).await;

    let (status, _, body) = send(&app, request("GET", "/accounts", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    let accounts = body["data"].as_array().unwrap();
    assert_eq!(accounts.len(), 2);
    assert!(accounts[0].get("secret").is_none());

    let (status, _, body) =
        send(&app, request("GET", "/accounts?page=2", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, _, body) =
        send(&app, request("GET", "/accounts?page=0", Some(&token), None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["error_type"], "validation_error");
}

#[tokio::test]
async fn test_admin_creates_account() {
    let app = test_app();
    let token = admin_token(&app).await;

    let (status, location, body) = send(
        &app,
        request(
            "POST",
            "/accounts",
            Some(&token),
            Some(json!({ "email": "new@test.com", "secret": "12345678", "role": "Editor" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(location.as_deref(), Some("/accounts/3"));
    assert_eq!(body["data"]["id"], 3);

    let (status, _, body) = send(&app, request("GET", "/accounts/3", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "new@test.com");

    let (status, _, _) = send(&app, request("GET", "/accounts/42", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The new account can log in
    login(&app, "new@test.com", "12345678").await;
}

#[tokio::test]
async fn test_invalid_account_lists_every_violation() {
    let app = test_app();
    let token = admin_token(&app).await;

    let (status, _, body) = send(
        &app,
        request("POST", "/accounts", Some(&token), Some(json!({}))),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = body["error"]["details"].as_array().unwrap();
    assert_eq!(details.len(), 3);
    assert!(details.contains(&json!("The 'email' field cannot be blank")));
}

#[tokio::test]
async fn test_editor_creates_and_reads_vehicles() {
    let app = test_app();
    let token = editor_token(&app).await;

    let (status, location, body) = send(
        &app,
        request(
            "POST",
            "/vehicles",
            Some(&token),
            Some(json!({ "name": "Civic", "brand": "Honda", "year": 2020 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(location.as_deref(), Some("/vehicles/1"));
    assert_eq!(body["data"]["name"], "Civic");

    let (status, _, body) = send(&app, request("GET", "/vehicles/1", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["brand"], "Honda");

    let (status, _, body) = send(
        &app,
        request("GET", "/vehicles?name=CIV&page=1", Some(&token), None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _, body) =
        send(&app, request("GET", "/vehicles?brand=ford", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_vehicle_is_rejected() {
    let app = test_app();
    let token = editor_token(&app).await;

    let (status, _, body) = send(
        &app,
        request(
            "POST",
            "/vehicles",
            Some(&token),
            Some(json!({ "name": "", "brand": "Fiat", "year": 1949 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let details = body["error"]["details"].as_array().unwrap();
    assert!(details.contains(&json!("The 'name' field cannot be blank")));
    assert!(details.contains(&json!("The 'year' field cannot be earlier than 1950")));

    let (_, _, body) = send(&app, request("GET", "/vehicles", Some(&token), None)).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_editor_cannot_update_or_delete_vehicles() {
    let app = test_app();
    let token = editor_token(&app).await;

    send(
        &app,
        request(
            "POST",
            "/vehicles",
            Some(&token),
            Some(json!({ "name": "Uno", "brand": "Fiat", "year": 2010 })),
        ),
    )
    .await;

    let (status, _, _) = send(
        &app,
        request(
            "PUT",
            "/vehicles/1",
            Some(&token),
            Some(json!({ "name": "Uno Way", "brand": "Fiat", "year": 2012 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, _) = send(&app, request("DELETE", "/vehicles/1", Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, _) = send(&app, request("GET", "/vehicles/1", Some(&token), None)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_updates_and_deletes_vehicle() {
    let app = test_app();
    let token = admin_token(&app).await;

    send(
        &app,
        request(
            "POST",
            "/vehicles",
            Some(&token),
            Some(json!({ "name": "Gol", "brand": "Volkswagen", "year": 2006 })),
        ),
    )
    .await;

    let (status, _, _) = send(
        &app,
        request(
            "PUT",
            "/vehicles/1",
            Some(&token),
            Some(json!({ "name": "Polo", "brand": "Volkswagen", "year": 2021 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, _, body) = send(&app, request("GET", "/vehicles/1", Some(&token), None)).await;
    assert_eq!(body["data"]["name"], "Polo");
    assert_eq!(body["data"]["year"], 2021);

    let (status, _, _) = send(
        &app,
        request(
            "PUT",
            "/vehicles/9",
            Some(&token),
            Some(json!({ "name": "Polo", "brand": "Volkswagen", "year": 2021 })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, request("DELETE", "/vehicles/1", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _, _) = send(&app, request("DELETE", "/vehicles/1", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _, _) = send(&app, request("GET", "/vehicles/1", Some(&token), None)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

fn raw_request(method: &str, uri: &str, token: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_badly_shaped_bodies_are_validation_errors() {
    let app = test_app();
    let token = admin_token(&app).await;

    let (status, _, body) = send(
        &app,
        request(
            "POST",
            "/vehicles",
            Some(&token),
            Some(json!({ "name": "Civic", "brand": "Honda", "year": "2000" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["error_type"], "validation_error");
    assert_eq!(body["error"]["details"].as_array().unwrap().len(), 1);

    let (status, _, body) = send(
        &app,
        raw_request("PUT", "/vehicles/1", &token, r#"{"name": "Civic""#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["error_type"], "validation_error");

    let (status, _, body) = send(
        &app,
        raw_request("POST", "/accounts", &token, r#"{"email": 42}"#),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["error_type"], "validation_error");

    let (status, _, body) = send(
        &app,
        raw_request("POST", "/accounts/login", &token, "not json"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["error_type"], "validation_error");

    // Nothing was stored
    let (_, _, body) = send(&app, request("GET", "/vehicles", Some(&token), None)).await;
    assert!(body["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_unsupported_method_is_not_allowed() {
    let app = test_app();
    let token = editor_token(&app).await;

    let (status, _, _) = send(
        &app,
        request(
            "PATCH",
            "/vehicles/1",
            Some(&token),
            Some(json!({ "name": "Uno" })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    let (status, _, _) = send(&app, request("DELETE", "/accounts", None, None)).await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);

    // Served methods still check the role
    let (status, _, _) = send(&app, request("DELETE", "/vehicles/1", Some(&token), None)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}
