mod common;

use axum::http::StatusCode;
use pipecrm_models::users::Role;
use pipecrm_store::Store;
use serde_json::json;

use common::{expired_token, forged_token, insert_user, send, setup_app, token_for};

#[tokio::test]
async fn login_with_seeded_admin_succeeds() {
    let app = setup_app(Store::seeded());

    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "admin", "password": "admin123"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert!(body["token"].as_str().unwrap().len() > 20);
    assert_eq!(body["user"]["username"], "admin");
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["user"].get("password").is_none());
}

#[tokio::test]
async fn login_with_wrong_password_is_rejected() {
    let app = setup_app(Store::seeded());

    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "admin", "password": "nope"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn login_with_unknown_user_gives_same_error() {
    let app = setup_app(Store::seeded());

    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "ghost", "password": "admin123"})),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn register_creates_a_user_that_can_log_in() {
    let store = Store::seeded();
    let app = setup_app(store);

    let (status, body) = send(
        app.clone(),
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "giulia",
            "email": "giulia@example.com",
            "password": "secret123",
            "firstName": "Giulia",
            "lastName": "Rossi"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");
    assert_eq!(body["user"]["role"], "user");

    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "giulia", "password": "secret123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["email"], "giulia@example.com");
}

#[tokio::test]
async fn register_rejects_duplicate_username() {
    let app = setup_app(Store::seeded());

    let (status, body) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "admin",
            "email": "other@example.com",
            "password": "secret123",
            "firstName": "A",
            "lastName": "B"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Username or email already exists");
}

#[tokio::test]
async fn register_rejects_invalid_payload() {
    let app = setup_app(Store::seeded());

    let (status, _) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "x",
            "email": "not-an-email",
            "password": "123",
            "firstName": "A",
            "lastName": "B"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn verify_accepts_a_valid_token() {
    let app = setup_app(Store::seeded());
    let token = token_for(1, "admin", Role::Admin);

    let (status, body) = send(app, "GET", "/api/auth/verify", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["valid"], true);
    assert_eq!(body["user"]["username"], "admin");
}

#[tokio::test]
async fn verify_rejects_missing_header() {
    let app = setup_app(Store::seeded());

    let (status, body) = send(app, "GET", "/api/auth/verify", None, None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Access token required");
}

#[tokio::test]
async fn verify_rejects_expired_token() {
    let app = setup_app(Store::seeded());
    let token = expired_token();

    let (status, body) = send(app, "GET", "/api/auth/verify", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Token expired");
}

#[tokio::test]
async fn verify_rejects_token_signed_with_another_key() {
    let app = setup_app(Store::seeded());
    let token = forged_token();

    let (status, _) = send(app, "GET", "/api/auth/verify", Some(&token), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn verify_rejects_garbage_token() {
    let app = setup_app(Store::seeded());

    let (status, _) = send(app, "GET", "/api/auth/verify", Some("not.a.jwt"), None).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_roundtrip() {
    let store = Store::seeded();
    let extra = insert_user(&store, "mario", "password1", Role::Sales);
    let app = setup_app(store);
    let token = token_for(extra.id, "mario", Role::Sales);

    let (status, body) = send(app.clone(), "GET", "/api/auth/profile", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "mario");

    let (status, body) = send(
        app,
        "PUT",
        "/api/auth/profile",
        Some(&token),
        Some(json!({"firstName": "Mario", "lastName": "Bianchi"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Profile updated successfully");
    assert_eq!(body["user"]["firstName"], "Mario");
    assert_eq!(body["user"]["lastName"], "Bianchi");
    assert!(body["user"]["updatedAt"].is_string());
}
