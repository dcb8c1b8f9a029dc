#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use tower::ServiceExt;

use pipecrm::config::cors::CorsConfig;
use pipecrm::config::jwt::JwtConfig;
use pipecrm::router::init_router;
use pipecrm::state::AppState;
use pipecrm_auth::{hash_password, issue_token_for};
use pipecrm_models::customers::Customer;
use pipecrm_models::deals::{Deal, DealStage, DealStatus};
use pipecrm_models::users::{Role, User};
use pipecrm_store::Store;

pub const TEST_SECRET: &str = "integration-test-secret";

/// App wired to the given store, with a fixed JWT secret so tests can mint
/// their own tokens.
pub fn setup_app(store: Store) -> Router {
    let state = AppState {
        store: Arc::new(store),
        jwt_config: JwtConfig {
            secret: TEST_SECRET.to_string(),
            access_token_expiry: 3600,
        },
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
    };
    init_router(state)
}

pub fn token_for(id: i64, username: &str, role: Role) -> String {
    issue_token_for(id, username, role, TEST_SECRET, 3600).unwrap()
}

pub fn admin_token() -> String {
    token_for(1, "admin", Role::Admin)
}

pub fn sales_token() -> String {
    token_for(2, "sales", Role::Sales)
}

pub fn user_token() -> String {
    token_for(3, "viewer", Role::User)
}

/// An expired token: issued with a negative lifetime.
pub fn expired_token() -> String {
    issue_token_for(1, "admin", Role::Admin, TEST_SECRET, -60).unwrap()
}

/// A token signed with the wrong key.
pub fn forged_token() -> String {
    issue_token_for(1, "admin", Role::Admin, "some-other-secret", 3600).unwrap()
}

pub fn insert_user(store: &Store, username: &str, password: &str, role: Role) -> User {
    let hashed = hash_password(password).unwrap();
    store.users.insert(|id| User {
        id,
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: hashed.clone(),
        role,
        first_name: "Test".to_string(),
        last_name: "User".to_string(),
        created_at: Utc::now(),
        updated_at: None,
    })
}

pub fn insert_customer(store: &Store, company: &str, status: &str, industry: &str) -> Customer {
    let now = Utc::now();
    store.customers.insert(|id| Customer {
        id,
        company_name: company.to_string(),
        contact_person: format!("Contact {id}"),
        email: format!("customer{id}@example.com"),
        phone: String::new(),
        address: String::new(),
        industry: industry.to_string(),
        status: status.to_string(),
        revenue: 1000.0 * id as f64,
        notes: String::new(),
        created_at: now,
        updated_at: now,
    })
}

pub fn insert_deal(store: &Store, title: &str, stage: DealStage, probability: i64) -> Deal {
    let now = Utc::now();
    let mut status = DealStatus::Active;
    if stage == DealStage::ClosedWon {
        status = DealStatus::Won;
    } else if stage == DealStage::ClosedLost {
        status = DealStatus::Lost;
    }
    store.deals.insert(|id| Deal {
        id,
        customer_id: 1,
        title: title.to_string(),
        description: String::new(),
        value: 5000.0,
        currency: "EUR".to_string(),
        stage,
        probability,
        expected_close_date: now + Duration::days(30),
        source: String::new(),
        assigned_to: 2,
        status,
        notes: String::new(),
        created_at: now,
        updated_at: now,
    })
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<serde_json::Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Send one request through the router and decode the JSON response.
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request(method, uri, token, body)).await.unwrap();
    decode(response).await
}

pub async fn decode(response: Response<axum::body::Body>) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}
