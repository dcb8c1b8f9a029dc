mod common;

use axum::http::StatusCode;
use pipecrm_models::deals::DealStage;
use pipecrm_store::Store;
use serde_json::json;

use common::{admin_token, insert_customer, insert_deal, sales_token, send, setup_app, user_token};

#[tokio::test]
async fn stage_catalog_is_ordered() {
    let app = setup_app(Store::seeded());
    let token = user_token();

    let (status, body) = send(app, "GET", "/api/deals/stages", Some(&token), None).await;

    assert_eq!(status, StatusCode::OK);
    let stages = body.as_array().unwrap();
    assert_eq!(stages.len(), 6);
    assert_eq!(stages[0]["name"], "lead");
    assert_eq!(stages[4]["name"], "closed-won");
    assert_eq!(stages[5]["name"], "closed-lost");
    for (i, stage) in stages.iter().enumerate() {
        assert_eq!(stage["order"], i as i64 + 1);
    }
}

#[tokio::test]
async fn user_role_cannot_create_deals() {
    let app = setup_app(Store::seeded());
    let token = user_token();

    let (status, body) = send(
        app,
        "POST",
        "/api/deals",
        Some(&token),
        Some(json!({"customerId": 1, "title": "Blocked", "value": 100.0})),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Access denied: insufficient role");
}

#[tokio::test]
async fn create_applies_pipeline_defaults() {
    let store = Store::new();
    insert_customer(&store, "Cliente Uno", "active", "Technology");
    let app = setup_app(store);
    let token = sales_token();

    let (status, body) = send(
        app,
        "POST",
        "/api/deals",
        Some(&token),
        Some(json!({"customerId": 1, "title": "New business", "value": 12000.0})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Deal created successfully");
    assert_eq!(body["deal"]["stage"], "lead");
    assert_eq!(body["deal"]["status"], "active");
    assert_eq!(body["deal"]["currency"], "EUR");
    // Unassigned deals go to whoever created them.
    assert_eq!(body["deal"]["assignedTo"], 2);
}

#[tokio::test]
async fn creating_directly_in_closed_won_derives_outcome() {
    let store = Store::new();
    insert_customer(&store, "Cliente Uno", "active", "Technology");
    let app = setup_app(store);
    let token = sales_token();

    let (status, body) = send(
        app,
        "POST",
        "/api/deals",
        Some(&token),
        Some(json!({
            "customerId": 1,
            "title": "Walk-in win",
            "value": 3000.0,
            "stage": "closed-won",
            "probability": 40
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["deal"]["stage"], "closed-won");
    assert_eq!(body["deal"]["status"], "won");
    assert_eq!(body["deal"]["probability"], 100);
}

#[tokio::test]
async fn unknown_stage_name_is_rejected() {
    let store = Store::new();
    insert_customer(&store, "Cliente Uno", "active", "Technology");
    let app = setup_app(store);
    let token = sales_token();

    let (status, body) = send(
        app,
        "POST",
        "/api/deals",
        Some(&token),
        Some(json!({
            "customerId": 1,
            "title": "Typo stage",
            "value": 100.0,
            "stage": "closed_won"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Unknown stage: closed_won");
}

#[tokio::test]
async fn closing_lost_overrides_supplied_probability() {
    let store = Store::new();
    let deal = insert_deal(&store, "Slipping away", DealStage::Negotiation, 85);
    let app = setup_app(store);
    let token = sales_token();

    let (status, body) = send(
        app,
        "PUT",
        &format!("/api/deals/{}/stage", deal.id),
        Some(&token),
        Some(json!({"stage": "closed-lost", "probability": 70})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Stage updated successfully");
    assert_eq!(body["deal"]["stage"], "closed-lost");
    assert_eq!(body["deal"]["status"], "lost");
    assert_eq!(body["deal"]["probability"], 0);
}

#[tokio::test]
async fn stage_change_requires_a_stage() {
    let store = Store::new();
    let deal = insert_deal(&store, "No stage given", DealStage::Proposal, 60);
    let app = setup_app(store);
    let token = sales_token();

    let (status, body) = send(
        app,
        "PUT",
        &format!("/api/deals/{}/stage", deal.id),
        Some(&token),
        Some(json!({"probability": 90})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Stage is required");
}

#[tokio::test]
async fn reopening_a_won_deal_keeps_its_status() {
    let store = Store::new();
    let deal = insert_deal(&store, "Changed their mind", DealStage::ClosedWon, 100);
    let app = setup_app(store);
    let token = sales_token();

    let (status, body) = send(
        app,
        "PUT",
        &format!("/api/deals/{}/stage", deal.id),
        Some(&token),
        Some(json!({"stage": "negotiation", "probability": 55})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deal"]["stage"], "negotiation");
    assert_eq!(body["deal"]["probability"], 55);
    // Status only flips on the next terminal transition.
    assert_eq!(body["deal"]["status"], "won");
}

#[tokio::test]
async fn update_rejects_out_of_range_probability() {
    let store = Store::new();
    let deal = insert_deal(&store, "Optimistic rep", DealStage::Proposal, 60);
    let app = setup_app(store);
    let token = sales_token();

    let (status, _) = send(
        app.clone(),
        "PUT",
        &format!("/api/deals/{}", deal.id),
        Some(&token),
        Some(json!({"probability": 250})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // The stage-change body is not range-validated; the hint is clamped.
    let (status, body) = send(
        app,
        "PUT",
        &format!("/api/deals/{}/stage", deal.id),
        Some(&token),
        Some(json!({"stage": "negotiation", "probability": 250})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deal"]["probability"], 100);
    assert_eq!(body["deal"]["stage"], "negotiation");
}

#[tokio::test]
async fn listing_filters_by_stage_and_status() {
    let store = Store::new();
    insert_deal(&store, "Open A", DealStage::Proposal, 50);
    insert_deal(&store, "Open B", DealStage::Negotiation, 70);
    insert_deal(&store, "Done", DealStage::ClosedWon, 100);
    let app = setup_app(store);
    let token = user_token();

    let (status, body) = send(
        app.clone(),
        "GET",
        "/api/deals?stage=negotiation",
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["deals"][0]["title"], "Open B");

    let (status, body) = send(app, "GET", "/api/deals?status=won", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 1);
    assert_eq!(body["deals"][0]["title"], "Done");
}

#[tokio::test]
async fn stats_and_pipeline_aggregate_by_stage() {
    let store = Store::new();
    insert_deal(&store, "Open A", DealStage::Proposal, 50);
    insert_deal(&store, "Open B", DealStage::Proposal, 60);
    insert_deal(&store, "Won one", DealStage::ClosedWon, 100);
    let app = setup_app(store);
    let token = user_token();

    let (status, body) = send(app.clone(), "GET", "/api/deals/stats/overview", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["active"], 2);
    assert_eq!(body["won"], 1);
    assert_eq!(body["wonValue"], 5000.0);
    let by_stage = body["byStage"].as_array().unwrap();
    assert_eq!(by_stage.len(), 6);
    let proposal = by_stage.iter().find(|s| s["stage"] == "proposal").unwrap();
    assert_eq!(proposal["count"], 2);

    let (status, body) = send(app, "GET", "/api/deals/stats/pipeline", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let pipeline = body.as_array().unwrap();
    assert_eq!(pipeline.len(), 6);
    let proposal = pipeline.iter().find(|s| s["stage"] == "proposal").unwrap();
    assert_eq!(proposal["deals"].as_array().unwrap().len(), 2);
    assert_eq!(proposal["value"], 10000.0);
}

#[tokio::test]
async fn only_admin_deletes_deals() {
    let store = Store::new();
    let deal = insert_deal(&store, "Short lived", DealStage::Lead, 10);
    let app = setup_app(store);

    let sales = sales_token();
    let (status, _) = send(
        app.clone(),
        "DELETE",
        &format!("/api/deals/{}", deal.id),
        Some(&sales),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let admin = admin_token();
    let (status, body) = send(
        app,
        "DELETE",
        &format!("/api/deals/{}", deal.id),
        Some(&admin),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Deal deleted successfully");
}
