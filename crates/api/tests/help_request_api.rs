//! Integration tests for help request CRUD, listing, and the summary
//! endpoint.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get_auth, post_json_auth, put_json_auth, register};
use sqlx::PgPool;

/// Minimal valid creation body; callers override what they care about.
fn request_body() -> serde_json::Value {
    serde_json::json!({
        "latitude": 6.9271,
        "longitude": 79.8612,
        "urgency": "high",
        "note": "Family of five stranded on upper floor",
        "area": "Kelaniya",
        "district": "Gampaha",
        "contactType": "phone",
        "contact": "0771234567",
        "totalPeople": 5,
        "elders": 1,
        "children": 2,
        "rationItems": { "dry_rations": 5 }
    })
}

async fn create_request(app: &Router, token: &str, body: serde_json::Value) -> serde_json::Value {
    let response = post_json_auth(app, "/api/help-requests", token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

// ---------------------------------------------------------------------------
// Create + round trip
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_round_trips_ration_items_into_inventory(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _, _) = register(&app, "nimal").await;

    // Zero quantities must be filtered before storage.
    let mut body = request_body();
    body["rationItems"] = serde_json::json!({ "dry_rations": 5, "bottled_water": 0 });
    let created = create_request(&app, &token, body).await;

    let codes = created["rationItems"].as_array().unwrap();
    assert_eq!(codes, &vec![serde_json::json!("dry_rations")]);
    assert_eq!(created["isOwner"], true);
    assert_eq!(created["status"], "open");

    // The quantity lives in the inventory rows, not the request body.
    let id = created["id"].as_i64().unwrap();
    let response = get_auth(&app, &format!("/api/help-requests/{id}/inventory"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let inventory = body_json(response).await;
    let rows = inventory.as_array().unwrap();
    assert_eq!(rows.len(), 1, "zero-quantity item must not create a row");
    assert_eq!(rows[0]["itemCode"], "dry_rations");
    assert_eq!(rows[0]["quantityNeeded"], 5);
    assert_eq!(rows[0]["quantityDonated"], 0);
    assert_eq!(rows[0]["quantityPending"], 0);
    assert_eq!(rows[0]["remaining"], 5);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn note_over_160_chars_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _, _) = register(&app, "nimal").await;

    let mut body = request_body();
    body["note"] = serde_json::json!("x".repeat(161));
    let response = post_json_auth(&app, "/api/help-requests", &token, body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["details"][0]["field"], "note");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn unknown_ration_code_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _, _) = register(&app, "nimal").await;

    let mut body = request_body();
    body["rationItems"] = serde_json::json!({ "gold_bars": 2 });
    let response = post_json_auth(&app, "/api/help-requests", &token, body).await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Ownership flag
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn is_owner_flag_follows_the_caller(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner_token, _, _) = register(&app, "owner").await;
    let (other_token, _, _) = register(&app, "other").await;

    let created = create_request(&app, &owner_token, request_body()).await;
    let id = created["id"].as_i64().unwrap();

    let as_owner = body_json(
        get_auth(&app, &format!("/api/help-requests/{id}"), &owner_token).await,
    )
    .await;
    assert_eq!(as_owner["isOwner"], true);

    let as_other = body_json(
        get_auth(&app, &format!("/api/help-requests/{id}"), &other_token).await,
    )
    .await;
    assert_eq!(as_other["isOwner"], false);
}

// ---------------------------------------------------------------------------
// Listing, filters, pagination
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_urgency_and_district(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _, _) = register(&app, "nimal").await;

    let mut low = request_body();
    low["urgency"] = serde_json::json!("low");
    low["district"] = serde_json::json!("Colombo");
    create_request(&app, &token, low).await;
    create_request(&app, &token, request_body()).await;

    let by_urgency = body_json(
        get_auth(&app, "/api/help-requests?urgency=high", &token).await,
    )
    .await;
    assert_eq!(by_urgency["count"], 1);
    assert_eq!(by_urgency["data"][0]["urgency"], "high");

    let by_district = body_json(
        get_auth(&app, "/api/help-requests?district=Colombo", &token).await,
    )
    .await;
    assert_eq!(by_district["count"], 1);
    assert_eq!(by_district["data"][0]["district"], "Colombo");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_filters_by_map_bounds(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _, _) = register(&app, "nimal").await;

    create_request(&app, &token, request_body()).await;
    let mut far_away = request_body();
    far_away["latitude"] = serde_json::json!(40.7128);
    far_away["longitude"] = serde_json::json!(-74.006);
    create_request(&app, &token, far_away).await;

    let uri = "/api/help-requests?minLat=6.0&maxLat=7.0&minLng=79.0&maxLng=81.0";
    let json = body_json(get_auth(&app, uri, &token).await).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["district"], "Gampaha");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn count_is_total_rows_not_page_size(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _, _) = register(&app, "nimal").await;

    for _ in 0..5 {
        create_request(&app, &token, request_body()).await;
    }

    // Five rows at two per page: page 3 holds the final one.
    let page3 = body_json(
        get_auth(&app, "/api/help-requests?limit=2&page=3", &token).await,
    )
    .await;
    assert_eq!(page3["count"], 5);
    assert_eq!(page3["data"].as_array().unwrap().len(), 1);

    let page1 = body_json(
        get_auth(&app, "/api/help-requests?limit=2&page=1", &token).await,
    )
    .await;
    assert_eq!(page1["data"].as_array().unwrap().len(), 2);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_by_non_owner_is_forbidden(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner_token, _, _) = register(&app, "owner").await;
    let (other_token, _, _) = register(&app, "other").await;

    let created = create_request(&app, &owner_token, request_body()).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json_auth(
        &app,
        &format!("/api/help-requests/{id}"),
        &other_token,
        serde_json::json!({ "status": "completed" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn owner_update_redeclares_needed_quantities(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _, _) = register(&app, "nimal").await;

    let created = create_request(&app, &token, request_body()).await;
    let id = created["id"].as_i64().unwrap();

    let response = put_json_auth(
        &app,
        &format!("/api/help-requests/{id}"),
        &token,
        serde_json::json!({
            "status": "scheduled",
            "rationItems": { "dry_rations": 7, "blankets": 2 }
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["status"], "scheduled");

    let inventory = body_json(
        get_auth(&app, &format!("/api/help-requests/{id}/inventory"), &token).await,
    )
    .await;
    let rows = inventory.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Rows are ordered by item code.
    assert_eq!(rows[0]["itemCode"], "blankets");
    assert_eq!(rows[0]["quantityNeeded"], 2);
    assert_eq!(rows[1]["itemCode"], "dry_rations");
    assert_eq!(rows[1]["quantityNeeded"], 7);
}

// ---------------------------------------------------------------------------
// My requests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn my_requests_lists_only_the_callers(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (mine_token, _, _) = register(&app, "mine").await;
    let (other_token, _, _) = register(&app, "other").await;

    create_request(&app, &mine_token, request_body()).await;
    create_request(&app, &other_token, request_body()).await;

    let json = body_json(get_auth(&app, "/api/help-requests/my", &mine_token).await).await;
    assert_eq!(json["count"], 1);
    assert_eq!(json["data"][0]["isOwner"], true);
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn summary_aggregates_counts_people_and_items(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (token, _, _) = register(&app, "nimal").await;

    // high urgency, 5 + 1 + 2 people, dry_rations: 5
    create_request(&app, &token, request_body()).await;

    // low urgency, 3 people, bottled_water: 4
    let mut second = request_body();
    second["urgency"] = serde_json::json!("low");
    second["district"] = serde_json::json!("Colombo");
    second["totalPeople"] = serde_json::json!(3);
    second["elders"] = serde_json::json!(0);
    second["children"] = serde_json::json!(0);
    second["rationItems"] = serde_json::json!({ "bottled_water": 4 });
    create_request(&app, &token, second).await;

    let json = body_json(get_auth(&app, "/api/help-requests/summary", &token).await).await;

    assert_eq!(json["totalRequests"], 2);
    assert_eq!(json["byUrgency"]["high"], 1);
    assert_eq!(json["byUrgency"]["low"], 1);
    assert_eq!(json["byStatus"]["open"], 2);
    assert_eq!(json["byDistrict"]["Gampaha"], 1);
    assert_eq!(json["byDistrict"]["Colombo"], 1);

    // Combined total counts elders and children on top of the base figure:
    // (5 + 1 + 2) + 3 = 11.
    assert_eq!(json["people"]["totalPeople"], 8);
    assert_eq!(json["people"]["elders"], 1);
    assert_eq!(json["people"]["children"], 2);
    assert_eq!(json["people"]["combinedTotal"], 11);

    // Distinct item codes with needed > 0, not a quantity sum.
    assert_eq!(json["totalRationItemTypes"], 2);

    let items = json["rationItems"].as_array().unwrap();
    let water = items
        .iter()
        .find(|i| i["itemCode"] == "bottled_water")
        .unwrap();
    assert_eq!(water["needed"], 4);
    assert_eq!(water["remaining"], 4);
    assert_eq!(water["requestCount"], 1);
}
