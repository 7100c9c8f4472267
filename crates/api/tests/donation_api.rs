//! Integration tests for the donation lifecycle and the inventory
//! reconciliation rules.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, get_auth, patch_auth, post_json_auth, register};
use sqlx::PgPool;

fn request_body(ration_items: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "latitude": 6.9271,
        "longitude": 79.8612,
        "urgency": "high",
        "note": "Need supplies after the flood",
        "area": "Kelaniya",
        "district": "Gampaha",
        "contactType": "phone",
        "contact": "0771234567",
        "rationItems": ration_items
    })
}

fn donation_body(ration_items: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "donatorName": "Kasun Perera",
        "donatorMobileNumber": "0719876543",
        "rationItems": ration_items
    })
}

/// Create a help request needing `ration_items` and return its id.
async fn create_request(app: &Router, token: &str, ration_items: serde_json::Value) -> i64 {
    let response =
        post_json_auth(app, "/api/help-requests", token, request_body(ration_items)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

/// Create a donation against a help request and return its id.
async fn donate(
    app: &Router,
    token: &str,
    request_id: i64,
    ration_items: serde_json::Value,
) -> i64 {
    let response = post_json_auth(
        app,
        &format!("/api/help-requests/{request_id}/donations"),
        token,
        donation_body(ration_items),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn inventory(app: &Router, token: &str, request_id: i64) -> serde_json::Value {
    body_json(get_auth(app, &format!("/api/help-requests/{request_id}/inventory"), token).await)
        .await
}

fn row<'a>(inventory: &'a serde_json::Value, code: &str) -> &'a serde_json::Value {
    inventory
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["itemCode"] == code)
        .unwrap_or_else(|| panic!("no inventory row for {code}"))
}

// ---------------------------------------------------------------------------
// Pending accumulation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn donation_adds_pending_with_no_cap(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner, _, _) = register(&app, "owner").await;
    let (donor, _, _) = register(&app, "donor").await;

    // Needs: A=5, B=1. Pledge: A=3, B=2. B exceeds its remaining need and
    // is still accepted.
    let id = create_request(
        &app,
        &owner,
        serde_json::json!({ "dry_rations": 5, "bottled_water": 1 }),
    )
    .await;
    donate(
        &app,
        &donor,
        id,
        serde_json::json!({ "dry_rations": 3, "bottled_water": 2 }),
    )
    .await;

    let inv = inventory(&app, &owner, id).await;
    let rations = row(&inv, "dry_rations");
    assert_eq!(rations["quantityPending"], 3);
    assert_eq!(rations["remaining"], 2);

    let water = row(&inv, "bottled_water");
    assert_eq!(water["quantityPending"], 2);
    assert_eq!(water["remaining"], 0, "remaining clamps at zero");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_donors_may_overcommit(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner, _, _) = register(&app, "owner").await;
    let (donor_a, _, _) = register(&app, "donor_a").await;
    let (donor_b, _, _) = register(&app, "donor_b").await;

    let id = create_request(&app, &owner, serde_json::json!({ "bottled_water": 3 })).await;

    // Both pledges of 2 against a remaining need of 3 succeed.
    donate(&app, &donor_a, id, serde_json::json!({ "bottled_water": 2 })).await;
    donate(&app, &donor_b, id, serde_json::json!({ "bottled_water": 2 })).await;

    let inv = inventory(&app, &owner, id).await;
    let water = row(&inv, "bottled_water");
    assert_eq!(water["quantityPending"], 4);
    assert_eq!(water["quantityNeeded"], 3);
    assert_eq!(water["remaining"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn donation_for_undeclared_item_creates_zero_need_row(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner, _, _) = register(&app, "owner").await;
    let (donor, _, _) = register(&app, "donor").await;

    let id = create_request(&app, &owner, serde_json::json!({ "dry_rations": 5 })).await;
    donate(&app, &donor, id, serde_json::json!({ "blankets": 2 })).await;

    let inv = inventory(&app, &owner, id).await;
    let blankets = row(&inv, "blankets");
    assert_eq!(blankets["quantityNeeded"], 0);
    assert_eq!(blankets["quantityPending"], 2);
    assert_eq!(blankets["remaining"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn donation_without_positive_quantities_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner, _, _) = register(&app, "owner").await;
    let (donor, _, _) = register(&app, "donor").await;

    let id = create_request(&app, &owner, serde_json::json!({ "dry_rations": 5 })).await;

    let response = post_json_auth(
        &app,
        &format!("/api/help-requests/{id}/donations"),
        &donor,
        donation_body(serde_json::json!({ "dry_rations": 0 })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["details"][0]["field"], "rationItems");
}

// ---------------------------------------------------------------------------
// Progress marks
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_scheduled_is_idempotent(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner, _, _) = register(&app, "owner").await;
    let (donor, _, _) = register(&app, "donor").await;

    let id = create_request(&app, &owner, serde_json::json!({ "dry_rations": 5 })).await;
    let donation_id = donate(&app, &donor, id, serde_json::json!({ "dry_rations": 2 })).await;

    let uri = format!("/api/help-requests/{id}/donations/{donation_id}/schedule");
    let first = patch_auth(&app, &uri, &donor).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = patch_auth(&app, &uri, &donor).await;
    assert_eq!(second.status(), StatusCode::OK);

    let json = body_json(second).await;
    assert_eq!(json["donatorMarkedScheduled"], true);
    assert_eq!(json["effectiveStatus"], "scheduled");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn donator_completion_does_not_require_scheduling(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner, _, _) = register(&app, "owner").await;
    let (donor, _, _) = register(&app, "donor").await;

    let id = create_request(&app, &owner, serde_json::json!({ "dry_rations": 5 })).await;
    let donation_id = donate(&app, &donor, id, serde_json::json!({ "dry_rations": 2 })).await;

    let uri = format!("/api/help-requests/{id}/donations/{donation_id}/complete-donator");
    let response = patch_auth(&app, &uri, &donor).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["donatorMarkedScheduled"], false);
    assert_eq!(json["donatorMarkedCompleted"], true);
    // Completion is OR'd across both sides for display.
    assert_eq!(json["effectiveStatus"], "completed");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn donator_marks_are_forbidden_for_everyone_else(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner, _, _) = register(&app, "owner").await;
    let (donor, _, _) = register(&app, "donor").await;
    let (third, _, _) = register(&app, "third").await;

    let id = create_request(&app, &owner, serde_json::json!({ "dry_rations": 5 })).await;
    let donation_id = donate(&app, &donor, id, serde_json::json!({ "dry_rations": 2 })).await;

    let schedule = format!("/api/help-requests/{id}/donations/{donation_id}/schedule");
    assert_eq!(
        patch_auth(&app, &schedule, &third).await.status(),
        StatusCode::FORBIDDEN
    );
    // Even the help-request owner cannot attest on the donor's behalf.
    assert_eq!(
        patch_auth(&app, &schedule, &owner).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn owner_mark_is_forbidden_for_the_donator(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner, _, _) = register(&app, "owner").await;
    let (donor, _, _) = register(&app, "donor").await;

    let id = create_request(&app, &owner, serde_json::json!({ "dry_rations": 5 })).await;
    let donation_id = donate(&app, &donor, id, serde_json::json!({ "dry_rations": 2 })).await;

    let uri = format!("/api/help-requests/{id}/donations/{donation_id}/complete-owner");
    assert_eq!(
        patch_auth(&app, &uri, &donor).await.status(),
        StatusCode::FORBIDDEN
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn owner_confirmation_moves_pending_to_donated_exactly_once(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner, _, _) = register(&app, "owner").await;
    let (donor, _, _) = register(&app, "donor").await;

    let id = create_request(&app, &owner, serde_json::json!({ "dry_rations": 5 })).await;
    let donation_id = donate(&app, &donor, id, serde_json::json!({ "dry_rations": 2 })).await;

    let uri = format!("/api/help-requests/{id}/donations/{donation_id}/complete-owner");
    let first = patch_auth(&app, &uri, &owner).await;
    assert_eq!(first.status(), StatusCode::OK);
    let json = body_json(first).await;
    assert_eq!(json["ownerMarkedCompleted"], true);
    assert_eq!(json["effectiveStatus"], "completed");

    // Confirming again must not double-move quantities.
    let second = patch_auth(&app, &uri, &owner).await;
    assert_eq!(second.status(), StatusCode::OK);

    let inv = inventory(&app, &owner, id).await;
    let rations = row(&inv, "dry_rations");
    assert_eq!(rations["quantityDonated"], 2);
    assert_eq!(rations["quantityPending"], 0);
    assert_eq!(rations["remaining"], 3);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn mark_on_donation_of_another_request_is_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner, _, _) = register(&app, "owner").await;
    let (donor, _, _) = register(&app, "donor").await;

    let first = create_request(&app, &owner, serde_json::json!({ "dry_rations": 5 })).await;
    let second = create_request(&app, &owner, serde_json::json!({ "dry_rations": 5 })).await;
    let donation_id = donate(&app, &donor, first, serde_json::json!({ "dry_rations": 2 })).await;

    let uri = format!("/api/help-requests/{second}/donations/{donation_id}/schedule");
    assert_eq!(
        patch_auth(&app, &uri, &donor).await.status(),
        StatusCode::NOT_FOUND
    );
}

// ---------------------------------------------------------------------------
// Contact visibility
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn donator_contact_is_hidden_from_third_parties(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner, _, _) = register(&app, "owner").await;
    let (donor, _, _) = register(&app, "donor").await;
    let (third, _, _) = register(&app, "third").await;

    let id = create_request(&app, &owner, serde_json::json!({ "dry_rations": 5 })).await;
    donate(&app, &donor, id, serde_json::json!({ "dry_rations": 2 })).await;

    let uri = format!("/api/help-requests/{id}/donations");

    let as_third = body_json(get_auth(&app, &uri, &third).await).await;
    let donation = &as_third["data"][0];
    assert_eq!(donation["showContactInfo"], false);
    assert!(donation.get("donatorName").is_none());
    assert!(donation.get("donatorMobileNumber").is_none());

    let as_donor = body_json(get_auth(&app, &uri, &donor).await).await;
    let donation = &as_donor["data"][0];
    assert_eq!(donation["showContactInfo"], true);
    assert_eq!(donation["donatorName"], "Kasun Perera");
    assert_eq!(donation["donatorMobileNumber"], "0719876543");

    let as_owner = body_json(get_auth(&app, &uri, &owner).await).await;
    assert_eq!(as_owner["data"][0]["showContactInfo"], true);
    assert_eq!(as_owner["data"][0]["donatorName"], "Kasun Perera");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn my_donations_always_include_contact_info(pool: PgPool) {
    let app = common::build_test_app(pool);
    let (owner, _, _) = register(&app, "owner").await;
    let (donor, _, _) = register(&app, "donor").await;

    let id = create_request(&app, &owner, serde_json::json!({ "dry_rations": 5 })).await;
    donate(&app, &donor, id, serde_json::json!({ "dry_rations": 2 })).await;

    let json = body_json(get_auth(&app, "/api/help-requests/my/donations", &donor).await).await;
    assert_eq!(json["count"], 1);

    let donation = &json["data"][0];
    assert_eq!(donation["showContactInfo"], true);
    assert_eq!(donation["donatorName"], "Kasun Perera");
    assert_eq!(donation["rationItems"]["dry_rations"], 2);
    assert_eq!(donation["effectiveStatus"], "pending");
}
