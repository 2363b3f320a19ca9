mod common;

use axum::http::StatusCode;
use mockito::Matcher;
use serde_json::json;

fn habit_row(id: i64, user_id: &str, name: &str, is_public: bool) -> serde_json::Value {
    json!({
        "id": id,
        "user_id": user_id,
        "name": name,
        "description": null,
        "is_public": is_public,
        "created_at": "2026-08-01T09:30:00Z"
    })
}

#[tokio::test]
async fn create_stamps_owner_and_ignores_client_user_id() {
    let mut ctx = common::test_context().await;
    common::mock_verified_user(&mut ctx.server).await;

    let insert = ctx
        .server
        .mock("POST", "/rest/v1/habits")
        .match_header("authorization", format!("Bearer {}", common::TOKEN).as_str())
        .match_header("apikey", common::ANON_KEY)
        .match_header("prefer", "return=representation")
        // The body sent upstream must carry the authenticated user's id,
        // not the one the client tried to smuggle in
        .match_body(Matcher::PartialJson(json!({
            "user_id": common::USER_ID,
            "name": "Read",
            "is_public": false
        })))
        .with_status(201)
        .with_body(json!([habit_row(12, common::USER_ID, "Read", false)]).to_string())
        .create_async()
        .await;

    let request = common::authed_json(
        "POST",
        "/habits",
        &json!({ "name": "Read", "user_id": "someone-else" }),
    );
    let (status, body) = common::send(ctx.app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["data"]["user_id"], common::USER_ID);
    assert_eq!(body["data"]["name"], "Read");
    insert.assert_async().await;
}

#[tokio::test]
async fn create_with_blank_name_is_rejected_locally() {
    let mut ctx = common::test_context().await;
    common::mock_verified_user(&mut ctx.server).await;

    let insert = ctx
        .server
        .mock("POST", "/rest/v1/habits")
        .expect(0)
        .create_async()
        .await;

    let request = common::authed_json("POST", "/habits", &json!({ "name": "   " }));
    let (status, body) = common::send(ctx.app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    insert.assert_async().await;
}

#[tokio::test]
async fn list_mine_filters_by_owner() {
    let mut ctx = common::test_context().await;
    common::mock_verified_user(&mut ctx.server).await;

    ctx.server
        .mock("GET", "/rest/v1/habits")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("select".into(), "*".into()),
            Matcher::UrlEncoded("user_id".into(), format!("eq.{}", common::USER_ID)),
        ]))
        .match_header("authorization", format!("Bearer {}", common::TOKEN).as_str())
        .with_status(200)
        .with_body(
            json!([
                habit_row(1, common::USER_ID, "Read", false),
                habit_row(2, common::USER_ID, "Run", true),
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let (status, body) = common::send(ctx.app, common::authed_get("/habits")).await;

    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().expect("bare array response");
    assert_eq!(rows.len(), 2);
    let names: Vec<&str> = rows.iter().filter_map(|r| r["name"].as_str()).collect();
    assert!(names.contains(&"Read") && names.contains(&"Run"));
}

#[tokio::test]
async fn list_public_sends_no_bearer_token_upstream() {
    let mut ctx = common::test_context().await;

    let listing = ctx
        .server
        .mock("GET", "/rest/v1/habits")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("select".into(), "*".into()),
            Matcher::UrlEncoded("is_public".into(), "eq.true".into()),
        ]))
        .match_header("authorization", Matcher::Missing)
        .match_header("apikey", common::ANON_KEY)
        .with_status(200)
        .with_body(json!([habit_row(3, "someone-else", "Meditate", true)]).to_string())
        .create_async()
        .await;

    let (status, body) = common::send(ctx.app, common::get("/habits/public")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["name"], "Meditate");
    assert_eq!(body[0]["is_public"], true);
    listing.assert_async().await;
}

#[tokio::test]
async fn update_scopes_filter_to_id_and_owner() {
    let mut ctx = common::test_context().await;
    common::mock_verified_user(&mut ctx.server).await;

    let update = ctx
        .server
        .mock("PATCH", "/rest/v1/habits")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("id".into(), "eq.7".into()),
            Matcher::UrlEncoded("user_id".into(), format!("eq.{}", common::USER_ID)),
        ]))
        .match_header("prefer", "return=representation")
        .match_body(Matcher::PartialJson(json!({ "name": "Read more" })))
        .with_status(200)
        .with_body(json!([habit_row(7, common::USER_ID, "Read more", false)]).to_string())
        .create_async()
        .await;

    let request = common::authed_json("PUT", "/habits/7", &json!({ "name": "Read more" }));
    let (status, body) = common::send(ctx.app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["data"]["name"], "Read more");
    update.assert_async().await;
}

#[tokio::test]
async fn update_of_foreign_habit_returns_empty_result_not_403() {
    let mut ctx = common::test_context().await;
    common::mock_verified_user(&mut ctx.server).await;

    // The ownership filter matches zero rows upstream
    ctx.server
        .mock("PATCH", "/rest/v1/habits")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let request = common::authed_json("PUT", "/habits/99", &json!({ "name": "Hijack" }));
    let (status, body) = common::send(ctx.app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn delete_scopes_filter_and_tolerates_empty_upstream_body() {
    let mut ctx = common::test_context().await;
    common::mock_verified_user(&mut ctx.server).await;

    let delete = ctx
        .server
        .mock("DELETE", "/rest/v1/habits")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("id".into(), "eq.7".into()),
            Matcher::UrlEncoded("user_id".into(), format!("eq.{}", common::USER_ID)),
        ]))
        .with_status(204)
        .create_async()
        .await;

    let (status, body) = common::send(ctx.app, common::authed_delete("/habits/7")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["data"], json!([]));
    delete.assert_async().await;
}

#[tokio::test]
async fn upstream_error_passes_through_status_and_body() {
    let mut ctx = common::test_context().await;
    common::mock_verified_user(&mut ctx.server).await;

    let upstream_body = r#"{"code":"23505","message":"duplicate key value"}"#;
    ctx.server
        .mock("POST", "/rest/v1/habits")
        .with_status(409)
        .with_body(upstream_body)
        .create_async()
        .await;

    let request = common::authed_json("POST", "/habits", &json!({ "name": "Read" }));
    let (status, body) = common::send(ctx.app, request).await;

    assert_eq!(status, StatusCode::CONFLICT);
    // Raw upstream body, no local envelope or redaction
    assert_eq!(body, serde_json::from_str::<serde_json::Value>(upstream_body).unwrap());
}
