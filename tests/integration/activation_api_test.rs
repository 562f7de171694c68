// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::{header, Method, StatusCode};
use serde_json::json;

/// 兑换正式会员码后解除岗位数量限制，激活码只能使用一次
#[tokio::test]
async fn redeem_official_code_unlocks_all_jobs() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;
    let user = app.register_user("student01").await;

    let category = app.create_category(&admin, "互联网", "other").await;
    for i in 0..7 {
        app.create_job(&admin, &format!("岗位{}", i), &[category.as_str()])
            .await;
    }
    assert_eq!(app.get("/v1/jobs", &user).await.data()["locked_count"], 2);

    let generated = app
        .post(
            "/v1/admin/activation-codes",
            &admin,
            json!({ "count": 2, "tier": "official", "validity_days": 30, "note": "春招" }),
        )
        .await;
    assert_eq!(generated.status, StatusCode::CREATED, "{}", generated.text());
    let code = generated.data()[0]["code"].as_str().unwrap().to_lowercase();

    // 兑换时忽略大小写与空白
    let redeemed = app
        .post(
            "/v1/activation/redeem",
            &user,
            json!({ "code": format!("  {} ", code) }),
        )
        .await;
    assert_eq!(redeemed.status, StatusCode::OK, "{}", redeemed.text());
    assert_eq!(redeemed.data()["tier"], "official");
    assert_eq!(redeemed.data()["extended"], false);
    assert_eq!(redeemed.data()["profile"]["effective_tier"], "official");

    let list = app.get("/v1/jobs", &user).await.data();
    assert_eq!(list["total"], 7);
    assert_eq!(list["locked_count"], 0);
    assert!(list["view_limit"].is_null());

    let other = app.register_user("student02").await;
    let reused = app
        .post("/v1/activation/redeem", &other, json!({ "code": code }))
        .await;
    assert_eq!(reused.status, StatusCode::CONFLICT);

    let unknown = app
        .post("/v1/activation/redeem", &other, json!({ "code": "ZZZZZZZZZZZZ" }))
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn admin_manages_and_exports_codes() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;
    let user = app.register_user("student01").await;

    let generated = app
        .post(
            "/v1/admin/activation-codes",
            &admin,
            json!({ "count": 3, "tier": "temp", "validity_days": 7 }),
        )
        .await;
    let codes = generated.data();
    let used_code = codes[0]["code"].as_str().unwrap().to_string();
    let used_id = codes[0]["id"].as_str().unwrap().to_string();
    let spare_id = codes[1]["id"].as_str().unwrap().to_string();

    app.post("/v1/activation/redeem", &user, json!({ "code": used_code }))
        .await;

    let used = app
        .get("/v1/admin/activation-codes?status=used", &admin)
        .await;
    assert_eq!(used.data().as_array().unwrap().len(), 1);
    let unused = app
        .get("/v1/admin/activation-codes?status=unused", &admin)
        .await;
    assert_eq!(unused.data().as_array().unwrap().len(), 2);

    let delete_used = app
        .send(
            Method::DELETE,
            &format!("/v1/admin/activation-codes/{}", used_id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(delete_used.status, StatusCode::CONFLICT);

    let delete_spare = app
        .send(
            Method::DELETE,
            &format!("/v1/admin/activation-codes/{}", spare_id),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(delete_spare.status, StatusCode::OK);

    let export = app
        .get("/v1/admin/activation-codes/export", &admin)
        .await;
    assert_eq!(export.status, StatusCode::OK);
    assert!(export.headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/csv"));
    assert!(export.headers[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("activation_codes.csv"));
    let csv = export.text();
    assert!(csv.contains("code,tier,validity_days,status"));
    assert!(csv.contains(&used_code));
    assert_eq!(csv.trim_end().lines().count(), 3);
}

#[tokio::test]
async fn generate_rejects_invalid_requests() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;

    for body in [
        json!({ "count": 0, "tier": "temp", "validity_days": 7 }),
        json!({ "count": 1, "tier": "common", "validity_days": 7 }),
        json!({ "count": 1, "tier": "temp", "validity_days": 0 }),
    ] {
        let response = app.post("/v1/admin/activation-codes", &admin, body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
    }
}
