// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn register_login_me_logout() {
    let app = create_test_app().await;
    let token = app.register_user("student01").await;

    let me = app.get("/v1/me", &token).await;
    assert_eq!(me.status, StatusCode::OK);
    let profile = me.data();
    assert_eq!(profile["username"], "student01");
    assert_eq!(profile["tier"], "common");
    assert_eq!(profile["effective_tier"], "common");

    let login = app
        .send(
            Method::POST,
            "/v1/auth/login",
            None,
            Some(json!({ "username": "student01", "password": "password-123" })),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    let second = login.data()["token"].as_str().unwrap().to_string();
    assert_ne!(second, token);

    let logout = app
        .send(Method::POST, "/v1/auth/logout", Some(&token), None)
        .await;
    assert_eq!(logout.status, StatusCode::OK);

    // 注销后旧令牌失效，另一个会话不受影响
    assert_eq!(app.get("/v1/me", &token).await.status, StatusCode::UNAUTHORIZED);
    assert_eq!(app.get("/v1/me", &second).await.status, StatusCode::OK);
}

#[tokio::test]
async fn register_rejects_invalid_and_duplicate_users() {
    let app = create_test_app().await;
    app.register_user("student01").await;

    let duplicate = app
        .send(
            Method::POST,
            "/v1/auth/register",
            None,
            Some(json!({ "username": "student01", "password": "password-123" })),
        )
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let invalid = app
        .send(
            Method::POST,
            "/v1/auth/register",
            None,
            Some(json!({ "username": "a b", "password": "123" })),
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
    assert_eq!(invalid.json()["success"], false);
}

#[tokio::test]
async fn wrong_password_and_disabled_user() {
    let app = create_test_app().await;
    let token = app.register_user("student01").await;
    let admin = app.admin_token().await;

    let wrong = app
        .send(
            Method::POST,
            "/v1/auth/login",
            None,
            Some(json!({ "username": "student01", "password": "not-it" })),
        )
        .await;
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);

    let user_id = app.get("/v1/me", &token).await.data()["id"]
        .as_str()
        .unwrap()
        .to_string();
    let disabled = app
        .send(
            Method::PATCH,
            &format!("/v1/admin/users/{}/active", user_id),
            Some(&admin),
            Some(json!({ "is_active": false })),
        )
        .await;
    assert_eq!(disabled.status, StatusCode::OK);
    assert_eq!(disabled.data()["is_active"], false);

    // 禁用后现有会话与新登录都被拒绝
    assert_eq!(app.get("/v1/me", &token).await.status, StatusCode::UNAUTHORIZED);
    let login = app
        .send(
            Method::POST,
            "/v1/auth/login",
            None,
            Some(json!({ "username": "student01", "password": "password-123" })),
        )
        .await;
    assert_eq!(login.status, StatusCode::FORBIDDEN);
}

/// 窗口期内重复提交返回 429
#[tokio::test]
async fn duplicate_submission_is_rejected() {
    let app = super::helpers::create_test_app_with(|settings| {
        settings.submit_guard.window_ms = 60_000;
    })
    .await;
    let admin = app.admin_token().await;
    let user = app.register_user("student01").await;
    let job = app.create_job(&admin, "后端开发", &[]).await;

    let uri = format!("/v1/jobs/{}/apply", job);
    let first = app.send(Method::POST, &uri, Some(&user), None).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = app.send(Method::POST, &uri, Some(&user), None).await;
    assert_eq!(second.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(second.json()["success"], false);

    // 不同目标不受影响
    let favorite = app
        .send(
            Method::POST,
            &format!("/v1/jobs/{}/favorite", job),
            Some(&user),
            None,
        )
        .await;
    assert_eq!(favorite.status, StatusCode::OK);
}
