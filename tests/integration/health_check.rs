// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::{Method, StatusCode};

/// 健康检查与版本端点无需认证
#[tokio::test]
async fn health_and_version_are_public() {
    let app = create_test_app().await;

    let response = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), "OK");

    let response = app.send(Method::GET, "/v1/version", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.text(), env!("CARGO_PKG_VERSION"));
}

/// 未携带令牌访问受保护端点返回 401 和错误信封
#[tokio::test]
async fn protected_endpoint_requires_session() {
    let app = create_test_app().await;

    let response = app.send(Method::GET, "/v1/jobs", None, None).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    let body = response.json();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("bearer"));

    let response = app
        .send(Method::GET, "/v1/jobs", Some("bogus-token"), None)
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

/// 普通用户不能访问管理端，管理员也不能调用用户端接口
#[tokio::test]
async fn roles_are_enforced() {
    let app = create_test_app().await;
    let user = app.register_user("student01").await;
    let admin = app.admin_token().await;

    let response = app.get("/v1/admin/statistics", &user).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.get("/v1/me", &admin).await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app.get("/v1/admin/statistics", &admin).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["success"], true);
}
