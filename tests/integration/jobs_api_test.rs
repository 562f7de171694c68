// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};
use std::collections::HashSet;

fn ids(list: &Value) -> HashSet<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|job| job["id"].as_str().unwrap().to_string())
        .collect()
}

/// 普通用户每个分类只能看到前 5 个岗位，超出部分在列表中计数、详情返回 403
#[tokio::test]
async fn common_users_see_limited_jobs_per_category() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;
    let user = app.register_user("student01").await;

    let internet = app.create_category(&admin, "互联网", "other").await;
    let mut created = Vec::new();
    for i in 0..7 {
        created.push(
            app.create_job(&admin, &format!("岗位{}", i), &[internet.as_str()])
                .await,
        );
    }
    let open = app.create_job(&admin, "未分类岗位", &[]).await;

    let list = app.get("/v1/jobs", &user).await;
    assert_eq!(list.status, StatusCode::OK);
    let data = list.data();
    assert_eq!(data["total"], 6);
    assert_eq!(data["locked_count"], 2);
    assert_eq!(data["view_limit"], 5);
    assert_eq!(data["tier"], "common");

    let visible = ids(&data["jobs"]);
    assert!(visible.contains(&open));
    let locked = created
        .iter()
        .find(|id| !visible.contains(*id))
        .unwrap()
        .clone();

    let detail = app.get(&format!("/v1/jobs/{}", locked), &user).await;
    assert_eq!(detail.status, StatusCode::FORBIDDEN);

    for action in ["favorite", "apply"] {
        let response = app
            .send(
                Method::POST,
                &format!("/v1/jobs/{}/{}", locked, action),
                Some(&user),
                None,
            )
            .await;
        assert_eq!(response.status, StatusCode::FORBIDDEN);
    }
    assert!(app
        .get("/v1/me/favorites", &user)
        .await
        .data()
        .as_array()
        .unwrap()
        .is_empty());

    let shown = visible.iter().find(|id| **id != open).unwrap().clone();
    let detail = app.get(&format!("/v1/jobs/{}", shown), &user).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.data()["view_count"], 1);
}

#[tokio::test]
async fn list_filters_apply_within_visible_jobs() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;
    let user = app.register_user("student01").await;

    let finance = app.create_category(&admin, "金融", "other").await;
    app.create_job(&admin, "量化研究员", &[finance.as_str()]).await;
    app.create_job(&admin, "前端工程师", &[]).await;

    let response = app
        .get(&format!("/v1/jobs?category={}", finance), &user)
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["total"], 1);
    assert_eq!(response.data()["jobs"][0]["title"], "量化研究员");

    let response = app.get("/v1/jobs?keyword=%E5%89%8D%E7%AB%AF", &user).await;
    assert_eq!(response.data()["total"], 1);
    assert_eq!(response.data()["jobs"][0]["title"], "前端工程师");

    let response = app.get("/v1/jobs?job_type=internship", &user).await;
    assert_eq!(response.data()["total"], 0);

    let categories = app.get("/v1/categories", &user).await;
    assert_eq!(categories.data().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn inactive_jobs_are_hidden() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;
    let user = app.register_user("student01").await;
    let job = app.create_job(&admin, "下架岗位", &[]).await;

    let response = app
        .send(
            Method::PATCH,
            &format!("/v1/admin/jobs/{}/active", job),
            Some(&admin),
            Some(json!({ "is_active": false })),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    assert_eq!(app.get("/v1/jobs", &user).await.data()["total"], 0);
    let detail = app.get(&format!("/v1/jobs/{}", job), &user).await;
    assert_eq!(detail.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn favorites_applications_and_job_states() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;
    let user = app.register_user("student01").await;
    let job = app.create_job(&admin, "算法工程师", &[]).await;

    let favorite = app
        .send(
            Method::POST,
            &format!("/v1/jobs/{}/favorite", job),
            Some(&user),
            None,
        )
        .await;
    assert_eq!(favorite.data()["favorited"], true);
    assert_eq!(
        app.get("/v1/me/favorites", &user).await.data()[0]["id"],
        job.as_str()
    );

    let apply = app
        .send(Method::POST, &format!("/v1/jobs/{}/apply", job), Some(&user), None)
        .await;
    assert_eq!(apply.status, StatusCode::OK);
    assert_eq!(apply.data()["applied"], true);
    assert_eq!(
        app.get("/v1/me/applied", &user).await.data().as_array().unwrap().len(),
        1
    );

    let states = app.get("/v1/me/job-states", &user).await.data();
    assert_eq!(states["entries"][0]["stage"], "applied");

    let updated = app
        .send(
            Method::PUT,
            &format!("/v1/me/job-states/{}", job),
            Some(&user),
            Some(json!({ "stage": "interview", "note": "周三一面" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.data()["entries"][0]["stage"], "interview");
    assert_eq!(updated.data()["entries"][0]["note"], "周三一面");

    let removed = app
        .send(
            Method::DELETE,
            &format!("/v1/me/job-states/{}", job),
            Some(&user),
            None,
        )
        .await;
    assert_eq!(removed.status, StatusCode::OK);
    let again = app
        .send(
            Method::DELETE,
            &format!("/v1/me/job-states/{}", job),
            Some(&user),
            None,
        )
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);

    let withdraw = app
        .send(
            Method::DELETE,
            &format!("/v1/jobs/{}/apply", job),
            Some(&user),
            None,
        )
        .await;
    assert_eq!(withdraw.data()["applied"], false);
    assert!(app
        .get("/v1/me/applied", &user)
        .await
        .data()
        .as_array()
        .unwrap()
        .is_empty());
}
