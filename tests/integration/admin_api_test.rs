// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::create_test_app;
use axum::http::{header, Method, StatusCode};
use serde_json::json;

const IMPORT_CSV: &str = "title,company,city,job_type,deadline,apply_url,categories\n\
后端开发,\"Acme, Inc.\",上海,全职,2026-06-30,https://acme.example/1,互联网\n\
前端开发,Acme,上海,实习,2026-07-01,https://acme.example/2,\n\
测试开发,Acme,上海,外包,2026-07-01,https://acme.example/3,\n";

#[tokio::test]
async fn job_crud_and_category_rules() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;

    let soe = app.create_category(&admin, "国企", "nature").await;
    let foreign = app.create_category(&admin, "外企", "nature").await;
    let job = app.create_job(&admin, "管培生", &[soe.as_str()]).await;

    // 两个企业性质分类被拒绝
    let invalid = app
        .post(
            "/v1/admin/jobs",
            &admin,
            json!({
                "title": "管培生",
                "company": "Acme",
                "city": "北京",
                "job_type": "full_time",
                "apply_url": "https://acme.example/apply",
                "category_ids": [soe, foreign],
            }),
        )
        .await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);

    let updated = app
        .send(
            Method::PUT,
            &format!("/v1/admin/jobs/{}", job),
            Some(&admin),
            Some(json!({
                "title": "管理培训生",
                "company": "Acme",
                "city": "北京",
                "job_type": "full_time",
                "salary": "15k-20k",
                "apply_url": "https://acme.example/apply",
                "category_ids": [foreign],
            })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK, "{}", updated.text());
    assert_eq!(updated.data()["title"], "管理培训生");
    assert_eq!(updated.data()["salary"], "15k-20k");

    // 被岗位引用的分类不能删除
    let in_use = app
        .send(
            Method::DELETE,
            &format!("/v1/admin/categories/{}", foreign),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(in_use.status, StatusCode::CONFLICT);
    let unused = app
        .send(
            Method::DELETE,
            &format!("/v1/admin/categories/{}", soe),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(unused.status, StatusCode::OK);

    let deleted = app
        .send(
            Method::DELETE,
            &format!("/v1/admin/jobs/{}", job),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    let missing = app
        .get(&format!("/v1/admin/jobs/{}", job), &admin)
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn tags_crud() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;

    let created = app
        .post("/v1/admin/tags", &admin, json!({ "name": "双休" }))
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    let tag = created.data()["id"].as_str().unwrap().to_string();

    let duplicate = app
        .post("/v1/admin/tags", &admin, json!({ "name": "双休" }))
        .await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let renamed = app
        .send(
            Method::PUT,
            &format!("/v1/admin/tags/{}", tag),
            Some(&admin),
            Some(json!({ "name": "周末双休" })),
        )
        .await;
    assert_eq!(renamed.data()["name"], "周末双休");

    let list = app.get("/v1/admin/tags", &admin).await;
    assert_eq!(list.data().as_array().unwrap().len(), 1);

    let deleted = app
        .send(
            Method::DELETE,
            &format!("/v1/admin/tags/{}", tag),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
}

#[tokio::test]
async fn csv_import_dry_run_then_commit() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;
    app.create_category(&admin, "互联网", "other").await;

    let preview = app
        .send_csv("/v1/admin/jobs/import?dry_run=true", &admin, IMPORT_CSV)
        .await;
    assert_eq!(preview.status, StatusCode::OK, "{}", preview.text());
    let report = preview.data();
    assert_eq!(report["total_rows"], 3);
    assert_eq!(report["imported"], 0);
    assert_eq!(report["dry_run"], true);
    assert_eq!(report["errors"].as_array().unwrap().len(), 1);
    assert_eq!(report["errors"][0]["line"], 4);
    assert!(app
        .get("/v1/admin/jobs", &admin)
        .await
        .data()
        .as_array()
        .unwrap()
        .is_empty());

    let committed = app
        .send_csv("/v1/admin/jobs/import", &admin, IMPORT_CSV)
        .await;
    assert_eq!(committed.data()["imported"], 2);
    assert_eq!(
        app.get("/v1/admin/jobs", &admin)
            .await
            .data()
            .as_array()
            .unwrap()
            .len(),
        2
    );

    let missing_column = app
        .send_csv("/v1/admin/jobs/import", &admin, "title,company\n后端,Acme\n")
        .await;
    assert_eq!(missing_column.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn statistics_and_export() {
    let app = create_test_app().await;
    let admin = app.admin_token().await;
    let user = app.register_user("student01").await;
    let job = app.create_job(&admin, "数据分析师", &[]).await;
    app.get(&format!("/v1/jobs/{}", job), &user).await;
    app.get(&format!("/v1/jobs/{}", job), &user).await;

    let stats = app.get("/v1/admin/statistics", &admin).await.data();
    assert_eq!(stats["total_jobs"], 1);
    assert_eq!(stats["total_users"], 1);
    assert_eq!(stats["total_views"], 2);
    assert_eq!(stats["top_jobs"][0]["title"], "数据分析师");

    let users = app.get("/v1/admin/users", &admin).await.data();
    assert_eq!(users[0]["username"], "student01");

    let export = app.get("/v1/admin/statistics/export", &admin).await;
    assert_eq!(export.status, StatusCode::OK);
    assert!(export.headers[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap()
        .contains("statistics.csv"));
    assert!(export.text().contains("metric,value"));
}
