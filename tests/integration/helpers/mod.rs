// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use campus_jobs::application::data_access::{DataAccess, Repositories};
use campus_jobs::config::settings::Settings;
use campus_jobs::infrastructure::cache::cache_manager::{CacheManager, CachePolicy};
use campus_jobs::infrastructure::cache::cache_strategy::MemoryCacheStrategy;
use campus_jobs::infrastructure::realtime::notification_hub::NotificationHub;
use campus_jobs::infrastructure::repositories::account_repo_impl::{
    AdminRepositoryImpl, SessionRepositoryImpl,
};
use campus_jobs::presentation::routes::{self, AppServices};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::util::ServiceExt;

pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "admin-secret";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub services: AppServices,
    pub db: Arc<DatabaseConnection>,
}

/// 测试响应
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn data(&self) -> Value {
        self.json()["data"].clone()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }
}

/// 防重复提交窗口为 0 的测试应用，连续请求不会被拦截
pub async fn create_test_app() -> TestApp {
    create_test_app_with(|_| {}).await
}

pub async fn create_test_app_with(configure: impl FnOnce(&mut Settings)) -> TestApp {
    let mut settings = Settings::builtin().unwrap();
    settings.submit_guard.window_ms = 0;
    configure(&mut settings);

    let db = Arc::new(Database::connect("sqlite::memory:").await.unwrap());
    Migrator::up(db.as_ref(), None).await.unwrap();

    let cache = Arc::new(CacheManager::new(
        Box::new(MemoryCacheStrategy::new(1000)),
        CachePolicy::new(Duration::from_secs(300)),
    ));
    let data = Arc::new(DataAccess::new(
        Repositories::sea_orm(db.clone()),
        cache,
        Arc::new(NotificationHub::default()),
    ));
    let services = AppServices::new(
        data,
        Arc::new(AdminRepositoryImpl::new(db.clone())),
        Arc::new(SessionRepositoryImpl::new(db.clone())),
        &settings,
    );
    services
        .accounts
        .bootstrap_admin(ADMIN_USERNAME, ADMIN_PASSWORD)
        .await
        .unwrap();

    TestApp {
        router: routes::app(&services),
        services,
        db,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.dispatch(request).await
    }

    pub async fn send_csv(&self, uri: &str, token: &str, csv: &str) -> TestResponse {
        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "text/csv")
            .body(Body::from(csv.to_string()))
            .unwrap();
        self.dispatch(request).await
    }

    async fn dispatch(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str, token: &str) -> TestResponse {
        self.send(Method::GET, uri, Some(token), None).await
    }

    pub async fn post(&self, uri: &str, token: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(token), Some(body)).await
    }

    /// 注册普通用户，返回会话令牌
    pub async fn register_user(&self, username: &str) -> String {
        let response = self
            .send(
                Method::POST,
                "/v1/auth/register",
                None,
                Some(json!({
                    "username": username,
                    "password": "password-123",
                    "display_name": username,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
        response.data()["token"].as_str().unwrap().to_string()
    }

    pub async fn admin_token(&self) -> String {
        let response = self
            .send(
                Method::POST,
                "/v1/admin/login",
                None,
                Some(json!({ "username": ADMIN_USERNAME, "password": ADMIN_PASSWORD })),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "{}", response.text());
        response.data()["token"].as_str().unwrap().to_string()
    }

    pub async fn create_category(&self, admin: &str, name: &str, kind: &str) -> String {
        let response = self
            .post(
                "/v1/admin/categories",
                admin,
                json!({ "name": name, "kind": kind }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
        response.data()["id"].as_str().unwrap().to_string()
    }

    pub async fn create_job(&self, admin: &str, title: &str, category_ids: &[&str]) -> String {
        let response = self
            .post(
                "/v1/admin/jobs",
                admin,
                json!({
                    "title": title,
                    "company": "Acme",
                    "city": "上海",
                    "job_type": "full_time",
                    "education": "bachelor",
                    "apply_url": "https://acme.example/apply",
                    "category_ids": category_ids,
                }),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED, "{}", response.text());
        response.data()["id"].as_str().unwrap().to_string()
    }
}
