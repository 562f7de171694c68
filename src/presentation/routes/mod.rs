// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Extension, Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_http::trace::TraceLayer;

use crate::application::data_access::DataAccess;
use crate::application::use_cases::accounts::AccountUseCase;
use crate::application::use_cases::browse_jobs::BrowseJobsUseCase;
use crate::application::use_cases::import_jobs::ImportJobsUseCase;
use crate::application::use_cases::job_gate::JobGate;
use crate::application::use_cases::manage_catalog::CatalogAdminUseCase;
use crate::application::use_cases::manage_codes::ActivationCodeAdminUseCase;
use crate::application::use_cases::redeem_code::RedeemCodeUseCase;
use crate::application::use_cases::statistics::StatisticsUseCase;
use crate::application::use_cases::user_activity::UserActivityUseCase;
use crate::config::settings::Settings;
use crate::domain::repositories::account_repository::{AdminRepository, SessionRepository};
use crate::domain::services::membership_service::MembershipPolicy;
use crate::presentation::handlers::{
    activation_handler, admin_handler, auth_handler, job_handler, realtime_handler,
    user_activity_handler,
};
use crate::presentation::middleware::auth_middleware::auth_middleware;
use crate::presentation::middleware::metrics_middleware::metrics_middleware;
use crate::presentation::middleware::submit_guard::SubmitGuard;
use crate::presentation::middleware::submit_guard_middleware::submit_guard_middleware;

/// 路由层依赖的全部用例
#[derive(Clone)]
pub struct AppServices {
    pub data: Arc<DataAccess>,
    pub accounts: Arc<AccountUseCase>,
    pub browse: Arc<BrowseJobsUseCase>,
    pub activity: Arc<UserActivityUseCase>,
    pub redeem: Arc<RedeemCodeUseCase>,
    pub codes: Arc<ActivationCodeAdminUseCase>,
    pub catalog: Arc<CatalogAdminUseCase>,
    pub import: Arc<ImportJobsUseCase>,
    pub statistics: Arc<StatisticsUseCase>,
    pub submit_guard: Arc<SubmitGuard>,
}

impl AppServices {
    pub fn new(
        data: Arc<DataAccess>,
        admins: Arc<dyn AdminRepository>,
        sessions: Arc<dyn SessionRepository>,
        settings: &Settings,
    ) -> Self {
        let gate = JobGate::new(data.clone(), MembershipPolicy::from(&settings.membership));
        Self {
            accounts: Arc::new(AccountUseCase::new(
                data.clone(),
                admins,
                sessions,
                settings.auth.session_ttl_hours,
            )),
            browse: Arc::new(BrowseJobsUseCase::new(data.clone(), gate.clone())),
            activity: Arc::new(UserActivityUseCase::new(data.clone(), gate)),
            redeem: Arc::new(RedeemCodeUseCase::new(data.clone())),
            codes: Arc::new(ActivationCodeAdminUseCase::new(data.clone())),
            catalog: Arc::new(CatalogAdminUseCase::new(data.clone())),
            import: Arc::new(ImportJobsUseCase::new(data.clone())),
            statistics: Arc::new(StatisticsUseCase::new(data.clone())),
            submit_guard: Arc::new(SubmitGuard::new(Duration::from_millis(
                settings.submit_guard.window_ms,
            ))),
            data,
        }
    }
}

/// 创建应用路由
///
/// # 返回值
///
/// 返回未挂载中间件的路由表
pub fn routes() -> Router {
    let public_routes = Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route("/v1/auth/register", post(auth_handler::register))
        .route("/v1/auth/login", post(auth_handler::login))
        .route("/v1/admin/login", post(auth_handler::admin_login));

    let user_routes = Router::new()
        .route("/v1/auth/logout", post(auth_handler::logout))
        .route("/v1/me", get(auth_handler::me))
        .route("/v1/jobs", get(job_handler::list_jobs))
        .route("/v1/jobs/{id}", get(job_handler::get_job))
        .route("/v1/categories", get(job_handler::list_categories))
        .route("/v1/tags", get(job_handler::list_tags))
        .route(
            "/v1/jobs/{id}/favorite",
            post(user_activity_handler::toggle_favorite),
        )
        .route("/v1/me/favorites", get(user_activity_handler::list_favorites))
        .route(
            "/v1/jobs/{id}/apply",
            post(user_activity_handler::apply_job).delete(user_activity_handler::withdraw_job),
        )
        .route("/v1/me/applied", get(user_activity_handler::list_applied))
        .route(
            "/v1/me/job-states",
            get(user_activity_handler::list_job_states),
        )
        .route(
            "/v1/me/job-states/{job_id}",
            put(user_activity_handler::put_job_state)
                .delete(user_activity_handler::delete_job_state),
        )
        .route("/v1/activation/redeem", post(activation_handler::redeem))
        .route("/v1/realtime", get(realtime_handler::subscribe_changes));

    let admin_routes = Router::new()
        .route(
            "/v1/admin/jobs",
            get(admin_handler::list_jobs).post(admin_handler::create_job),
        )
        .route("/v1/admin/jobs/import", post(admin_handler::import_jobs))
        .route(
            "/v1/admin/jobs/{id}",
            get(admin_handler::get_job)
                .put(admin_handler::update_job)
                .delete(admin_handler::delete_job),
        )
        .route(
            "/v1/admin/jobs/{id}/active",
            patch(admin_handler::set_job_active),
        )
        .route(
            "/v1/admin/categories",
            get(admin_handler::list_categories).post(admin_handler::create_category),
        )
        .route(
            "/v1/admin/categories/{id}",
            put(admin_handler::update_category).delete(admin_handler::delete_category),
        )
        .route(
            "/v1/admin/tags",
            get(admin_handler::list_tags).post(admin_handler::create_tag),
        )
        .route(
            "/v1/admin/tags/{id}",
            put(admin_handler::update_tag).delete(admin_handler::delete_tag),
        )
        .route(
            "/v1/admin/activation-codes",
            get(activation_handler::list_codes).post(activation_handler::generate_codes),
        )
        .route(
            "/v1/admin/activation-codes/export",
            get(activation_handler::export_codes),
        )
        .route(
            "/v1/admin/activation-codes/{id}",
            delete(activation_handler::delete_code),
        )
        .route("/v1/admin/users", get(admin_handler::list_users))
        .route(
            "/v1/admin/users/{id}/active",
            patch(admin_handler::set_user_active),
        )
        .route("/v1/admin/statistics", get(admin_handler::statistics))
        .route(
            "/v1/admin/statistics/export",
            get(admin_handler::export_statistics),
        );

    Router::new()
        .merge(public_routes)
        .merge(user_routes)
        .merge(admin_routes)
}

/// 组装完整应用：路由、认证、防重复提交、请求指标与依赖注入
///
/// `route_layer` 后添加的层在外层执行，因此顺序为
/// 指标 -> 认证 -> 防重复提交 -> 处理器。
pub fn app(services: &AppServices) -> Router {
    routes()
        .route_layer(middleware::from_fn_with_state(
            services.submit_guard.clone(),
            submit_guard_middleware,
        ))
        .route_layer(middleware::from_fn_with_state(
            services.accounts.clone(),
            auth_middleware,
        ))
        .route_layer(middleware::from_fn(metrics_middleware))
        .layer(Extension(services.data.clone()))
        .layer(Extension(services.data.hub().clone()))
        .layer(Extension(services.accounts.clone()))
        .layer(Extension(services.browse.clone()))
        .layer(Extension(services.activity.clone()))
        .layer(Extension(services.redeem.clone()))
        .layer(Extension(services.codes.clone()))
        .layer(Extension(services.catalog.clone()))
        .layer(Extension(services.import.clone()))
        .layer(Extension(services.statistics.clone()))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
