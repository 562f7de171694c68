// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};

use campus_jobs::application::data_access::{DataAccess, Repositories};
use campus_jobs::config::settings::Settings;
use campus_jobs::infrastructure::cache::cache_manager::CacheManager;
use campus_jobs::infrastructure::database::connection;
use campus_jobs::infrastructure::realtime::notification_hub::NotificationHub;
use campus_jobs::infrastructure::repositories::account_repo_impl::{
    AdminRepositoryImpl, SessionRepositoryImpl,
};
use campus_jobs::presentation::routes::{self, AppServices};
use campus_jobs::utils::telemetry;
use campus_jobs::workers::MembershipExpiryWorker;
use migration::{Migrator, MigratorTrait};

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting campus-jobs...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // Initialize Prometheus Metrics
    campus_jobs::infrastructure::metrics::init_metrics(&settings.metrics)?;

    // 3. Connect to database
    let db = Arc::new(connection::create_pool(&settings.database).await?);
    info!("Database connection established");

    info!("Running database migrations...");
    Migrator::up(db.as_ref(), None).await?;
    info!("Database migrations applied");

    // 4. Cache and change notifications
    let cache = Arc::new(CacheManager::from_settings(
        &settings.cache,
        settings.redis.url.as_deref(),
    )?);
    let hub = Arc::new(NotificationHub::default());
    let data = Arc::new(DataAccess::new(
        Repositories::sea_orm(db.clone()),
        cache,
        hub,
    ));

    // 5. Use cases
    let sessions = Arc::new(SessionRepositoryImpl::new(db.clone()));
    let services = AppServices::new(
        data.clone(),
        Arc::new(AdminRepositoryImpl::new(db.clone())),
        sessions.clone(),
        &settings,
    );

    match (
        settings.auth.bootstrap_admin_username.as_deref(),
        settings.auth.bootstrap_admin_password.as_deref(),
    ) {
        (Some(username), Some(password)) => {
            if services.accounts.bootstrap_admin(username, password).await? {
                info!("Bootstrap admin '{}' created", username);
            }
        }
        _ => warn!("No bootstrap admin configured"),
    }

    // 6. Start Workers
    let worker = MembershipExpiryWorker::new(
        data,
        sessions,
        Duration::from_secs(settings.workers.membership_sweep_interval_secs.max(1)),
    );
    worker.start();

    // 7. Start HTTP server
    let app = routes::app(&services);
    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
