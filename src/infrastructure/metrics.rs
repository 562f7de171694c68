// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use tracing::{info, warn};

use crate::config::settings::MetricsSettings;

/// 初始化 Prometheus 指标导出
///
/// 未启用时不安装 recorder，`metrics` 宏调用为空操作
pub fn init_metrics(settings: &MetricsSettings) -> anyhow::Result<()> {
    if !settings.enabled {
        info!("Metrics exporter disabled");
        return Ok(());
    }

    let addr: SocketAddr = settings.listen_addr.parse()?;

    // 端口被占用时只告警，不影响服务启动
    if let Err(e) = PrometheusBuilder::new().with_http_listener(addr).install() {
        warn!("Failed to install Prometheus recorder: {}", e);
        return Ok(());
    }

    describe_metrics();
    info!("Metrics exporter listening on {}", addr);
    Ok(())
}

fn describe_metrics() {
    describe_counter!("http_requests_total", "Total number of HTTP requests handled");
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request latency in seconds"
    );
    describe_counter!("cache_hits_total", "Cache lookups served from cache");
    describe_counter!("cache_misses_total", "Cache lookups that fell through to the database");
    describe_counter!("cache_invalidations_total", "Cache entries removed by invalidation");
    describe_counter!("realtime_events_total", "Change events delivered to subscribers");
    describe_counter!("jobs_imported_total", "Jobs created through CSV import");
    describe_counter!("activation_codes_redeemed_total", "Activation codes redeemed");
    describe_counter!("memberships_expired_total", "Memberships downgraded by the expiry sweeper");
}
