// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    extract::{Extension, Query},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::{self, Stream};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use crate::domain::models::account::Role;
use crate::domain::models::change_event::{ChangeEvent, ChangeTable};
use crate::infrastructure::realtime::notification_hub::NotificationHub;
use crate::presentation::errors::AppError;
use crate::presentation::middleware::auth_middleware::AuthContext;
use crate::utils::errors::DomainError;

/// 普通用户可订阅的表
const USER_TABLES: [ChangeTable; 4] = [
    ChangeTable::Jobs,
    ChangeTable::Categories,
    ChangeTable::Tags,
    ChangeTable::Users,
];

#[derive(Debug, Default, Deserialize)]
pub struct RealtimeQuery {
    /// 逗号分隔的表名，缺省订阅全部可见的表
    pub tables: Option<String>,
}

/// 解析订阅的表名列表
pub fn parse_tables(raw: Option<&str>) -> Result<Vec<ChangeTable>, DomainError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(ChangeTable::ALL.to_vec());
    };
    raw.split(',')
        .map(|name| name.parse::<ChangeTable>().map_err(DomainError::Validation))
        .collect()
}

/// 单个 SSE 连接的过滤条件
#[derive(Debug, Clone)]
pub struct EventFilter {
    tables: Vec<ChangeTable>,
    ctx: AuthContext,
}

impl EventFilter {
    pub fn new(tables: Vec<ChangeTable>, ctx: AuthContext) -> Self {
        Self { tables, ctx }
    }

    /// 普通用户只接收公开目录的变更以及自己账号的变更
    pub fn accepts(&self, event: &ChangeEvent) -> bool {
        if !self.tables.contains(&event.table) {
            return false;
        }
        match self.ctx.role {
            Role::Admin => true,
            Role::User => {
                USER_TABLES.contains(&event.table)
                    && (event.table != ChangeTable::Users
                        || event.record_id == Some(self.ctx.subject_id))
            }
        }
    }
}

fn change_stream(
    receiver: broadcast::Receiver<ChangeEvent>,
    filter: EventFilter,
) -> impl Stream<Item = Result<Event, Infallible>> {
    stream::unfold((receiver, filter), |(mut receiver, filter)| async move {
        loop {
            match receiver.recv().await {
                Ok(change) if filter.accepts(&change) => {
                    match Event::default().event(change.table.as_str()).json_data(&change) {
                        Ok(event) => return Some((Ok(event), (receiver, filter))),
                        Err(e) => warn!("Failed to encode change event: {}", e),
                    }
                }
                Ok(_) => continue,
                Err(RecvError::Lagged(skipped)) => {
                    // 客户端收到 lagged 后应整体刷新
                    warn!("Realtime client lagged behind, skipped {} events", skipped);
                    let event = Event::default().event("lagged").data(skipped.to_string());
                    return Some((Ok(event), (receiver, filter)));
                }
                Err(RecvError::Closed) => {
                    debug!("Notification hub closed, ending realtime stream");
                    return None;
                }
            }
        }
    })
}

/// 变更推送（Server-Sent Events）
///
/// 事件名为表名，数据为 JSON 编码的 `ChangeEvent`。
pub async fn subscribe_changes(
    Extension(hub): Extension<Arc<NotificationHub>>,
    ctx: AuthContext,
    Query(query): Query<RealtimeQuery>,
) -> Result<Sse<impl Stream<Item = Result<Event, Infallible>>>, AppError> {
    let tables = parse_tables(query.tables.as_deref())?;
    debug!(
        "Realtime subscription from {} ({}) for {:?}",
        ctx.subject_id, ctx.role, tables
    );

    let stream = change_stream(hub.receiver(), EventFilter::new(tables, ctx));
    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use uuid::Uuid;

    fn ctx(role: Role) -> AuthContext {
        AuthContext {
            subject_id: Uuid::new_v4(),
            role,
            token: "token".to_string(),
        }
    }

    #[test]
    fn test_parse_tables() {
        assert_eq!(parse_tables(None).unwrap().len(), ChangeTable::ALL.len());
        assert_eq!(
            parse_tables(Some("jobs, tags")).unwrap(),
            vec![ChangeTable::Jobs, ChangeTable::Tags]
        );
        assert!(matches!(
            parse_tables(Some("jobs,payments")),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_user_filter_hides_other_accounts() {
        let user = ctx(Role::User);
        let filter = EventFilter::new(ChangeTable::ALL.to_vec(), user.clone());

        assert!(filter.accepts(&ChangeEvent::insert(ChangeTable::Jobs, Uuid::new_v4())));
        assert!(filter.accepts(&ChangeEvent::update(ChangeTable::Users, user.subject_id)));
        assert!(!filter.accepts(&ChangeEvent::update(ChangeTable::Users, Uuid::new_v4())));
        assert!(!filter.accepts(&ChangeEvent::insert(
            ChangeTable::ActivationCodes,
            Uuid::new_v4()
        )));

        let admin = EventFilter::new(vec![ChangeTable::Users], ctx(Role::Admin));
        assert!(admin.accepts(&ChangeEvent::update(ChangeTable::Users, Uuid::new_v4())));
        assert!(!admin.accepts(&ChangeEvent::insert(ChangeTable::Jobs, Uuid::new_v4())));
    }

    #[tokio::test]
    async fn test_stream_forwards_matching_events() {
        let hub = NotificationHub::new(16);
        let filter = EventFilter::new(vec![ChangeTable::Jobs], ctx(Role::User));
        let mut stream = Box::pin(change_stream(hub.receiver(), filter));

        hub.publish(ChangeEvent::insert(ChangeTable::Tags, Uuid::new_v4()));
        hub.publish(ChangeEvent::insert(ChangeTable::Jobs, Uuid::new_v4()));
        drop(hub);

        assert!(stream.next().await.is_some());
        assert!(stream.next().await.is_none());
    }
}
