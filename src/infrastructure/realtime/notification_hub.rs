// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use metrics::counter;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::domain::models::change_event::{ChangeEvent, ChangeKind, ChangeTable};

/// 广播通道默认容量
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

const ALL_KINDS: &[ChangeKind] = &[ChangeKind::Insert, ChangeKind::Update, ChangeKind::Delete];

/// 重要性表：哪些表的哪些变更需要触发刷新
///
/// 用户收藏、岗位进度属于个人数据，只在本人请求时读取，不广播。
const IMPORTANCE_TABLE: &[(ChangeTable, &[ChangeKind])] = &[
    (ChangeTable::Jobs, ALL_KINDS),
    (ChangeTable::Categories, ALL_KINDS),
    (ChangeTable::Tags, ALL_KINDS),
    (ChangeTable::Users, ALL_KINDS),
    (ChangeTable::ActivationCodes, ALL_KINDS),
    (ChangeTable::UserActions, &[]),
    (ChangeTable::JobStates, &[]),
];

/// 只修改这些字段的岗位更新不触发刷新
const NOISY_JOB_FIELDS: &[&str] = &["view_count"];

/// 订阅标识
pub type SubscriptionId = u64;

/// 变更回调
pub type ChangeCallback = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;

struct Subscriber {
    /// 为空表示订阅所有表
    tables: HashSet<ChangeTable>,
    callback: ChangeCallback,
}

impl Subscriber {
    fn wants(&self, table: ChangeTable) -> bool {
        self.tables.is_empty() || self.tables.contains(&table)
    }
}

/// 判断事件是否需要通知订阅者
pub fn is_important(event: &ChangeEvent) -> bool {
    let listed = IMPORTANCE_TABLE
        .iter()
        .find(|(table, _)| *table == event.table)
        .map(|(_, kinds)| kinds.contains(&event.kind))
        .unwrap_or(false);
    if !listed {
        return false;
    }

    if event.table == ChangeTable::Jobs
        && event.kind == ChangeKind::Update
        && !event.changed_fields.is_empty()
    {
        return event
            .changed_fields
            .iter()
            .any(|f| !NOISY_JOB_FIELDS.contains(&f.as_str()));
    }
    true
}

/// 变更通知中心
///
/// 写操作完成后发布 `ChangeEvent`，经重要性表过滤后分发给
/// 回调订阅者和广播接收者（SSE 推送）。
pub struct NotificationHub {
    subscribers: RwLock<HashMap<SubscriptionId, Subscriber>>,
    next_id: AtomicU64,
    sender: broadcast::Sender<ChangeEvent>,
}

impl NotificationHub {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            subscribers: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            sender,
        }
    }

    /// 发布变更事件，返回收到通知的回调数量
    pub fn publish(&self, event: ChangeEvent) -> usize {
        self.publish_from(None, event)
    }

    /// 以某个订阅者的身份发布事件，该订阅者自身的回调不会被触发
    pub fn publish_from(&self, origin: Option<SubscriptionId>, event: ChangeEvent) -> usize {
        if !is_important(&event) {
            trace!(
                "Skipping unimportant change {:?} on {}",
                event.kind,
                event.table
            );
            return 0;
        }

        counter!("realtime_events_total", "table" => event.table.as_str()).increment(1);

        // 回调在锁外执行，允许回调中再订阅或取消订阅
        let callbacks: Vec<ChangeCallback> = self
            .subscribers
            .read()
            .iter()
            .filter(|(id, s)| Some(**id) != origin && s.wants(event.table))
            .map(|(_, s)| s.callback.clone())
            .collect();

        for callback in &callbacks {
            callback(&event);
        }

        // 没有接收者时 send 返回错误，忽略即可
        let _ = self.sender.send(event);
        debug!("Delivered change event to {} subscribers", callbacks.len());
        callbacks.len()
    }

    /// 订阅指定表的变更，`tables` 为空表示所有表
    pub fn subscribe(&self, tables: &[ChangeTable], callback: ChangeCallback) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.subscribers.write().insert(
            id,
            Subscriber {
                tables: tables.iter().copied().collect(),
                callback,
            },
        );
        debug!("Registered change subscription {}", id);
        id
    }

    /// 取消订阅，返回订阅是否存在
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.subscribers.write().remove(&id).is_some()
    }

    /// 获取广播接收者，用于流式推送
    pub fn receiver(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new(DEFAULT_CHANNEL_CAPACITY)
    }
}
