// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::models::account::{MembershipTier, User};
use crate::domain::models::activation_code::{ActivationCode, CodeFilter};
use crate::domain::models::category::Category;
use crate::domain::models::change_event::{ChangeEvent, ChangeKind, ChangeTable};
use crate::domain::models::job::Job;
use crate::domain::models::job_state::JobStates;
use crate::domain::models::statistics::{Statistics, TopJob};
use crate::domain::models::tag::Tag;
use crate::domain::models::user_action::UserActions;
use crate::domain::repositories::account_repository::UserRepository;
use crate::domain::repositories::activation_code_repository::ActivationCodeRepository;
use crate::domain::repositories::category_repository::CategoryRepository;
use crate::domain::repositories::job_repository::{JobRepository, RepositoryError};
use crate::domain::repositories::job_state_repository::JobStateRepository;
use crate::domain::repositories::tag_repository::TagRepository;
use crate::domain::repositories::user_action_repository::UserActionRepository;
use crate::infrastructure::cache::cache_manager::CacheManager;
use crate::infrastructure::realtime::notification_hub::{NotificationHub, SubscriptionId};
use crate::infrastructure::repositories::account_repo_impl::UserRepositoryImpl;
use crate::infrastructure::repositories::activation_code_repo_impl::ActivationCodeRepositoryImpl;
use crate::infrastructure::repositories::category_repo_impl::CategoryRepositoryImpl;
use crate::infrastructure::repositories::job_repo_impl::JobRepositoryImpl;
use crate::infrastructure::repositories::job_state_repo_impl::JobStateRepositoryImpl;
use crate::infrastructure::repositories::tag_repo_impl::TagRepositoryImpl;
use crate::infrastructure::repositories::user_action_repo_impl::UserActionRepositoryImpl;

/// 浏览量排行长度
const TOP_JOBS_LIMIT: usize = 10;

/// 缓存键
pub mod keys {
    use uuid::Uuid;

    pub const JOBS_ALL: &str = "jobs:all";
    pub const JOBS_ACTIVE: &str = "jobs:active";
    pub const CATEGORIES_ALL: &str = "categories:all";
    pub const TAGS_ALL: &str = "tags:all";
    pub const USERS_ALL: &str = "users:all";
    pub const STATS_OVERVIEW: &str = "stats:overview";

    pub fn job(id: Uuid) -> String {
        format!("jobs:detail:{}", id)
    }

    pub fn user(id: Uuid) -> String {
        format!("users:{}", id)
    }

    pub fn favorites(user_id: Uuid) -> String {
        format!("user_actions:favorites:{}", user_id)
    }

    pub fn job_states(user_id: Uuid) -> String {
        format!("user_actions:states:{}", user_id)
    }
}

/// 数据访问所需的全部仓库
#[derive(Clone)]
pub struct Repositories {
    pub jobs: Arc<dyn JobRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub users: Arc<dyn UserRepository>,
    pub codes: Arc<dyn ActivationCodeRepository>,
    pub user_actions: Arc<dyn UserActionRepository>,
    pub job_states: Arc<dyn JobStateRepository>,
}

impl Repositories {
    /// 基于 sea-orm 连接创建仓库集合
    pub fn sea_orm(db: Arc<DatabaseConnection>) -> Self {
        Self {
            jobs: Arc::new(JobRepositoryImpl::new(db.clone())),
            categories: Arc::new(CategoryRepositoryImpl::new(db.clone())),
            tags: Arc::new(TagRepositoryImpl::new(db.clone())),
            users: Arc::new(UserRepositoryImpl::new(db.clone())),
            codes: Arc::new(ActivationCodeRepositoryImpl::new(db.clone())),
            user_actions: Arc::new(UserActionRepositoryImpl::new(db.clone())),
            job_states: Arc::new(JobStateRepositoryImpl::new(db)),
        }
    }
}

/// 某张表发生变化时需要失效的缓存前缀
pub fn stale_prefixes(table: ChangeTable) -> &'static [&'static str] {
    match table {
        ChangeTable::Jobs => &["jobs:", "stats:"],
        ChangeTable::Categories => &["categories:"],
        ChangeTable::Tags => &["tags:"],
        ChangeTable::Users => &["users:", "stats:"],
        ChangeTable::ActivationCodes => &["stats:"],
        ChangeTable::UserActions | ChangeTable::JobStates => &["user_actions:"],
    }
}

/// 数据访问门面
///
/// 组合缓存、变更通知和直接查询：
/// - 读操作先查缓存，未命中时查询仓库并按键前缀的 TTL 写回
/// - 写操作先落库，再失效受影响的缓存前缀，最后向通知中心发布变更事件
///
/// 创建时向通知中心订阅，由其他组件（例如会员过期扫描）发布的变更
/// 同样会使本地缓存失效。门面自身发布的事件不会回调到自己。
///
/// 收藏、投递和投递进度按用户加锁，在锁内读取最新记录后修改保存。
pub struct DataAccess {
    repos: Repositories,
    cache: Arc<CacheManager>,
    hub: Arc<NotificationHub>,
    subscription: SubscriptionId,
    user_locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl DataAccess {
    pub fn new(repos: Repositories, cache: Arc<CacheManager>, hub: Arc<NotificationHub>) -> Self {
        let subscription = Self::watch_changes(&cache, &hub);
        Self {
            repos,
            cache,
            hub,
            subscription,
            user_locks: DashMap::new(),
        }
    }

    fn watch_changes(cache: &Arc<CacheManager>, hub: &Arc<NotificationHub>) -> SubscriptionId {
        let cache = cache.clone();
        hub.subscribe(
            &[],
            Arc::new(move |event: &ChangeEvent| {
                let prefixes = stale_prefixes(event.table);
                // 回调是同步的，失效操作放到运行时中异步执行
                let Ok(handle) = tokio::runtime::Handle::try_current() else {
                    return;
                };
                let cache = cache.clone();
                handle.spawn(async move {
                    for prefix in prefixes {
                        cache.invalidate_prefix(prefix).await;
                    }
                });
            }),
        )
    }

    pub fn cache(&self) -> &Arc<CacheManager> {
        &self.cache
    }

    pub fn hub(&self) -> &Arc<NotificationHub> {
        &self.hub
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repos
    }

    async fn invalidate_table(&self, table: ChangeTable) {
        for prefix in stale_prefixes(table) {
            self.cache.invalidate_prefix(prefix).await;
        }
    }

    async fn commit(&self, event: ChangeEvent) {
        self.invalidate_table(event.table).await;
        let delivered = self.hub.publish_from(Some(self.subscription), event);
        debug!("Change committed, {} subscribers notified", delivered);
    }

    // ---- 岗位 ----

    /// 岗位列表（按创建时间倒序）
    pub async fn jobs(&self, active_only: bool) -> Result<Vec<Job>, RepositoryError> {
        let key = if active_only {
            keys::JOBS_ACTIVE
        } else {
            keys::JOBS_ALL
        };
        let repo = self.repos.jobs.clone();
        self.cache
            .get_or_load(key, || async move { repo.list(active_only).await })
            .await
    }

    pub async fn job(&self, id: Uuid) -> Result<Option<Job>, RepositoryError> {
        let repo = self.repos.jobs.clone();
        self.cache
            .get_or_load(&keys::job(id), || async move { repo.find_by_id(id).await })
            .await
    }

    pub async fn create_job(&self, job: Job) -> Result<Job, RepositoryError> {
        let created = self.repos.jobs.create(&job).await?;
        self.commit(ChangeEvent::insert(ChangeTable::Jobs, created.id))
            .await;
        Ok(created)
    }

    /// 批量导入岗位，发布一条不带记录ID的插入事件
    pub async fn import_jobs(&self, jobs: Vec<Job>) -> Result<u64, RepositoryError> {
        if jobs.is_empty() {
            return Ok(0);
        }
        let inserted = self.repos.jobs.create_many(&jobs).await?;
        self.commit(ChangeEvent::new(ChangeTable::Jobs, ChangeKind::Insert, None))
            .await;
        info!("Imported {} jobs", inserted);
        Ok(inserted)
    }

    pub async fn update_job(&self, job: Job) -> Result<Job, RepositoryError> {
        let updated = self.repos.jobs.update(&job).await?;
        self.commit(ChangeEvent::update(ChangeTable::Jobs, updated.id))
            .await;
        Ok(updated)
    }

    pub async fn delete_job(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.repos.jobs.delete(id).await?;
        self.commit(ChangeEvent::delete(ChangeTable::Jobs, id)).await;
        Ok(())
    }

    pub async fn set_job_active(&self, id: Uuid, active: bool) -> Result<Job, RepositoryError> {
        let job = self.repos.jobs.set_active(id, active).await?;
        self.commit(ChangeEvent::update(ChangeTable::Jobs, id).with_fields(&["is_active"]))
            .await;
        Ok(job)
    }

    /// 原子地增加浏览次数
    ///
    /// 失效岗位详情、管理端列表和统计，用户端列表中的浏览数在 TTL 内允许滞后
    pub async fn increment_view_count(&self, id: Uuid) -> Result<i64, RepositoryError> {
        let count = self.repos.jobs.increment_view_count(id).await?;
        self.cache.invalidate(&keys::job(id)).await;
        self.cache.invalidate(keys::JOBS_ALL).await;
        self.cache.invalidate(keys::STATS_OVERVIEW).await;
        self.hub.publish_from(
            Some(self.subscription),
            ChangeEvent::update(ChangeTable::Jobs, id).with_fields(&["view_count"]),
        );
        Ok(count)
    }

    // ---- 分类与标签 ----

    pub async fn categories(&self) -> Result<Vec<Category>, RepositoryError> {
        let repo = self.repos.categories.clone();
        self.cache
            .get_or_load(keys::CATEGORIES_ALL, || async move { repo.list().await })
            .await
    }

    pub async fn create_category(&self, category: Category) -> Result<Category, RepositoryError> {
        let created = self.repos.categories.create(&category).await?;
        self.commit(ChangeEvent::insert(ChangeTable::Categories, created.id))
            .await;
        Ok(created)
    }

    pub async fn update_category(&self, category: Category) -> Result<Category, RepositoryError> {
        let updated = self.repos.categories.update(&category).await?;
        self.commit(ChangeEvent::update(ChangeTable::Categories, updated.id))
            .await;
        Ok(updated)
    }

    pub async fn delete_category(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.repos.categories.delete(id).await?;
        self.commit(ChangeEvent::delete(ChangeTable::Categories, id))
            .await;
        Ok(())
    }

    pub async fn tags(&self) -> Result<Vec<Tag>, RepositoryError> {
        let repo = self.repos.tags.clone();
        self.cache
            .get_or_load(keys::TAGS_ALL, || async move { repo.list().await })
            .await
    }

    pub async fn create_tag(&self, tag: Tag) -> Result<Tag, RepositoryError> {
        let created = self.repos.tags.create(&tag).await?;
        self.commit(ChangeEvent::insert(ChangeTable::Tags, created.id))
            .await;
        Ok(created)
    }

    pub async fn update_tag(&self, tag: Tag) -> Result<Tag, RepositoryError> {
        let updated = self.repos.tags.update(&tag).await?;
        self.commit(ChangeEvent::update(ChangeTable::Tags, updated.id))
            .await;
        Ok(updated)
    }

    pub async fn delete_tag(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.repos.tags.delete(id).await?;
        self.commit(ChangeEvent::delete(ChangeTable::Tags, id)).await;
        Ok(())
    }

    // ---- 用户 ----

    pub async fn user(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        let repo = self.repos.users.clone();
        self.cache
            .get_or_load(&keys::user(id), || async move { repo.find_by_id(id).await })
            .await
    }

    pub async fn users(&self) -> Result<Vec<User>, RepositoryError> {
        let repo = self.repos.users.clone();
        self.cache
            .get_or_load(keys::USERS_ALL, || async move { repo.list().await })
            .await
    }

    pub async fn create_user(&self, user: User, password_hash: &str) -> Result<User, RepositoryError> {
        let created = self.repos.users.create(&user, password_hash).await?;
        self.commit(ChangeEvent::insert(ChangeTable::Users, created.id))
            .await;
        Ok(created)
    }

    pub async fn set_user_active(&self, id: Uuid, active: bool) -> Result<User, RepositoryError> {
        let user = self.repos.users.set_active(id, active).await?;
        self.commit(ChangeEvent::update(ChangeTable::Users, id).with_fields(&["is_active"]))
            .await;
        Ok(user)
    }

    pub async fn update_membership(
        &self,
        id: Uuid,
        tier: MembershipTier,
        expires_at: Option<DateTime<Utc>>,
    ) -> Result<User, RepositoryError> {
        let user = self
            .repos
            .users
            .update_membership(id, tier, expires_at)
            .await?;
        self.commit(
            ChangeEvent::update(ChangeTable::Users, id)
                .with_fields(&["tier", "membership_expires_at"]),
        )
        .await;
        Ok(user)
    }

    /// 将会员已过期的用户降为普通用户，返回受影响的用户ID
    pub async fn downgrade_expired_memberships(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Uuid>, RepositoryError> {
        let ids = self.repos.users.downgrade_expired(now).await?;
        if ids.is_empty() {
            return Ok(ids);
        }

        self.invalidate_table(ChangeTable::Users).await;
        for id in &ids {
            self.hub.publish_from(
                Some(self.subscription),
                ChangeEvent::update(ChangeTable::Users, *id)
                    .with_fields(&["tier", "membership_expires_at"]),
            );
        }
        Ok(ids)
    }

    // ---- 激活码 ----

    /// 激活码列表不走缓存，管理端需要看到实时状态
    pub async fn activation_codes(
        &self,
        filter: CodeFilter,
    ) -> Result<Vec<ActivationCode>, RepositoryError> {
        self.repos.codes.list(filter).await
    }

    pub async fn find_activation_code(
        &self,
        code: &str,
    ) -> Result<Option<ActivationCode>, RepositoryError> {
        self.repos.codes.find_by_code(code).await
    }

    pub async fn create_activation_codes(
        &self,
        codes: &[ActivationCode],
    ) -> Result<u64, RepositoryError> {
        let created = self.repos.codes.create_batch(codes).await?;
        self.commit(ChangeEvent::new(
            ChangeTable::ActivationCodes,
            ChangeKind::Insert,
            None,
        ))
        .await;
        Ok(created)
    }

    /// 兑换激活码并更新用户会员，返回 None 表示激活码已被使用
    pub async fn redeem_activation_code(
        &self,
        code: &ActivationCode,
        user_id: Uuid,
        tier: MembershipTier,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, RepositoryError> {
        let Some(user) = self
            .repos
            .codes
            .redeem(&code.code, user_id, tier, expires_at, now)
            .await?
        else {
            return Ok(None);
        };

        self.commit(
            ChangeEvent::update(ChangeTable::ActivationCodes, code.id)
                .with_fields(&["is_used", "used_by", "used_at"]),
        )
        .await;
        self.commit(
            ChangeEvent::update(ChangeTable::Users, user_id)
                .with_fields(&["tier", "membership_expires_at"]),
        )
        .await;
        Ok(Some(user))
    }

    pub async fn delete_activation_code(&self, id: Uuid) -> Result<(), RepositoryError> {
        self.repos.codes.delete(id).await?;
        self.commit(ChangeEvent::delete(ChangeTable::ActivationCodes, id))
            .await;
        Ok(())
    }

    // ---- 用户行为与投递进度 ----

    pub async fn user_actions(&self, user_id: Uuid) -> Result<UserActions, RepositoryError> {
        let repo = self.repos.user_actions.clone();
        self.cache
            .get_or_load(&keys::favorites(user_id), || async move {
                repo.get(user_id).await
            })
            .await
    }

    /// 在用户锁内读取最新的用户行为并修改，记录有变化时保存
    pub async fn update_user_actions<R, F>(
        &self,
        user_id: Uuid,
        change: F,
    ) -> Result<(UserActions, R), RepositoryError>
    where
        F: FnOnce(&mut UserActions) -> R + Send,
        R: Send,
    {
        let lock = self.user_lock(user_id);
        let guard = lock.lock().await;
        let result = self.change_user_actions(user_id, change).await;
        drop(guard);
        self.release_user_lock(user_id, lock);
        result
    }

    async fn change_user_actions<R, F>(
        &self,
        user_id: Uuid,
        change: F,
    ) -> Result<(UserActions, R), RepositoryError>
    where
        F: FnOnce(&mut UserActions) -> R + Send,
        R: Send,
    {
        let mut actions = self.repos.user_actions.get(user_id).await?;
        let before = actions.clone();
        let output = change(&mut actions);
        if actions != before {
            self.repos.user_actions.save(&actions).await?;
            self.cache.invalidate(&keys::favorites(user_id)).await;
            self.hub.publish_from(
                Some(self.subscription),
                ChangeEvent::update(ChangeTable::UserActions, user_id),
            );
        }
        Ok((actions, output))
    }

    pub async fn job_states(&self, user_id: Uuid) -> Result<JobStates, RepositoryError> {
        let repo = self.repos.job_states.clone();
        self.cache
            .get_or_load(&keys::job_states(user_id), || async move {
                repo.get(user_id).await
            })
            .await
    }

    /// 在用户锁内读取最新的投递进度并修改，记录有变化时保存
    pub async fn update_job_states<R, F>(
        &self,
        user_id: Uuid,
        change: F,
    ) -> Result<(JobStates, R), RepositoryError>
    where
        F: FnOnce(&mut JobStates) -> R + Send,
        R: Send,
    {
        let lock = self.user_lock(user_id);
        let guard = lock.lock().await;
        let result = self.change_job_states(user_id, change).await;
        drop(guard);
        self.release_user_lock(user_id, lock);
        result
    }

    async fn change_job_states<R, F>(
        &self,
        user_id: Uuid,
        change: F,
    ) -> Result<(JobStates, R), RepositoryError>
    where
        F: FnOnce(&mut JobStates) -> R + Send,
        R: Send,
    {
        let mut states = self.repos.job_states.get(user_id).await?;
        let before = states.clone();
        let output = change(&mut states);
        if states != before {
            self.repos.job_states.save(&states).await?;
            self.cache.invalidate(&keys::job_states(user_id)).await;
            self.hub.publish_from(
                Some(self.subscription),
                ChangeEvent::update(ChangeTable::JobStates, user_id),
            );
        }
        Ok((states, output))
    }

    fn user_lock(&self, user_id: Uuid) -> Arc<Mutex<()>> {
        self.user_locks.entry(user_id).or_default().clone()
    }

    /// 没有其他等待者时移除用户锁
    fn release_user_lock(&self, user_id: Uuid, lock: Arc<Mutex<()>>) {
        drop(lock);
        self.user_locks
            .remove_if(&user_id, |_, lock| Arc::strong_count(lock) == 1);
    }

    // ---- 统计 ----

    /// 平台统计，基于缓存的岗位与用户列表计算
    pub async fn statistics(&self) -> Result<Statistics, RepositoryError> {
        if let Ok(Some(stats)) = self.cache.get::<Statistics>(keys::STATS_OVERVIEW).await {
            return Ok(stats);
        }

        let jobs = self.jobs(false).await?;
        let users = self.users().await?;
        let codes = self.repos.codes.list(CodeFilter::All).await?;
        let stats = compute_statistics(&jobs, &users, &codes, Utc::now());

        if let Err(e) = self.cache.set(keys::STATS_OVERVIEW, &stats).await {
            warn!("Cache write failed for {}: {}", keys::STATS_OVERVIEW, e);
        }
        Ok(stats)
    }
}

impl Drop for DataAccess {
    fn drop(&mut self) {
        self.hub.unsubscribe(self.subscription);
    }
}

/// 计算平台统计
///
/// 会员数按当前生效等级统计，过期会员计为普通用户
pub fn compute_statistics(
    jobs: &[Job],
    users: &[User],
    codes: &[ActivationCode],
    now: DateTime<Utc>,
) -> Statistics {
    use crate::domain::services::membership_service::effective_tier;

    let mut common_users = 0;
    let mut temp_members = 0;
    let mut official_members = 0;
    for user in users {
        match effective_tier(user, now) {
            MembershipTier::Common => common_users += 1,
            MembershipTier::Temp => temp_members += 1,
            MembershipTier::Official => official_members += 1,
        }
    }

    let mut ranked: Vec<&Job> = jobs.iter().collect();
    ranked.sort_by(|a, b| b.view_count.cmp(&a.view_count));
    let top_jobs = ranked
        .into_iter()
        .filter(|job| job.view_count > 0)
        .take(TOP_JOBS_LIMIT)
        .map(|job| TopJob {
            job_id: job.id,
            title: job.title.clone(),
            company: job.company.clone(),
            view_count: job.view_count,
        })
        .collect();

    let codes_used = codes.iter().filter(|c| c.is_used).count() as u64;
    let codes_unused = codes.iter().filter(|c| !c.is_used).count() as u64;

    Statistics {
        total_jobs: jobs.len() as u64,
        active_jobs: jobs.iter().filter(|j| j.is_active).count() as u64,
        total_users: users.len() as u64,
        common_users,
        temp_members,
        official_members,
        codes_used,
        codes_unused,
        total_views: jobs.iter().map(|j| j.view_count).sum(),
        top_jobs,
        generated_at: now,
    }
}

#[cfg(test)]
#[path = "data_access_test.rs"]
mod tests;
