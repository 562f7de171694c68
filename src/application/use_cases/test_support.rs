use std::sync::Arc;
use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use crate::application::data_access::{DataAccess, Repositories};
use crate::domain::models::account::User;
use crate::domain::models::category::{Category, CategoryKind};
use crate::domain::models::job::{Education, Job, JobDraft, JobType};
use crate::infrastructure::cache::cache_manager::{CacheManager, CachePolicy};
use crate::infrastructure::cache::cache_strategy::MemoryCacheStrategy;
use crate::infrastructure::realtime::notification_hub::NotificationHub;
use uuid::Uuid;

/// 基于内存 SQLite 和内存缓存的数据访问门面
pub async fn memory_data_access() -> (Arc<DataAccess>, Arc<DatabaseConnection>) {
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
    (data, db)
}

pub fn draft(title: &str, category_ids: Vec<Uuid>) -> JobDraft {
    JobDraft {
        title: title.to_string(),
        company: "Acme".to_string(),
        city: "北京".to_string(),
        job_type: JobType::FullTime,
        education: Education::Bachelor,
        salary: None,
        description: Some("负责核心系统开发".to_string()),
        apply_url: "https://acme.example/apply".to_string(),
        deadline: None,
        category_ids,
        tag_ids: vec![],
    }
}

pub async fn seed_job(data: &DataAccess, title: &str, category_ids: Vec<Uuid>) -> Job {
    data.create_job(Job::from_draft(draft(title, category_ids)))
        .await
        .unwrap()
}

pub async fn seed_category(data: &DataAccess, name: &str, kind: CategoryKind) -> Category {
    data.create_category(Category::new(name.to_string(), kind, 0))
        .await
        .unwrap()
}

pub async fn seed_user(data: &DataAccess, username: &str) -> User {
    data.create_user(
        User::new(username.to_string(), username.to_string(), None),
        "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaA",
    )
    .await
    .unwrap()
}
