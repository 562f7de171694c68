use super::account_repo_impl::{AdminRepositoryImpl, SessionRepositoryImpl, UserRepositoryImpl};
use super::activation_code_repo_impl::ActivationCodeRepositoryImpl;
use super::category_repo_impl::CategoryRepositoryImpl;
use super::job_repo_impl::JobRepositoryImpl;
use super::job_state_repo_impl::JobStateRepositoryImpl;
use super::tag_repo_impl::TagRepositoryImpl;
use super::user_action_repo_impl::UserActionRepositoryImpl;
use crate::domain::models::account::{Admin, MembershipTier, Role, Session, User};
use crate::domain::models::activation_code::{ActivationCode, CodeFilter};
use crate::domain::models::category::{Category, CategoryKind};
use crate::domain::models::job::{Education, Job, JobDraft, JobType};
use crate::domain::models::job_state::{ApplicationStage, JobStates};
use crate::domain::models::tag::Tag;
use crate::domain::models::user_action::UserActions;
use crate::domain::repositories::account_repository::{
    AdminRepository, SessionRepository, UserRepository,
};
use crate::domain::repositories::activation_code_repository::ActivationCodeRepository;
use crate::domain::repositories::category_repository::CategoryRepository;
use crate::domain::repositories::job_repository::{JobRepository, RepositoryError};
use crate::domain::repositories::job_state_repository::JobStateRepository;
use crate::domain::repositories::tag_repository::TagRepository;
use crate::domain::repositories::user_action_repository::UserActionRepository;
use chrono::{Duration, NaiveDate, Utc};
use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};
use std::sync::Arc;
use uuid::Uuid;

async fn setup_db() -> Arc<DatabaseConnection> {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    let db = Arc::new(db);
    Migrator::up(db.as_ref(), None).await.unwrap();
    db
}

fn draft(title: &str, category_ids: Vec<Uuid>) -> JobDraft {
    JobDraft {
        title: title.to_string(),
        company: "Acme".to_string(),
        city: "上海".to_string(),
        job_type: JobType::FullTime,
        education: Education::Bachelor,
        salary: Some("15k-20k".to_string()),
        description: None,
        apply_url: "https://acme.example/apply".to_string(),
        deadline: NaiveDate::from_ymd_opt(2026, 12, 31),
        category_ids,
        tag_ids: vec![],
    }
}

#[tokio::test]
async fn test_job_lifecycle() {
    let db = setup_db().await;
    let repo = JobRepositoryImpl::new(db);
    let category = Uuid::new_v4();

    let job = Job::from_draft(draft("后端工程师", vec![category]));
    repo.create(&job).await.unwrap();

    let found = repo.find_by_id(job.id).await.unwrap().unwrap();
    assert_eq!(found.title, "后端工程师");
    assert_eq!(found.category_ids, vec![category]);
    assert_eq!(found.deadline, job.deadline);

    assert_eq!(repo.increment_view_count(job.id).await.unwrap(), 1);
    assert_eq!(repo.increment_view_count(job.id).await.unwrap(), 2);

    // 编辑不会覆盖浏览数
    let mut edited = found.clone();
    edited.apply_draft(draft("资深后端工程师", vec![]));
    let updated = repo.update(&edited).await.unwrap();
    assert_eq!(updated.title, "资深后端工程师");
    assert_eq!(updated.view_count, 2);
    assert!(updated.category_ids.is_empty());

    repo.set_active(job.id, false).await.unwrap();
    assert!(repo.list(true).await.unwrap().is_empty());
    assert_eq!(repo.list(false).await.unwrap().len(), 1);

    repo.delete(job.id).await.unwrap();
    assert!(matches!(
        repo.delete(job.id).await,
        Err(RepositoryError::NotFound)
    ));
    assert!(matches!(
        repo.increment_view_count(job.id).await,
        Err(RepositoryError::NotFound)
    ));
}

#[tokio::test]
async fn test_job_create_many() {
    let db = setup_db().await;
    let repo = JobRepositoryImpl::new(db);

    let jobs: Vec<Job> = (0..3)
        .map(|i| Job::from_draft(draft(&format!("岗位{}", i), vec![])))
        .collect();
    assert_eq!(repo.create_many(&jobs).await.unwrap(), 3);
    assert_eq!(repo.create_many(&[]).await.unwrap(), 0);
    assert_eq!(repo.list(true).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_catalog_names_are_unique() {
    let db = setup_db().await;
    let categories = CategoryRepositoryImpl::new(db.clone());
    let tags = TagRepositoryImpl::new(db);

    let state_owned = Category::new("国企".to_string(), CategoryKind::Nature, 0);
    categories.create(&state_owned).await.unwrap();
    let duplicate = Category::new("国企".to_string(), CategoryKind::Other, 1);
    assert!(matches!(
        categories.create(&duplicate).await,
        Err(RepositoryError::Conflict(_))
    ));

    let found = categories.find_by_name("国企").await.unwrap().unwrap();
    assert_eq!(found.kind, CategoryKind::Nature);

    let mut renamed = found.clone();
    renamed.name = "央企".to_string();
    categories.update(&renamed).await.unwrap();
    assert!(categories.find_by_name("国企").await.unwrap().is_none());

    let tag = Tag::new("双休".to_string());
    tags.create(&tag).await.unwrap();
    assert!(matches!(
        tags.create(&Tag::new("双休".to_string())).await,
        Err(RepositoryError::Conflict(_))
    ));
    tags.delete(tag.id).await.unwrap();
    assert!(tags.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_user_membership_and_expiry() {
    let db = setup_db().await;
    let repo = UserRepositoryImpl::new(db);

    let alice = User::new("alice".to_string(), "Alice".to_string(), None);
    repo.create(&alice, "hash").await.unwrap();
    assert!(matches!(
        repo.create(&User::new("alice".to_string(), "A2".to_string(), None), "hash")
            .await,
        Err(RepositoryError::Conflict(_))
    ));

    let bob = User::new("bob".to_string(), "Bob".to_string(), None);
    repo.create(&bob, "hash").await.unwrap();

    let now = Utc::now();
    repo.update_membership(alice.id, MembershipTier::Temp, Some(now - Duration::hours(1)))
        .await
        .unwrap();
    repo.update_membership(bob.id, MembershipTier::Official, Some(now + Duration::days(30)))
        .await
        .unwrap();

    let downgraded = repo.downgrade_expired(now).await.unwrap();
    assert_eq!(downgraded, vec![alice.id]);

    let alice = repo.find_by_id(alice.id).await.unwrap().unwrap();
    assert_eq!(alice.tier, MembershipTier::Common);
    assert!(alice.membership_expires_at.is_none());

    let credentials = repo.find_credentials("bob").await.unwrap().unwrap();
    assert_eq!(credentials.user.tier, MembershipTier::Official);
    assert_eq!(credentials.password_hash, "hash");

    let disabled = repo.set_active(bob.id, false).await.unwrap();
    assert!(!disabled.is_active);
}

#[tokio::test]
async fn test_sessions_expire() {
    let db = setup_db().await;
    let sessions = SessionRepositoryImpl::new(db.clone());
    let admins = AdminRepositoryImpl::new(db);

    let admin = Admin {
        id: Uuid::new_v4(),
        username: "root".to_string(),
        created_at: Utc::now(),
    };
    admins.create(&admin, "hash").await.unwrap();
    assert_eq!(admins.count().await.unwrap(), 1);

    let live = Session::issue(admin.id, Role::Admin, Duration::hours(1));
    let stale = Session::issue(admin.id, Role::Admin, Duration::hours(-1));
    sessions.create(&live).await.unwrap();
    sessions.create(&stale).await.unwrap();

    let now = Utc::now();
    let found = sessions.find_valid(&live.token, now).await.unwrap().unwrap();
    assert_eq!(found.role, Role::Admin);
    assert!(sessions.find_valid(&stale.token, now).await.unwrap().is_none());

    assert_eq!(sessions.purge_expired(now).await.unwrap(), 1);
    sessions.delete(&live.token).await.unwrap();
    assert!(sessions.find_valid(&live.token, now).await.unwrap().is_none());
}

#[tokio::test]
async fn test_activation_code_is_single_use() {
    let db = setup_db().await;
    let repo = ActivationCodeRepositoryImpl::new(db.clone());

    let codes: Vec<ActivationCode> = (0..3)
        .map(|_| ActivationCode::generate(MembershipTier::Temp, 7, None))
        .collect();
    assert_eq!(repo.create_batch(&codes).await.unwrap(), 3);

    let users = UserRepositoryImpl::new(db.clone());
    let user = users
        .create(&User::new("student".to_string(), "学生".to_string(), None), "hash")
        .await
        .unwrap()
        .id;
    let now = Utc::now();
    let expires_at = now + Duration::days(7);

    let member = repo
        .redeem(&codes[0].code, user, MembershipTier::Temp, expires_at, now)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(member.tier, MembershipTier::Temp);
    assert!(member.membership_expires_at.is_some());

    let again = repo
        .redeem(&codes[0].code, user, MembershipTier::Temp, expires_at, now)
        .await
        .unwrap();
    assert!(again.is_none());
    assert!(repo
        .redeem("NOPE", user, MembershipTier::Temp, expires_at, now)
        .await
        .unwrap()
        .is_none());

    let used = repo.find_by_code(&codes[0].code).await.unwrap().unwrap();
    assert!(used.is_used);
    assert_eq!(used.used_by, Some(user));

    assert_eq!(repo.list(CodeFilter::Used).await.unwrap().len(), 1);
    assert_eq!(repo.list(CodeFilter::Unused).await.unwrap().len(), 2);
    assert_eq!(repo.list(CodeFilter::All).await.unwrap().len(), 3);

    assert!(matches!(
        repo.delete(used.id).await,
        Err(RepositoryError::Conflict(_))
    ));
    repo.delete(codes[1].id).await.unwrap();
    assert!(matches!(
        repo.delete(codes[1].id).await,
        Err(RepositoryError::NotFound)
    ));
}

#[tokio::test]
async fn test_redeem_rolls_back_when_user_update_fails() {
    let db = setup_db().await;
    let repo = ActivationCodeRepositoryImpl::new(db);
    let code = ActivationCode::generate(MembershipTier::Official, 30, None);
    repo.create_batch(std::slice::from_ref(&code)).await.unwrap();

    let now = Utc::now();
    let err = repo
        .redeem(
            &code.code,
            Uuid::new_v4(),
            MembershipTier::Official,
            now + Duration::days(30),
            now,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound));

    let stored = repo.find_by_code(&code.code).await.unwrap().unwrap();
    assert!(!stored.is_used);
    assert!(stored.used_by.is_none());
}

#[tokio::test]
async fn test_user_activity_upsert() {
    let db = setup_db().await;
    let actions_repo = UserActionRepositoryImpl::new(db.clone());
    let states_repo = JobStateRepositoryImpl::new(db);
    let user = Uuid::new_v4();
    let job = Uuid::new_v4();

    let initial = actions_repo.get(user).await.unwrap();
    assert!(initial.favorited_job_ids.is_empty());
    assert!(initial.applied_job_ids.is_empty());

    let mut actions = UserActions::empty(user);
    actions.toggle_favorite(job);
    actions_repo.save(&actions).await.unwrap();
    actions.add_applied(job);
    actions_repo.save(&actions).await.unwrap();

    let stored = actions_repo.get(user).await.unwrap();
    assert_eq!(stored.favorited_job_ids, vec![job]);
    assert_eq!(stored.applied_job_ids, vec![job]);

    let mut states = JobStates::empty(user);
    states.upsert(job, ApplicationStage::Interview, Some("二面".to_string()));
    states_repo.save(&states).await.unwrap();
    states.upsert(job, ApplicationStage::Offer, None);
    states_repo.save(&states).await.unwrap();

    let stored = states_repo.get(user).await.unwrap();
    assert_eq!(stored.stage_of(job), Some(ApplicationStage::Offer));
    assert_eq!(stored.entries.len(), 1);
}
