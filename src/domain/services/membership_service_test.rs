use super::*;
use crate::domain::models::job::{Education, JobDraft, JobType};

fn job_in(categories: Vec<Uuid>) -> Job {
    Job::from_draft(JobDraft {
        title: "Engineer".to_string(),
        company: "Acme".to_string(),
        city: "Beijing".to_string(),
        job_type: JobType::FullTime,
        education: Education::Bachelor,
        salary: None,
        description: None,
        apply_url: "https://acme.example/apply".to_string(),
        deadline: None,
        category_ids: categories,
        tag_ids: vec![],
    })
}

fn user_with(tier: MembershipTier, expires_at: Option<DateTime<Utc>>) -> User {
    let mut user = User::new("20260001".to_string(), "Student".to_string(), None);
    user.tier = tier;
    user.membership_expires_at = expires_at;
    user
}

#[test]
fn test_effective_tier_respects_expiry() {
    let now = Utc::now();
    let active = user_with(MembershipTier::Official, Some(now + Duration::days(1)));
    let expired = user_with(MembershipTier::Official, Some(now - Duration::seconds(1)));
    let no_expiry = user_with(MembershipTier::Temp, None);

    assert_eq!(effective_tier(&active, now), MembershipTier::Official);
    assert_eq!(effective_tier(&expired, now), MembershipTier::Common);
    assert_eq!(effective_tier(&no_expiry, now), MembershipTier::Common);
}

#[test]
fn test_remaining_days_rounds_up() {
    let now = Utc::now();
    let user = user_with(
        MembershipTier::Temp,
        Some(now + Duration::days(2) + Duration::hours(1)),
    );
    assert_eq!(remaining_days(&user, now), 3);
    assert_eq!(remaining_days(&user_with(MembershipTier::Common, None), now), 0);
}

#[test]
fn test_redemption_starts_now_for_common_user() {
    let now = Utc::now();
    let plan = plan_redemption(MembershipTier::Common, None, MembershipTier::Temp, 7, now).unwrap();

    assert_eq!(plan.tier, MembershipTier::Temp);
    assert_eq!(plan.expires_at, now + Duration::days(7));
    assert!(!plan.extended);
}

#[test]
fn test_redemption_extends_same_active_tier() {
    let now = Utc::now();
    let current_expiry = now + Duration::days(3);
    let plan = plan_redemption(
        MembershipTier::Official,
        Some(current_expiry),
        MembershipTier::Official,
        30,
        now,
    )
    .unwrap();

    assert_eq!(plan.expires_at, current_expiry + Duration::days(30));
    assert!(plan.extended);
}

#[test]
fn test_redemption_upgrade_restarts_from_now() {
    let now = Utc::now();
    let plan = plan_redemption(
        MembershipTier::Temp,
        Some(now + Duration::days(3)),
        MembershipTier::Official,
        30,
        now,
    )
    .unwrap();

    assert_eq!(plan.tier, MembershipTier::Official);
    assert_eq!(plan.expires_at, now + Duration::days(30));
    assert!(!plan.extended);
}

#[test]
fn test_redemption_rejects_downgrade_while_active() {
    let now = Utc::now();
    let result = plan_redemption(
        MembershipTier::Official,
        Some(now + Duration::days(3)),
        MembershipTier::Temp,
        7,
        now,
    );
    assert!(matches!(result, Err(DomainError::Conflict(_))));

    // 过期后可以兑换更低等级
    let result = plan_redemption(
        MembershipTier::Official,
        Some(now - Duration::days(1)),
        MembershipTier::Temp,
        7,
        now,
    );
    assert!(result.is_ok());
}

#[test]
fn test_redemption_rejects_non_positive_validity() {
    let now = Utc::now();
    assert!(plan_redemption(MembershipTier::Common, None, MembershipTier::Temp, 0, now).is_err());
    assert!(plan_redemption(MembershipTier::Common, None, MembershipTier::Temp, -5, now).is_err());
}

#[test]
fn test_redemption_rejects_out_of_range_expiry() {
    let now = Utc::now();
    let err = plan_redemption(
        MembershipTier::Common,
        None,
        MembershipTier::Temp,
        1_000_000_000,
        now,
    )
    .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));

    // 续期分支同样不能溢出
    let err = plan_redemption(
        MembershipTier::Official,
        Some(now + Duration::days(30)),
        MembershipTier::Official,
        i32::MAX,
        now,
    )
    .unwrap_err();
    assert!(matches!(err, DomainError::Validation(_)));
}

#[test]
fn test_view_limit_by_tier() {
    let policy = MembershipPolicy::default();
    assert_eq!(policy.view_limit(MembershipTier::Common), Some(5));
    assert_eq!(policy.view_limit(MembershipTier::Temp), Some(20));
    assert_eq!(policy.view_limit(MembershipTier::Official), None);
}

#[test]
fn test_apply_view_limit_caps_each_category() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let jobs = vec![
        job_in(vec![a]),
        job_in(vec![a]),
        job_in(vec![a]),
        job_in(vec![b]),
        job_in(vec![]),
    ];

    let gated = apply_view_limit(jobs, Some(2));
    assert_eq!(gated.visible.len(), 4);
    assert_eq!(gated.locked_count, 1);
}

#[test]
fn test_apply_view_limit_multi_category_job_uses_any_room() {
    let a = Uuid::new_v4();
    let b = Uuid::new_v4();
    let jobs = vec![job_in(vec![a]), job_in(vec![a, b]), job_in(vec![b])];

    // 第二个岗位时 a 已满但 b 有余量；之后 b 也满了
    let gated = apply_view_limit(jobs, Some(1));
    assert_eq!(gated.visible.len(), 2);
    assert_eq!(gated.locked_count, 1);
}

#[test]
fn test_apply_view_limit_unlimited() {
    let a = Uuid::new_v4();
    let jobs = (0..10).map(|_| job_in(vec![a])).collect::<Vec<_>>();
    let gated = apply_view_limit(jobs, None);
    assert_eq!(gated.visible.len(), 10);
    assert_eq!(gated.locked_count, 0);
}
