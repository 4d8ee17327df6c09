//! Integration tests for the Diesel repositories against a live PostgreSQL.
//!
//! Set `TRACKER_TEST_DATABASE_URL` to run them. Each test registers users
//! under fresh random names, so runs against a shared database do not
//! interfere with each other.

use exercise_tracker::domain::ports::{
    ExerciseRepository, UserPersistenceError, UserRepository,
};
use exercise_tracker::domain::{
    Description, ExerciseDate, ExerciseDraft, LogFilter, Minutes, User, Username,
};
use exercise_tracker::outbound::persistence::{
    DbPool, DieselExerciseRepository, DieselUserRepository, PoolConfig, run_migrations,
};
use rstest::rstest;
use uuid::Uuid;

const DATABASE_URL_ENV: &str = "TRACKER_TEST_DATABASE_URL";

async fn test_pool() -> Option<DbPool> {
    let Ok(url) = std::env::var(DATABASE_URL_ENV) else {
        eprintln!("SKIP-TEST-DB: {DATABASE_URL_ENV} not set");
        return None;
    };
    run_migrations(&url).await.expect("migrations apply");
    let pool = DbPool::new(PoolConfig::new(url).with_max_size(2))
        .await
        .expect("pool builds");
    Some(pool)
}

fn fresh_username() -> Username {
    let suffix = Uuid::new_v4().simple().to_string();
    Username::new(format!("user_{}", &suffix[..12])).expect("valid username")
}

fn draft(owner: &User, description: &str, minutes: u32, date: &str) -> ExerciseDraft {
    ExerciseDraft {
        user_id: *owner.id(),
        username: owner.username().clone(),
        description: Description::new(description).expect("valid description"),
        duration: Minutes::new(minutes).expect("valid duration"),
        date: date.parse::<ExerciseDate>().expect("valid date"),
    }
}

#[rstest]
#[tokio::test]
async fn duplicate_username_is_rejected_by_the_store() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repo = DieselUserRepository::new(pool);
    let username = fresh_username();

    let created = repo.insert(&username).await.expect("first insert");
    let err = repo.insert(&username).await.expect_err("second insert fails");

    assert_eq!(
        err,
        UserPersistenceError::duplicate_username(username.as_str())
    );
    let found = repo
        .find_by_username(&username)
        .await
        .expect("lookup")
        .expect("user exists");
    assert_eq!(found, created);
    let by_id = repo.find_by_id(created.id()).await.expect("lookup by id");
    assert_eq!(by_id, Some(created));
}

#[rstest]
#[tokio::test]
async fn listed_users_include_new_registrations_in_creation_order() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repo = DieselUserRepository::new(pool);
    let first = repo.insert(&fresh_username()).await.expect("insert first");
    let second = repo.insert(&fresh_username()).await.expect("insert second");

    let all = repo.list_all().await.expect("list");
    let first_pos = all.iter().position(|u| u == &first).expect("first listed");
    let second_pos = all.iter().position(|u| u == &second).expect("second listed");
    assert!(first_pos < second_pos);
}

#[rstest]
#[case(LogFilter::default(), &["a", "b", "c"])]
#[case(LogFilter { from: Some("2024-01-02".parse().expect("date")), ..LogFilter::default() }, &["a", "c"])]
#[case(LogFilter { to: Some("2024-01-02".parse().expect("date")), ..LogFilter::default() }, &["b", "c"])]
#[case(LogFilter { limit: Some(1), ..LogFilter::default() }, &["a"])]
#[case(LogFilter { limit: Some(0), ..LogFilter::default() }, &[])]
#[tokio::test]
async fn exercise_listing_respects_filter_and_insertion_order(
    #[case] filter: LogFilter,
    #[case] expected: &[&str],
) {
    let Some(pool) = test_pool().await else {
        return;
    };
    let users = DieselUserRepository::new(pool.clone());
    let exercises = DieselExerciseRepository::new(pool);
    let owner = users.insert(&fresh_username()).await.expect("owner");
    let other = users.insert(&fresh_username()).await.expect("other user");

    // Inserted out of date order to check that insertion order is kept.
    for (description, date) in [("a", "2024-01-03"), ("b", "2024-01-01"), ("c", "2024-01-02")] {
        exercises
            .insert(&draft(&owner, description, 10, date))
            .await
            .expect("insert exercise");
    }
    exercises
        .insert(&draft(&other, "elsewhere", 5, "2024-01-02"))
        .await
        .expect("insert foreign exercise");

    let listed = exercises
        .list_for_user(owner.id(), &filter)
        .await
        .expect("list exercises");
    let descriptions: Vec<&str> = listed.iter().map(|e| e.description.as_str()).collect();

    assert_eq!(descriptions, expected);
    assert!(listed.iter().all(|e| &e.user_id == owner.id()));
}
