//! Purchase completion against PostgreSQL
//!
//! Runs when `DATABASE_URL` points at a scratch database; rows use fresh
//! ids so the tests can share one schema.

use rust_decimal_macros::dec;
use uuid::Uuid;

use coursepay_db::pg::PgPurchaseRepository;
use coursepay_db::{create_pool, run_migrations, CreatePurchase, DbPool, PurchaseRepository};

async fn test_pool() -> Option<DbPool> {
    let Ok(url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return None;
    };
    let pool = create_pool(&url).await.unwrap();
    run_migrations(&pool).await.unwrap();
    Some(pool)
}

/// Creator, course and `lecture_count` locked lectures
async fn seed_course(pool: &DbPool, lecture_count: i32) -> Uuid {
    let creator_id = Uuid::new_v4();
    sqlx::query("INSERT INTO users (id, name, email) VALUES ($1, 'Course Creator', $2)")
        .bind(creator_id)
        .bind(format!("creator-{creator_id}@example.com"))
        .execute(pool)
        .await
        .unwrap();

    let course_id = Uuid::new_v4();
    sqlx::query("INSERT INTO courses (id, title, price, creator_id) VALUES ($1, 'Rust for Web', 50, $2)")
        .bind(course_id)
        .bind(creator_id)
        .execute(pool)
        .await
        .unwrap();

    for position in 0..lecture_count {
        sqlx::query(
            "INSERT INTO lectures (id, course_id, title, position) VALUES ($1, $2, $3, $4)",
        )
        .bind(Uuid::new_v4())
        .bind(course_id)
        .bind(format!("Lecture {}", position + 1))
        .bind(position)
        .execute(pool)
        .await
        .unwrap();
    }

    course_id
}

async fn pending_purchase(repo: &PgPurchaseRepository, user_id: Uuid, course_id: Uuid) -> Uuid {
    repo.create(CreatePurchase {
        id: Uuid::new_v4(),
        course_id,
        user_id,
        amount: dec!(50),
    })
    .await
    .unwrap()
    .id
}

async fn locked_lectures(pool: &DbPool, course_id: Uuid) -> i64 {
    sqlx::query_scalar(
        "SELECT COUNT(*) FROM lectures WHERE course_id = $1 AND NOT is_preview_free",
    )
    .bind(course_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

async fn enrollment_count(pool: &DbPool, user_id: Uuid, course_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM enrollments WHERE user_id = $1 AND course_id = $2")
        .bind(user_id)
        .bind(course_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_complete_applies_once() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repo = PgPurchaseRepository::new(pool.clone());
    let course_id = seed_course(&pool, 3).await;
    let user_id = Uuid::new_v4();
    let purchase_id = pending_purchase(&repo, user_id, course_id).await;

    assert!(repo.complete(purchase_id).await.unwrap());
    assert!(!repo.complete(purchase_id).await.unwrap());

    let purchase = repo.find_by_id(purchase_id).await.unwrap().unwrap();
    assert_eq!(purchase.status, "completed");
    assert_eq!(locked_lectures(&pool, course_id).await, 0);
    assert_eq!(enrollment_count(&pool, user_id, course_id).await, 1);
}

#[tokio::test]
async fn test_complete_keeps_existing_enrollment() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repo = PgPurchaseRepository::new(pool.clone());
    let course_id = seed_course(&pool, 1).await;
    let user_id = Uuid::new_v4();
    let first = pending_purchase(&repo, user_id, course_id).await;
    let second = pending_purchase(&repo, user_id, course_id).await;

    assert!(repo.complete(first).await.unwrap());
    assert!(repo.complete(second).await.unwrap());

    assert_eq!(enrollment_count(&pool, user_id, course_id).await, 1);
}

#[tokio::test]
async fn test_complete_unknown_purchase_changes_nothing() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repo = PgPurchaseRepository::new(pool.clone());
    let course_id = seed_course(&pool, 2).await;

    assert!(!repo.complete(Uuid::new_v4()).await.unwrap());
    assert_eq!(locked_lectures(&pool, course_id).await, 2);
}

#[tokio::test]
async fn test_concurrent_completions_transition_once() {
    let Some(pool) = test_pool().await else {
        return;
    };
    let repo = PgPurchaseRepository::new(pool.clone());
    let course_id = seed_course(&pool, 2).await;
    let user_id = Uuid::new_v4();
    let purchase_id = pending_purchase(&repo, user_id, course_id).await;

    let (a, b) = tokio::join!(repo.complete(purchase_id), repo.complete(purchase_id));

    let transitions = [a.unwrap(), b.unwrap()].iter().filter(|t| **t).count();
    assert_eq!(transitions, 1);
    assert_eq!(enrollment_count(&pool, user_id, course_id).await, 1);
}
