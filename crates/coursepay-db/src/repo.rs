//! Repository traits
//!
//! Define async repository interfaces for database operations.

use async_trait::async_trait;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::*;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>>;

    /// IDs of the courses a user is enrolled in
    async fn enrolled_course_ids(&self, user_id: Uuid) -> DbResult<Vec<Uuid>>;
}

/// Course repository trait
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Find a course by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<CourseRow>>;

    /// IDs of the students enrolled in a course
    async fn enrolled_student_ids(&self, course_id: Uuid) -> DbResult<Vec<Uuid>>;
}

/// Lecture repository trait
#[async_trait]
pub trait LectureRepository: Send + Sync {
    /// All lectures of a course, in course order
    async fn find_by_course_id(&self, course_id: Uuid) -> DbResult<Vec<LectureRow>>;
}

/// Purchase repository trait
#[async_trait]
pub trait PurchaseRepository: Send + Sync {
    /// Find a purchase by ID
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<PurchaseRow>>;

    /// Whether the user has any purchase for the course, in any status
    async fn exists_for_user_and_course(&self, user_id: Uuid, course_id: Uuid)
        -> DbResult<bool>;

    /// All purchases in `completed` status, newest first
    async fn find_completed(&self) -> DbResult<Vec<PurchaseRow>>;

    /// Create a new pending purchase
    async fn create(&self, purchase: CreatePurchase) -> DbResult<PurchaseRow>;

    /// Store the provider payment reference
    async fn set_payment_id(&self, id: Uuid, payment_id: &str) -> DbResult<()>;

    /// Overwrite the purchase amount
    async fn update_amount(&self, id: Uuid, amount: Decimal) -> DbResult<()>;

    /// Complete a pending purchase and grant course access.
    ///
    /// In one transaction: marks the purchase completed, flags every lecture
    /// of the course preview-free and enrolls the buyer in the course.
    /// Returns `false` without writing anything when the purchase is not
    /// pending.
    async fn complete(&self, id: Uuid) -> DbResult<bool>;
}

/// Create purchase input
#[derive(Debug, Clone)]
pub struct CreatePurchase {
    pub id: Uuid,
    pub course_id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
}
