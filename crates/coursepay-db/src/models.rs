//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;
use uuid::Uuid;

use coursepay_types::{
    Course, CourseId, Lecture, LectureId, Purchase, PurchaseId, PurchaseStatus, User, UserId,
};

use crate::error::{DbError, DbResult};

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Course row from the database
#[derive(Debug, Clone, FromRow)]
pub struct CourseRow {
    pub id: Uuid,
    pub title: String,
    pub price: Decimal,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Lecture row from the database
#[derive(Debug, Clone, FromRow)]
pub struct LectureRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub position: i32,
    pub is_preview_free: bool,
    pub created_at: DateTime<Utc>,
}

/// Purchase row from the database
#[derive(Debug, Clone, FromRow)]
pub struct PurchaseRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub user_id: Uuid,
    pub amount: Decimal,
    pub status: String,
    pub payment_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Conversion implementations from Row types to coursepay-types domain types
impl UserRow {
    /// Convert to a domain user with its enrolled courses
    pub fn into_user(self, enrolled_courses: Vec<Uuid>) -> User {
        User {
            id: UserId(self.id),
            name: self.name,
            email: self.email,
            phone_number: self.phone_number,
            enrolled_courses: enrolled_courses.into_iter().map(CourseId).collect(),
        }
    }
}

impl CourseRow {
    /// Convert to a domain course with its lecture and student references
    pub fn into_course(self, lecture_ids: Vec<Uuid>, enrolled_students: Vec<Uuid>) -> Course {
        Course {
            id: CourseId(self.id),
            title: self.title,
            price: self.price,
            creator_id: UserId(self.creator_id),
            lecture_ids: lecture_ids.into_iter().map(LectureId).collect(),
            enrolled_students: enrolled_students.into_iter().map(UserId).collect(),
        }
    }
}

impl From<LectureRow> for Lecture {
    fn from(row: LectureRow) -> Self {
        Self {
            id: LectureId(row.id),
            title: row.title,
            is_preview_free: row.is_preview_free,
        }
    }
}

impl TryFrom<PurchaseRow> for Purchase {
    type Error = DbError;

    fn try_from(row: PurchaseRow) -> DbResult<Self> {
        let status: PurchaseStatus = row
            .status
            .parse()
            .map_err(|e: coursepay_types::StatusParseError| DbError::InvalidData(e.to_string()))?;

        Ok(Self {
            id: PurchaseId(row.id),
            course_id: CourseId(row.course_id),
            user_id: UserId(row.user_id),
            amount: row.amount,
            status,
            payment_id: row.payment_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn purchase_row(status: &str) -> PurchaseRow {
        PurchaseRow {
            id: Uuid::new_v4(),
            course_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            amount: Decimal::from(50),
            status: status.to_string(),
            payment_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_purchase_row_converts() {
        let row = purchase_row("completed");
        let id = row.id;
        let purchase = Purchase::try_from(row).unwrap();
        assert_eq!(purchase.id, PurchaseId(id));
        assert_eq!(purchase.status, PurchaseStatus::Completed);
    }

    #[test]
    fn test_purchase_row_with_unknown_status_is_rejected() {
        let result = Purchase::try_from(purchase_row("refunded"));
        assert!(matches!(result, Err(DbError::InvalidData(_))));
    }

    #[test]
    fn test_course_row_keeps_lecture_order() {
        let lectures = vec![Uuid::new_v4(), Uuid::new_v4()];
        let row = CourseRow {
            id: Uuid::new_v4(),
            title: "Rust for web".to_string(),
            price: Decimal::from(50),
            creator_id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let course = row.into_course(lectures.clone(), vec![]);
        assert_eq!(
            course.lecture_ids,
            lectures.into_iter().map(LectureId).collect::<Vec<_>>()
        );
    }
}
