//! In-memory repositories for tests
//!
//! Enabled by the `test-util` feature. [`MemoryStore`] implements every
//! repository trait over shared maps, so clones see the same data.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::{DashMap, DashSet};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::{CourseRow, LectureRow, PurchaseRow, UserRow};
use crate::repo::{
    CourseRepository, CreatePurchase, LectureRepository, PurchaseRepository, UserRepository,
};

/// In-memory store implementing every repository trait
#[derive(Default, Clone)]
pub struct MemoryStore {
    pub users: Arc<DashMap<Uuid, UserRow>>,
    pub courses: Arc<DashMap<Uuid, CourseRow>>,
    pub lectures: Arc<DashMap<Uuid, LectureRow>>,
    pub purchases: Arc<DashMap<Uuid, PurchaseRow>>,
    pub enrollments: Arc<DashSet<(Uuid, Uuid)>>,
    /// Number of `complete` calls that performed the transition
    pub completions: Arc<AtomicUsize>,
    fail_complete: Arc<AtomicBool>,
    completed_elsewhere: Arc<AtomicBool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `complete` fail without applying any of its effects
    pub fn fail_completion(&self) {
        self.fail_complete.store(true, Ordering::SeqCst);
    }

    /// Make `complete` behave as if another delivery committed the
    /// transition first: the effects land, the call reports `false`
    pub fn complete_concurrently(&self) {
        self.completed_elsewhere.store(true, Ordering::SeqCst);
    }

    /// Insert a test user
    pub fn insert_user(&self, name: &str, phone_number: Option<&str>) -> Uuid {
        let id = Uuid::new_v4();
        self.users.insert(
            id,
            UserRow {
                id,
                name: name.to_string(),
                email: format!("user-{id}@example.com"),
                phone_number: phone_number.map(String::from),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        );
        id
    }

    /// Insert a course with `lecture_count` locked lectures
    pub fn insert_course(&self, title: &str, price: Decimal, lecture_count: usize) -> Uuid {
        let creator_id = self.insert_user("Course Creator", None);
        let id = Uuid::new_v4();
        self.courses.insert(
            id,
            CourseRow {
                id,
                title: title.to_string(),
                price,
                creator_id,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        );
        for position in 0..lecture_count {
            let lecture_id = Uuid::new_v4();
            self.lectures.insert(
                lecture_id,
                LectureRow {
                    id: lecture_id,
                    course_id: id,
                    title: format!("Lecture {}", position + 1),
                    position: position as i32,
                    is_preview_free: false,
                    created_at: Utc::now(),
                },
            );
        }
        id
    }

    /// Insert a purchase of 50 directly
    pub fn insert_purchase(&self, user_id: Uuid, course_id: Uuid, status: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.purchases.insert(
            id,
            PurchaseRow {
                id,
                course_id,
                user_id,
                amount: Decimal::from(50),
                status: status.to_string(),
                payment_id: Some(format!("ref-{id}")),
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
        );
        id
    }

    pub fn purchase(&self, id: Uuid) -> Option<PurchaseRow> {
        self.purchases.get(&id).map(|r| r.value().clone())
    }

    pub fn purchases_for(&self, user_id: Uuid, course_id: Uuid) -> Vec<PurchaseRow> {
        self.purchases
            .iter()
            .filter(|r| r.user_id == user_id && r.course_id == course_id)
            .map(|r| r.value().clone())
            .collect()
    }

    pub fn lectures_of(&self, course_id: Uuid) -> Vec<LectureRow> {
        let mut lectures: Vec<LectureRow> = self
            .lectures
            .iter()
            .filter(|r| r.course_id == course_id)
            .map(|r| r.value().clone())
            .collect();
        lectures.sort_by_key(|l| l.position);
        lectures
    }

    pub fn is_enrolled(&self, user_id: Uuid, course_id: Uuid) -> bool {
        self.enrollments.contains(&(user_id, course_id))
    }

    fn apply_completion(&self, id: Uuid) -> bool {
        let (course_id, user_id) = {
            let Some(mut row) = self.purchases.get_mut(&id) else {
                return false;
            };
            if row.status != "pending" {
                return false;
            }
            row.status = "completed".to_string();
            row.updated_at = Utc::now();
            (row.course_id, row.user_id)
        };

        for mut lecture in self.lectures.iter_mut() {
            if lecture.course_id == course_id {
                lecture.is_preview_free = true;
            }
        }
        self.enrollments.insert((user_id, course_id));
        true
    }
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<UserRow>> {
        Ok(self.users.get(&id).map(|r| r.value().clone()))
    }

    async fn enrolled_course_ids(&self, user_id: Uuid) -> DbResult<Vec<Uuid>> {
        Ok(self
            .enrollments
            .iter()
            .filter(|e| e.0 == user_id)
            .map(|e| e.1)
            .collect())
    }
}

#[async_trait]
impl CourseRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<CourseRow>> {
        Ok(self.courses.get(&id).map(|r| r.value().clone()))
    }

    async fn enrolled_student_ids(&self, course_id: Uuid) -> DbResult<Vec<Uuid>> {
        Ok(self
            .enrollments
            .iter()
            .filter(|e| e.1 == course_id)
            .map(|e| e.0)
            .collect())
    }
}

#[async_trait]
impl LectureRepository for MemoryStore {
    async fn find_by_course_id(&self, course_id: Uuid) -> DbResult<Vec<LectureRow>> {
        Ok(self.lectures_of(course_id))
    }
}

#[async_trait]
impl PurchaseRepository for MemoryStore {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<PurchaseRow>> {
        Ok(self.purchase(id))
    }

    async fn exists_for_user_and_course(
        &self,
        user_id: Uuid,
        course_id: Uuid,
    ) -> DbResult<bool> {
        Ok(!self.purchases_for(user_id, course_id).is_empty())
    }

    async fn find_completed(&self) -> DbResult<Vec<PurchaseRow>> {
        Ok(self
            .purchases
            .iter()
            .filter(|r| r.status == "completed")
            .map(|r| r.value().clone())
            .collect())
    }

    async fn create(&self, purchase: CreatePurchase) -> DbResult<PurchaseRow> {
        let row = PurchaseRow {
            id: purchase.id,
            course_id: purchase.course_id,
            user_id: purchase.user_id,
            amount: purchase.amount,
            status: "pending".to_string(),
            payment_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.purchases.insert(row.id, row.clone());
        Ok(row)
    }

    async fn set_payment_id(&self, id: Uuid, payment_id: &str) -> DbResult<()> {
        if let Some(mut row) = self.purchases.get_mut(&id) {
            row.payment_id = Some(payment_id.to_string());
            row.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn update_amount(&self, id: Uuid, amount: Decimal) -> DbResult<()> {
        if let Some(mut row) = self.purchases.get_mut(&id) {
            row.amount = amount;
            row.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn complete(&self, id: Uuid) -> DbResult<bool> {
        if self.fail_complete.load(Ordering::SeqCst) {
            return Err(DbError::InvalidData(
                "enrollment insert rejected".to_string(),
            ));
        }

        if self.completed_elsewhere.load(Ordering::SeqCst) {
            self.apply_completion(id);
            return Ok(false);
        }

        let transitioned = self.apply_completion(id);
        if transitioned {
            self.completions.fetch_add(1, Ordering::SeqCst);
        }
        Ok(transitioned)
    }
}
