//! Course and lecture types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{UserId, UserProfile};

/// Unique course identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub Uuid);

impl CourseId {
    /// Create a new random course ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a course ID from a string
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

impl Default for CourseId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for CourseId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

/// Unique lecture identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LectureId(pub Uuid);

impl LectureId {
    /// Create a new random lecture ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LectureId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LectureId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A course offered for sale
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    /// Course ID
    pub id: CourseId,
    /// Course title
    pub title: String,
    /// Price in currency units (TND)
    pub price: Decimal,
    /// Instructor who created the course
    pub creator_id: UserId,
    /// Lectures in course order
    pub lecture_ids: Vec<LectureId>,
    /// Students enrolled in the course
    pub enrolled_students: Vec<UserId>,
}

/// A single lecture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lecture {
    /// Lecture ID
    pub id: LectureId,
    /// Lecture title
    pub title: String,
    /// Whether the lecture is viewable without a completed purchase
    pub is_preview_free: bool,
}

/// Course with creator and lectures expanded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetail {
    /// Course ID
    pub id: CourseId,
    /// Course title
    pub title: String,
    /// Price in currency units (TND)
    pub price: Decimal,
    /// Course creator, if the account still exists
    pub creator: Option<UserProfile>,
    /// Lectures in course order
    pub lectures: Vec<Lecture>,
    /// Students enrolled in the course
    pub enrolled_students: Vec<UserId>,
}

impl CourseDetail {
    /// Expand a course with its creator and lectures
    pub fn new(course: Course, creator: Option<UserProfile>, lectures: Vec<Lecture>) -> Self {
        Self {
            id: course.id,
            title: course.title,
            price: course.price,
            creator,
            lectures,
            enrolled_students: course.enrolled_students,
        }
    }
}
