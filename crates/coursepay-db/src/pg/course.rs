//! PostgreSQL course and lecture repository implementations

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::{CourseRow, LectureRow};
use crate::repo::{CourseRepository, LectureRepository};

/// PostgreSQL course repository
#[derive(Clone)]
pub struct PgCourseRepository {
    pool: PgPool,
}

impl PgCourseRepository {
    /// Create a new course repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CourseRepository for PgCourseRepository {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<CourseRow>> {
        let course = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT id, title, price, creator_id, created_at, updated_at
            FROM courses
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(course)
    }

    async fn enrolled_student_ids(&self, course_id: Uuid) -> DbResult<Vec<Uuid>> {
        let ids = sqlx::query_scalar::<_, Uuid>(
            r#"
            SELECT user_id
            FROM enrollments
            WHERE course_id = $1
            ORDER BY enrolled_at
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}

/// PostgreSQL lecture repository
#[derive(Clone)]
pub struct PgLectureRepository {
    pool: PgPool,
}

impl PgLectureRepository {
    /// Create a new lecture repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LectureRepository for PgLectureRepository {
    async fn find_by_course_id(&self, course_id: Uuid) -> DbResult<Vec<LectureRow>> {
        let lectures = sqlx::query_as::<_, LectureRow>(
            r#"
            SELECT id, course_id, title, position, is_preview_free, created_at
            FROM lectures
            WHERE course_id = $1
            ORDER BY position, created_at
            "#,
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lectures)
    }
}
