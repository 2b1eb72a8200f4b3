//! PostgreSQL repository implementations

mod course;
mod purchase;
mod user;

pub use course::{PgCourseRepository, PgLectureRepository};
pub use purchase::PgPurchaseRepository;
pub use user::PgUserRepository;

use crate::DbPool;

/// All repositories bundled together
#[derive(Clone)]
pub struct Repositories {
    pub users: PgUserRepository,
    pub courses: PgCourseRepository,
    pub lectures: PgLectureRepository,
    pub purchases: PgPurchaseRepository,
}

impl Repositories {
    /// Create all repositories from a database pool
    pub fn new(pool: DbPool) -> Self {
        Self {
            users: PgUserRepository::new(pool.clone()),
            courses: PgCourseRepository::new(pool.clone()),
            lectures: PgLectureRepository::new(pool.clone()),
            purchases: PgPurchaseRepository::new(pool),
        }
    }
}
