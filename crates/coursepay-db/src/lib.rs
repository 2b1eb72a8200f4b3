//! Coursepay DB - Database abstractions
//!
//! SQLx-based database layer for coursepay services.
//!
//! # Example
//!
//! ```rust,ignore
//! use coursepay_db::{create_pool, run_migrations, Repositories};
//!
//! let pool = create_pool("postgres://localhost/coursepay").await?;
//! run_migrations(&pool).await?;
//! let repos = Repositories::new(pool);
//!
//! // Use repositories
//! let course = repos.courses.find_by_id(course_id).await?;
//! ```

pub mod error;
pub mod models;
pub mod pg;
pub mod pool;
pub mod repo;
#[cfg(feature = "test-util")]
pub mod testing;

pub use error::{DbError, DbResult};
pub use models::*;
pub use pg::Repositories;
pub use pool::{create_pool, create_pool_with_options, run_migrations, DbPool, PoolOptions};
pub use repo::*;
