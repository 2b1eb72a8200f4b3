//! Coursepay Types - Shared domain types
//!
//! This crate contains domain types used across coursepay services:
//! - Users and their enrolled courses
//! - Courses and lectures
//! - Purchases and their status
//! - Money conversion to the payment provider's minor unit

pub mod course;
pub mod error;
pub mod money;
pub mod purchase;
pub mod user;

pub use course::*;
pub use error::*;
pub use money::*;
pub use purchase::*;
pub use user::*;
