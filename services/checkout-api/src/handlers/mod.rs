//! REST API handlers

pub mod checkout;
pub mod courses;
pub mod health;
pub mod shared;
pub mod webhook;

pub use checkout::*;
pub use courses::*;
pub use health::*;
pub use webhook::*;
