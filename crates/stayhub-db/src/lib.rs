//! StayHub Database Layer
//!
//! This crate provides PostgreSQL database access and repository implementations
//! for the StayHub reservation system. It includes:
//!
//! - Connection pool management with sqlx
//! - Repository implementations for rooms, rates, bookings, payments and invoices
//! - The write-time booking-overlap guard (exclusion constraint mapping)

pub mod pool;
pub mod repositories;

pub use pool::create_pool;
pub use repositories::*;

// Re-export commonly used types
pub use sqlx::PgPool;
pub use stayhub_core::{AppError, AppResult};
