//! Repository implementations
//!
//! This module contains concrete implementations of the repository traits
//! defined in stayhub-core, using sqlx for PostgreSQL access.

pub mod booking_repo;
pub mod payment_repo;
pub mod room_repo;

pub use booking_repo::PgBookingRepository;
pub use payment_repo::PgPaymentRepository;
pub use room_repo::PgRoomRepository;
