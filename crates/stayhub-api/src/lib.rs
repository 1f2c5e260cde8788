//! HTTP API layer for StayHub
//!
//! Thin DTOs and actix-web handlers over the service layer. Handlers are
//! written against the concrete PostgreSQL-backed service types wired up
//! in the binary.

#![forbid(unsafe_code)]

pub mod dto;
pub mod handlers;

use stayhub_db::repositories::{PgBookingRepository, PgPaymentRepository, PgRoomRepository};
use stayhub_services::{AvailabilityEngine, BookingManager, ReportingService};

/// Availability engine over the PostgreSQL repositories
pub type Availability = AvailabilityEngine<PgRoomRepository, PgBookingRepository>;

/// Booking manager over the PostgreSQL repositories
pub type Bookings = BookingManager<PgRoomRepository, PgBookingRepository, PgPaymentRepository>;

/// Reporting service over the PostgreSQL repositories
pub type Reports = ReportingService<PgBookingRepository, PgRoomRepository>;

pub use dto::ApiResponse;
pub use handlers::{configure_admin, configure_guest, configure_public};
