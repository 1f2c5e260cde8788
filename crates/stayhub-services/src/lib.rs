//! Business logic services for StayHub
//!
//! This crate contains the reservation core: rate and availability
//! quoting, the booking/payment/invoice lifecycle, and occupancy and
//! revenue reporting.
//!
//! # Architecture
//!
//! Services are designed to be composable and testable:
//! - Each service is generic over the repository traits it consumes
//! - Services are wrapped in Arc for safe sharing across async tasks
//! - All operations are instrumented with tracing
//! - Comprehensive error handling with AppError
//!
//! # Services
//!
//! - `AvailabilityEngine` - Per-night pricing and availability quotes
//! - `BookingManager` - Booking lifecycle and payment/invoice transitions
//! - `ReportingService` - Occupancy, ADR and RevPAR aggregation

pub mod availability;
pub mod booking;
pub mod reporting;

#[cfg(test)]
pub(crate) mod memory;

pub use availability::{AvailabilityEngine, NightlyRate, Quote};
pub use booking::{BookingCreateResult, BookingManager, CancelResult};
pub use reporting::{ReportSummary, ReportingService};

/// Business logic constants
pub mod constants {
    /// Hours before check-in after which cancellation drops to a half refund
    pub const DEFAULT_REFUND_CUTOFF_HOURS: i64 = 24;

    /// Note recorded on guest-initiated cancellations
    pub const CANCELLED_BY_GUEST_NOTE: &str = "cancelled_by_guest";

    /// Fallback room count for properties with no registered rooms,
    /// guarding the occupancy division
    pub const MIN_ROOM_COUNT: i64 = 1;
}
