//! Repository traits and shared service types
//!
//! Defines the narrow collaborator interfaces the services are written
//! against. Production implementations live in `stayhub-db`; tests use
//! in-memory fakes.

use crate::error::AppError;
use crate::models::{Booking, BookingStatus, Invoice, Payment, PaymentStatus, Room, RoomRate, RoomType};
use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

/// Admin authorization scope.
///
/// A global admin may act on any property; a property admin is confined
/// to one. Replaces the nullable-property-id convention with an explicit
/// variant so the branch is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Unrestricted access across properties
    Global,
    /// Access limited to a single property
    Property(Uuid),
}

impl Scope {
    /// Whether this scope may act on the given property
    pub fn allows(&self, property_id: Uuid) -> bool {
        match self {
            Scope::Global => true,
            Scope::Property(id) => *id == property_id,
        }
    }
}

/// Filters for administrative booking listings
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    /// Restrict to one property
    pub property_id: Option<Uuid>,
    /// Restrict to one lifecycle status
    pub status: Option<BookingStatus>,
    /// Check-in on or after this date
    pub start: Option<NaiveDate>,
    /// Check-out on or before this date
    pub end: Option<NaiveDate>,
}

/// Room inventory and rate repository
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Fetch a room by id
    async fn get_room(&self, id: Uuid) -> Result<Option<Room>, AppError>;

    /// Fetch a room type by id
    async fn get_room_type(&self, id: Uuid) -> Result<Option<RoomType>, AppError>;

    /// List rate rows for a room over an inclusive date range, one row per
    /// date that has one
    async fn list_rates_for_room(
        &self,
        room_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<RoomRate>, AppError>;

    /// Insert or update rate rows, keyed uniquely on (room_id, date)
    async fn upsert_rates(&self, rates: &[RoomRate]) -> Result<usize, AppError>;

    /// List rooms with optional property/room-type filters
    async fn list_rooms(
        &self,
        property_id: Option<Uuid>,
        room_type_id: Option<Uuid>,
    ) -> Result<Vec<Room>, AppError>;
}

/// Booking repository
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Returns true when no non-cancelled booking overlaps the half-open
    /// interval [check_in, check_out) on the given room
    async fn check_overlap(
        &self,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<bool, AppError>;

    /// Persist a new booking. Implementations must reject a write-time
    /// overlap as `AppError::RoomUnavailable`.
    async fn create_booking(&self, booking: &Booking) -> Result<(), AppError>;

    /// Fetch a booking by id
    async fn get_booking_by_id(&self, id: Uuid) -> Result<Option<Booking>, AppError>;

    /// List bookings matching the filter
    async fn list_bookings(&self, filter: &BookingFilter) -> Result<Vec<Booking>, AppError>;

    /// List a property's bookings whose stay interval [check_in, check_out)
    /// overlaps the inclusive date window [start, end]. A booking checking
    /// out the day after the window still counts: the overlap test is
    /// `check_in <= end && check_out > start`.
    async fn list_bookings_overlapping(
        &self,
        property_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Booking>, AppError>;

    /// List a guest's bookings, newest first
    async fn list_bookings_by_guest(&self, guest_id: Uuid) -> Result<Vec<Booking>, AppError>;

    /// Update a booking's status, note, and refund amount
    async fn update_booking_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        note: Option<&str>,
        refund_amount: Decimal,
    ) -> Result<Booking, AppError>;
}

/// Payment and invoice repository
#[async_trait]
pub trait PaymentRepository: Send + Sync {
    /// Persist a new payment
    async fn create_payment(&self, payment: &Payment) -> Result<(), AppError>;

    /// Fetch the payment belonging to a booking
    async fn get_payment_by_booking_id(&self, booking_id: Uuid)
        -> Result<Option<Payment>, AppError>;

    /// Update a payment's status; `paid_at` is stamped when moving to Paid
    async fn update_payment_status(
        &self,
        booking_id: Uuid,
        status: PaymentStatus,
        provider: Option<&str>,
        reference: Option<&str>,
    ) -> Result<Payment, AppError>;

    /// Persist a new invoice
    async fn create_invoice(&self, invoice: &Invoice) -> Result<(), AppError>;

    /// Fetch the invoice belonging to a booking
    async fn get_invoice_by_booking_id(&self, booking_id: Uuid)
        -> Result<Option<Invoice>, AppError>;

    /// Update an invoice's status
    async fn update_invoice_status(
        &self,
        booking_id: Uuid,
        status: PaymentStatus,
    ) -> Result<Invoice, AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_allows() {
        let property = Uuid::new_v4();
        let other = Uuid::new_v4();

        assert!(Scope::Global.allows(property));
        assert!(Scope::Property(property).allows(property));
        assert!(!Scope::Property(property).allows(other));
    }
}
