//! Booking lifecycle manager
//!
//! Orchestrates quote -> booking -> payment -> invoice creation and drives
//! the status transitions for payment capture and cancellation. Writes are
//! optimistic: no lock is held between the quote and the insert, so the
//! repository's write-time overlap guard is the authoritative line of
//! defense, surfaced here as `RoomUnavailable`.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use stayhub_core::{
    models::{Booking, BookingStatus, Invoice, Payment, PaymentStatus},
    traits::{BookingFilter, BookingRepository, PaymentRepository, RoomRepository, Scope},
    AppError, AppResult,
};
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::availability::AvailabilityEngine;
use crate::constants::CANCELLED_BY_GUEST_NOTE;

/// Result of a successful booking creation
#[derive(Debug, Clone, Serialize)]
pub struct BookingCreateResult {
    pub booking: Booking,
    pub payment: Payment,
    pub invoice: Invoice,
}

/// Result of a cancellation; the payment is absent when none was created
#[derive(Debug, Clone, Serialize)]
pub struct CancelResult {
    pub booking: Booking,
    pub payment: Option<Payment>,
}

/// Booking lifecycle manager
pub struct BookingManager<R: RoomRepository, B: BookingRepository, P: PaymentRepository> {
    room_repo: Arc<R>,
    booking_repo: Arc<B>,
    payment_repo: Arc<P>,
    engine: AvailabilityEngine<R, B>,
    refund_cutoff_hours: i64,
}

impl<R: RoomRepository, B: BookingRepository, P: PaymentRepository> BookingManager<R, B, P> {
    /// Create a new manager quoting in `currency` with the given refund cutoff
    pub fn new(
        room_repo: Arc<R>,
        booking_repo: Arc<B>,
        payment_repo: Arc<P>,
        currency: String,
        refund_cutoff_hours: i64,
    ) -> Self {
        let engine =
            AvailabilityEngine::new(Arc::clone(&room_repo), Arc::clone(&booking_repo), currency);
        Self {
            room_repo,
            booking_repo,
            payment_repo,
            engine,
            refund_cutoff_hours,
        }
    }

    /// The availability engine, for callers that only need a quote
    pub fn engine(&self) -> &AvailabilityEngine<R, B> {
        &self.engine
    }

    /// Create a booking with its pending payment and invoice.
    ///
    /// The three writes are logically one unit. If the payment or invoice
    /// write fails after the booking insert, the booking is not rolled back
    /// (deleting a committed booking risks losing a legitimately held
    /// reservation); the error carries the booking id for reconciliation.
    #[instrument(skip(self))]
    pub async fn create_booking(
        &self,
        guest_id: Uuid,
        property_id: Uuid,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> AppResult<BookingCreateResult> {
        let room = self
            .room_repo
            .get_room(room_id)
            .await?
            .ok_or_else(|| AppError::RoomNotFound(room_id.to_string()))?;
        if room.property_id != property_id {
            return Err(AppError::PropertyMismatch(room_id.to_string()));
        }

        let quote = self.engine.quote(room_id, check_in, check_out).await?;
        if !quote.available {
            return Err(AppError::RoomUnavailable(room_id.to_string()));
        }

        let booking = Booking::new(
            guest_id,
            property_id,
            room_id,
            check_in,
            check_out,
            quote.nights as i32,
            quote.total_price,
        );
        // The repository maps a write-time overlap rejection to RoomUnavailable
        self.booking_repo.create_booking(&booking).await?;
        info!(booking_id = %booking.id, %room_id, "booking created");

        let payment = Payment::pending(booking.id, booking.total_price);
        if let Err(e) = self.payment_repo.create_payment(&payment).await {
            warn!(booking_id = %booking.id, error = %e, "payment write failed after booking insert");
            return Err(AppError::PartialBooking {
                booking_id: booking.id,
                detail: e.to_string(),
            });
        }

        let invoice = Invoice::pending(booking.id, booking.total_price, booking.created_at);
        if let Err(e) = self.payment_repo.create_invoice(&invoice).await {
            warn!(booking_id = %booking.id, error = %e, "invoice write failed after booking insert");
            return Err(AppError::PartialBooking {
                booking_id: booking.id,
                detail: e.to_string(),
            });
        }

        Ok(BookingCreateResult {
            booking,
            payment,
            invoice,
        })
    }

    /// Capture a booking's payment.
    ///
    /// Only a Pending payment transitions; calling again on a Paid payment
    /// returns the current records unchanged, and a Refunded payment cannot
    /// be re-captured. The first capture advances a New booking to Confirmed.
    #[instrument(skip(self))]
    pub async fn mark_payment_paid(
        &self,
        guest_id: Uuid,
        booking_id: Uuid,
        provider: &str,
        reference: &str,
    ) -> AppResult<(Payment, Invoice)> {
        let booking = self.owned_booking(guest_id, booking_id).await?;

        let payment = self
            .payment_repo
            .get_payment_by_booking_id(booking_id)
            .await?
            .ok_or_else(|| AppError::PaymentNotFound(booking_id.to_string()))?;

        match payment.status {
            PaymentStatus::Pending => {}
            PaymentStatus::Paid => {
                let invoice = self
                    .payment_repo
                    .get_invoice_by_booking_id(booking_id)
                    .await?
                    .ok_or_else(|| AppError::InvoiceNotFound(booking_id.to_string()))?;
                return Ok((payment, invoice));
            }
            PaymentStatus::Refunded => {
                return Err(AppError::InvalidTransition {
                    from: PaymentStatus::Refunded.to_string(),
                    to: PaymentStatus::Paid.to_string(),
                });
            }
        }

        let payment = self
            .payment_repo
            .update_payment_status(
                booking_id,
                PaymentStatus::Paid,
                Some(provider),
                Some(reference),
            )
            .await?;
        let invoice = self
            .payment_repo
            .update_invoice_status(booking_id, PaymentStatus::Paid)
            .await?;

        if booking.status == BookingStatus::New {
            self.booking_repo
                .update_booking_status(
                    booking_id,
                    BookingStatus::Confirmed,
                    None,
                    booking.refund_amount,
                )
                .await?;
            info!(%booking_id, "booking confirmed on payment capture");
        }

        Ok((payment, invoice))
    }

    /// Cancel a booking, computing the refund from the time-based policy.
    ///
    /// A Paid payment (and its invoice) moves to Refunded; a Pending payment
    /// is left untouched, keeping the payment status monotonic.
    #[instrument(skip(self))]
    pub async fn cancel_booking(
        &self,
        guest_id: Uuid,
        booking_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<CancelResult> {
        let booking = self.owned_booking(guest_id, booking_id).await?;

        if !booking.status.can_cancel() {
            return Err(AppError::InvalidTransition {
                from: booking.status.to_string(),
                to: BookingStatus::Cancelled.to_string(),
            });
        }

        let refund = booking.refund_on_cancel(now, self.refund_cutoff_hours);
        let booking = self
            .booking_repo
            .update_booking_status(
                booking_id,
                BookingStatus::Cancelled,
                Some(CANCELLED_BY_GUEST_NOTE),
                refund,
            )
            .await?;
        info!(%booking_id, %refund, "booking cancelled");

        let payment = match self
            .payment_repo
            .get_payment_by_booking_id(booking_id)
            .await?
        {
            Some(p) if p.status == PaymentStatus::Paid => {
                // Provider and reference are preserved by the repository
                let refunded = self
                    .payment_repo
                    .update_payment_status(booking_id, PaymentStatus::Refunded, None, None)
                    .await?;
                self.payment_repo
                    .update_invoice_status(booking_id, PaymentStatus::Refunded)
                    .await?;
                Some(refunded)
            }
            other => other,
        };

        Ok(CancelResult { booking, payment })
    }

    /// Fetch a booking's payment, checking ownership
    #[instrument(skip(self))]
    pub async fn get_payment(&self, guest_id: Uuid, booking_id: Uuid) -> AppResult<Payment> {
        self.owned_booking(guest_id, booking_id).await?;
        self.payment_repo
            .get_payment_by_booking_id(booking_id)
            .await?
            .ok_or_else(|| AppError::PaymentNotFound(booking_id.to_string()))
    }

    /// Fetch a booking's invoice, checking ownership
    #[instrument(skip(self))]
    pub async fn get_invoice(&self, guest_id: Uuid, booking_id: Uuid) -> AppResult<Invoice> {
        self.owned_booking(guest_id, booking_id).await?;
        self.payment_repo
            .get_invoice_by_booking_id(booking_id)
            .await?
            .ok_or_else(|| AppError::InvoiceNotFound(booking_id.to_string()))
    }

    /// List a guest's bookings, newest first
    #[instrument(skip(self))]
    pub async fn list_guest_bookings(&self, guest_id: Uuid) -> AppResult<Vec<Booking>> {
        self.booking_repo.list_bookings_by_guest(guest_id).await
    }

    /// Administrative booking listing, confined to the caller's scope
    #[instrument(skip(self))]
    pub async fn list_bookings(
        &self,
        scope: Scope,
        mut filter: BookingFilter,
    ) -> AppResult<Vec<Booking>> {
        if let Scope::Property(property_id) = scope {
            match filter.property_id {
                Some(requested) if requested != property_id => return Err(AppError::Forbidden),
                _ => filter.property_id = Some(property_id),
            }
        }
        self.booking_repo.list_bookings(&filter).await
    }

    /// Administrative status escape hatch.
    ///
    /// Applies the given status, note and refund directly, bypassing the
    /// refund policy. Transitions out of a terminal state are still
    /// rejected.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        scope: Scope,
        booking_id: Uuid,
        status: BookingStatus,
        note: Option<&str>,
        refund_amount: Option<Decimal>,
    ) -> AppResult<Booking> {
        let booking = self
            .booking_repo
            .get_booking_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::BookingNotFound(booking_id.to_string()))?;
        if !scope.allows(booking.property_id) {
            return Err(AppError::Forbidden);
        }
        if booking.status.is_terminal() {
            return Err(AppError::InvalidTransition {
                from: booking.status.to_string(),
                to: status.to_string(),
            });
        }

        self.booking_repo
            .update_booking_status(
                booking_id,
                status,
                note,
                refund_amount.unwrap_or(booking.refund_amount),
            )
            .await
    }

    async fn owned_booking(&self, guest_id: Uuid, booking_id: Uuid) -> AppResult<Booking> {
        let booking = self
            .booking_repo
            .get_booking_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::BookingNotFound(booking_id.to_string()))?;
        if booking.guest_id != guest_id {
            return Err(AppError::Forbidden);
        }
        Ok(booking)
    }
}
