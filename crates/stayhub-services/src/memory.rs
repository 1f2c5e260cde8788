//! In-memory repository fakes for service tests
//!
//! Behave like the PostgreSQL repositories, including the write-time
//! overlap rejection on booking creation.

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use stayhub_core::{
    models::{
        Booking, BookingStatus, Invoice, Payment, PaymentStatus, Room, RoomRate, RoomType,
    },
    traits::{BookingFilter, BookingRepository, PaymentRepository, RoomRepository},
    AppError, AppResult,
};
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryRoomRepo {
    rooms: Mutex<Vec<Room>>,
    room_types: Mutex<Vec<RoomType>>,
    rates: Mutex<Vec<RoomRate>>,
}

impl InMemoryRoomRepo {
    /// Add a room without a room type (no fallback price)
    pub fn add_room(&self, property_id: Uuid, room_type_id: Option<Uuid>) -> Uuid {
        let room = Room {
            id: Uuid::new_v4(),
            property_id,
            room_number: "101".to_string(),
            room_type_id,
            status: Default::default(),
            housekeeping_status: Default::default(),
            created_at: chrono::Utc::now(),
        };
        let id = room.id;
        self.rooms.lock().push(room);
        id
    }

    /// Add a room backed by a room type with the given base price
    pub fn add_room_with_type(&self, property_id: Uuid, base_price: Decimal) -> Uuid {
        let room_type = RoomType {
            id: Uuid::new_v4(),
            property_id,
            name: "Standard".to_string(),
            description: String::new(),
            base_price,
            capacity: 2,
            facilities: vec![],
            created_at: chrono::Utc::now(),
        };
        let type_id = room_type.id;
        self.room_types.lock().push(room_type);
        self.add_room(property_id, Some(type_id))
    }

    pub fn add_rate(&self, rate: RoomRate) {
        self.rates.lock().push(rate);
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepo {
    async fn get_room(&self, id: Uuid) -> AppResult<Option<Room>> {
        Ok(self.rooms.lock().iter().find(|r| r.id == id).cloned())
    }

    async fn get_room_type(&self, id: Uuid) -> AppResult<Option<RoomType>> {
        Ok(self.room_types.lock().iter().find(|t| t.id == id).cloned())
    }

    async fn list_rates_for_room(
        &self,
        room_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<RoomRate>> {
        Ok(self
            .rates
            .lock()
            .iter()
            .filter(|r| r.room_id == room_id && r.date >= start && r.date <= end)
            .cloned()
            .collect())
    }

    async fn upsert_rates(&self, rates: &[RoomRate]) -> AppResult<usize> {
        let mut stored = self.rates.lock();
        for rate in rates {
            if let Some(existing) = stored
                .iter_mut()
                .find(|r| r.room_id == rate.room_id && r.date == rate.date)
            {
                *existing = rate.clone();
            } else {
                stored.push(rate.clone());
            }
        }
        Ok(rates.len())
    }

    async fn list_rooms(
        &self,
        property_id: Option<Uuid>,
        room_type_id: Option<Uuid>,
    ) -> AppResult<Vec<Room>> {
        Ok(self
            .rooms
            .lock()
            .iter()
            .filter(|r| property_id.map_or(true, |p| r.property_id == p))
            .filter(|r| room_type_id.map_or(true, |t| r.room_type_id == Some(t)))
            .cloned()
            .collect())
    }
}

#[derive(Default)]
pub struct InMemoryBookingRepo {
    bookings: Mutex<Vec<Booking>>,
}

impl InMemoryBookingRepo {
    /// Insert a booking directly, bypassing the overlap guard
    pub fn seed(&self, booking: Booking) {
        self.bookings.lock().push(booking);
    }

    fn overlaps(&self, room_id: Uuid, check_in: NaiveDate, check_out: NaiveDate) -> bool {
        self.bookings.lock().iter().any(|b| {
            b.room_id == room_id
                && b.status != BookingStatus::Cancelled
                && b.check_in < check_out
                && b.check_out > check_in
        })
    }
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepo {
    async fn check_overlap(
        &self,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> AppResult<bool> {
        Ok(!self.overlaps(room_id, check_in, check_out))
    }

    async fn create_booking(&self, booking: &Booking) -> AppResult<()> {
        // Mirrors the database exclusion constraint
        if self.overlaps(booking.room_id, booking.check_in, booking.check_out) {
            return Err(AppError::RoomUnavailable(booking.room_id.to_string()));
        }
        self.bookings.lock().push(booking.clone());
        Ok(())
    }

    async fn get_booking_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        Ok(self.bookings.lock().iter().find(|b| b.id == id).cloned())
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> AppResult<Vec<Booking>> {
        Ok(self
            .bookings
            .lock()
            .iter()
            .filter(|b| filter.property_id.map_or(true, |p| b.property_id == p))
            .filter(|b| filter.status.map_or(true, |s| b.status == s))
            .filter(|b| filter.start.map_or(true, |s| b.check_in >= s))
            .filter(|b| filter.end.map_or(true, |e| b.check_out <= e))
            .cloned()
            .collect())
    }

    async fn list_bookings_overlapping(
        &self,
        property_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<Booking>> {
        Ok(self
            .bookings
            .lock()
            .iter()
            .filter(|b| b.property_id == property_id)
            .filter(|b| b.check_in <= end && b.check_out > start)
            .cloned()
            .collect())
    }

    async fn list_bookings_by_guest(&self, guest_id: Uuid) -> AppResult<Vec<Booking>> {
        let mut result: Vec<Booking> = self
            .bookings
            .lock()
            .iter()
            .filter(|b| b.guest_id == guest_id)
            .cloned()
            .collect();
        result.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(result)
    }

    async fn update_booking_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        note: Option<&str>,
        refund_amount: Decimal,
    ) -> AppResult<Booking> {
        let mut bookings = self.bookings.lock();
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| AppError::BookingNotFound(id.to_string()))?;
        booking.status = status;
        if let Some(note) = note {
            booking.note = Some(note.to_string());
        }
        booking.refund_amount = refund_amount;
        Ok(booking.clone())
    }
}

#[derive(Default)]
pub struct InMemoryPaymentRepo {
    payments: Mutex<Vec<Payment>>,
    invoices: Mutex<Vec<Invoice>>,
    fail_payment_create: Mutex<bool>,
    fail_invoice_create: Mutex<bool>,
}

impl InMemoryPaymentRepo {
    /// Make the next payment insert fail, to exercise partial-failure paths
    pub fn fail_next_payment_create(&self) {
        *self.fail_payment_create.lock() = true;
    }

    /// Make the next invoice insert fail
    pub fn fail_next_invoice_create(&self) {
        *self.fail_invoice_create.lock() = true;
    }
}

#[async_trait]
impl PaymentRepository for InMemoryPaymentRepo {
    async fn create_payment(&self, payment: &Payment) -> AppResult<()> {
        let mut fail = self.fail_payment_create.lock();
        if *fail {
            *fail = false;
            return Err(AppError::Database("payment insert failed".to_string()));
        }
        self.payments.lock().push(payment.clone());
        Ok(())
    }

    async fn get_payment_by_booking_id(&self, booking_id: Uuid) -> AppResult<Option<Payment>> {
        Ok(self
            .payments
            .lock()
            .iter()
            .find(|p| p.booking_id == booking_id)
            .cloned())
    }

    async fn update_payment_status(
        &self,
        booking_id: Uuid,
        status: PaymentStatus,
        provider: Option<&str>,
        reference: Option<&str>,
    ) -> AppResult<Payment> {
        let mut payments = self.payments.lock();
        let payment = payments
            .iter_mut()
            .find(|p| p.booking_id == booking_id)
            .ok_or_else(|| AppError::PaymentNotFound(booking_id.to_string()))?;
        payment.status = status;
        if status == PaymentStatus::Paid {
            payment.paid_at = Some(chrono::Utc::now());
        }
        if let Some(provider) = provider {
            payment.provider = Some(provider.to_string());
        }
        if let Some(reference) = reference {
            payment.reference = Some(reference.to_string());
        }
        Ok(payment.clone())
    }

    async fn create_invoice(&self, invoice: &Invoice) -> AppResult<()> {
        let mut fail = self.fail_invoice_create.lock();
        if *fail {
            *fail = false;
            return Err(AppError::Database("invoice insert failed".to_string()));
        }
        self.invoices.lock().push(invoice.clone());
        Ok(())
    }

    async fn get_invoice_by_booking_id(&self, booking_id: Uuid) -> AppResult<Option<Invoice>> {
        Ok(self
            .invoices
            .lock()
            .iter()
            .find(|i| i.booking_id == booking_id)
            .cloned())
    }

    async fn update_invoice_status(
        &self,
        booking_id: Uuid,
        status: PaymentStatus,
    ) -> AppResult<Invoice> {
        let mut invoices = self.invoices.lock();
        let invoice = invoices
            .iter_mut()
            .find(|i| i.booking_id == booking_id)
            .ok_or_else(|| AppError::InvoiceNotFound(booking_id.to_string()))?;
        invoice.status = status;
        Ok(invoice.clone())
    }
}
