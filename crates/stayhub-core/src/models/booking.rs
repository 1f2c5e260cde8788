//! Booking model and lifecycle states
//!
//! A booking occupies the half-open date interval [check_in, check_out):
//! a stay of n nights covers n dates, with the check-out date exclusive.
//! Bookings are never deleted, only status-terminated.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Booking lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BookingStatus {
    /// Created, payment still pending
    #[default]
    New,
    /// Payment captured
    Confirmed,
    /// Cancelled by guest or staff
    Cancelled,
    /// Guest has arrived
    CheckedIn,
    /// Stay completed
    CheckedOut,
    /// Guest never arrived
    NoShow,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::New => write!(f, "New"),
            BookingStatus::Confirmed => write!(f, "Confirmed"),
            BookingStatus::Cancelled => write!(f, "Cancelled"),
            BookingStatus::CheckedIn => write!(f, "CheckedIn"),
            BookingStatus::CheckedOut => write!(f, "CheckedOut"),
            BookingStatus::NoShow => write!(f, "NoShow"),
        }
    }
}

impl BookingStatus {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "New" => Some(BookingStatus::New),
            "Confirmed" => Some(BookingStatus::Confirmed),
            "Cancelled" => Some(BookingStatus::Cancelled),
            "CheckedIn" => Some(BookingStatus::CheckedIn),
            "CheckedOut" => Some(BookingStatus::CheckedOut),
            "NoShow" => Some(BookingStatus::NoShow),
            _ => None,
        }
    }

    /// Terminal states admit no further transitions
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            BookingStatus::Cancelled | BookingStatus::CheckedOut | BookingStatus::NoShow
        )
    }

    /// Guest-initiated cancellation is only allowed from New or Confirmed
    pub fn can_cancel(&self) -> bool {
        matches!(self, BookingStatus::New | BookingStatus::Confirmed)
    }

    /// Whether a booking in this status counts toward occupancy and revenue
    pub fn counts_for_reporting(&self) -> bool {
        !matches!(self, BookingStatus::Cancelled | BookingStatus::New)
    }
}

/// Booking entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Unique identifier
    pub id: Uuid,

    /// Guest who owns the booking
    pub guest_id: Uuid,

    /// Property the room belongs to
    pub property_id: Uuid,

    /// Booked room
    pub room_id: Uuid,

    /// First occupied date
    pub check_in: NaiveDate,

    /// Departure date (exclusive)
    pub check_out: NaiveDate,

    /// Number of nights, always `check_out - check_in`
    pub nights: i32,

    /// Total price as quoted at creation time; never recomputed
    pub total_price: Decimal,

    /// Refund granted on cancellation
    pub refund_amount: Decimal,

    /// Current lifecycle status
    pub status: BookingStatus,

    /// Free-form status note (e.g. "cancelled_by_guest")
    pub note: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Create a new booking in status New
    pub fn new(
        guest_id: Uuid,
        property_id: Uuid,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        nights: i32,
        total_price: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            guest_id,
            property_id,
            room_id,
            check_in,
            check_out,
            nights,
            total_price,
            refund_amount: Decimal::ZERO,
            status: BookingStatus::New,
            note: None,
            created_at: Utc::now(),
        }
    }

    /// Check-in date as the start-of-day instant used for refund cutoffs
    pub fn check_in_instant(&self) -> DateTime<Utc> {
        self.check_in.and_time(NaiveTime::MIN).and_utc()
    }

    /// Refund owed if the booking is cancelled at `now`.
    ///
    /// Full refund strictly before `check_in - cutoff_hours`; half refund
    /// from that cutoff (inclusive) until check-in; nothing from check-in on.
    pub fn refund_on_cancel(&self, now: DateTime<Utc>, cutoff_hours: i64) -> Decimal {
        let check_in = self.check_in_instant();
        let cutoff = check_in - Duration::hours(cutoff_hours);

        if now >= check_in {
            Decimal::ZERO
        } else if now >= cutoff {
            self.total_price / Decimal::from(2)
        } else {
            self.total_price
        }
    }
}
