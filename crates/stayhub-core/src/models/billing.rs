//! Payment and invoice models
//!
//! One payment and one invoice exist per booking, created together with it
//! in Pending status. Their status moves monotonically:
//! Pending -> Paid -> Refunded.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Payment (and invoice) status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Refunded,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => write!(f, "Pending"),
            PaymentStatus::Paid => write!(f, "Paid"),
            PaymentStatus::Refunded => write!(f, "Refunded"),
        }
    }
}

impl PaymentStatus {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Pending" => Some(PaymentStatus::Pending),
            "Paid" => Some(PaymentStatus::Paid),
            "Refunded" => Some(PaymentStatus::Refunded),
            _ => None,
        }
    }
}

/// Payment entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier
    pub id: Uuid,

    /// Owning booking
    pub booking_id: Uuid,

    /// Amount due, equal to the booking's total price
    pub amount: Decimal,

    /// Current status
    pub status: PaymentStatus,

    /// Payment provider, set when captured
    pub provider: Option<String>,

    /// Provider-side reference, set when captured
    pub reference: Option<String>,

    /// When the payment was captured
    pub paid_at: Option<DateTime<Utc>>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Create a pending payment for a booking
    pub fn pending(booking_id: Uuid, amount: Decimal) -> Self {
        Self {
            id: Uuid::new_v4(),
            booking_id,
            amount,
            status: PaymentStatus::Pending,
            provider: None,
            reference: None,
            paid_at: None,
            created_at: Utc::now(),
        }
    }
}

/// Invoice entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Unique identifier
    pub id: Uuid,

    /// Owning booking
    pub booking_id: Uuid,

    /// Deterministic invoice number, see [`Invoice::derive_number`]
    pub invoice_number: String,

    /// Invoiced amount
    pub amount: Decimal,

    /// Mirrors the payment's status domain
    pub status: PaymentStatus,

    /// Issue timestamp
    pub issued_at: DateTime<Utc>,
}

impl Invoice {
    /// Create a pending invoice for a booking, numbering it from the
    /// booking id and issue date.
    pub fn pending(booking_id: Uuid, amount: Decimal, issued_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            booking_id,
            invoice_number: Self::derive_number(booking_id, issued_at),
            amount,
            status: PaymentStatus::Pending,
            issued_at,
        }
    }

    /// Derive the invoice number: `INV-<YYYYMMDD>-<first 8 hex of booking id>`.
    pub fn derive_number(booking_id: Uuid, issued_at: DateTime<Utc>) -> String {
        let hex = booking_id.simple().to_string();
        format!("INV-{}-{}", issued_at.format("%Y%m%d"), &hex[..8])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_payment_status_round_trip() {
        for s in [
            PaymentStatus::Pending,
            PaymentStatus::Paid,
            PaymentStatus::Refunded,
        ] {
            assert_eq!(PaymentStatus::from_str(&s.to_string()), Some(s));
        }
        assert_eq!(PaymentStatus::from_str("paid"), None);
    }

    #[test]
    fn test_pending_payment() {
        let booking_id = Uuid::new_v4();
        let p = Payment::pending(booking_id, dec!(1000000));
        assert_eq!(p.status, PaymentStatus::Pending);
        assert_eq!(p.amount, dec!(1000000));
        assert!(p.paid_at.is_none());
        assert!(p.provider.is_none());
    }

    #[test]
    fn test_invoice_number_shape() {
        let booking_id = Uuid::parse_str("a1b2c3d4-0000-0000-0000-000000000000").unwrap();
        let issued_at = Utc.with_ymd_and_hms(2026, 3, 9, 14, 30, 0).unwrap();

        let number = Invoice::derive_number(booking_id, issued_at);
        assert_eq!(number, "INV-20260309-a1b2c3d4");
    }

    #[test]
    fn test_invoice_number_is_deterministic() {
        let booking_id = Uuid::new_v4();
        let issued_at = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            Invoice::derive_number(booking_id, issued_at),
            Invoice::derive_number(booking_id, issued_at)
        );
    }
}
