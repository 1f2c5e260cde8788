//! Booking, payment, and reporting DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use stayhub_core::{
    models::BookingStatus,
    traits::BookingFilter,
    AppError,
};
use uuid::Uuid;

/// Query parameters for an availability quote
#[derive(Debug, Clone, Deserialize)]
pub struct AvailabilityQuery {
    /// First occupied date
    pub check_in: NaiveDate,
    /// Departure date (exclusive)
    pub check_out: NaiveDate,
}

/// Request body for creating a booking
#[derive(Debug, Clone, Deserialize)]
pub struct BookingCreateRequest {
    /// Property the room belongs to
    pub property_id: Uuid,
    /// Room to book
    pub room_id: Uuid,
    /// First occupied date
    pub check_in: NaiveDate,
    /// Departure date (exclusive)
    pub check_out: NaiveDate,
}

/// Request body for capturing a booking's payment
#[derive(Debug, Clone, Deserialize)]
pub struct PayRequest {
    /// Payment provider name
    pub provider: String,
    /// Provider-side transaction reference
    pub reference: String,
}

impl PayRequest {
    /// Reject empty provider or reference
    pub fn validate(&self) -> Result<(), AppError> {
        if self.provider.trim().is_empty() {
            return Err(AppError::MissingField("provider".to_string()));
        }
        if self.reference.trim().is_empty() {
            return Err(AppError::MissingField("reference".to_string()));
        }
        Ok(())
    }
}

/// Query parameters for administrative booking listings
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminBookingQuery {
    /// Restrict to one property
    pub property_id: Option<Uuid>,
    /// Restrict to one lifecycle status
    pub status: Option<String>,
    /// Check-in on or after this date
    pub start: Option<NaiveDate>,
    /// Check-out on or before this date
    pub end: Option<NaiveDate>,
}

impl AdminBookingQuery {
    /// Convert to the repository filter, rejecting an unknown status
    pub fn into_filter(self) -> Result<BookingFilter, AppError> {
        let status = match self.status {
            Some(s) => Some(
                BookingStatus::from_str(&s)
                    .ok_or_else(|| AppError::InvalidInput(format!("Unknown status: {}", s)))?,
            ),
            None => None,
        };

        Ok(BookingFilter {
            property_id: self.property_id,
            status,
            start: self.start,
            end: self.end,
        })
    }
}

/// Request body for the administrative status update
#[derive(Debug, Clone, Deserialize)]
pub struct StatusUpdateRequest {
    /// Target status
    pub status: String,
    /// Optional status note
    pub note: Option<String>,
    /// Optional refund override
    pub refund_amount: Option<Decimal>,
}

impl StatusUpdateRequest {
    /// Parse the target status, rejecting unknown values
    pub fn parsed_status(&self) -> Result<BookingStatus, AppError> {
        BookingStatus::from_str(&self.status)
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown status: {}", self.status)))
    }
}

/// Query parameters for the report summary
#[derive(Debug, Clone, Deserialize)]
pub struct ReportQuery {
    /// Property to report on
    pub property_id: Uuid,
    /// Window start (inclusive)
    pub start: Option<NaiveDate>,
    /// Window end (inclusive)
    pub end: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pay_request_rejects_blank_fields() {
        let req = PayRequest {
            provider: "  ".to_string(),
            reference: "tx-1".to_string(),
        };
        assert!(matches!(req.validate(), Err(AppError::MissingField(_))));

        let req = PayRequest {
            provider: "midtrans".to_string(),
            reference: String::new(),
        };
        assert!(matches!(req.validate(), Err(AppError::MissingField(_))));

        let req = PayRequest {
            provider: "midtrans".to_string(),
            reference: "tx-1".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_admin_query_parses_status() {
        let query = AdminBookingQuery {
            status: Some("Confirmed".to_string()),
            ..Default::default()
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.status, Some(BookingStatus::Confirmed));

        let query = AdminBookingQuery {
            status: Some("confirmed".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            query.into_filter(),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_status_update_parses() {
        let req = StatusUpdateRequest {
            status: "NoShow".to_string(),
            note: None,
            refund_amount: None,
        };
        assert_eq!(req.parsed_status().unwrap(), BookingStatus::NoShow);
    }
}
