//! Per-date room rate model
//!
//! A `RoomRate` row carries the pricing override and sale restrictions for
//! one room on one calendar date. At most one row exists per (room, date);
//! the repository enforces this with upsert semantics on that pair.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-date rate and restrictions for a room
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomRate {
    /// Unique identifier
    pub id: Uuid,

    /// The room this rate applies to
    pub room_id: Uuid,

    /// Calendar date (day granularity, no time component)
    pub date: NaiveDate,

    /// Rooms still sellable on this date
    pub available_rooms: i32,

    /// Nightly price override; falls back to the room type's base price when unset
    pub price_override: Option<Decimal>,

    /// Minimum length of stay touching this date (0 = no minimum)
    pub min_nights: i32,

    /// Maximum length of stay touching this date (0 = no maximum)
    pub max_nights: i32,

    /// Date is fully closed for sale
    pub stop_sell: bool,

    /// Stays may not start on this date
    pub close_on_arrival: bool,

    /// Stays may not end on this date
    pub close_on_departure: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl RoomRate {
    /// Resolve the nightly price for this date given the room type's base price.
    pub fn nightly_price(&self, base_price: Decimal) -> Decimal {
        self.price_override.unwrap_or(base_price)
    }

    /// Whether this rate row blocks the requested stay on its date.
    ///
    /// `is_arrival_night` is true when this date is the stay's check-in date;
    /// `requested_nights` is the total length of the requested stay. Any one
    /// blocked night makes the whole stay unavailable.
    pub fn blocks_stay(&self, is_arrival_night: bool, requested_nights: i64) -> bool {
        if self.stop_sell {
            return true;
        }
        if self.available_rooms <= 0 {
            return true;
        }
        if self.close_on_arrival && is_arrival_night {
            return true;
        }
        if self.min_nights > 0 && requested_nights < i64::from(self.min_nights) {
            return true;
        }
        if self.max_nights > 0 && requested_nights > i64::from(self.max_nights) {
            return true;
        }
        false
    }
}

impl Default for RoomRate {
    fn default() -> Self {
        Self {
            id: Uuid::new_v4(),
            room_id: Uuid::nil(),
            date: NaiveDate::default(),
            available_rooms: 1,
            price_override: None,
            min_nights: 0,
            max_nights: 0,
            stop_sell: false,
            close_on_arrival: false,
            close_on_departure: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_nightly_price_override() {
        let rate = RoomRate {
            price_override: Some(dec!(750000)),
            ..Default::default()
        };
        assert_eq!(rate.nightly_price(dec!(500000)), dec!(750000));

        let rate = RoomRate::default();
        assert_eq!(rate.nightly_price(dec!(500000)), dec!(500000));
    }

    #[test]
    fn test_stop_sell_blocks() {
        let rate = RoomRate {
            stop_sell: true,
            ..Default::default()
        };
        assert!(rate.blocks_stay(false, 2));
    }

    #[test]
    fn test_sold_out_blocks() {
        let rate = RoomRate {
            available_rooms: 0,
            ..Default::default()
        };
        assert!(rate.blocks_stay(false, 2));
    }

    #[test]
    fn test_close_on_arrival_only_blocks_arrival_night() {
        let rate = RoomRate {
            close_on_arrival: true,
            ..Default::default()
        };
        assert!(rate.blocks_stay(true, 2));
        assert!(!rate.blocks_stay(false, 2));
    }

    #[test]
    fn test_min_nights_blocks_short_stay() {
        let rate = RoomRate {
            min_nights: 3,
            ..Default::default()
        };
        assert!(rate.blocks_stay(false, 2));
        assert!(!rate.blocks_stay(false, 3));
    }

    #[test]
    fn test_max_nights_blocks_long_stay() {
        let rate = RoomRate {
            max_nights: 7,
            ..Default::default()
        };
        assert!(rate.blocks_stay(false, 8));
        assert!(!rate.blocks_stay(false, 7));
    }

    #[test]
    fn test_unrestricted_rate_allows_stay() {
        let rate = RoomRate::default();
        assert!(!rate.blocks_stay(true, 30));
    }
}
