//! Rate management DTOs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use stayhub_core::{models::RoomRate, AppError};
use uuid::Uuid;

/// One rate row in a bulk upsert
#[derive(Debug, Clone, Deserialize)]
pub struct RateItem {
    /// Calendar date this row applies to
    pub date: NaiveDate,
    /// Rooms sellable on this date
    pub available_rooms: i32,
    /// Nightly price override
    #[serde(default)]
    pub price_override: Option<Decimal>,
    /// Minimum length of stay (0 = none)
    #[serde(default)]
    pub min_nights: i32,
    /// Maximum length of stay (0 = none)
    #[serde(default)]
    pub max_nights: i32,
    /// Close the date for sale entirely
    #[serde(default)]
    pub stop_sell: bool,
    /// Forbid stays starting on this date
    #[serde(default)]
    pub close_on_arrival: bool,
    /// Forbid stays ending on this date
    #[serde(default)]
    pub close_on_departure: bool,
}

/// Request body for the bulk rate upsert
#[derive(Debug, Clone, Deserialize)]
pub struct RateUpsertRequest {
    /// Rate rows to insert or update
    pub rates: Vec<RateItem>,
}

impl RateUpsertRequest {
    /// Validate and convert to model rows for the given room
    pub fn into_rates(self, room_id: Uuid) -> Result<Vec<RoomRate>, AppError> {
        if self.rates.is_empty() {
            return Err(AppError::MissingField("rates".to_string()));
        }

        let rates = self
            .rates
            .into_iter()
            .map(|item| {
                if item.available_rooms < 0 {
                    return Err(AppError::InvalidInput(format!(
                        "available_rooms must not be negative on {}",
                        item.date
                    )));
                }
                if item.min_nights < 0 || item.max_nights < 0 {
                    return Err(AppError::InvalidInput(format!(
                        "night restrictions must not be negative on {}",
                        item.date
                    )));
                }
                if let Some(price) = item.price_override {
                    if price.is_sign_negative() {
                        return Err(AppError::InvalidInput(format!(
                            "price_override must not be negative on {}",
                            item.date
                        )));
                    }
                }

                Ok(RoomRate {
                    room_id,
                    date: item.date,
                    available_rooms: item.available_rooms,
                    price_override: item.price_override,
                    min_nights: item.min_nights,
                    max_nights: item.max_nights,
                    stop_sell: item.stop_sell,
                    close_on_arrival: item.close_on_arrival,
                    close_on_departure: item.close_on_departure,
                    ..Default::default()
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(rates)
    }
}

/// Query parameters for listing rates
#[derive(Debug, Clone, Deserialize)]
pub struct RateRangeQuery {
    /// Range start (inclusive)
    pub start: NaiveDate,
    /// Range end (inclusive)
    pub end: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(date: &str) -> RateItem {
        RateItem {
            date: date.parse().unwrap(),
            available_rooms: 1,
            price_override: None,
            min_nights: 0,
            max_nights: 0,
            stop_sell: false,
            close_on_arrival: false,
            close_on_departure: false,
        }
    }

    #[test]
    fn test_empty_upsert_rejected() {
        let req = RateUpsertRequest { rates: vec![] };
        assert!(matches!(
            req.into_rates(Uuid::new_v4()),
            Err(AppError::MissingField(_))
        ));
    }

    #[test]
    fn test_rows_carry_room_id() {
        let room_id = Uuid::new_v4();
        let req = RateUpsertRequest {
            rates: vec![item("2026-09-01"), item("2026-09-02")],
        };

        let rates = req.into_rates(room_id).unwrap();
        assert_eq!(rates.len(), 2);
        assert!(rates.iter().all(|r| r.room_id == room_id));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut bad = item("2026-09-01");
        bad.price_override = Some(dec!(-1));
        let req = RateUpsertRequest { rates: vec![bad] };

        assert!(matches!(
            req.into_rates(Uuid::new_v4()),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_negative_inventory_rejected() {
        let mut bad = item("2026-09-01");
        bad.available_rooms = -1;
        let req = RateUpsertRequest { rates: vec![bad] };

        assert!(matches!(
            req.into_rates(Uuid::new_v4()),
            Err(AppError::InvalidInput(_))
        ));
    }
}
