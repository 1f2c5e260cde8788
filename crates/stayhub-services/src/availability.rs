//! Rate and availability engine
//!
//! Computes a per-night price and a single availability decision for a
//! room over a half-open date range [check_in, check_out). Pricing is
//! always computed, even for unavailable stays, so callers can show why
//! a stay is blocked alongside the would-be price.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use stayhub_core::{
    traits::{BookingRepository, RoomRepository},
    AppError, AppResult,
};
use tracing::{debug, instrument};
use uuid::Uuid;

/// Price for a single night of a quoted stay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NightlyRate {
    pub date: NaiveDate,
    pub rate: Decimal,
}

/// Availability and pricing quote for a stay
#[derive(Debug, Clone, Serialize)]
pub struct Quote {
    /// Single decision over the full stay; any blocked night or an
    /// overlapping reservation makes the whole quote unavailable
    pub available: bool,
    pub nights: i64,
    pub total_price: Decimal,
    pub nightly_rates: Vec<NightlyRate>,
    pub currency: String,
}

/// Rate and availability engine
///
/// A pure function of its repository inputs: quoting the same stay twice
/// against unchanged data yields identical results.
pub struct AvailabilityEngine<R: RoomRepository, B: BookingRepository> {
    room_repo: Arc<R>,
    booking_repo: Arc<B>,
    currency: String,
}

impl<R: RoomRepository, B: BookingRepository> Clone for AvailabilityEngine<R, B> {
    fn clone(&self) -> Self {
        Self {
            room_repo: Arc::clone(&self.room_repo),
            booking_repo: Arc::clone(&self.booking_repo),
            currency: self.currency.clone(),
        }
    }
}

impl<R: RoomRepository, B: BookingRepository> AvailabilityEngine<R, B> {
    /// Create a new engine quoting in the given deployment currency
    pub fn new(room_repo: Arc<R>, booking_repo: Arc<B>, currency: String) -> Self {
        Self {
            room_repo,
            booking_repo,
            currency,
        }
    }

    /// Quote a stay for a room.
    ///
    /// # Errors
    ///
    /// - `Validation` when `check_in >= check_out`
    /// - `RoomNotFound` when the room does not exist
    /// - `RateNotConfigured` when no night in range resolves a price
    #[instrument(skip(self))]
    pub async fn quote(
        &self,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> AppResult<Quote> {
        if check_in >= check_out {
            return Err(AppError::Validation(
                "check_in must be before check_out".to_string(),
            ));
        }
        let nights = (check_out - check_in).num_days();

        let room = self
            .room_repo
            .get_room(room_id)
            .await?
            .ok_or_else(|| AppError::RoomNotFound(room_id.to_string()))?;

        let base_price = match room.room_type_id {
            Some(type_id) => self
                .room_repo
                .get_room_type(type_id)
                .await?
                .map(|rt| rt.base_price)
                .unwrap_or(Decimal::ZERO),
            None => Decimal::ZERO,
        };

        // One row per date that has one; the range passed to the repository
        // is inclusive, so the last night is check_out - 1 day.
        let rates = self
            .room_repo
            .list_rates_for_room(room_id, check_in, check_out - chrono::Duration::days(1))
            .await?;
        let by_date: HashMap<NaiveDate, _> = rates.into_iter().map(|r| (r.date, r)).collect();

        let mut available = true;
        let mut total_price = Decimal::ZERO;
        let mut nightly_rates = Vec::with_capacity(nights as usize);

        for date in check_in.iter_days().take_while(|d| *d < check_out) {
            let rate = match by_date.get(&date) {
                Some(row) => {
                    if row.blocks_stay(date == check_in, nights) {
                        available = false;
                    }
                    row.nightly_price(base_price)
                }
                // No row: the night is open at the fallback price
                None => base_price,
            };

            total_price += rate;
            nightly_rates.push(NightlyRate { date, rate });
        }

        // A zero total means pricing was never configured, not a free stay
        if total_price.is_zero() {
            return Err(AppError::RateNotConfigured(room_id.to_string()));
        }

        // Overlap check last: the authoritative concurrency guard and the
        // most expensive collaborator call
        let free = self
            .booking_repo
            .check_overlap(room_id, check_in, check_out)
            .await?;
        if !free {
            debug!(%room_id, "existing reservation overlaps requested stay");
            available = false;
        }

        Ok(Quote {
            available,
            nights,
            total_price,
            nightly_rates,
            currency: self.currency.clone(),
        })
    }
}
