//! Occupancy and revenue reporting
//!
//! Aggregates bookings and room inventory into occupancy, ADR (average
//! daily rate) and RevPAR (revenue per available room) over a date window.
//! Computed synchronously on each call with no caching; callers should
//! bound the range.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use stayhub_core::{
    traits::{BookingRepository, RoomRepository},
    AppError, AppResult,
};
use tracing::instrument;
use uuid::Uuid;

use crate::constants::MIN_ROOM_COUNT;

/// Aggregated report over a property and date window
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    /// All bookings matched by the window, regardless of status
    pub total_bookings: usize,
    /// Revenue net of refunds, from bookings that count for reporting
    pub revenue: Decimal,
    /// Occupied nights over available room-nights, 0.0..=1.0 in practice
    pub occupancy: f64,
    /// Average daily rate: revenue / occupied nights
    pub adr: Decimal,
    /// Revenue per available room-night
    pub revpar: Decimal,
    /// Occupancy ratio per date, covering every date in the window
    pub occupancy_by_date: BTreeMap<NaiveDate, f64>,
}

/// Reporting aggregator
pub struct ReportingService<B: BookingRepository, R: RoomRepository> {
    booking_repo: Arc<B>,
    room_repo: Arc<R>,
}

impl<B: BookingRepository, R: RoomRepository> ReportingService<B, R> {
    pub fn new(booking_repo: Arc<B>, room_repo: Arc<R>) -> Self {
        Self {
            booking_repo,
            room_repo,
        }
    }

    /// Summarize a property over the inclusive window [start, end].
    ///
    /// # Errors
    ///
    /// `Validation` when either bound is unset or `end < start`.
    #[instrument(skip(self))]
    pub async fn get_summary(
        &self,
        property_id: Uuid,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> AppResult<ReportSummary> {
        let (start, end) = match (start, end) {
            (Some(s), Some(e)) => (s, e),
            _ => {
                return Err(AppError::Validation(
                    "start and end are required".to_string(),
                ))
            }
        };
        if end < start {
            return Err(AppError::Validation(
                "end must not be before start".to_string(),
            ));
        }

        // Bookings that merely touch the window still count: a 1-night stay
        // inside a 1-day window checks out the day after the window ends.
        let bookings = self
            .booking_repo
            .list_bookings_overlapping(property_id, start, end)
            .await?;
        let rooms = self.room_repo.list_rooms(Some(property_id), None).await?;

        let days = ((end - start).num_days() + 1).max(1);
        let room_count = (rooms.len() as i64).max(MIN_ROOM_COUNT);
        let room_nights = room_count * days;

        let mut total_nights: i64 = 0;
        let mut revenue = Decimal::ZERO;
        let mut occupied: BTreeMap<NaiveDate, i64> = start
            .iter_days()
            .take_while(|d| *d <= end)
            .map(|d| (d, 0))
            .collect();

        for booking in &bookings {
            if !booking.status.counts_for_reporting() {
                continue;
            }
            total_nights += i64::from(booking.nights);
            revenue += booking.total_price - booking.refund_amount;

            for night in booking
                .check_in
                .iter_days()
                .take_while(|d| *d < booking.check_out)
            {
                if let Some(count) = occupied.get_mut(&night) {
                    *count += 1;
                }
            }
        }

        let occupancy = (total_nights as f64 / room_nights as f64).max(0.0);
        let occupancy_by_date = occupied
            .into_iter()
            .map(|(d, count)| (d, count as f64 / room_count as f64))
            .collect();

        let adr = if total_nights > 0 {
            revenue / Decimal::from(total_nights)
        } else {
            Decimal::ZERO
        };
        let revpar = revenue / Decimal::from(room_nights);

        Ok(ReportSummary {
            total_bookings: bookings.len(),
            revenue,
            occupancy,
            adr,
            revpar,
            occupancy_by_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryBookingRepo, InMemoryRoomRepo};
    use chrono::Duration;
    use rust_decimal_macros::dec;
    use stayhub_core::models::{Booking, BookingStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded_booking(
        property_id: Uuid,
        room_id: Uuid,
        check_in: NaiveDate,
        nights: i64,
        total: Decimal,
        status: BookingStatus,
    ) -> Booking {
        let mut b = Booking::new(
            Uuid::new_v4(),
            property_id,
            room_id,
            check_in,
            check_in + Duration::days(nights),
            nights as i32,
            total,
        );
        b.status = status;
        b
    }

    fn service(
        bookings: InMemoryBookingRepo,
        rooms: InMemoryRoomRepo,
    ) -> ReportingService<InMemoryBookingRepo, InMemoryRoomRepo> {
        ReportingService::new(Arc::new(bookings), Arc::new(rooms))
    }

    #[tokio::test]
    async fn test_requires_both_bounds() {
        let svc = service(InMemoryBookingRepo::default(), InMemoryRoomRepo::default());
        let err = svc
            .get_summary(Uuid::new_v4(), None, Some(date(2026, 3, 10)))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let svc = service(InMemoryBookingRepo::default(), InMemoryRoomRepo::default());
        let err = svc
            .get_summary(
                Uuid::new_v4(),
                Some(date(2026, 3, 10)),
                Some(date(2026, 3, 9)),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_two_rooms_one_night_booking() {
        let rooms = InMemoryRoomRepo::default();
        let property_id = Uuid::new_v4();
        let room_a = rooms.add_room_with_type(property_id, dec!(100000));
        rooms.add_room(property_id, None);

        let bookings = InMemoryBookingRepo::default();
        let day = date(2026, 3, 10);
        bookings.seed(seeded_booking(
            property_id,
            room_a,
            day,
            1,
            dec!(100000),
            BookingStatus::Confirmed,
        ));

        let svc = service(bookings, rooms);
        let summary = svc
            .get_summary(property_id, Some(day), Some(day))
            .await
            .unwrap();

        assert_eq!(summary.total_bookings, 1);
        assert_eq!(summary.revenue, dec!(100000));
        assert!((summary.occupancy - 0.5).abs() < f64::EPSILON);
        assert_eq!(summary.adr, dec!(100000));
        assert_eq!(summary.revpar, dec!(50000));
        assert_eq!(summary.occupancy_by_date.get(&day), Some(&0.5));
    }

    #[tokio::test]
    async fn test_stay_straddling_window_is_counted() {
        let rooms = InMemoryRoomRepo::default();
        let property_id = Uuid::new_v4();
        let room = rooms.add_room_with_type(property_id, dec!(100000));

        // Three nights Mar 9-11; report window is Mar 10 only. Check-out
        // (Mar 12) lies outside the window, which must not exclude the stay.
        let bookings = InMemoryBookingRepo::default();
        bookings.seed(seeded_booking(
            property_id,
            room,
            date(2026, 3, 9),
            3,
            dec!(300000),
            BookingStatus::Confirmed,
        ));

        let svc = service(bookings, rooms);
        let day = date(2026, 3, 10);
        let summary = svc.get_summary(property_id, Some(day), Some(day)).await.unwrap();

        assert_eq!(summary.total_bookings, 1);
        assert_eq!(summary.revenue, dec!(300000));
        // Only the window night lands in the per-date buckets
        assert_eq!(summary.occupancy_by_date.get(&day), Some(&1.0));
    }

    #[tokio::test]
    async fn test_cancelled_and_new_excluded_from_metrics() {
        let rooms = InMemoryRoomRepo::default();
        let property_id = Uuid::new_v4();
        let room = rooms.add_room_with_type(property_id, dec!(100000));

        let day = date(2026, 3, 10);
        let bookings = InMemoryBookingRepo::default();
        bookings.seed(seeded_booking(
            property_id,
            room,
            day,
            1,
            dec!(100000),
            BookingStatus::New,
        ));
        bookings.seed({
            let mut b = seeded_booking(
                property_id,
                room,
                day,
                1,
                dec!(100000),
                BookingStatus::Cancelled,
            );
            b.refund_amount = dec!(50000);
            b
        });

        let svc = service(bookings, rooms);
        let summary = svc
            .get_summary(property_id, Some(day), Some(day))
            .await
            .unwrap();

        // Both listed, neither counted
        assert_eq!(summary.total_bookings, 2);
        assert_eq!(summary.revenue, Decimal::ZERO);
        assert_eq!(summary.occupancy, 0.0);
        assert_eq!(summary.adr, Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_refund_reduces_revenue() {
        let rooms = InMemoryRoomRepo::default();
        let property_id = Uuid::new_v4();
        let room = rooms.add_room_with_type(property_id, dec!(100000));

        let day = date(2026, 3, 10);
        let bookings = InMemoryBookingRepo::default();
        bookings.seed({
            let mut b = seeded_booking(
                property_id,
                room,
                day,
                2,
                dec!(1000000),
                BookingStatus::NoShow,
            );
            b.refund_amount = dec!(200000);
            b
        });

        let svc = service(bookings, rooms);
        let summary = svc
            .get_summary(property_id, Some(day), Some(day + Duration::days(1)))
            .await
            .unwrap();

        assert_eq!(summary.revenue, dec!(800000));
        assert_eq!(summary.adr, dec!(400000));
    }

    #[tokio::test]
    async fn test_nights_outside_window_not_bucketed() {
        let rooms = InMemoryRoomRepo::default();
        let property_id = Uuid::new_v4();
        let room = rooms.add_room_with_type(property_id, dec!(100000));

        // 3-night stay occupying March 9, 10 and 11; check-out date is free
        let bookings = InMemoryBookingRepo::default();
        bookings.seed(seeded_booking(
            property_id,
            room,
            date(2026, 3, 9),
            3,
            dec!(300000),
            BookingStatus::CheckedOut,
        ));

        let svc = service(bookings, rooms);
        let summary = svc
            .get_summary(
                property_id,
                Some(date(2026, 3, 1)),
                Some(date(2026, 3, 31)),
            )
            .await
            .unwrap();

        assert_eq!(summary.occupancy_by_date.get(&date(2026, 3, 9)), Some(&1.0));
        assert_eq!(
            summary.occupancy_by_date.get(&date(2026, 3, 12)),
            Some(&0.0)
        );
        // Every date in the window is present, booked or not
        assert_eq!(summary.occupancy_by_date.len(), 31);
    }

    #[tokio::test]
    async fn test_zero_rooms_guard() {
        let bookings = InMemoryBookingRepo::default();
        let rooms = InMemoryRoomRepo::default();
        let svc = service(bookings, rooms);

        let day = date(2026, 3, 10);
        let summary = svc
            .get_summary(Uuid::new_v4(), Some(day), Some(day))
            .await
            .unwrap();
        // No division by zero; everything reports empty
        assert_eq!(summary.revenue, Decimal::ZERO);
        assert_eq!(summary.occupancy, 0.0);
        assert_eq!(summary.revpar, Decimal::ZERO);
    }
}
