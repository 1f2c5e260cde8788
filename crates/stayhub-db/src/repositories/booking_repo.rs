//! Booking repository implementation
//!
//! PostgreSQL-backed storage for bookings. Double-booking is enforced at
//! the database level with an exclusion constraint over the half-open
//! stay interval; a violating insert surfaces as `RoomUnavailable`.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use stayhub_core::{
    models::{Booking, BookingStatus},
    traits::{BookingFilter, BookingRepository},
    AppError, AppResult,
};
use tracing::{debug, error, instrument, warn};
use uuid::Uuid;

// SQLSTATE codes raised when an insert collides with an existing stay:
// 23P01 = exclusion constraint violation, 23505 = unique violation.
const SQLSTATE_EXCLUSION: &str = "23P01";
const SQLSTATE_UNIQUE: &str = "23505";

/// PostgreSQL implementation of BookingRepository
pub struct PgBookingRepository {
    pool: PgPool,
}

impl PgBookingRepository {
    /// Create a new booking repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for PgBookingRepository {
    #[instrument(skip(self))]
    async fn check_overlap(
        &self,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> AppResult<bool> {
        debug!(
            "Checking overlap for room {} in [{}, {})",
            room_id, check_in, check_out
        );

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM bookings
            WHERE room_id = $1
              AND check_in < $3
              AND check_out > $2
              AND status != 'Cancelled'
            "#,
        )
        .bind(room_id)
        .bind(check_in)
        .bind(check_out)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error checking overlap for room {}: {}", room_id, e);
            AppError::Database(format!("Failed to check booking overlap: {}", e))
        })?;

        Ok(count == 0)
    }

    #[instrument(skip(self, booking), fields(booking_id = %booking.id))]
    async fn create_booking(&self, booking: &Booking) -> AppResult<()> {
        debug!(
            "Creating booking {} for room {} in [{}, {})",
            booking.id, booking.room_id, booking.check_in, booking.check_out
        );

        sqlx::query(
            r#"
            INSERT INTO bookings (
                id, guest_id, property_id, room_id, check_in, check_out,
                nights, total_price, refund_amount, status, note, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(booking.id)
        .bind(booking.guest_id)
        .bind(booking.property_id)
        .bind(booking.room_id)
        .bind(booking.check_in)
        .bind(booking.check_out)
        .bind(booking.nights)
        .bind(booking.total_price)
        .bind(booking.refund_amount)
        .bind(booking.status.to_string())
        .bind(&booking.note)
        .bind(booking.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                let code = db_err.code();
                let code = code.as_deref();
                if code == Some(SQLSTATE_EXCLUSION) || code == Some(SQLSTATE_UNIQUE) {
                    warn!(
                        "Concurrent booking collision on room {} in [{}, {})",
                        booking.room_id, booking.check_in, booking.check_out
                    );
                    return AppError::RoomUnavailable(format!(
                        "Room {} is no longer available for the requested dates",
                        booking.room_id
                    ));
                }
            }
            error!("Database error creating booking {}: {}", booking.id, e);
            AppError::Database(format!("Failed to create booking: {}", e))
        })?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_booking_by_id(&self, id: Uuid) -> AppResult<Option<Booking>> {
        debug!("Finding booking by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, BookingRow>(
            r#"
            SELECT id, guest_id, property_id, room_id, check_in, check_out,
                   nights, total_price, refund_amount, status, note, created_at
            FROM bookings
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding booking {}: {}", id, e);
            AppError::Database(format!("Failed to find booking: {}", e))
        })?;

        result.map(Booking::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn list_bookings(&self, filter: &BookingFilter) -> AppResult<Vec<Booking>> {
        debug!("Listing bookings with filter: {:?}", filter);

        let rows = sqlx::query_as::<sqlx::Postgres, BookingRow>(
            r#"
            SELECT id, guest_id, property_id, room_id, check_in, check_out,
                   nights, total_price, refund_amount, status, note, created_at
            FROM bookings
            WHERE ($1::uuid IS NULL OR property_id = $1)
              AND ($2::text IS NULL OR status = $2)
              AND ($3::date IS NULL OR check_in >= $3)
              AND ($4::date IS NULL OR check_out <= $4)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.property_id)
        .bind(filter.status.map(|s| s.to_string()))
        .bind(filter.start)
        .bind(filter.end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing bookings: {}", e);
            AppError::Database(format!("Failed to list bookings: {}", e))
        })?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn list_bookings_overlapping(
        &self,
        property_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<Booking>> {
        debug!(
            "Listing bookings for property {} overlapping [{}, {}]",
            property_id, start, end
        );

        let rows = sqlx::query_as::<sqlx::Postgres, BookingRow>(
            r#"
            SELECT id, guest_id, property_id, room_id, check_in, check_out,
                   nights, total_price, refund_amount, status, note, created_at
            FROM bookings
            WHERE property_id = $1
              AND check_in <= $3
              AND check_out > $2
            ORDER BY check_in
            "#,
        )
        .bind(property_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Database error listing overlapping bookings for property {}: {}",
                property_id, e
            );
            AppError::Database(format!("Failed to list overlapping bookings: {}", e))
        })?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn list_bookings_by_guest(&self, guest_id: Uuid) -> AppResult<Vec<Booking>> {
        debug!("Listing bookings for guest: {}", guest_id);

        let rows = sqlx::query_as::<sqlx::Postgres, BookingRow>(
            r#"
            SELECT id, guest_id, property_id, room_id, check_in, check_out,
                   nights, total_price, refund_amount, status, note, created_at
            FROM bookings
            WHERE guest_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(guest_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing bookings for guest {}: {}", guest_id, e);
            AppError::Database(format!("Failed to list guest bookings: {}", e))
        })?;

        rows.into_iter().map(Booking::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn update_booking_status(
        &self,
        id: Uuid,
        status: BookingStatus,
        note: Option<&str>,
        refund_amount: Decimal,
    ) -> AppResult<Booking> {
        debug!("Updating booking {} to status {}", id, status);

        let row = sqlx::query_as::<sqlx::Postgres, BookingRow>(
            r#"
            UPDATE bookings
            SET status = $2,
                note = COALESCE($3, note),
                refund_amount = $4
            WHERE id = $1
            RETURNING id, guest_id, property_id, room_id, check_in, check_out,
                      nights, total_price, refund_amount, status, note, created_at
            "#,
        )
        .bind(id)
        .bind(status.to_string())
        .bind(note)
        .bind(refund_amount)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error updating booking {}: {}", id, e);
            AppError::Database(format!("Failed to update booking status: {}", e))
        })?;

        row.ok_or_else(|| AppError::BookingNotFound(id.to_string()))?
            .try_into()
    }
}

/// Row struct for bookings
#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: Uuid,
    guest_id: Uuid,
    property_id: Uuid,
    room_id: Uuid,
    check_in: NaiveDate,
    check_out: NaiveDate,
    nights: i32,
    total_price: Decimal,
    refund_amount: Decimal,
    status: String,
    note: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = AppError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status = BookingStatus::from_str(&row.status).ok_or_else(|| {
            AppError::Database(format!(
                "Booking {} has unknown status '{}'",
                row.id, row.status
            ))
        })?;
        Ok(Self {
            id: row.id,
            guest_id: row.guest_id,
            property_id: row.property_id,
            room_id: row.room_id,
            check_in: row.check_in,
            check_out: row.check_out,
            nights: row.nights,
            total_price: row.total_price,
            refund_amount: row.refund_amount,
            status,
            note: row.note,
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(status: &str) -> BookingRow {
        BookingRow {
            id: Uuid::new_v4(),
            guest_id: Uuid::new_v4(),
            property_id: Uuid::new_v4(),
            room_id: Uuid::new_v4(),
            check_in: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            check_out: NaiveDate::from_ymd_opt(2026, 3, 12).unwrap(),
            nights: 2,
            total_price: Decimal::from(200000),
            refund_amount: Decimal::ZERO,
            status: status.to_string(),
            note: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_converts_known_status() {
        let booking = Booking::try_from(sample_row("Cancelled")).unwrap();
        assert_eq!(booking.status, BookingStatus::Cancelled);
    }

    #[test]
    fn test_row_with_unknown_status_is_an_error() {
        let err = Booking::try_from(sample_row("Ghost")).unwrap_err();
        assert!(matches!(err, AppError::Database(msg) if msg.contains("Ghost")));
    }
}
