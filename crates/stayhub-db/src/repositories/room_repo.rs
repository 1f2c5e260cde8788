//! Room inventory and rate repository implementation
//!
//! Provides PostgreSQL-backed storage for rooms, room types, and per-date
//! room rates. Rate rows are unique per (room_id, date); bulk writes use
//! upsert semantics keyed on that pair.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use stayhub_core::{
    models::{HousekeepingStatus, Room, RoomRate, RoomStatus, RoomType},
    traits::RoomRepository,
    AppError, AppResult,
};
use tracing::{debug, error, instrument};
use uuid::Uuid;

/// PostgreSQL implementation of RoomRepository
pub struct PgRoomRepository {
    pool: PgPool,
}

impl PgRoomRepository {
    /// Create a new room repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoomRepository for PgRoomRepository {
    #[instrument(skip(self))]
    async fn get_room(&self, id: Uuid) -> AppResult<Option<Room>> {
        debug!("Finding room by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, RoomRow>(
            r#"
            SELECT id, property_id, room_number, room_type_id,
                   status, housekeeping_status, created_at
            FROM rooms
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding room {}: {}", id, e);
            AppError::Database(format!("Failed to find room: {}", e))
        })?;

        result.map(Room::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn get_room_type(&self, id: Uuid) -> AppResult<Option<RoomType>> {
        debug!("Finding room type by id: {}", id);

        let result = sqlx::query_as::<sqlx::Postgres, RoomTypeRow>(
            r#"
            SELECT id, property_id, name, description, base_price,
                   capacity, facilities, created_at
            FROM room_types
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error finding room type {}: {}", id, e);
            AppError::Database(format!("Failed to find room type: {}", e))
        })?;

        Ok(result.map(Into::into))
    }

    #[instrument(skip(self))]
    async fn list_rates_for_room(
        &self,
        room_id: Uuid,
        start: NaiveDate,
        end: NaiveDate,
    ) -> AppResult<Vec<RoomRate>> {
        debug!("Listing rates for room {} from {} to {}", room_id, start, end);

        let rows = sqlx::query_as::<sqlx::Postgres, RoomRateRow>(
            r#"
            SELECT id, room_id, date, available_rooms, price_override,
                   min_nights, max_nights, stop_sell, close_on_arrival,
                   close_on_departure, created_at
            FROM room_rates
            WHERE room_id = $1 AND date BETWEEN $2 AND $3
            ORDER BY date
            "#,
        )
        .bind(room_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing rates for room {}: {}", room_id, e);
            AppError::Database(format!("Failed to list room rates: {}", e))
        })?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    #[instrument(skip(self, rates))]
    async fn upsert_rates(&self, rates: &[RoomRate]) -> AppResult<usize> {
        debug!("Upserting {} rate rows", rates.len());

        if rates.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            error!("Failed to start transaction: {}", e);
            AppError::Transaction(format!("Failed to start transaction: {}", e))
        })?;

        for rate in rates {
            sqlx::query(
                r#"
                INSERT INTO room_rates (
                    id, room_id, date, available_rooms, price_override,
                    min_nights, max_nights, stop_sell, close_on_arrival,
                    close_on_departure
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                ON CONFLICT (room_id, date) DO UPDATE SET
                    available_rooms = EXCLUDED.available_rooms,
                    price_override = EXCLUDED.price_override,
                    min_nights = EXCLUDED.min_nights,
                    max_nights = EXCLUDED.max_nights,
                    stop_sell = EXCLUDED.stop_sell,
                    close_on_arrival = EXCLUDED.close_on_arrival,
                    close_on_departure = EXCLUDED.close_on_departure
                "#,
            )
            .bind(rate.id)
            .bind(rate.room_id)
            .bind(rate.date)
            .bind(rate.available_rooms)
            .bind(rate.price_override)
            .bind(rate.min_nights)
            .bind(rate.max_nights)
            .bind(rate.stop_sell)
            .bind(rate.close_on_arrival)
            .bind(rate.close_on_departure)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                error!("Database error upserting rate row: {}", e);
                AppError::Database(format!("Failed to upsert room rate: {}", e))
            })?;
        }

        tx.commit().await.map_err(|e| {
            error!("Failed to commit rate upsert: {}", e);
            AppError::Transaction(format!("Failed to commit transaction: {}", e))
        })?;

        Ok(rates.len())
    }

    #[instrument(skip(self))]
    async fn list_rooms(
        &self,
        property_id: Option<Uuid>,
        room_type_id: Option<Uuid>,
    ) -> AppResult<Vec<Room>> {
        debug!(
            "Listing rooms with property={:?}, room_type={:?}",
            property_id, room_type_id
        );

        let rows = sqlx::query_as::<sqlx::Postgres, RoomRow>(
            r#"
            SELECT id, property_id, room_number, room_type_id,
                   status, housekeeping_status, created_at
            FROM rooms
            WHERE ($1::uuid IS NULL OR property_id = $1)
              AND ($2::uuid IS NULL OR room_type_id = $2)
            ORDER BY room_number
            "#,
        )
        .bind(property_id)
        .bind(room_type_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Database error listing rooms: {}", e);
            AppError::Database(format!("Failed to list rooms: {}", e))
        })?;

        rows.into_iter().map(Room::try_from).collect()
    }
}

/// Row struct for rooms
#[derive(Debug, sqlx::FromRow)]
struct RoomRow {
    id: Uuid,
    property_id: Uuid,
    room_number: String,
    room_type_id: Option<Uuid>,
    status: String,
    housekeeping_status: String,
    created_at: DateTime<Utc>,
}

impl TryFrom<RoomRow> for Room {
    type Error = AppError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        let status = RoomStatus::from_str(&row.status).ok_or_else(|| {
            AppError::Database(format!(
                "Room {} has unknown status '{}'",
                row.id, row.status
            ))
        })?;
        let housekeeping_status = HousekeepingStatus::from_str(&row.housekeeping_status)
            .ok_or_else(|| {
                AppError::Database(format!(
                    "Room {} has unknown housekeeping status '{}'",
                    row.id, row.housekeeping_status
                ))
            })?;
        Ok(Self {
            id: row.id,
            property_id: row.property_id,
            room_number: row.room_number,
            room_type_id: row.room_type_id,
            status,
            housekeeping_status,
            created_at: row.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_row(status: &str, housekeeping: &str) -> RoomRow {
        RoomRow {
            id: Uuid::new_v4(),
            property_id: Uuid::new_v4(),
            room_number: "101".to_string(),
            room_type_id: None,
            status: status.to_string(),
            housekeeping_status: housekeeping.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_room_row_converts_known_statuses() {
        let room = Room::try_from(sample_row("Available", "Clean")).unwrap();
        assert_eq!(room.status, RoomStatus::Available);
        assert_eq!(room.housekeeping_status, HousekeepingStatus::Clean);
    }

    #[test]
    fn test_room_row_with_unknown_status_is_an_error() {
        let err = Room::try_from(sample_row("Haunted", "Clean")).unwrap_err();
        assert!(matches!(err, AppError::Database(msg) if msg.contains("Haunted")));
    }
}

/// Row struct for room types
#[derive(Debug, sqlx::FromRow)]
struct RoomTypeRow {
    id: Uuid,
    property_id: Uuid,
    name: String,
    description: String,
    base_price: Decimal,
    capacity: i32,
    facilities: Vec<String>,
    created_at: DateTime<Utc>,
}

impl From<RoomTypeRow> for RoomType {
    fn from(row: RoomTypeRow) -> Self {
        Self {
            id: row.id,
            property_id: row.property_id,
            name: row.name,
            description: row.description,
            base_price: row.base_price,
            capacity: row.capacity,
            facilities: row.facilities,
            created_at: row.created_at,
        }
    }
}

/// Row struct for room rates
#[derive(Debug, sqlx::FromRow)]
struct RoomRateRow {
    id: Uuid,
    room_id: Uuid,
    date: NaiveDate,
    available_rooms: i32,
    price_override: Option<Decimal>,
    min_nights: i32,
    max_nights: i32,
    stop_sell: bool,
    close_on_arrival: bool,
    close_on_departure: bool,
    created_at: DateTime<Utc>,
}

impl From<RoomRateRow> for RoomRate {
    fn from(row: RoomRateRow) -> Self {
        Self {
            id: row.id,
            room_id: row.room_id,
            date: row.date,
            available_rooms: row.available_rooms,
            price_override: row.price_override,
            min_nights: row.min_nights,
            max_nights: row.max_nights,
            stop_sell: row.stop_sell,
            close_on_arrival: row.close_on_arrival,
            close_on_departure: row.close_on_departure,
            created_at: row.created_at,
        }
    }
}
