//! Room and room type models
//!
//! Physical inventory: rooms belong to a property and optionally to a room
//! type, which supplies the fallback nightly price when no date-specific
//! rate exists.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Operational status of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoomStatus {
    #[default]
    Available,
    Occupied,
    OutOfOrder,
}

impl fmt::Display for RoomStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoomStatus::Available => write!(f, "Available"),
            RoomStatus::Occupied => write!(f, "Occupied"),
            RoomStatus::OutOfOrder => write!(f, "OutOfOrder"),
        }
    }
}

impl RoomStatus {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Available" => Some(RoomStatus::Available),
            "Occupied" => Some(RoomStatus::Occupied),
            "OutOfOrder" => Some(RoomStatus::OutOfOrder),
            _ => None,
        }
    }
}

/// Housekeeping status of a room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum HousekeepingStatus {
    #[default]
    Clean,
    Dirty,
    Inspected,
    Pickup,
    OutOfOrder,
    OutOfService,
}

impl fmt::Display for HousekeepingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HousekeepingStatus::Clean => write!(f, "Clean"),
            HousekeepingStatus::Dirty => write!(f, "Dirty"),
            HousekeepingStatus::Inspected => write!(f, "Inspected"),
            HousekeepingStatus::Pickup => write!(f, "Pickup"),
            HousekeepingStatus::OutOfOrder => write!(f, "OutOfOrder"),
            HousekeepingStatus::OutOfService => write!(f, "OutOfService"),
        }
    }
}

impl HousekeepingStatus {
    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Clean" => Some(HousekeepingStatus::Clean),
            "Dirty" => Some(HousekeepingStatus::Dirty),
            "Inspected" => Some(HousekeepingStatus::Inspected),
            "Pickup" => Some(HousekeepingStatus::Pickup),
            "OutOfOrder" => Some(HousekeepingStatus::OutOfOrder),
            "OutOfService" => Some(HousekeepingStatus::OutOfService),
            _ => None,
        }
    }
}

/// Room entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    /// Unique identifier
    pub id: Uuid,

    /// Owning property
    pub property_id: Uuid,

    /// Room number as displayed to staff
    pub room_number: String,

    /// Owning room type (supplies fallback pricing)
    pub room_type_id: Option<Uuid>,

    /// Operational status
    pub status: RoomStatus,

    /// Housekeeping status
    pub housekeeping_status: HousekeepingStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Room type entity
///
/// Groups rooms sharing the same base price, capacity and facilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomType {
    /// Unique identifier
    pub id: Uuid,

    /// Owning property
    pub property_id: Uuid,

    /// Display name (e.g. "Deluxe Twin")
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Base nightly price, used when no date-specific rate overrides it
    pub base_price: Decimal,

    /// Maximum occupancy
    pub capacity: i32,

    /// Facility tags (e.g. "wifi", "breakfast")
    pub facilities: Vec<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}
