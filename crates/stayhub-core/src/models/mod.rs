//! Domain models for StayHub
//!
//! This module contains all the core domain models used throughout the application.

pub mod billing;
pub mod booking;
pub mod rate;
pub mod room;

pub use billing::{Invoice, Payment, PaymentStatus};
pub use booking::{Booking, BookingStatus};
pub use rate::RoomRate;
pub use room::{HousekeepingStatus, Room, RoomStatus, RoomType};
