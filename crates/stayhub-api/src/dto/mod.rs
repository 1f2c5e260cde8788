//! Request and response DTOs

pub mod booking;
pub mod common;
pub mod rate;

pub use common::ApiResponse;
