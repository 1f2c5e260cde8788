//! Availability quote handler

use crate::dto::booking::AvailabilityQuery;
use crate::dto::ApiResponse;
use crate::Availability;
use actix_web::{web, HttpResponse};
use std::sync::Arc;
use stayhub_core::AppError;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Quote a stay for a room
///
/// GET /api/v1/rooms/{room_id}/availability?check_in&check_out
#[instrument(skip(engine))]
pub async fn get_availability(
    engine: web::Data<Arc<Availability>>,
    path: web::Path<Uuid>,
    query: web::Query<AvailabilityQuery>,
) -> Result<HttpResponse, AppError> {
    let room_id = path.into_inner();
    debug!(
        %room_id,
        check_in = %query.check_in,
        check_out = %query.check_out,
        "Quoting stay"
    );

    let quote = engine
        .quote(room_id, query.check_in, query.check_out)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(quote)))
}
