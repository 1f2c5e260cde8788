//! Administrative rate management handlers
//!
//! Rate rows are the Rate Engine's input data. Handlers build the room
//! repository from the shared pool and check that the caller's scope
//! covers the room's property before touching its rates.

use crate::dto::rate::{RateRangeQuery, RateUpsertRequest};
use crate::dto::ApiResponse;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;
use stayhub_auth::AdminUser;
use stayhub_core::{traits::RoomRepository, AppError};
use stayhub_db::repositories::PgRoomRepository;
use tracing::{debug, info, instrument};
use uuid::Uuid;

async fn scoped_room(
    repo: &PgRoomRepository,
    admin: &AdminUser,
    room_id: Uuid,
) -> Result<(), AppError> {
    let room = repo
        .get_room(room_id)
        .await?
        .ok_or_else(|| AppError::RoomNotFound(room_id.to_string()))?;

    if !admin.scope.allows(room.property_id) {
        return Err(AppError::Forbidden);
    }

    Ok(())
}

/// Bulk upsert rate rows for a room
///
/// POST /api/v1/admin/rooms/{room_id}/rates
#[instrument(skip(pool, admin, req), fields(admin_id = %admin.admin_id))]
pub async fn upsert_rates(
    pool: web::Data<PgPool>,
    admin: AdminUser,
    path: web::Path<Uuid>,
    req: web::Json<RateUpsertRequest>,
) -> Result<HttpResponse, AppError> {
    let room_id = path.into_inner();

    let repo = PgRoomRepository::new(pool.get_ref().clone());
    scoped_room(&repo, &admin, room_id).await?;

    let rates = req.into_inner().into_rates(room_id)?;
    debug!(%room_id, count = rates.len(), "Upserting rates");

    let written = repo.upsert_rates(&rates).await?;

    info!(%room_id, written, "Rates upserted");

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        serde_json::json!({ "written": written }),
        "Rates upserted",
    )))
}

/// List rate rows for a room over an inclusive date range
///
/// GET /api/v1/admin/rooms/{room_id}/rates?start&end
#[instrument(skip(pool, admin), fields(admin_id = %admin.admin_id))]
pub async fn list_rates(
    pool: web::Data<PgPool>,
    admin: AdminUser,
    path: web::Path<Uuid>,
    query: web::Query<RateRangeQuery>,
) -> Result<HttpResponse, AppError> {
    let room_id = path.into_inner();

    if query.end < query.start {
        return Err(AppError::Validation(
            "end must not be before start".to_string(),
        ));
    }

    let repo = PgRoomRepository::new(pool.get_ref().clone());
    scoped_room(&repo, &admin, room_id).await?;

    let rates = repo
        .list_rates_for_room(room_id, query.start, query.end)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(rates)))
}
