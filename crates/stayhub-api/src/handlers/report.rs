//! Reporting handlers

use crate::dto::booking::ReportQuery;
use crate::dto::ApiResponse;
use crate::Reports;
use actix_web::{web, HttpResponse};
use std::sync::Arc;
use stayhub_auth::AdminUser;
use stayhub_core::AppError;
use tracing::{debug, instrument};

/// Occupancy and revenue summary for one property
///
/// GET /api/v1/admin/reports/summary?property_id&start&end
#[instrument(skip(service, admin), fields(admin_id = %admin.admin_id))]
pub async fn get_summary(
    service: web::Data<Arc<Reports>>,
    admin: AdminUser,
    query: web::Query<ReportQuery>,
) -> Result<HttpResponse, AppError> {
    if !admin.scope.allows(query.property_id) {
        return Err(AppError::Forbidden);
    }

    debug!(property_id = %query.property_id, "Building report summary");

    let summary = service
        .get_summary(query.property_id, query.start, query.end)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success(summary)))
}
