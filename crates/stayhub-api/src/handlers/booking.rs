//! Guest and administrative booking handlers

use crate::dto::booking::{
    AdminBookingQuery, BookingCreateRequest, PayRequest, StatusUpdateRequest,
};
use crate::dto::ApiResponse;
use crate::Bookings;
use actix_web::{web, HttpResponse};
use chrono::Utc;
use std::sync::Arc;
use stayhub_auth::{AdminUser, AuthenticatedGuest};
use stayhub_core::AppError;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Create a booking for the authenticated guest
///
/// POST /api/v1/guests/bookings
#[instrument(skip(service, guest, req), fields(guest_id = %guest.guest_id))]
pub async fn create_booking(
    service: web::Data<Arc<Bookings>>,
    guest: AuthenticatedGuest,
    req: web::Json<BookingCreateRequest>,
) -> Result<HttpResponse, AppError> {
    let req = req.into_inner();
    debug!(
        room_id = %req.room_id,
        check_in = %req.check_in,
        check_out = %req.check_out,
        "Creating booking"
    );

    let result = service
        .create_booking(
            guest.guest_id,
            req.property_id,
            req.room_id,
            req.check_in,
            req.check_out,
        )
        .await?;

    info!(booking_id = %result.booking.id, "Booking created");

    Ok(HttpResponse::Created().json(ApiResponse::success(result)))
}

/// List the authenticated guest's bookings, newest first
///
/// GET /api/v1/guests/bookings
#[instrument(skip(service, guest), fields(guest_id = %guest.guest_id))]
pub async fn list_my_bookings(
    service: web::Data<Arc<Bookings>>,
    guest: AuthenticatedGuest,
) -> Result<HttpResponse, AppError> {
    let bookings = service.list_guest_bookings(guest.guest_id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(bookings)))
}

/// Capture a booking's payment
///
/// POST /api/v1/guests/bookings/{id}/pay
#[instrument(skip(service, guest, req), fields(guest_id = %guest.guest_id))]
pub async fn pay_booking(
    service: web::Data<Arc<Bookings>>,
    guest: AuthenticatedGuest,
    path: web::Path<Uuid>,
    req: web::Json<PayRequest>,
) -> Result<HttpResponse, AppError> {
    let booking_id = path.into_inner();
    req.validate()?;

    let (payment, invoice) = service
        .mark_payment_paid(guest.guest_id, booking_id, &req.provider, &req.reference)
        .await?;

    info!(%booking_id, payment_status = %payment.status, "Payment captured");

    Ok(HttpResponse::Ok().json(ApiResponse::success(serde_json::json!({
        "payment": payment,
        "invoice": invoice,
    }))))
}

/// Cancel a booking, applying the refund policy
///
/// POST /api/v1/guests/bookings/{id}/cancel
#[instrument(skip(service, guest), fields(guest_id = %guest.guest_id))]
pub async fn cancel_booking(
    service: web::Data<Arc<Bookings>>,
    guest: AuthenticatedGuest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let booking_id = path.into_inner();

    let result = service
        .cancel_booking(guest.guest_id, booking_id, Utc::now())
        .await?;

    info!(
        %booking_id,
        refund = %result.booking.refund_amount,
        "Booking cancelled"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(result)))
}

/// Fetch a booking's payment
///
/// GET /api/v1/guests/bookings/{id}/payment
#[instrument(skip(service, guest), fields(guest_id = %guest.guest_id))]
pub async fn get_payment(
    service: web::Data<Arc<Bookings>>,
    guest: AuthenticatedGuest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let payment = service
        .get_payment(guest.guest_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(payment)))
}

/// Fetch a booking's invoice
///
/// GET /api/v1/guests/bookings/{id}/invoice
#[instrument(skip(service, guest), fields(guest_id = %guest.guest_id))]
pub async fn get_invoice(
    service: web::Data<Arc<Bookings>>,
    guest: AuthenticatedGuest,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let invoice = service
        .get_invoice(guest.guest_id, path.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(invoice)))
}

/// Administrative booking listing, confined to the caller's scope
///
/// GET /api/v1/admin/bookings
#[instrument(skip(service, admin), fields(admin_id = %admin.admin_id))]
pub async fn list_bookings_admin(
    service: web::Data<Arc<Bookings>>,
    admin: AdminUser,
    query: web::Query<AdminBookingQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = query.into_inner().into_filter()?;
    let bookings = service.list_bookings(admin.scope, filter).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(bookings)))
}

/// Administrative status update
///
/// PATCH /api/v1/admin/bookings/{id}/status
#[instrument(skip(service, admin, req), fields(admin_id = %admin.admin_id))]
pub async fn update_status_admin(
    service: web::Data<Arc<Bookings>>,
    admin: AdminUser,
    path: web::Path<Uuid>,
    req: web::Json<StatusUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let booking_id = path.into_inner();
    let status = req.parsed_status()?;

    let booking = service
        .update_status(
            admin.scope,
            booking_id,
            status,
            req.note.as_deref(),
            req.refund_amount,
        )
        .await?;

    info!(%booking_id, status = %booking.status, "Booking status updated");

    Ok(HttpResponse::Ok().json(ApiResponse::success(booking)))
}
