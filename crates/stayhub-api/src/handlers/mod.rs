//! HTTP handlers

pub mod availability;
pub mod booking;
pub mod health;
pub mod rate;
pub mod report;

use actix_web::web;

/// Configure unauthenticated routes
pub fn configure_public(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check));
    cfg.route(
        "/rooms/{room_id}/availability",
        web::get().to(availability::get_availability),
    );
}

/// Configure guest-facing booking routes
pub fn configure_guest(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/guests/bookings")
            .route("", web::post().to(booking::create_booking))
            .route("", web::get().to(booking::list_my_bookings))
            .route("/{id}/pay", web::post().to(booking::pay_booking))
            .route("/{id}/cancel", web::post().to(booking::cancel_booking))
            .route("/{id}/payment", web::get().to(booking::get_payment))
            .route("/{id}/invoice", web::get().to(booking::get_invoice)),
    );
}

/// Configure administrative routes
pub fn configure_admin(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/rooms/{room_id}/rates", web::post().to(rate::upsert_rates))
            .route("/rooms/{room_id}/rates", web::get().to(rate::list_rates))
            .route("/bookings", web::get().to(booking::list_bookings_admin))
            .route(
                "/bookings/{id}/status",
                web::patch().to(booking::update_status_admin),
            )
            .route("/reports/summary", web::get().to(report::get_summary)),
    );
}
