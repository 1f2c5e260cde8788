//! StayHub Reservation Server
//!
//! Backend for multi-property hotel reservations: availability quoting,
//! booking lifecycle, billing, and reporting.

use actix_cors::Cors;
use actix_web::{http::header, web, App, HttpServer};
use std::env;
use std::sync::Arc;
use stayhub_api::{configure_admin, configure_guest, configure_public, Bookings, Reports};
use stayhub_auth::JwtService;
use stayhub_core::config::AppConfig;
use stayhub_db::create_pool;
use stayhub_db::repositories::{PgBookingRepository, PgPaymentRepository, PgRoomRepository};
use stayhub_services::{BookingManager, ReportingService};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Configure API routes
fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(configure_public)
            .configure(configure_guest)
            .configure(configure_admin),
    );
}

/// Initialize tracing/logging
fn init_tracing() {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "stayhub={},stayhub_api={},stayhub_services={},stayhub_db={},actix_web=info,sqlx=warn",
            log_level, log_level, log_level, log_level
        ))
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    info!("Starting StayHub server v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::process::exit(1);
    });

    let pool = create_pool(&config.database).await.unwrap_or_else(|e| {
        eprintln!("Failed to connect to database: {}", e);
        std::process::exit(1);
    });

    let jwt_service = Arc::new(JwtService::new(&config.auth.jwt_secret));

    let room_repo = Arc::new(PgRoomRepository::new(pool.clone()));
    let booking_repo = Arc::new(PgBookingRepository::new(pool.clone()));
    let payment_repo = Arc::new(PgPaymentRepository::new(pool.clone()));

    let bookings: Arc<Bookings> = Arc::new(BookingManager::new(
        Arc::clone(&room_repo),
        Arc::clone(&booking_repo),
        Arc::clone(&payment_repo),
        config.billing.currency.clone(),
        config.billing.refund_cutoff_hours,
    ));
    let reports: Arc<Reports> = Arc::new(ReportingService::new(
        Arc::clone(&booking_repo),
        Arc::clone(&room_repo),
    ));
    // The public quote endpoint shares the manager's engine
    let availability = Arc::new(bookings.engine().clone());

    let host = config.server.host.clone();
    let port = config.server.port;
    let workers = config.server.workers;

    info!(
        "Listening on {}:{} with {} workers, currency {}",
        host, port, workers, config.billing.currency
    );

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE"])
            .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(tracing_actix_web::TracingLogger::default())
            .wrap(cors)
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::new(Arc::clone(&jwt_service)))
            .app_data(web::Data::new(Arc::clone(&bookings)))
            .app_data(web::Data::new(Arc::clone(&reports)))
            .app_data(web::Data::new(Arc::clone(&availability)))
            .configure(configure_routes)
    })
    .workers(workers)
    .bind((host, port))?
    .run()
    .await
}
