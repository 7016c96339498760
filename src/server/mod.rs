//! Actix-Web shell for the recovery dashboard.
//!
//! Serves the embedded single-page UI and the JSON API it calls on every
//! selector change. The loaded table is an immutable shared-read snapshot;
//! selection state lives entirely in the browser.

pub mod handlers;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use std::sync::Arc;
use tracing::info;

use crate::table::RidershipTable;

/// Metric selector option set.
pub const METRIC_OPTIONS: [&str; 7] = [
    "Subways",
    "Buses",
    "Long Island Rails",
    "Metro-North",
    "Staten Island Railway",
    "Access-A-Rid",
    "Bridges and Tunnels",
];

/// Transit-mode multi-selector option set.
pub const MODE_OPTIONS: [&str; 4] = ["Subways", "Buses", "LIRR", "Metro-North"];

/// Shared application state.
pub struct AppState {
    /// Dataset loaded at startup; read-only thereafter.
    pub table: Arc<RidershipTable>,
}

/// Runs the dashboard server until shutdown.
pub async fn run(table: RidershipTable, bind_addr: String, port: u16) -> std::io::Result<()> {
    let state = web::Data::new(AppState {
        table: Arc::new(table),
    });

    info!(%bind_addr, port, "Starting dashboard server");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/options", web::get().to(handlers::options))
                    .route("/recovery", web::get().to(handlers::recovery)),
            )
            .route("/", web::get().to(handlers::index))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
