//! HTTP handler functions for the dashboard API.

use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};

use super::{AppState, METRIC_OPTIONS, MODE_OPTIONS};
use crate::recovery::compute_recovery;

/// The dashboard page, embedded at compile time.
const INDEX_HTML: &str = include_str!("assets/index.html");

#[derive(Serialize)]
struct ApiHealth {
    healthy: bool,
    version: String,
}

/// Query parameters for `GET /api/recovery`.
#[derive(Debug, Deserialize)]
pub struct RecoveryParams {
    pub metric: String,
    /// Comma-separated mode names; order is preserved in the output.
    pub modes: Option<String>,
}

/// `GET /`
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/options`
///
/// Returns the fixed selector option sets.
pub async fn options() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "metrics": METRIC_OPTIONS,
        "modes": MODE_OPTIONS,
    }))
}

/// `GET /api/recovery?metric=X&modes=a,b,c`
///
/// One synchronous recompute over the shared table; modes that cannot be
/// resolved are skipped inside the report, never a 4xx.
pub async fn recovery(
    state: web::Data<AppState>,
    params: web::Query<RecoveryParams>,
) -> HttpResponse {
    let modes: Vec<String> = params
        .modes
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(String::from)
        .collect();

    let report = compute_recovery(&state.table, &params.metric, &modes);
    HttpResponse::Ok().json(report)
}
