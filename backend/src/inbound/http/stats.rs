//! Usage statistics API handlers.
//!
//! ```text
//! GET /api/v1/stats
//! GET /api/v1/accounts/{handle}/stats
//! ```

use actix_web::{get, web};

use crate::domain::ports::GetHandleStatsRequest;
use crate::domain::{Error, QuestionStatsDto};
use crate::inbound::http::ApiResult;
use crate::inbound::http::questions::HandlePath;
use crate::inbound::http::state::HttpState;

/// Service-wide usage statistics.
///
/// `avgResponseTimeSeconds` is `null` until at least one question has been
/// answered.
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    responses(
        (status = 200, description = "Service-wide statistics", body = QuestionStatsDto),
        (status = 503, description = "Service unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["stats"],
    operation_id = "getStats"
)]
#[get("/stats")]
pub async fn get_stats(state: web::Data<HttpState>) -> ApiResult<web::Json<QuestionStatsDto>> {
    let response = state.stats.global_stats().await?;
    Ok(web::Json(response.stats))
}

/// Usage statistics for one recipient handle.
///
/// A handle nobody has asked anything yet reports zero counters and a
/// `null` average rather than an error.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{handle}/stats",
    params(
        ("handle" = String, Path, description = "Recipient handle, with or without a leading @")
    ),
    responses(
        (status = 200, description = "Statistics for the handle", body = QuestionStatsDto),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Service unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["stats"],
    operation_id = "getHandleStats"
)]
#[get("/accounts/{handle}/stats")]
pub async fn get_handle_stats(
    state: web::Data<HttpState>,
    path: web::Path<HandlePath>,
) -> ApiResult<web::Json<QuestionStatsDto>> {
    let response = state
        .stats
        .handle_stats(GetHandleStatsRequest {
            handle: path.into_inner().handle,
        })
        .await?;
    Ok(web::Json(response.stats))
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
