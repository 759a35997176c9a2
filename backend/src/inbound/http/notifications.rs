//! Answer-notification API handlers.
//!
//! ```text
//! POST /api/v1/notifications {"questionId":"...","email":"visitor@example.com"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::RegisterNotificationRequest;
use crate::domain::{Error, NotificationIntent};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/notifications`.
///
/// Example JSON:
/// `{"questionId":"7c9e6679-7425-40de-944b-e07fc1f90ae7","email":"visitor@example.com"}`
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterNotificationBody {
    /// Identifier of the question to watch.
    #[schema(value_type = String, format = Uuid, example = "7c9e6679-7425-40de-944b-e07fc1f90ae7")]
    pub question_id: Uuid,
    /// Address to notify once the question is answered.
    #[schema(example = "visitor@example.com")]
    pub email: String,
}

impl From<RegisterNotificationBody> for RegisterNotificationRequest {
    fn from(body: RegisterNotificationBody) -> Self {
        Self {
            question_id: body.question_id,
            email: body.email,
        }
    }
}

/// Register an email to be notified when a question is answered.
///
/// The question must exist; registering against an unknown question id is
/// an invalid request rather than a quiet success.
#[utoipa::path(
    post,
    path = "/api/v1/notifications",
    request_body = RegisterNotificationBody,
    responses(
        (status = 200, description = "Notification registered", body = NotificationIntent),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Service unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "registerNotification"
)]
#[post("/notifications")]
pub async fn register_notification(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterNotificationBody>,
) -> ApiResult<web::Json<NotificationIntent>> {
    let response = state
        .notifications
        .register_notification(RegisterNotificationRequest::from(payload.into_inner()))
        .await?;
    Ok(web::Json(response.notification))
}

#[cfg(test)]
#[path = "notifications_tests.rs"]
mod tests;
