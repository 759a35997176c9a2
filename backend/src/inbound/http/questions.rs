//! Question API handlers.
//!
//! ```text
//! POST /api/v1/questions {"content":"@bob what's your favourite colour?"}
//! GET /api/v1/questions
//! GET /api/v1/accounts/{handle}/questions
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{ListQuestionsForHandleRequest, SubmitQuestionRequest};
use crate::domain::{Error, QuestionWithRecipient};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Request body for `POST /api/v1/questions`.
///
/// Example JSON:
/// `{"content":"@bob what's your favourite colour?"}`
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuestionBody {
    /// Message text mentioning the recipient as `@handle`.
    #[schema(example = "@bob what's your favourite colour?")]
    pub content: String,
}

impl From<SubmitQuestionBody> for SubmitQuestionRequest {
    fn from(body: SubmitQuestionBody) -> Self {
        Self {
            content: body.content,
        }
    }
}

/// Path segment naming a recipient handle.
#[derive(Debug, Deserialize)]
pub struct HandlePath {
    pub handle: String,
}

/// Submit a question to the account mentioned in the message.
///
/// The first `@handle` mention names the recipient. Unknown recipients are
/// resolved against the identity provider before the question is stored, so
/// a submission can fail with 404 (no such handle upstream) or 503 (the
/// provider could not be consulted). Nothing is stored on failure.
#[utoipa::path(
    post,
    path = "/api/v1/questions",
    request_body = SubmitQuestionBody,
    responses(
        (status = 200, description = "Question stored", body = QuestionWithRecipient),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "Handle unknown to the identity provider", body = Error),
        (status = 503, description = "Identity provider unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["questions"],
    operation_id = "submitQuestion"
)]
#[post("/questions")]
pub async fn submit_question(
    state: web::Data<HttpState>,
    payload: web::Json<SubmitQuestionBody>,
) -> ApiResult<web::Json<QuestionWithRecipient>> {
    let response = state
        .questions
        .submit_question(SubmitQuestionRequest::from(payload.into_inner()))
        .await?;
    Ok(web::Json(response.question))
}

/// List every stored question with its recipient, oldest first.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use askbox_backend::inbound::http::questions::list_questions;
///
/// let app = App::new().service(list_questions);
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/questions",
    responses(
        (status = 200, description = "Stored questions", body = [QuestionWithRecipient]),
        (status = 503, description = "Service unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["questions"],
    operation_id = "listQuestions"
)]
#[get("/questions")]
pub async fn list_questions(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<QuestionWithRecipient>>> {
    let response = state.question_listings.list_questions().await?;
    Ok(web::Json(response.questions))
}

/// List the questions addressed to one handle, oldest first.
///
/// The handle may carry a leading `@`. A handle nobody has asked anything
/// yet yields an empty list, not an error.
#[utoipa::path(
    get,
    path = "/api/v1/accounts/{handle}/questions",
    params(
        ("handle" = String, Path, description = "Recipient handle, with or without a leading @")
    ),
    responses(
        (status = 200, description = "Questions for the handle", body = [QuestionWithRecipient]),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Service unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["questions"],
    operation_id = "listQuestionsForHandle"
)]
#[get("/accounts/{handle}/questions")]
pub async fn list_questions_for_handle(
    state: web::Data<HttpState>,
    path: web::Path<HandlePath>,
) -> ApiResult<web::Json<Vec<QuestionWithRecipient>>> {
    let response = state
        .question_listings
        .list_questions_for_handle(ListQuestionsForHandleRequest {
            handle: path.into_inner().handle,
        })
        .await?;
    Ok(web::Json(response.questions))
}

#[cfg(test)]
#[path = "questions_tests.rs"]
mod tests;
