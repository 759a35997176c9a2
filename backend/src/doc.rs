//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: All HTTP endpoints from the inbound layer (questions,
//!   accounts, stats, notifications, health)
//! - **Schemas**: Domain types and request bodies, which derive their
//!   OpenAPI definitions directly
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::domain::{
    Account, Error, ErrorCode, NotificationIntent, Question, QuestionStatsDto,
    QuestionWithRecipient,
};
use crate::inbound::http::accounts::ListAccountsQuery;
use crate::inbound::http::notifications::RegisterNotificationBody;
use crate::inbound::http::questions::SubmitQuestionBody;
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Askbox backend API",
        description = "HTTP interface for submitting questions, browsing inboxes, and health probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::questions::submit_question,
        crate::inbound::http::questions::list_questions,
        crate::inbound::http::questions::list_questions_for_handle,
        crate::inbound::http::accounts::get_account,
        crate::inbound::http::accounts::list_other_accounts,
        crate::inbound::http::stats::get_stats,
        crate::inbound::http::stats::get_handle_stats,
        crate::inbound::http::notifications::register_notification,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Account,
        Question,
        QuestionWithRecipient,
        QuestionStatsDto,
        NotificationIntent,
        Error,
        ErrorCode,
        SubmitQuestionBody,
        RegisterNotificationBody,
        ListAccountsQuery,
    )),
    tags(
        (name = "questions", description = "Submitting and listing questions"),
        (name = "accounts", description = "Account lookup and discovery"),
        (name = "stats", description = "Aggregated question statistics"),
        (name = "notifications", description = "Answer notification subscriptions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
