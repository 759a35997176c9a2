//! Driving port for question read operations.
//!
//! Inbound adapters use this port to read stored questions without
//! depending on repository details.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{Error, QuestionWithRecipient};

/// Response containing every stored question with its recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuestionsResponse {
    pub questions: Vec<QuestionWithRecipient>,
}

/// Request to list the questions addressed to one handle.
///
/// The handle may carry a leading `@`, which is stripped before lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuestionsForHandleRequest {
    pub handle: String,
}

/// Response containing one handle's questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuestionsForHandleResponse {
    pub questions: Vec<QuestionWithRecipient>,
}

/// Driving port for question read operations.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), askbox_backend::domain::Error> {
/// use askbox_backend::domain::ports::{FixtureQuestionQuery, QuestionQuery};
///
/// let query = FixtureQuestionQuery;
/// let response = query.list_questions().await?;
/// assert!(response.questions.is_empty());
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionQuery: Send + Sync {
    /// List every stored question, oldest first.
    async fn list_questions(&self) -> Result<ListQuestionsResponse, Error>;

    /// List the questions addressed to one handle, oldest first.
    ///
    /// An unknown handle yields an empty listing, not an error.
    async fn list_questions_for_handle(
        &self,
        request: ListQuestionsForHandleRequest,
    ) -> Result<ListQuestionsForHandleResponse, Error>;
}

/// Fixture query for tests that do not need persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureQuestionQuery;

#[async_trait]
impl QuestionQuery for FixtureQuestionQuery {
    async fn list_questions(&self) -> Result<ListQuestionsResponse, Error> {
        Ok(ListQuestionsResponse {
            questions: Vec::new(),
        })
    }

    async fn list_questions_for_handle(
        &self,
        _request: ListQuestionsForHandleRequest,
    ) -> Result<ListQuestionsForHandleResponse, Error> {
        Ok(ListQuestionsForHandleResponse {
            questions: Vec::new(),
        })
    }
}
