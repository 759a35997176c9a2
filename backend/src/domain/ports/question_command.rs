//! Driving port for question submission.
//!
//! Inbound adapters hand the raw message text to this port; the
//! implementation validates it, extracts the recipient handle, resolves the
//! recipient account, and stores the question.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Account, AccountId, Error, Question, QuestionContent, QuestionId, QuestionWithRecipient,
    first_handle,
};

use super::IdentityProfile;

/// Request to submit a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuestionRequest {
    /// Raw message text, expected to mention the recipient as `@handle`.
    pub content: String,
}

/// Response from submitting a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuestionResponse {
    /// The stored question together with its resolved recipient.
    pub question: QuestionWithRecipient,
}

/// Driving port for question write operations.
///
/// # Examples
///
/// ```rust,no_run
/// # async fn example() -> Result<(), askbox_backend::domain::Error> {
/// use askbox_backend::domain::ports::{
///     FixtureQuestionCommand, QuestionCommand, SubmitQuestionRequest,
/// };
///
/// let command = FixtureQuestionCommand;
/// let request = SubmitQuestionRequest {
///     content: "@alice what's your favourite colour?".to_owned(),
/// };
/// let response = command.submit_question(request).await?;
/// assert_eq!(response.question.recipient.handle().as_ref(), "alice");
/// # Ok(())
/// # }
/// ```
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionCommand: Send + Sync {
    /// Validate, resolve the recipient, and store a question.
    ///
    /// Fails with an invalid-request error when the message is empty, too
    /// long, or mentions no handle, with a not-found error when the provider
    /// does not know the handle, and with a service-unavailable error when
    /// the provider cannot be consulted. No question is stored on failure.
    async fn submit_question(
        &self,
        request: SubmitQuestionRequest,
    ) -> Result<SubmitQuestionResponse, Error>;
}

/// Fixture command for tests that do not need persistence or a provider.
///
/// Validates the message exactly like the real service and mints a
/// deterministic recipient account for the mentioned handle.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureQuestionCommand;

#[async_trait]
impl QuestionCommand for FixtureQuestionCommand {
    async fn submit_question(
        &self,
        request: SubmitQuestionRequest,
    ) -> Result<SubmitQuestionResponse, Error> {
        let content = QuestionContent::new(request.content)
            .map_err(|err| Error::invalid_request(format!("invalid question content: {err}")))?;
        let handle = first_handle(content.as_ref()).ok_or_else(|| {
            Error::invalid_request("message does not mention a recipient handle")
        })?;
        let recipient = Account::try_from_profile(
            AccountId::random(),
            IdentityProfile {
                external_id: format!("fixture-{handle}"),
                handle: handle.as_ref().to_owned(),
                display_name: handle.as_ref().to_owned(),
                bio: String::new(),
                avatar_url: format!("https://avatars.example.net/{handle}.png"),
            },
        )
        .map_err(|err| Error::internal(format!("fixture account invalid: {err}")))?;
        let question = Question::new(
            QuestionId::random(),
            content,
            *recipient.id(),
            chrono::Utc::now(),
        );

        Ok(SubmitQuestionResponse {
            question: QuestionWithRecipient {
                question,
                recipient,
            },
        })
    }
}
