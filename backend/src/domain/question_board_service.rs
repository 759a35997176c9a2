//! Question board domain services.
//!
//! Implement the question driving ports: submission validates the message,
//! resolves the mentioned recipient, and stores the question; reads return
//! stored questions paired with their recipients.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::account_directory_service::resolve_account;
use crate::domain::ports::{
    AccountRepository, IdentityProfileSource, ListQuestionsForHandleRequest,
    ListQuestionsForHandleResponse, ListQuestionsResponse, QuestionCommand,
    QuestionPersistenceError, QuestionQuery, QuestionRepository, SubmitQuestionRequest,
    SubmitQuestionResponse,
};
use crate::domain::{Error, Handle, QuestionContent, QuestionWithRecipient, first_handle};

fn map_repository_error(error: QuestionPersistenceError) -> Error {
    match error {
        QuestionPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("question repository unavailable: {message}"))
        }
        QuestionPersistenceError::Query { message } => {
            Error::internal(format!("question repository error: {message}"))
        }
    }
}

/// Question board service implementing the submission port.
#[derive(Clone)]
pub struct QuestionBoardCommandService<Q, A, P> {
    question_repo: Arc<Q>,
    account_repo: Arc<A>,
    profile_source: Arc<P>,
}

impl<Q, A, P> QuestionBoardCommandService<Q, A, P> {
    /// Create a new command service over the question and account
    /// repositories and the identity provider.
    pub fn new(question_repo: Arc<Q>, account_repo: Arc<A>, profile_source: Arc<P>) -> Self {
        Self {
            question_repo,
            account_repo,
            profile_source,
        }
    }
}

#[async_trait]
impl<Q, A, P> QuestionCommand for QuestionBoardCommandService<Q, A, P>
where
    Q: QuestionRepository,
    A: AccountRepository,
    P: IdentityProfileSource,
{
    async fn submit_question(
        &self,
        request: SubmitQuestionRequest,
    ) -> Result<SubmitQuestionResponse, Error> {
        let content = QuestionContent::new(request.content)
            .map_err(|err| Error::invalid_request(format!("invalid question content: {err}")))?;
        let handle = first_handle(content.as_ref()).ok_or_else(|| {
            Error::invalid_request("message does not mention a recipient handle")
        })?;

        // Resolution must succeed before anything is written; a failed
        // lookup leaves no question behind.
        let recipient =
            resolve_account(&*self.account_repo, &*self.profile_source, &handle).await?;

        let question = self
            .question_repo
            .insert(&content, recipient.id())
            .await
            .map_err(map_repository_error)?;

        tracing::info!(
            question_id = %question.id(),
            recipient = %recipient.handle(),
            "question stored"
        );

        Ok(SubmitQuestionResponse {
            question: QuestionWithRecipient {
                question,
                recipient,
            },
        })
    }
}

/// Question board service implementing the read port.
#[derive(Clone)]
pub struct QuestionBoardQueryService<Q> {
    question_repo: Arc<Q>,
}

impl<Q> QuestionBoardQueryService<Q> {
    /// Create a new query service over the question repository.
    pub fn new(question_repo: Arc<Q>) -> Self {
        Self { question_repo }
    }
}

#[async_trait]
impl<Q> QuestionQuery for QuestionBoardQueryService<Q>
where
    Q: QuestionRepository,
{
    async fn list_questions(&self) -> Result<ListQuestionsResponse, Error> {
        let questions = self
            .question_repo
            .list_all()
            .await
            .map_err(map_repository_error)?;

        Ok(ListQuestionsResponse { questions })
    }

    async fn list_questions_for_handle(
        &self,
        request: ListQuestionsForHandleRequest,
    ) -> Result<ListQuestionsForHandleResponse, Error> {
        let handle = Handle::parse_lenient(&request.handle)
            .map_err(|err| Error::invalid_request(format!("invalid handle: {err}")))?;
        let questions = self
            .question_repo
            .list_for_handle(&handle)
            .await
            .map_err(map_repository_error)?;

        Ok(ListQuestionsForHandleResponse { questions })
    }
}

#[cfg(test)]
#[path = "question_board_service_tests.rs"]
mod tests;
