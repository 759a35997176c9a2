//! PostgreSQL-backed `QuestionRepository` implementation using Diesel ORM.
//!
//! This adapter stores submitted questions, serves the question listings
//! with their recipients joined in, and computes the usage aggregates in a
//! single round trip per request.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{QuestionPersistenceError, QuestionRepository};
use crate::domain::{
    AccountId, Handle, Question, QuestionContent, QuestionId, QuestionStats, QuestionWithRecipient,
};

use super::diesel_account_repository::row_to_account;
use super::diesel_error_mapping::{map_statement_error, pool_error_message};
use super::models::{AccountRow, NewQuestionRow, QuestionRow};
use super::pool::{DbPool, PoolError};
use super::schema::{accounts, questions};

/// Diesel-backed implementation of the question repository port.
#[derive(Clone)]
pub struct DieselQuestionRepository {
    pool: DbPool,
}

impl DieselQuestionRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Usage counters over every stored question.
///
/// `COUNT(*)` never returns NULL, so both counters always materialise; the
/// average stays NULL until at least one question has been answered. The
/// epoch extraction is cast because PostgreSQL reports it as numeric.
const USAGE_TOTALS_SQL: &str = "\
SELECT COUNT(*) AS asked, \
       COUNT(answered_at) AS answered, \
       AVG(EXTRACT(EPOCH FROM (answered_at - asked_at)))::double precision AS avg_response_seconds \
FROM questions";

/// Usage counters scoped to one recipient handle.
///
/// An unknown handle matches no join rows, which still yields exactly one
/// aggregate row with zero counts and a NULL average.
const USAGE_TOTALS_FOR_HANDLE_SQL: &str = "\
SELECT COUNT(questions.id) AS asked, \
       COUNT(questions.answered_at) AS answered, \
       AVG(EXTRACT(EPOCH FROM (questions.answered_at - questions.asked_at)))::double precision AS avg_response_seconds \
FROM questions \
INNER JOIN accounts ON accounts.id = questions.recipient_id \
WHERE accounts.handle = $1";

/// Aggregate row produced by the usage totals queries.
#[derive(Debug, QueryableByName)]
struct UsageTotalsRow {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    asked: i64,
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    answered: i64,
    #[diesel(sql_type = diesel::sql_types::Nullable<diesel::sql_types::Double>)]
    avg_response_seconds: Option<f64>,
}

impl From<UsageTotalsRow> for QuestionStats {
    fn from(row: UsageTotalsRow) -> Self {
        Self::new(
            u64::try_from(row.asked).unwrap_or_default(),
            u64::try_from(row.answered).unwrap_or_default(),
            row.avg_response_seconds,
        )
    }
}

/// Map pool errors to domain repository errors.
fn map_pool_error(error: PoolError) -> QuestionPersistenceError {
    QuestionPersistenceError::connection(pool_error_message(error))
}

/// Map Diesel errors to domain repository errors.
fn map_diesel_error(error: diesel::result::Error) -> QuestionPersistenceError {
    map_statement_error(
        error,
        QuestionPersistenceError::query,
        QuestionPersistenceError::connection,
    )
}

/// Convert a database row into a validated domain question.
fn row_to_question(row: QuestionRow) -> Result<Question, QuestionPersistenceError> {
    let QuestionRow {
        id,
        content,
        recipient_id,
        asked_at,
        answered_at,
        answer,
        external_post_id,
        posted_at,
        created_at: _,
    } = row;

    let content = QuestionContent::new(content)
        .map_err(|err| QuestionPersistenceError::query(err.to_string()))?;

    Ok(Question::from_stored(
        QuestionId::from_uuid(id),
        content,
        AccountId::from_uuid(recipient_id),
        asked_at,
        answered_at,
        answer,
        external_post_id,
        posted_at,
    ))
}

/// Convert a joined question/account row pair into the listing entry.
fn rows_to_listing(
    rows: Vec<(QuestionRow, AccountRow)>,
) -> Result<Vec<QuestionWithRecipient>, QuestionPersistenceError> {
    rows.into_iter()
        .map(|(question_row, account_row)| {
            let question = row_to_question(question_row)?;
            let recipient = row_to_account(account_row)
                .map_err(|err| QuestionPersistenceError::query(err.to_string()))?;
            Ok(QuestionWithRecipient {
                question,
                recipient,
            })
        })
        .collect()
}

#[async_trait]
impl QuestionRepository for DieselQuestionRepository {
    async fn insert(
        &self,
        content: &QuestionContent,
        recipient: &AccountId,
    ) -> Result<Question, QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let question = Question::new(QuestionId::random(), content.clone(), *recipient, Utc::now());

        let new_row = NewQuestionRow {
            id: *question.id().as_uuid(),
            content: question.content().as_ref(),
            recipient_id: *question.recipient_id().as_uuid(),
            asked_at: question.asked_at(),
        };

        diesel::insert_into(questions::table)
            .values(&new_row)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(question)
    }

    async fn list_all(&self) -> Result<Vec<QuestionWithRecipient>, QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(QuestionRow, AccountRow)> = questions::table
            .inner_join(accounts::table)
            .order((questions::asked_at.asc(), questions::id.asc()))
            .select((QuestionRow::as_select(), AccountRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_listing(rows)
    }

    async fn list_for_handle(
        &self,
        handle: &Handle,
    ) -> Result<Vec<QuestionWithRecipient>, QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<(QuestionRow, AccountRow)> = questions::table
            .inner_join(accounts::table)
            .filter(accounts::handle.eq(handle.as_ref()))
            .order((questions::asked_at.asc(), questions::id.asc()))
            .select((QuestionRow::as_select(), AccountRow::as_select()))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows_to_listing(rows)
    }

    async fn exists(&self, id: &QuestionId) -> Result<bool, QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = questions::table
            .filter(questions::id.eq(id.as_uuid()))
            .select(questions::id)
            .first::<Uuid>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.is_some())
    }

    async fn usage_totals(&self) -> Result<QuestionStats, QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UsageTotalsRow = sql_query(USAGE_TOTALS_SQL)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }

    async fn usage_totals_for_handle(
        &self,
        handle: &Handle,
    ) -> Result<QuestionStats, QuestionPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: UsageTotalsRow = sql_query(USAGE_TOTALS_FOR_HANDLE_SQL)
            .bind::<Text, _>(handle.as_ref())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(row.into())
    }
}
