//! Integration tests for `DieselQuestionRepository` against embedded PostgreSQL.
//!
//! These tests verify question storage, the recipient-joined listings, and
//! the usage aggregates (including the null-until-answered average) against a
//! real PostgreSQL database. The reply pipeline never runs inside this
//! service, so answered rows are produced the way the external process would:
//! by updating `answered_at` directly.
use std::sync::{Arc, Mutex};

use askbox_backend::domain::ports::{AccountRepository, QuestionRepository};
use askbox_backend::domain::{Account, AccountId, Handle, Question, QuestionContent, QuestionId};
use askbox_backend::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselQuestionRepository, PoolConfig,
};
use pg_embedded_setup_unpriv::TemporaryDatabase;
use postgres::{Client, NoTls};
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

mod support;

use support::atexit_cleanup::shared_cluster_handle;
use support::{format_postgres_error, handle_cluster_setup_failure, provision_template_database};

// -----------------------------------------------------------------------------
// Test Context
// -----------------------------------------------------------------------------

struct TestContext {
    /// Tokio runtime reused for all async operations in this test.
    runtime: Runtime,
    questions: DieselQuestionRepository,
    accounts: DieselAccountRepository,
    database_url: String,
    _database: TemporaryDatabase,
}

type SharedContext = Arc<Mutex<TestContext>>;

fn setup_test_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = shared_cluster_handle().map_err(|err| err.to_string())?;
    let temp_db = provision_template_database(cluster).map_err(|err| err.to_string())?;

    let database_url = temp_db.url().to_string();

    let config = PoolConfig::new(&database_url)
        .with_max_size(2)
        .with_min_idle(Some(1));

    let pool = runtime
        .block_on(async { DbPool::new(config).await })
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        questions: DieselQuestionRepository::new(pool.clone()),
        accounts: DieselAccountRepository::new(pool),
        database_url,
        _database: temp_db,
    })
}

#[fixture]
fn diesel_world() -> Option<SharedContext> {
    match setup_test_context() {
        Ok(ctx) => Some(Arc::new(Mutex::new(ctx))),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

// -----------------------------------------------------------------------------
// Helpers
// -----------------------------------------------------------------------------

fn block_on<F: std::future::Future>(world: &SharedContext, future: F) -> F::Output {
    let handle = {
        let ctx = world.lock().expect("context lock");
        ctx.runtime.handle().clone()
    };
    handle.block_on(future)
}

fn seed_account(world: &SharedContext, handle: &str) -> Account {
    let account = Account::try_from_parts(
        AccountId::random().to_string(),
        format!("ext-{handle}"),
        handle,
        format!("{handle} (test)"),
        "Integration test account.",
        format!("https://avatars.example.net/{handle}.png"),
    )
    .expect("fixture account is valid");

    let accounts = {
        let ctx = world.lock().expect("context lock");
        ctx.accounts.clone()
    };
    block_on(world, accounts.insert(&account)).expect("account insert succeeds")
}

fn submit_question(world: &SharedContext, recipient: &Account, text: &str) -> Question {
    let content = QuestionContent::new(text).expect("fixture content is valid");
    let questions = {
        let ctx = world.lock().expect("context lock");
        ctx.questions.clone()
    };
    block_on(world, questions.insert(&content, recipient.id())).expect("question insert succeeds")
}

/// Record an answer the way the external reply process would, `delay_seconds`
/// after the question was asked.
fn mark_answered(world: &SharedContext, question: &Question, delay_seconds: i64) {
    let url = {
        let ctx = world.lock().expect("context lock");
        ctx.database_url.clone()
    };
    let mut client = Client::connect(&url, NoTls)
        .unwrap_or_else(|err| panic!("connect: {}", format_postgres_error(&err)));
    let updated = client
        .execute(
            "UPDATE questions \
             SET answered_at = asked_at + make_interval(secs => $1::double precision), \
                 answer = 'Answered.' \
             WHERE id = $2",
            &[&(delay_seconds as f64), question.id().as_uuid()],
        )
        .unwrap_or_else(|err| panic!("update: {}", format_postgres_error(&err)));
    assert_eq!(updated, 1, "exactly one question row should be answered");
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[rstest]
fn diesel_question_round_trip_joins_the_recipient(diesel_world: Option<SharedContext>) {
    let Some(world) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: diesel_question_round_trip_joins_the_recipient skipped");
        return;
    };

    let alice = seed_account(&world, "alice");
    let stored = submit_question(&world, &alice, "@alice what's your favourite colour?");
    assert!(stored.answered_at().is_none(), "new questions are unanswered");

    let questions = {
        let ctx = world.lock().expect("context lock");
        ctx.questions.clone()
    };
    let listing = block_on(&world, questions.list_all()).expect("listing succeeds");

    assert_eq!(listing.len(), 1);
    let entry = listing.first().expect("one entry");
    assert_eq!(entry.question.id(), stored.id());
    assert_eq!(
        entry.question.content().as_ref(),
        "@alice what's your favourite colour?"
    );
    assert_eq!(entry.recipient.id(), alice.id());
    assert_eq!(entry.recipient.handle().as_ref(), "alice");
}

#[rstest]
fn diesel_listing_filters_by_recipient_and_orders_by_submission(
    diesel_world: Option<SharedContext>,
) {
    let Some(world) = diesel_world else {
        eprintln!(
            "SKIP-TEST-CLUSTER: diesel_listing_filters_by_recipient_and_orders_by_submission skipped"
        );
        return;
    };

    let alice = seed_account(&world, "alice");
    let bob = seed_account(&world, "bob");
    let first = submit_question(&world, &alice, "@alice first?");
    let second = submit_question(&world, &alice, "@alice second?");
    submit_question(&world, &bob, "@bob unrelated?");

    let questions = {
        let ctx = world.lock().expect("context lock");
        ctx.questions.clone()
    };

    let handle = Handle::new("alice").expect("valid handle");
    let scoped = block_on(&world, questions.list_for_handle(&handle)).expect("listing succeeds");
    assert_eq!(scoped.len(), 2, "bob's question must not appear");
    assert_eq!(scoped[0].question.id(), first.id(), "oldest first");
    assert_eq!(scoped[1].question.id(), second.id());

    let all = block_on(&world, questions.list_all()).expect("listing succeeds");
    assert_eq!(all.len(), 3);
}

#[rstest]
fn diesel_exists_distinguishes_stored_ids(diesel_world: Option<SharedContext>) {
    let Some(world) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: diesel_exists_distinguishes_stored_ids skipped");
        return;
    };

    let alice = seed_account(&world, "alice");
    let stored = submit_question(&world, &alice, "@alice are you there?");

    let questions = {
        let ctx = world.lock().expect("context lock");
        ctx.questions.clone()
    };

    assert!(
        block_on(&world, questions.exists(stored.id())).expect("exists succeeds"),
        "stored id should exist"
    );
    let missing = QuestionId::from_uuid(Uuid::new_v4());
    assert!(
        !block_on(&world, questions.exists(&missing)).expect("exists succeeds"),
        "random id should not exist"
    );
}

#[rstest]
fn diesel_totals_on_empty_store_are_zero_with_null_average(
    diesel_world: Option<SharedContext>,
) {
    let Some(world) = diesel_world else {
        eprintln!(
            "SKIP-TEST-CLUSTER: diesel_totals_on_empty_store_are_zero_with_null_average skipped"
        );
        return;
    };

    let questions = {
        let ctx = world.lock().expect("context lock");
        ctx.questions.clone()
    };

    let totals = block_on(&world, questions.usage_totals()).expect("totals succeed");
    assert_eq!(totals.asked_count(), 0);
    assert_eq!(totals.answered_count(), 0);
    assert_eq!(totals.avg_response_time_seconds(), None);

    // A handle with no account behaves the same way, not as an error.
    let unknown = Handle::new("nobody").expect("valid handle");
    let scoped =
        block_on(&world, questions.usage_totals_for_handle(&unknown)).expect("totals succeed");
    assert_eq!(scoped.asked_count(), 0);
    assert_eq!(scoped.answered_count(), 0);
    assert_eq!(scoped.avg_response_time_seconds(), None);
}

#[rstest]
fn diesel_totals_average_only_answered_questions(diesel_world: Option<SharedContext>) {
    let Some(world) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: diesel_totals_average_only_answered_questions skipped");
        return;
    };

    let alice = seed_account(&world, "alice");
    let quick = submit_question(&world, &alice, "@alice quick one?");
    let slow = submit_question(&world, &alice, "@alice slow one?");
    submit_question(&world, &alice, "@alice never answered?");

    mark_answered(&world, &quick, 60);
    mark_answered(&world, &slow, 180);

    let questions = {
        let ctx = world.lock().expect("context lock");
        ctx.questions.clone()
    };

    let totals = block_on(&world, questions.usage_totals()).expect("totals succeed");
    assert_eq!(totals.asked_count(), 3);
    assert_eq!(totals.answered_count(), 2);
    assert_eq!(
        totals.avg_response_time_seconds(),
        Some(120.0),
        "average covers answered questions only"
    );

    let handle = Handle::new("alice").expect("valid handle");
    let scoped =
        block_on(&world, questions.usage_totals_for_handle(&handle)).expect("totals succeed");
    assert_eq!(scoped.asked_count(), totals.asked_count());
    assert_eq!(scoped.answered_count(), totals.answered_count());
    assert_eq!(
        scoped.avg_response_time_seconds(),
        totals.avg_response_time_seconds()
    );
}

#[rstest]
fn diesel_totals_scope_to_the_requested_handle(diesel_world: Option<SharedContext>) {
    let Some(world) = diesel_world else {
        eprintln!("SKIP-TEST-CLUSTER: diesel_totals_scope_to_the_requested_handle skipped");
        return;
    };

    let alice = seed_account(&world, "alice");
    let bob = seed_account(&world, "bob");
    submit_question(&world, &alice, "@alice one?");
    submit_question(&world, &alice, "@alice two?");
    submit_question(&world, &bob, "@bob three?");

    let questions = {
        let ctx = world.lock().expect("context lock");
        ctx.questions.clone()
    };

    let handle = Handle::new("bob").expect("valid handle");
    let scoped =
        block_on(&world, questions.usage_totals_for_handle(&handle)).expect("totals succeed");
    assert_eq!(scoped.asked_count(), 1);
    assert_eq!(scoped.answered_count(), 0);
    assert_eq!(scoped.avg_response_time_seconds(), None);
}
