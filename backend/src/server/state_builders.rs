//! Builders for HTTP state ports backed by the database or fixtures.

use std::sync::Arc;

use actix_web::web;

use askbox_backend::domain::ports::{
    FixtureAccountQuery, FixtureIdentityProfileSource, FixtureNotificationCommand,
    FixtureQuestionCommand, FixtureQuestionQuery, FixtureStatsQuery, IdentityProfileSource,
};
use askbox_backend::domain::{
    AccountDirectoryService, NotificationCommandService, QuestionBoardCommandService,
    QuestionBoardQueryService, StatsQueryService,
};
use askbox_backend::inbound::http::state::{HttpState, HttpStatePorts};
use askbox_backend::outbound::persistence::{
    DbPool, DieselAccountRepository, DieselNotificationRepository, DieselQuestionRepository,
};

use super::ServerConfig;

/// Select database-backed ports when a pool is available, otherwise fall
/// back to the fixture implementations.
fn select_ports<Pool>(
    pool: &Option<Pool>,
    make_ports: impl FnOnce(&Pool) -> HttpStatePorts,
) -> HttpStatePorts {
    match pool {
        Some(pool) => make_ports(pool),
        None => fixture_ports(),
    }
}

fn fixture_ports() -> HttpStatePorts {
    HttpStatePorts {
        questions: Arc::new(FixtureQuestionCommand),
        question_listings: Arc::new(FixtureQuestionQuery),
        accounts: Arc::new(FixtureAccountQuery),
        stats: Arc::new(FixtureStatsQuery),
        notifications: Arc::new(FixtureNotificationCommand),
    }
}

/// Wire the domain services over Diesel repositories and the given identity
/// provider adapter.
fn diesel_ports<P>(pool: &DbPool, profile_source: Arc<P>) -> HttpStatePorts
where
    P: IdentityProfileSource + 'static,
{
    let question_repo = Arc::new(DieselQuestionRepository::new(pool.clone()));
    let account_repo = Arc::new(DieselAccountRepository::new(pool.clone()));
    let notification_repo = Arc::new(DieselNotificationRepository::new(pool.clone()));

    HttpStatePorts {
        questions: Arc::new(QuestionBoardCommandService::new(
            question_repo.clone(),
            account_repo.clone(),
            profile_source.clone(),
        )),
        question_listings: Arc::new(QuestionBoardQueryService::new(question_repo.clone())),
        accounts: Arc::new(AccountDirectoryService::new(account_repo, profile_source)),
        stats: Arc::new(StatsQueryService::new(question_repo.clone())),
        notifications: Arc::new(NotificationCommandService::new(
            notification_repo,
            question_repo,
        )),
    }
}

/// Build the shared HTTP state from configured ports and fixture fallbacks.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let ports = select_ports(&config.db_pool, |pool| match &config.identity {
        Some(source) => diesel_ports(pool, Arc::clone(source)),
        None => diesel_ports(pool, Arc::new(FixtureIdentityProfileSource)),
    });
    web::Data::new(HttpState::new(ports))
}
