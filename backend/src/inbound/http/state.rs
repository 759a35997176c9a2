//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AccountQuery, NotificationCommand, QuestionCommand, QuestionQuery, StatsQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub questions: Arc<dyn QuestionCommand>,
    pub question_listings: Arc<dyn QuestionQuery>,
    pub accounts: Arc<dyn AccountQuery>,
    pub stats: Arc<dyn StatsQuery>,
    pub notifications: Arc<dyn NotificationCommand>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub questions: Arc<dyn QuestionCommand>,
    pub question_listings: Arc<dyn QuestionQuery>,
    pub accounts: Arc<dyn AccountQuery>,
    pub stats: Arc<dyn StatsQuery>,
    pub notifications: Arc<dyn NotificationCommand>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use askbox_backend::domain::ports::{
    ///     FixtureAccountQuery, FixtureNotificationCommand, FixtureQuestionCommand,
    ///     FixtureQuestionQuery, FixtureStatsQuery,
    /// };
    /// use askbox_backend::inbound::http::state::{HttpState, HttpStatePorts};
    ///
    /// let ports = HttpStatePorts {
    ///     questions: Arc::new(FixtureQuestionCommand),
    ///     question_listings: Arc::new(FixtureQuestionQuery),
    ///     accounts: Arc::new(FixtureAccountQuery),
    ///     stats: Arc::new(FixtureStatsQuery),
    ///     notifications: Arc::new(FixtureNotificationCommand),
    /// };
    /// let state = HttpState::new(ports);
    /// let _questions = state.questions.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        Self {
            questions: ports.questions,
            question_listings: ports.question_listings,
            accounts: ports.accounts,
            stats: ports.stats,
            notifications: ports.notifications,
        }
    }
}
