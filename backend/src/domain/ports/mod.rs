//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod account_query;
mod account_repository;
mod identity_profile_source;
mod notification_command;
mod notification_repository;
mod question_command;
mod question_query;
mod question_repository;
mod stats_query;

#[cfg(test)]
pub use account_query::MockAccountQuery;
pub use account_query::{
    AccountQuery, FixtureAccountQuery, GetAccountRequest, GetAccountResponse,
    ListOtherAccountsRequest, ListOtherAccountsResponse,
};
#[cfg(test)]
pub use account_repository::MockAccountRepository;
pub use account_repository::{AccountPersistenceError, AccountRepository, FixtureAccountRepository};
#[cfg(test)]
pub use identity_profile_source::MockIdentityProfileSource;
pub use identity_profile_source::{
    FixtureIdentityProfileSource, IdentityProfile, IdentityProfileSource, IdentityProviderError,
};
#[cfg(test)]
pub use notification_command::MockNotificationCommand;
pub use notification_command::{
    FixtureNotificationCommand, NotificationCommand, RegisterNotificationRequest,
    RegisterNotificationResponse,
};
#[cfg(test)]
pub use notification_repository::MockNotificationRepository;
pub use notification_repository::{
    FixtureNotificationRepository, NotificationPersistenceError, NotificationRepository,
};
#[cfg(test)]
pub use question_command::MockQuestionCommand;
pub use question_command::{
    FixtureQuestionCommand, QuestionCommand, SubmitQuestionRequest, SubmitQuestionResponse,
};
#[cfg(test)]
pub use question_query::MockQuestionQuery;
pub use question_query::{
    FixtureQuestionQuery, ListQuestionsForHandleRequest, ListQuestionsForHandleResponse,
    ListQuestionsResponse, QuestionQuery,
};
#[cfg(test)]
pub use question_repository::MockQuestionRepository;
pub use question_repository::{
    FixtureQuestionRepository, QuestionPersistenceError, QuestionRepository,
};
#[cfg(test)]
pub use stats_query::MockStatsQuery;
pub use stats_query::{FixtureStatsQuery, GetHandleStatsRequest, GetStatsResponse, StatsQuery};
