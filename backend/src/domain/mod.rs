//! Domain primitives, aggregates, services, and ports.
//!
//! Purpose: define the strongly typed model of the question board and the
//! hexagonal ports its adapters implement. Keep types immutable and document
//! invariants and serialisation contracts (serde) in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode — API error payload and stable error identifiers.
//! - Handle and `first_handle` — recipient handles and message extraction.
//! - Account, Question, QuestionWithRecipient — stored aggregates.
//! - QuestionStats — usage counters with the null-until-answered average.
//! - NotificationIntent — answer-notification subscriptions.
//! - ports — the traits adapters implement, with fixtures and mocks.
//! - `*_service` modules — driving-port implementations wiring the
//!   repositories and the identity provider together.

pub mod account;
pub mod account_directory_service;
pub mod error;
pub mod handle;
pub mod notification;
pub mod notification_service;
pub mod ports;
pub mod question;
pub mod question_board_service;
pub mod stats;
pub mod stats_service;
pub mod trace_id;

pub use self::account::{
    AVATAR_URL_MAX, Account, AccountId, AccountValidationError, AvatarUrl, BIO_MAX, Bio,
    DISPLAY_NAME_MAX, DisplayName, EXTERNAL_ID_MAX, ExternalAccountId,
};
pub use self::account_directory_service::{
    AccountDirectoryService, DEFAULT_OTHER_ACCOUNTS_LIMIT, MAX_OTHER_ACCOUNTS_LIMIT,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::handle::{Handle, HandleValidationError, first_handle};
pub use self::notification::{
    EMAIL_MAX, EmailAddress, NotificationIntent, NotificationIntentId, NotificationValidationError,
};
pub use self::notification_service::NotificationCommandService;
pub use self::question::{
    QUESTION_CONTENT_MAX, Question, QuestionContent, QuestionId, QuestionValidationError,
    QuestionWithRecipient,
};
pub use self::question_board_service::{QuestionBoardCommandService, QuestionBoardQueryService};
pub use self::stats::{QuestionStats, QuestionStatsDto, display_duration};
pub use self::stats_service::StatsQueryService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
