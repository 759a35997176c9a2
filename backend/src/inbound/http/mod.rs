//! HTTP inbound adapter exposing REST endpoints.

pub mod accounts;
pub mod error;
pub mod health;
pub mod notifications;
pub mod questions;
pub mod state;
pub mod stats;

pub use error::ApiResult;
