//! Identity provider outbound adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `IdentityProfileSource` port.

mod dto;
mod http_source;

pub use http_source::HttpIdentityProfileSource;
