//! Backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
/// Request tracing middleware attaching trace identifiers to responses.
pub use middleware::Trace;
/// Trace correlation surface shared by the middleware and error payloads.
pub use domain::{TRACE_ID_HEADER, TraceId};
