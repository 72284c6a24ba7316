//! Movie catalogue service library.
//!
//! Domain services behind hexagonal ports, Diesel and HTTP adapters, and the
//! Actix Web surface that exposes them.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(feature = "test-support")]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
