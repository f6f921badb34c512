//! Staff-facing gateway to an external lending core.
//!
//! Validates registration and loan forms, formats monetary values and
//! taxpayer identifiers for display, and forwards accepted actions to the
//! core over HTTP.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
