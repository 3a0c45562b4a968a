//! User directory service library.
//!
//! Hexagonal layout: [`domain`] holds the user model, errors and ports;
//! [`inbound::http`] adapts actix-web requests onto the driving ports;
//! [`outbound`] implements the user store in memory or on PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
pub use middleware::Trace;
