//! Domain ports defining the edges of the hexagon.
//!
//! Driving ports ([`UsersQuery`], [`UsersCommand`], [`StatusQuery`]) are what
//! inbound adapters call. The driven [`UserRepository`] port is what storage
//! adapters implement, with failures mapped into [`UserPersistenceError`].

mod macros;
mod status_query;
mod user_repository;
mod users_command;
mod users_query;

pub(crate) use macros::define_port_error;

#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use status_query::StatusQuery;
pub use user_repository::{UserPersistenceError, UserRepository};
pub use users_command::UsersCommand;
pub use users_query::UsersQuery;
