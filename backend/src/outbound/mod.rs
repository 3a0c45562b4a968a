//! Outbound adapters implementing the [`UserRepository`] port.
//!
//! [`memory`] serves a seeded in-process store; [`persistence`] talks to
//! PostgreSQL. Startup picks exactly one.
//!
//! [`UserRepository`]: crate::domain::ports::UserRepository

pub mod memory;
pub mod persistence;
