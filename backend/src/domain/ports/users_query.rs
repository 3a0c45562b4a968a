//! Driving port for reading users.
//!
//! Inbound adapters call this port with already parsed identifiers and page
//! requests. Failures arrive as domain [`Error`]s ready for rendering.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, User, UserId};

/// Read-side user use-cases.
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch one user, failing with [`Error::user_not_found`] when absent.
    async fn get_user(&self, id: UserId) -> Result<User, Error>;

    /// Return the requested page of users.
    async fn list_users(&self, request: PageRequest) -> Result<Page<User>, Error>;
}
