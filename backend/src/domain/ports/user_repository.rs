//! Driven port for user storage adapters and their errors.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{NewUser, User, UserId, UserPatch};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another user already holds the email address.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Storage for user records.
///
/// Implementations assign identifiers on [`create`](Self::create) that are
/// never reused, and keep insertion order for [`list_page`](Self::list_page).
/// Each call observes one consistent snapshot of the store.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Return one page of users together with the total count.
    async fn list_page(&self, request: PageRequest) -> Result<Page<User>, UserPersistenceError>;

    /// Store a new user under a freshly assigned identifier.
    async fn create(&self, user: NewUser) -> Result<User, UserPersistenceError>;

    /// Merge `patch` into the stored user, returning the result.
    ///
    /// Returns `Ok(None)` when no user has the identifier.
    async fn update(
        &self,
        id: UserId,
        patch: UserPatch,
    ) -> Result<Option<User>, UserPersistenceError>;

    /// Remove a user, reporting whether one was removed.
    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError>;

    /// Whether the store is reachable and holds data worth serving.
    async fn probe(&self) -> Result<bool, UserPersistenceError>;
}
