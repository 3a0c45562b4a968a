//! Driving port for creating, updating and deleting users.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserId, UserPatch};

/// Write-side user use-cases.
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user; any client-chosen identifier has already been dropped.
    async fn create_user(&self, user: NewUser) -> Result<User, Error>;

    /// Apply a partial update to an existing user.
    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, Error>;

    /// Delete an existing user.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
