//! User directory domain service.
//!
//! Implements the driving ports on top of a [`UserRepository`], turning
//! storage outcomes into domain errors: a missing row becomes
//! [`Error::user_not_found`], a duplicate email becomes a conflict, and any
//! other storage failure is logged and surfaced as an internal error.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use tracing::{error, warn};

use crate::domain::error::EMAIL_TAKEN_MESSAGE;
use crate::domain::ports::{
    StatusQuery, UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{AppStatus, Error, NewUser, User, UserId, UserPatch};

/// Service implementing [`UsersQuery`], [`UsersCommand`] and [`StatusQuery`].
pub struct UserDirectoryService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for UserDirectoryService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ?Sized> UserDirectoryService<R> {
    /// Create a service over the given repository.
    pub const fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

fn map_persistence_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict(EMAIL_TAKEN_MESSAGE),
        UserPersistenceError::Connection { message } => {
            error!(%message, "user repository unavailable");
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            error!(%message, "user repository query failed");
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> UsersQuery for UserDirectoryService<R>
where
    R: UserRepository + ?Sized,
{
    async fn get_user(&self, id: UserId) -> Result<User, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(Error::user_not_found)
    }

    async fn list_users(&self, request: PageRequest) -> Result<Page<User>, Error> {
        self.repository
            .list_page(request)
            .await
            .map_err(map_persistence_error)
    }
}

#[async_trait]
impl<R> UsersCommand for UserDirectoryService<R>
where
    R: UserRepository + ?Sized,
{
    async fn create_user(&self, user: NewUser) -> Result<User, Error> {
        self.repository
            .create(user)
            .await
            .map_err(map_persistence_error)
    }

    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, Error> {
        self.repository
            .update(id, patch)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(Error::user_not_found)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let removed = self
            .repository
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        if removed {
            Ok(())
        } else {
            Err(Error::user_not_found())
        }
    }
}

#[async_trait]
impl<R> StatusQuery for UserDirectoryService<R>
where
    R: UserRepository + ?Sized,
{
    async fn status(&self) -> AppStatus {
        let users = match self.repository.probe().await {
            Ok(available) => available,
            Err(err) => {
                warn!(error = %err, "user store probe failed");
                false
            }
        };
        AppStatus { users }
    }
}

#[cfg(test)]
#[path = "user_directory_tests.rs"]
mod tests;
