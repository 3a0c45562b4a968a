//! In-memory user repository.
//!
//! One `RwLock` guards both the ordered record list and the id counter, so
//! every read sees a single snapshot and every mutation is atomic. The lock
//! is never held across an `.await`.

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use pagination::{Page, PageRequest, paginate};

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, NewUser, User, UserId, UserPatch};

#[derive(Debug)]
struct UserTable {
    users: Vec<User>,
    next_id: i64,
}

impl UserTable {
    fn position(&self, id: UserId) -> Option<usize> {
        self.users.iter().position(|user| user.id() == id)
    }

    fn email_taken(&self, email: &Email, except: Option<UserId>) -> bool {
        self.users
            .iter()
            .any(|user| Some(user.id()) != except && user.email().matches(email))
    }
}

/// Process-local [`UserRepository`] keeping users in insertion order.
///
/// # Examples
/// ```
/// use user_directory::outbound::memory::InMemoryUserRepository;
///
/// let repository = InMemoryUserRepository::new();
/// # drop(repository);
/// ```
#[derive(Debug)]
pub struct InMemoryUserRepository {
    table: RwLock<UserTable>,
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserRepository {
    /// Empty store; the first created user gets id 1.
    #[must_use]
    pub fn new() -> Self {
        Self::with_users(Vec::new())
    }

    /// Store pre-populated with `users`, kept in the given order.
    ///
    /// New identifiers start after the highest seeded one.
    #[must_use]
    pub fn with_users(users: Vec<User>) -> Self {
        let highest = users.iter().map(|user| user.id().get()).max().unwrap_or(0);
        Self {
            table: RwLock::new(UserTable {
                users,
                next_id: highest.saturating_add(1),
            }),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, UserTable>, UserPersistenceError> {
        self.table
            .read()
            .map_err(|_| UserPersistenceError::query("user table lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, UserTable>, UserPersistenceError> {
        self.table
            .write()
            .map_err(|_| UserPersistenceError::query("user table lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let table = self.read()?;
        Ok(table.users.iter().find(|user| user.id() == id).cloned())
    }

    async fn list_page(&self, request: PageRequest) -> Result<Page<User>, UserPersistenceError> {
        let table = self.read()?;
        Ok(paginate(&table.users, request))
    }

    async fn create(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut table = self.write()?;
        if table.email_taken(user.email(), None) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        let id = UserId::new(table.next_id)
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        table.next_id = table
            .next_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id space exhausted"))?;
        let created = User::new(id, user);
        table.users.push(created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: UserId,
        patch: UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        let mut table = self.write()?;
        let Some(index) = table.position(id) else {
            return Ok(None);
        };
        if let Some(email) = patch.email() {
            if table.email_taken(email, Some(id)) {
                return Err(UserPersistenceError::duplicate_email(email.as_ref()));
            }
        }
        let Some(user) = table.users.get_mut(index) else {
            return Ok(None);
        };
        user.apply_patch(patch);
        Ok(Some(user.clone()))
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let mut table = self.write()?;
        let Some(index) = table.position(id) else {
            return Ok(false);
        };
        table.users.remove(index);
        Ok(true)
    }

    async fn probe(&self) -> Result<bool, UserPersistenceError> {
        let table = self.read()?;
        Ok(!table.users.is_empty())
    }
}
