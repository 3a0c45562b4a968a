//! Row types mapping the `users` table to and from domain values.

use diesel::prelude::*;

use crate::domain::ports::UserPersistenceError;
use crate::domain::{NewUser, User, UserPatch};

use super::schema::users;

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub avatar: String,
}

impl UserRow {
    /// Validate a stored row; invalid data is reported as a query error.
    pub(crate) fn into_user(self) -> Result<User, UserPersistenceError> {
        User::try_from_parts(
            i64::from(self.id),
            &self.email,
            &self.first_name,
            &self.last_name,
            &self.avatar,
        )
        .map_err(|err| UserPersistenceError::query(format!("invalid user row {}: {err}", self.id)))
    }
}

/// Row inserted into `users`; the id comes from the sequence.
#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub email: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub avatar: &'a str,
}

impl<'a> From<&'a NewUser> for NewUserRow<'a> {
    fn from(user: &'a NewUser) -> Self {
        Self {
            email: user.email().as_ref(),
            first_name: user.first_name(),
            last_name: user.last_name(),
            avatar: user.avatar(),
        }
    }
}

/// Column updates for a patch; `None` columns are left untouched.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserChangeset<'a> {
    pub email: Option<&'a str>,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
    pub avatar: Option<&'a str>,
}

impl<'a> From<&'a UserPatch> for UserChangeset<'a> {
    fn from(patch: &'a UserPatch) -> Self {
        Self {
            email: patch.email().map(AsRef::as_ref),
            first_name: patch.first_name(),
            last_name: patch.last_name(),
            avatar: patch.avatar(),
        }
    }
}
