//! Startup DDL for the relational user store.

use diesel_async::RunQueryDsl;
use tracing::info;

use crate::domain::ports::UserPersistenceError;

use super::pool::DbPool;

const CREATE_USERS_TABLE: &str = "CREATE TABLE IF NOT EXISTS users (
    id SERIAL PRIMARY KEY,
    email VARCHAR NOT NULL UNIQUE,
    first_name VARCHAR NOT NULL,
    last_name VARCHAR NOT NULL,
    avatar VARCHAR NOT NULL
)";

// Emails are unique regardless of case.
const CREATE_EMAIL_INDEX: &str =
    "CREATE UNIQUE INDEX IF NOT EXISTS users_email_lower_key ON users (lower(email))";

/// Create the `users` table and its email index if they do not exist yet.
///
/// # Errors
///
/// Returns a connection error when no connection can be checked out and a
/// query error when the statement fails.
pub async fn ensure_users_table(pool: &DbPool) -> Result<(), UserPersistenceError> {
    let mut conn = pool
        .get()
        .await
        .map_err(|err| UserPersistenceError::connection(err.message()))?;
    for statement in [CREATE_USERS_TABLE, CREATE_EMAIL_INDEX] {
        diesel::sql_query(statement)
            .execute(&mut conn)
            .await
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
    }
    info!("users table ensured");
    Ok(())
}
