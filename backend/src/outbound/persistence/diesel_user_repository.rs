//! PostgreSQL-backed user repository.
//!
//! Mutations are single statements. `list_page` counts and windows inside
//! one read-only `REPEATABLE READ` transaction so both observe one snapshot.
//! Identifiers beyond the `int4` column range cannot exist and read as absent.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use pagination::{Page, PageRequest};
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId, UserPatch};

use super::models::{NewUserRow, UserChangeset, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over `pool`.
    pub const fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    UserPersistenceError::connection(error.message())
}

fn map_diesel_error(error: DieselError, email: Option<&str>) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            UserPersistenceError::duplicate_email(email.unwrap_or("unknown"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

fn column_id(id: UserId) -> Option<i32> {
    i32::try_from(id.get()).ok()
}

fn window(request: PageRequest) -> (i64, i64) {
    let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
    let limit = i64::try_from(request.limit()).unwrap_or(i64::MAX);
    (offset, limit)
}

async fn fetch_page(
    conn: &mut AsyncPgConnection,
    request: PageRequest,
) -> Result<(i64, Vec<UserRow>), DieselError> {
    let (offset, limit) = window(request);
    conn.build_transaction()
        .read_only()
        .repeatable_read()
        .run(|conn| {
            async move {
                let total: i64 = users::table.count().get_result(conn).await?;
                let rows: Vec<UserRow> = users::table
                    .select(UserRow::as_select())
                    .order_by(users::id.asc())
                    .offset(offset)
                    .limit(limit)
                    .load(conn)
                    .await?;
                Ok((total, rows))
            }
            .scope_boxed()
        })
        .await
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        let Some(id) = column_id(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, None))?;
        row.map(UserRow::into_user).transpose()
    }

    async fn list_page(&self, request: PageRequest) -> Result<Page<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let (total, rows) = fetch_page(&mut conn, request)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        let items = rows
            .into_iter()
            .map(UserRow::into_user)
            .collect::<Result<Vec<_>, _>>()?;
        let total = u64::try_from(total).unwrap_or_default();
        Ok(Page::from_parts(items, total, request))
    }

    async fn create(&self, user: NewUser) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: UserRow = diesel::insert_into(users::table)
            .values(NewUserRow::from(&user))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, Some(user.email().as_ref())))?;
        row.into_user()
    }

    async fn update(
        &self,
        id: UserId,
        patch: UserPatch,
    ) -> Result<Option<User>, UserPersistenceError> {
        if patch.is_empty() {
            return self.find_by_id(id).await;
        }
        let Some(column) = column_id(id) else {
            return Ok(None);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = diesel::update(users::table.find(column))
            .set(UserChangeset::from(&patch))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, patch.email().map(AsRef::as_ref)))?;
        row.map(UserRow::into_user).transpose()
    }

    async fn delete(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        let Some(id) = column_id(id) else {
            return Ok(false);
        };
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let removed = diesel::delete(users::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        Ok(removed > 0)
    }

    async fn probe(&self) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        diesel::sql_query("SELECT 1")
            .execute(&mut conn)
            .await
            .map_err(|err| map_diesel_error(err, None))?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct Info(&'static str);

    impl diesel::result::DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.0
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            None
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(kind: DatabaseErrorKind) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info("boom")))
    }

    #[rstest]
    fn unique_violation_is_duplicate_email() {
        let err = map_diesel_error(
            database_error(DatabaseErrorKind::UniqueViolation),
            Some("ada@example.com"),
        );
        assert_eq!(err, UserPersistenceError::duplicate_email("ada@example.com"));
    }

    #[rstest]
    #[case(database_error(DatabaseErrorKind::ClosedConnection), true)]
    #[case(database_error(DatabaseErrorKind::CheckViolation), false)]
    #[case(DieselError::NotFound, false)]
    fn other_failures_split_by_connection(#[case] error: DieselError, #[case] connection: bool) {
        let mapped = map_diesel_error(error, None);
        assert_eq!(
            matches!(mapped, UserPersistenceError::Connection { .. }),
            connection
        );
    }

    #[rstest]
    fn pool_errors_are_connection_errors() {
        let mapped = map_pool_error(PoolError::checkout("timed out"));
        assert_eq!(mapped, UserPersistenceError::connection("timed out"));
    }

    #[rstest]
    #[case(1, Some(1))]
    #[case(i64::from(i32::MAX), Some(i32::MAX))]
    #[case(i64::from(i32::MAX) + 1, None)]
    fn ids_beyond_int4_have_no_column_value(#[case] raw: i64, #[case] expected: Option<i32>) {
        let id = UserId::new(raw).expect("valid id");
        assert_eq!(column_id(id), expected);
    }

    #[rstest]
    fn window_matches_page_request() {
        let request = PageRequest::new(3, 5).expect("valid request");
        assert_eq!(window(request), (10, 5));
    }
}
