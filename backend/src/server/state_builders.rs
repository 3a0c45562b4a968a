//! Startup selection of the user store.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};

use user_directory::domain::ports::{UserPersistenceError, UserRepository};
use user_directory::outbound::memory::{InMemoryUserRepository, SeedError, load_seed_users};
use user_directory::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, PoolError, ensure_users_table,
};
use user_directory::settings::AppSettings;

/// Failures that prevent the service from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    /// The database pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// The users table could not be ensured.
    #[error("failed to prepare users table: {0}")]
    Schema(#[from] UserPersistenceError),
    /// The seed file exists but is unusable.
    #[error(transparent)]
    Seed(#[from] SeedError),
}

impl From<StartupError> for std::io::Error {
    fn from(err: StartupError) -> Self {
        Self::other(err.to_string())
    }
}

/// Pick the relational store when a database URL is configured, otherwise
/// the in-memory store seeded from the users file.
///
/// A missing seed file starts an empty in-memory store.
pub async fn build_user_repository(
    settings: &AppSettings,
) -> Result<Arc<dyn UserRepository>, StartupError> {
    if let Some(url) = settings.database_url() {
        let config = PoolConfig::new(url).with_max_size(settings.database_pool_size());
        let pool = DbPool::new(config).await?;
        ensure_users_table(&pool).await?;
        info!(
            store = "postgres",
            pool_size = settings.database_pool_size(),
            "user store ready"
        );
        return Ok(Arc::new(DieselUserRepository::new(pool)));
    }

    let path = settings.users_file();
    let users = match load_seed_users(&path) {
        Ok(users) => users,
        Err(err) if err.is_not_found() => {
            warn!(path = %path.display(), "seed file not found; starting with no users");
            Vec::new()
        }
        Err(err) => return Err(err.into()),
    };
    info!(store = "memory", count = users.len(), "user store ready");
    Ok(Arc::new(InMemoryUserRepository::with_users(users)))
}
