//! PostgreSQL persistence adapters built on Diesel and `diesel-async`.

mod bootstrap;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use bootstrap::ensure_users_table;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DEFAULT_POOL_SIZE, DbPool, PoolConfig, PoolError};
