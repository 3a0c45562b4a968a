//! Process-local user storage seeded from a JSON file.

mod in_memory_user_repository;
mod seed;

pub use in_memory_user_repository::InMemoryUserRepository;
pub use seed::{SeedError, load_seed_users};
