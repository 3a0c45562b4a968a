//! Seed file loading for the in-memory user store.
//!
//! The seed file is a JSON array of users in the wire format. Every record is
//! validated through [`User`]'s deserialiser, and the set as a whole must not
//! repeat an identifier or an email address.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use cap_std::{ambient_authority, fs::Dir};
use thiserror::Error;
use tracing::info;

use crate::domain::{User, UserId};

/// Errors raised while loading a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The file could not be opened or read.
    #[error("failed to read seed file at {path}: {source}")]
    Read {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The file is not a valid array of users.
    #[error("invalid seed file at {path}: {source}")]
    Parse {
        /// Path to the seed file.
        path: PathBuf,
        /// Underlying decoding error.
        #[source]
        source: serde_json::Error,
    },
    /// Two records share an identifier.
    #[error("seed file repeats user id {id}")]
    DuplicateId {
        /// Repeated identifier.
        id: UserId,
    },
    /// Two records share an email address.
    #[error("seed file repeats email {email}")]
    DuplicateEmail {
        /// Repeated address.
        email: String,
    },
}

impl SeedError {
    /// Whether the failure is simply that the file does not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

fn read_seed_file(path: &Path) -> Result<Vec<u8>, SeedError> {
    let read_error = |source| SeedError::Read {
        path: path.to_path_buf(),
        source,
    };
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let file_name = path.file_name().ok_or_else(|| {
        read_error(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "seed path must name a file",
        ))
    })?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(read_error)?;
    dir.read(Path::new(file_name)).map_err(read_error)
}

/// Load and validate the users in the seed file at `path`.
///
/// # Examples
///
/// ```rust,no_run
/// use std::path::Path;
/// use user_directory::outbound::memory::load_seed_users;
///
/// let users = load_seed_users(Path::new("users.json")).expect("seed file loads");
/// println!("{} users", users.len());
/// ```
pub fn load_seed_users(path: &Path) -> Result<Vec<User>, SeedError> {
    let payload = read_seed_file(path)?;
    let users: Vec<User> = serde_json::from_slice(&payload).map_err(|source| SeedError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    let mut ids = HashSet::new();
    let mut emails = HashSet::new();
    for user in &users {
        if !ids.insert(user.id()) {
            return Err(SeedError::DuplicateId { id: user.id() });
        }
        if !emails.insert(user.email().as_ref().to_ascii_lowercase()) {
            return Err(SeedError::DuplicateEmail {
                email: user.email().as_ref().to_owned(),
            });
        }
    }

    info!(path = %path.display(), count = users.len(), "loaded seed users");
    Ok(users)
}
