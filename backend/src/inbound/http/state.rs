//! Shared HTTP adapter state.
//!
//! Handlers receive this via `actix_web::web::Data` and depend only on the
//! driving ports, so tests can build it over any [`UserRepository`].

use std::sync::Arc;

use crate::domain::UserDirectoryService;
use crate::domain::ports::{StatusQuery, UserRepository, UsersCommand, UsersQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Read-side user use-cases.
    pub users: Arc<dyn UsersQuery>,
    /// Write-side user use-cases.
    pub users_command: Arc<dyn UsersCommand>,
    /// Availability reporting.
    pub status: Arc<dyn StatusQuery>,
}

impl HttpState {
    /// Bundle explicit port implementations.
    pub fn new(
        users: Arc<dyn UsersQuery>,
        users_command: Arc<dyn UsersCommand>,
        status: Arc<dyn StatusQuery>,
    ) -> Self {
        Self {
            users,
            users_command,
            status,
        }
    }

    /// Wire every port through one [`UserDirectoryService`] over `repository`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use user_directory::inbound::http::state::HttpState;
    /// use user_directory::outbound::memory::InMemoryUserRepository;
    ///
    /// let state = HttpState::for_repository(Arc::new(InMemoryUserRepository::new()));
    /// # drop(state);
    /// ```
    pub fn for_repository(repository: Arc<dyn UserRepository>) -> Self {
        let service = Arc::new(UserDirectoryService::new(repository));
        Self::new(service.clone(), service.clone(), service)
    }
}
