//! HTTP server configuration object.

use std::sync::Arc;

use user_directory::domain::ports::UserRepository;

/// Everything [`create_server`](super::create_server) needs to start.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) repository: Arc<dyn UserRepository>,
}

impl ServerConfig {
    /// Bind to `host:port` and serve users from `repository`.
    #[must_use]
    pub fn new(host: impl Into<String>, port: u16, repository: Arc<dyn UserRepository>) -> Self {
        Self {
            bind_addr: (host.into(), port),
            repository,
        }
    }
}
