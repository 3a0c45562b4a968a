//! Driving port reporting whether the service has data to serve.

use async_trait::async_trait;

use crate::domain::AppStatus;

/// Availability query backing `GET /api/status`.
#[async_trait]
pub trait StatusQuery: Send + Sync {
    /// Current availability; never fails, store errors read as unavailable.
    async fn status(&self) -> AppStatus;
}
