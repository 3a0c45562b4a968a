//! Service availability snapshot.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of `GET /api/status`.
///
/// `users` is true when the user store is reachable and populated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppStatus {
    /// Whether user data is available.
    pub users: bool,
}
