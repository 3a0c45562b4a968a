//! Service status endpoint.

use actix_web::{get, web};

use crate::domain::AppStatus;
use crate::inbound::http::state::HttpState;

/// Report whether user data is available.
///
/// Always 200; an unreachable or empty store reads as `{"users": false}`.
#[utoipa::path(
    get,
    path = "/api/status",
    responses((status = 200, description = "Service status", body = AppStatus)),
    tags = ["status"],
    operation_id = "getStatus"
)]
#[get("/status")]
pub async fn status(state: web::Data<HttpState>) -> web::Json<AppStatus> {
    web::Json(state.status.status().await)
}
