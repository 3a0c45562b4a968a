//! HTTP inbound adapter exposing the REST endpoints.

use actix_web::web;

pub mod error;
pub mod health;
pub mod state;
pub mod status;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register every route together with the extractor error handlers.
///
/// Callers still provide [`state::HttpState`] and [`health::HealthState`] as
/// app data and wrap the app in [`Trace`](crate::middleware::Trace).
///
/// # Examples
/// ```
/// use std::sync::Arc;
/// use actix_web::{App, web};
/// use user_directory::inbound::http::{self, health::HealthState, state::HttpState};
/// use user_directory::middleware::Trace;
/// use user_directory::outbound::memory::InMemoryUserRepository;
///
/// let state = HttpState::for_repository(Arc::new(InMemoryUserRepository::new()));
/// let app = App::new()
///     .app_data(web::Data::new(state))
///     .app_data(web::Data::new(HealthState::new()))
///     .wrap(Trace)
///     .configure(http::configure);
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(
            web::scope("/api")
                .service(status::status)
                .configure(users::configure),
        )
        .service(health::ready)
        .service(health::live);
}
