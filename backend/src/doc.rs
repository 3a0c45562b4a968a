//! OpenAPI document for the REST API.
//!
//! Served by Swagger UI at `/docs` in debug builds.

use utoipa::OpenApi;

use crate::domain::{AppStatus, User};
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::users::{CreateUserRequest, PatchUserRequest};
use crate::inbound::http::validation::FieldViolation;

/// OpenAPI aggregate of every HTTP endpoint.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "User directory API",
        description = "Paginated user directory with CRUD operations and status probes."
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::status::status,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        AppStatus,
        CreateUserRequest,
        PatchUserRequest,
        ErrorBody,
        FieldViolation
    )),
    tags(
        (name = "users", description = "User directory operations"),
        (name = "status", description = "Service availability"),
        (name = "health", description = "Orchestrator probes")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/api/users/")]
    #[case("/api/users/{user_id}")]
    #[case("/api/status")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn documents_every_path(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[test]
    fn user_collection_documents_list_and_create() {
        let doc = ApiDoc::openapi();
        let item = doc.paths.paths.get("/api/users/").expect("collection path");
        assert!(item.get.is_some());
        assert!(item.post.is_some());
    }

    #[test]
    fn registers_payload_schemas() {
        let doc = ApiDoc::openapi();
        let schemas = doc.components.expect("components").schemas;
        for name in ["User", "AppStatus", "ErrorBody", "FieldViolation"] {
            assert!(schemas.contains_key(name), "missing schema {name}");
        }
    }
}
