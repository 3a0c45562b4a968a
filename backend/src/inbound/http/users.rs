//! Users API handlers.
//!
//! ```text
//! GET    /api/users/?page=1&size=6
//! GET    /api/users/{user_id}
//! POST   /api/users/ {"email":"..","first_name":"..","last_name":"..","avatar":".."}
//! PATCH  /api/users/{user_id} {"last_name":".."}
//! DELETE /api/users/{user_id}
//! ```
//!
//! Identifiers are taken from the path as raw text so the adapter controls
//! the parse, range, existence ordering of failures.

use actix_web::{HttpResponse, web};
use pagination::Page;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{Error, ErrorCode, NewUser, User, UserField, UserPatch, UserValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldViolation, parse_page_request, parse_user_id, user_field_violation, violations_error,
};

/// Query parameters for `GET /api/users/`.
///
/// Values stay textual until [`parse_page_request`] so that non-integers are
/// reported per field.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListUsersQuery {
    /// 1-based page index.
    #[param(value_type = Option<u64>, minimum = 1, example = 1)]
    pub page: Option<String>,
    /// Page length.
    #[param(value_type = Option<u64>, minimum = 1, maximum = 100, example = 6)]
    pub size: Option<String>,
}

/// Body of `POST /api/users/`.
///
/// Any `id` supplied by the client is ignored; the store assigns one.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Contact email address.
    #[schema(example = "janet.weaver@reqres.in")]
    pub email: Option<String>,
    /// Given name.
    #[schema(example = "Janet")]
    pub first_name: Option<String>,
    /// Family name.
    #[schema(example = "Weaver")]
    pub last_name: Option<String>,
    /// Avatar image URL.
    #[schema(example = "https://reqres.in/img/faces/2-image.jpg")]
    pub avatar: Option<String>,
}

/// Body of `PATCH /api/users/{user_id}`; absent or null fields are kept.
#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct PatchUserRequest {
    /// Replacement email address.
    pub email: Option<String>,
    /// Replacement given name.
    pub first_name: Option<String>,
    /// Replacement family name.
    pub last_name: Option<String>,
    /// Replacement avatar URL.
    pub avatar: Option<String>,
}

fn raw_field<'a>(
    field: UserField,
    email: Option<&'a str>,
    first_name: Option<&'a str>,
    last_name: Option<&'a str>,
    avatar: Option<&'a str>,
) -> Option<&'a str> {
    match field {
        UserField::Email => email,
        UserField::FirstName => first_name,
        UserField::LastName => last_name,
        UserField::Avatar => avatar,
    }
}

impl CreateUserRequest {
    fn field(&self, field: UserField) -> Option<&str> {
        raw_field(
            field,
            self.email.as_deref(),
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.avatar.as_deref(),
        )
    }

    fn into_new_user(self) -> Result<NewUser, Error> {
        let missing: Vec<FieldViolation> = [
            UserField::Email,
            UserField::FirstName,
            UserField::LastName,
            UserField::Avatar,
        ]
        .into_iter()
        .filter(|field| self.field(*field).is_none())
        .map(FieldViolation::missing)
        .collect();
        if !missing.is_empty() {
            return Err(violations_error(ErrorCode::ValidationFailure, &missing));
        }

        NewUser::try_from_parts(
            self.field(UserField::Email).unwrap_or_default(),
            self.field(UserField::FirstName).unwrap_or_default(),
            self.field(UserField::LastName).unwrap_or_default(),
            self.field(UserField::Avatar).unwrap_or_default(),
        )
        .map_err(|errors| body_error(&errors, |field| self.field(field)))
    }
}

impl PatchUserRequest {
    fn field(&self, field: UserField) -> Option<&str> {
        raw_field(
            field,
            self.email.as_deref(),
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.avatar.as_deref(),
        )
    }

    fn into_patch(self) -> Result<UserPatch, Error> {
        UserPatch::try_from_parts(
            self.email.as_deref(),
            self.first_name.as_deref(),
            self.last_name.as_deref(),
            self.avatar.as_deref(),
        )
        .map_err(|errors| body_error(&errors, |field| self.field(field)))
    }
}

fn body_error<'a>(
    errors: &[UserValidationError],
    raw: impl Fn(UserField) -> Option<&'a str>,
) -> Error {
    let violations: Vec<FieldViolation> = errors
        .iter()
        .map(|err| user_field_violation(err, raw(err.field())))
        .collect();
    violations_error(ErrorCode::ValidationFailure, &violations)
}

/// List one page of users.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use user_directory::inbound::http::users;
///
/// let app = App::new().service(web::scope("/api").configure(users::configure));
/// ```
#[utoipa::path(
    get,
    path = "/api/users/",
    params(ListUsersQuery),
    responses(
        (status = 200, description = "One page of users", body = Page<User>),
        (status = 422, description = "Invalid page or size", body = ErrorBody),
        (status = 500, description = "Internal server error", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
pub async fn list_users(
    state: web::Data<HttpState>,
    query: web::Query<ListUsersQuery>,
) -> ApiResult<web::Json<Page<User>>> {
    let request = parse_page_request(query.page.as_deref(), query.size.as_deref())?;
    let page = state.users.list_users(request).await?;
    Ok(web::Json(page))
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/api/users/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier, at least 1")),
    responses(
        (status = 200, description = "The user", body = User),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 422, description = "Malformed or out of range identifier", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path)?;
    let user = state.users.get_user(id).await?;
    Ok(web::Json(user))
}

/// Create a user with a store-assigned identifier.
#[utoipa::path(
    post,
    path = "/api/users/",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created user", body = User),
        (status = 409, description = "Email already registered", body = ErrorBody),
        (status = 422, description = "Invalid payload", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let new_user = payload.into_inner().into_new_user()?;
    let user = state.users_command.create_user(new_user).await?;
    Ok(HttpResponse::Created().json(user))
}

/// Apply a partial update to a user.
///
/// The body is decoded only after the identifier parses, so a malformed id
/// is reported ahead of a malformed body.
#[utoipa::path(
    patch,
    path = "/api/users/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier, at least 1")),
    request_body = PatchUserRequest,
    responses(
        (status = 200, description = "Updated user", body = User),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 409, description = "Email already registered", body = ErrorBody),
        (status = 422, description = "Invalid identifier or payload", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: Result<web::Json<PatchUserRequest>, actix_web::Error>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path)?;
    let patch = payload?.into_inner().into_patch()?;
    let user = state.users_command.update_user(id, patch).await?;
    Ok(web::Json(user))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/users/{user_id}",
    params(("user_id" = i64, Path, description = "User identifier, at least 1")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found", body = ErrorBody),
        (status = 422, description = "Invalid identifier", body = ErrorBody)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&path)?;
    state.users_command.delete_user(id).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the user routes; mount under `/api`.
///
/// The collection answers both with and without a trailing slash.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(["/users", "/users/"])
            .route(web::get().to(list_users))
            .route(web::post().to(create_user)),
    )
    .service(
        web::resource("/users/{user_id}")
            .route(web::get().to(get_user))
            .route(web::patch().to(update_user))
            .route(web::delete().to(delete_user)),
    );
}
