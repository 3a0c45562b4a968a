//! Domain primitives, services and ports.
//!
//! Purpose: define strongly typed user records and the use-cases that
//! operate on them, independent of HTTP and storage technology.
//!
//! Public surface:
//! - [`User`], [`NewUser`], [`UserPatch`] and their validated field types.
//! - [`Error`] and [`ErrorCode`] for transport-agnostic failures.
//! - [`UserDirectoryService`] implementing the driving ports in [`ports`].

pub mod error;
pub mod ports;
mod status;
mod trace_id;
pub mod user;
mod user_directory;

pub use self::error::{Error, ErrorCode};
pub use self::status::AppStatus;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{
    AvatarUrl, Email, MIN_USER_ID, NewUser, PersonName, User, UserField, UserId, UserIdError,
    UserPatch, UserRecordError, UserValidationError,
};
pub use self::user_directory::UserDirectoryService;
