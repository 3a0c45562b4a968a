//! User data model.
//!
//! Every field of a [`User`] is a validated newtype, so a value that exists is
//! known to satisfy its invariants. Serde goes through the same constructors,
//! which lets seed files and storage rows reuse the checks.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;
use utoipa::ToSchema;

/// Smallest identifier a user may carry.
pub const MIN_USER_ID: i64 = 1;

/// Reasons a raw identifier is not a usable [`UserId`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserIdError {
    /// The input is not an integer at all.
    Malformed {
        /// Raw text as received.
        input: String,
    },
    /// The input is an integer below [`MIN_USER_ID`].
    OutOfRange {
        /// Parsed value.
        value: i64,
    },
}

impl fmt::Display for UserIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Malformed { input } => {
                write!(f, "user id must be an integer, got {input:?}")
            }
            Self::OutOfRange { value } => {
                write!(f, "user id must be at least {MIN_USER_ID}, got {value}")
            }
        }
    }
}

impl std::error::Error for UserIdError {}

/// Positive integer identifier assigned by the store.
///
/// # Examples
/// ```
/// use user_directory::domain::{UserId, UserIdError};
///
/// assert_eq!(UserId::parse("7").map(UserId::get), Ok(7));
/// assert_eq!(UserId::parse("0"), Err(UserIdError::OutOfRange { value: 0 }));
/// assert!(matches!(UserId::parse("abc"), Err(UserIdError::Malformed { .. })));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct UserId(i64);

impl UserId {
    /// Validate an already-parsed integer.
    pub fn new(value: i64) -> Result<Self, UserIdError> {
        if value < MIN_USER_ID {
            return Err(UserIdError::OutOfRange { value });
        }
        Ok(Self(value))
    }

    /// Parse the textual form of an identifier.
    ///
    /// Integer parsing is checked before the range, so `"-3"` is out of range
    /// while `"3.0"` is malformed.
    pub fn parse(raw: &str) -> Result<Self, UserIdError> {
        let value = raw
            .parse::<i64>()
            .map_err(|_| UserIdError::Malformed {
                input: raw.to_owned(),
            })?;
        Self::new(value)
    }

    /// Raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for i64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<i64> for UserId {
    type Error = UserIdError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Mutable user attributes, named as they appear on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UserField {
    /// Contact email address.
    Email,
    /// Given name.
    FirstName,
    /// Family name.
    LastName,
    /// Avatar image URL.
    Avatar,
}

impl UserField {
    /// Field name as serialised.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::FirstName => "first_name",
            Self::LastName => "last_name",
            Self::Avatar => "avatar",
        }
    }
}

impl fmt::Display for UserField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors raised by the user field constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// The email address is not of the form `local@domain.tld`.
    InvalidEmail,
    /// A name field is empty once trimmed.
    EmptyName {
        /// Which name was empty.
        field: UserField,
    },
    /// The avatar is not an absolute http(s) URL.
    InvalidAvatar {
        /// Parser or scheme diagnostic.
        reason: String,
    },
}

impl UserValidationError {
    /// Field the error refers to.
    #[must_use]
    pub const fn field(&self) -> UserField {
        match self {
            Self::InvalidEmail => UserField::Email,
            Self::EmptyName { field } => *field,
            Self::InvalidAvatar { .. } => UserField::Avatar,
        }
    }
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "value is not a valid email address"),
            Self::EmptyName { field } => write!(f, "{field} must not be empty"),
            Self::InvalidAvatar { reason } => {
                write!(f, "avatar must be an absolute http(s) URL: {reason}")
            }
        }
    }
}

impl std::error::Error for UserValidationError {}

static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn email_regex() -> Option<&'static Regex> {
    EMAIL_RE
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok())
        .as_ref()
}

/// Syntactically valid email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Validate and construct an [`Email`], trimming surrounding whitespace.
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        let trimmed = email.trim();
        if !email_regex().is_some_and(|re| re.is_match(trimmed)) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Case-insensitive comparison used for uniqueness checks.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Given or family name, trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonName(String);

impl PersonName {
    /// Validate `name` for `field`, trimming surrounding whitespace.
    pub fn new(field: UserField, name: &str) -> Result<Self, UserValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyName { field });
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for PersonName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

/// Absolute http or https avatar URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AvatarUrl(Url);

impl AvatarUrl {
    /// Parse and validate an avatar URL.
    pub fn new(raw: &str) -> Result<Self, UserValidationError> {
        let url = Url::parse(raw).map_err(|err| UserValidationError::InvalidAvatar {
            reason: err.to_string(),
        })?;
        match url.scheme() {
            "http" | "https" => Ok(Self(url)),
            other => Err(UserValidationError::InvalidAvatar {
                reason: format!("unsupported scheme {other:?}"),
            }),
        }
    }
}

impl AsRef<str> for AvatarUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<AvatarUrl> for String {
    fn from(value: AvatarUrl) -> Self {
        value.0.into()
    }
}

impl TryFrom<String> for AvatarUrl {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

/// Stored user record.
///
/// ## Invariants
/// - `id` is at least [`MIN_USER_ID`] and never reassigned.
/// - names are non-empty once trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "UserDto", into = "UserDto")]
pub struct User {
    #[schema(value_type = i64, example = 1)]
    id: UserId,
    #[schema(value_type = String, example = "george.bluth@reqres.in")]
    email: Email,
    #[schema(value_type = String, example = "George")]
    first_name: PersonName,
    #[schema(value_type = String, example = "Bluth")]
    last_name: PersonName,
    #[schema(value_type = String, example = "https://reqres.in/img/faces/1-image.jpg")]
    avatar: AvatarUrl,
}

impl User {
    /// Assemble a user from an identifier and validated attributes.
    #[must_use]
    pub fn new(id: UserId, attributes: NewUser) -> Self {
        let NewUser {
            email,
            first_name,
            last_name,
            avatar,
        } = attributes;
        Self {
            id,
            email,
            first_name,
            last_name,
            avatar,
        }
    }

    /// Validate raw field values and build a user.
    pub fn try_from_parts(
        id: i64,
        email: &str,
        first_name: &str,
        last_name: &str,
        avatar: &str,
    ) -> Result<Self, UserRecordError> {
        let id = UserId::new(id).map_err(UserRecordError::Id)?;
        let attributes = NewUser::try_from_parts(email, first_name, last_name, avatar)
            .map_err(UserRecordError::Fields)?;
        Ok(Self::new(id, attributes))
    }

    /// Store-assigned identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Contact email address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.first_name.as_ref()
    }

    /// Family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        self.last_name.as_ref()
    }

    /// Avatar image URL.
    #[must_use]
    pub fn avatar(&self) -> &str {
        self.avatar.as_ref()
    }

    /// Overwrite the attributes present in `patch`, leaving the rest intact.
    pub fn apply_patch(&mut self, patch: UserPatch) {
        let UserPatch {
            email,
            first_name,
            last_name,
            avatar,
        } = patch;
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(first_name) = first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            self.last_name = last_name;
        }
        if let Some(avatar) = avatar {
            self.avatar = avatar;
        }
    }
}

/// Reasons raw record data cannot become a [`User`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserRecordError {
    /// The identifier is unusable.
    Id(UserIdError),
    /// One or more attributes failed validation.
    Fields(Vec<UserValidationError>),
}

impl fmt::Display for UserRecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(err) => err.fmt(f),
            Self::Fields(errors) => {
                let joined: Vec<String> = errors
                    .iter()
                    .map(|err| format!("{}: {err}", err.field()))
                    .collect();
                f.write_str(&joined.join("; "))
            }
        }
    }
}

impl std::error::Error for UserRecordError {}

#[derive(Serialize, Deserialize)]
struct UserDto {
    id: i64,
    email: String,
    first_name: String,
    last_name: String,
    avatar: String,
}

impl From<User> for UserDto {
    fn from(value: User) -> Self {
        Self {
            id: value.id.get(),
            email: value.email.into(),
            first_name: value.first_name.0,
            last_name: value.last_name.0,
            avatar: value.avatar.into(),
        }
    }
}

impl TryFrom<UserDto> for User {
    type Error = UserRecordError;

    fn try_from(value: UserDto) -> Result<Self, Self::Error> {
        Self::try_from_parts(
            value.id,
            &value.email,
            &value.first_name,
            &value.last_name,
            &value.avatar,
        )
    }
}

/// Attributes of a user that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    email: Email,
    first_name: PersonName,
    last_name: PersonName,
    avatar: AvatarUrl,
}

impl NewUser {
    const fn new(
        email: Email,
        first_name: PersonName,
        last_name: PersonName,
        avatar: AvatarUrl,
    ) -> Self {
        Self {
            email,
            first_name,
            last_name,
            avatar,
        }
    }

    /// Validate every field, reporting all failures rather than the first.
    ///
    /// # Examples
    /// ```
    /// use user_directory::domain::{NewUser, UserField};
    ///
    /// let errors = NewUser::try_from_parts("nope", " ", "Bluth", "https://x.test/a.png")
    ///     .expect_err("two fields are invalid");
    /// let fields: Vec<_> = errors.iter().map(|e| e.field()).collect();
    /// assert_eq!(fields, vec![UserField::Email, UserField::FirstName]);
    /// ```
    pub fn try_from_parts(
        email: &str,
        first_name: &str,
        last_name: &str,
        avatar: &str,
    ) -> Result<Self, Vec<UserValidationError>> {
        let email = Email::new(email);
        let first_name = PersonName::new(UserField::FirstName, first_name);
        let last_name = PersonName::new(UserField::LastName, last_name);
        let avatar = AvatarUrl::new(avatar);
        match (email, first_name, last_name, avatar) {
            (Ok(email), Ok(first_name), Ok(last_name), Ok(avatar)) => {
                Ok(Self::new(email, first_name, last_name, avatar))
            }
            (email, first_name, last_name, avatar) => Err([
                email.err(),
                first_name.err(),
                last_name.err(),
                avatar.err(),
            ]
            .into_iter()
            .flatten()
            .collect()),
        }
    }

    /// Requested email address.
    #[must_use]
    pub const fn email(&self) -> &Email {
        &self.email
    }

    /// Requested given name.
    #[must_use]
    pub fn first_name(&self) -> &str {
        self.first_name.as_ref()
    }

    /// Requested family name.
    #[must_use]
    pub fn last_name(&self) -> &str {
        self.last_name.as_ref()
    }

    /// Requested avatar URL.
    #[must_use]
    pub fn avatar(&self) -> &str {
        self.avatar.as_ref()
    }
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    email: Option<Email>,
    first_name: Option<PersonName>,
    last_name: Option<PersonName>,
    avatar: Option<AvatarUrl>,
}

impl UserPatch {
    /// Validate whichever raw fields are present.
    pub fn try_from_parts(
        email: Option<&str>,
        first_name: Option<&str>,
        last_name: Option<&str>,
        avatar: Option<&str>,
    ) -> Result<Self, Vec<UserValidationError>> {
        let email = email.map(Email::new).transpose();
        let first_name = first_name
            .map(|name| PersonName::new(UserField::FirstName, name))
            .transpose();
        let last_name = last_name
            .map(|name| PersonName::new(UserField::LastName, name))
            .transpose();
        let avatar = avatar.map(AvatarUrl::new).transpose();
        match (email, first_name, last_name, avatar) {
            (Ok(email), Ok(first_name), Ok(last_name), Ok(avatar)) => Ok(Self {
                email,
                first_name,
                last_name,
                avatar,
            }),
            (email, first_name, last_name, avatar) => Err([
                email.err(),
                first_name.err(),
                last_name.err(),
                avatar.err(),
            ]
            .into_iter()
            .flatten()
            .collect()),
        }
    }

    /// New email address, if the patch changes it.
    #[must_use]
    pub const fn email(&self) -> Option<&Email> {
        self.email.as_ref()
    }

    /// New given name, if the patch changes it.
    #[must_use]
    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_ref().map(AsRef::as_ref)
    }

    /// New family name, if the patch changes it.
    #[must_use]
    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_ref().map(AsRef::as_ref)
    }

    /// New avatar URL, if the patch changes it.
    #[must_use]
    pub fn avatar(&self) -> Option<&str> {
        self.avatar.as_ref().map(AsRef::as_ref)
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.avatar.is_none()
    }
}
