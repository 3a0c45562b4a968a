//! Request validation helpers for the HTTP adapter.
//!
//! Failures are reported as lists of [`FieldViolation`]s, the
//! `{type, loc, msg, input, ctx}` shape clients of this API already parse.

use pagination::{PageParam, PageRequest, PageRequestError};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, UserField, UserId, UserIdError, UserValidationError};

/// Path segment name used for user identifiers.
pub(crate) const USER_ID_PARAM: &str = "user_id";

const INT_PARSING_MSG: &str = "Input should be a valid integer, unable to parse string as an integer";

/// Where a violation was found in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Location {
    Path,
    Query,
    Body,
}

impl Location {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Body => "body",
        }
    }
}

/// One rejected request field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    /// Machine-readable violation kind such as `int_parsing` or `missing`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Request location followed by the field name.
    pub loc: Vec<String>,
    /// Human-readable explanation.
    pub msg: String,
    /// Offending input value.
    #[schema(value_type = Object)]
    pub input: Value,
    /// Constraint parameters, when the violation has any.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub ctx: Option<Value>,
}

impl FieldViolation {
    pub(crate) fn new(
        kind: &str,
        location: Location,
        field: &str,
        msg: impl Into<String>,
        input: Value,
    ) -> Self {
        Self {
            kind: kind.to_owned(),
            loc: vec![location.as_str().to_owned(), field.to_owned()],
            msg: msg.into(),
            input,
            ctx: None,
        }
    }

    pub(crate) fn with_ctx(mut self, ctx: Value) -> Self {
        self.ctx = Some(ctx);
        self
    }

    pub(crate) fn int_parsing(location: Location, field: &str, raw: &str) -> Self {
        Self::new("int_parsing", location, field, INT_PARSING_MSG, json!(raw))
    }

    pub(crate) fn missing(field: UserField) -> Self {
        Self::new(
            "missing",
            Location::Body,
            field.as_str(),
            "Field required",
            Value::Null,
        )
    }
}

/// Wrap violations into a domain error carrying them as details.
pub(crate) fn violations_error(code: ErrorCode, violations: &[FieldViolation]) -> Error {
    let summary = violations
        .iter()
        .map(|violation| format!("{}: {}", violation.loc.join("."), violation.msg))
        .collect::<Vec<_>>()
        .join("; ");
    Error::new(code, summary).with_details(json!(violations))
}

/// Parse a path identifier, checking integer syntax before range.
pub(crate) fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::parse(raw).map_err(|err| match err {
        UserIdError::Malformed { input } => violations_error(
            ErrorCode::MalformedIdentifier,
            &[FieldViolation::int_parsing(Location::Path, USER_ID_PARAM, &input)],
        ),
        UserIdError::OutOfRange { .. } => Error::invalid_identifier(),
    })
}

fn parse_page_param(
    param: PageParam,
    raw: Option<&str>,
    violations: &mut Vec<FieldViolation>,
) -> Option<i64> {
    let raw = raw?;
    match raw.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            violations.push(FieldViolation::int_parsing(
                Location::Query,
                param.as_str(),
                raw,
            ));
            None
        }
    }
}

fn page_bound_violation(err: PageRequestError, raw: Option<&str>) -> FieldViolation {
    let input = raw.map_or_else(|| json!(err.value()), |raw| json!(raw));
    match err {
        PageRequestError::BelowMinimum { param, min, .. } => FieldViolation::new(
            "greater_than_equal",
            Location::Query,
            param.as_str(),
            format!("Input should be greater than or equal to {min}"),
            input,
        )
        .with_ctx(json!({ "ge": min })),
        PageRequestError::AboveMaximum { param, max, .. } => FieldViolation::new(
            "less_than_equal",
            Location::Query,
            param.as_str(),
            format!("Input should be less than or equal to {max}"),
            input,
        )
        .with_ctx(json!({ "le": max })),
    }
}

/// Parse and bound-check the raw `page` and `size` query values.
///
/// Every unparsable parameter is reported. Bounds are checked only once both
/// values parse, `page` before `size`, so at most one bound violation is
/// reported.
pub(crate) fn parse_page_request(
    page: Option<&str>,
    size: Option<&str>,
) -> Result<PageRequest, Error> {
    let mut violations = Vec::new();
    let parsed_page = parse_page_param(PageParam::Page, page, &mut violations);
    let parsed_size = parse_page_param(PageParam::Size, size, &mut violations);
    if !violations.is_empty() {
        return Err(violations_error(ErrorCode::InvalidPageParams, &violations));
    }

    PageRequest::from_optional(parsed_page, parsed_size).map_err(|err| {
        let raw = match err.param() {
            PageParam::Page => page,
            PageParam::Size => size,
        };
        violations_error(
            ErrorCode::InvalidPageParams,
            &[page_bound_violation(err, raw)],
        )
    })
}

/// Translate domain field failures into body violations.
pub(crate) fn user_field_violation(err: &UserValidationError, input: Option<&str>) -> FieldViolation {
    let field = err.field();
    let input = input.map_or(Value::Null, |raw| json!(raw));
    match err {
        UserValidationError::InvalidEmail => FieldViolation::new(
            "value_error",
            Location::Body,
            field.as_str(),
            format!("{err}"),
            input,
        ),
        UserValidationError::EmptyName { .. } => FieldViolation::new(
            "string_too_short",
            Location::Body,
            field.as_str(),
            "String should have at least 1 character",
            input,
        )
        .with_ctx(json!({ "min_length": 1 })),
        UserValidationError::InvalidAvatar { reason } => FieldViolation::new(
            "url_parsing",
            Location::Body,
            field.as_str(),
            format!("Input should be a valid URL, {reason}"),
            input,
        ),
    }
}

/// Violation for a request body that is not valid JSON for its schema.
pub(crate) fn json_invalid(message: &str) -> FieldViolation {
    FieldViolation {
        kind: "json_invalid".to_owned(),
        loc: vec![Location::Body.as_str().to_owned()],
        msg: format!("JSON decode error: {message}"),
        input: Value::Null,
        ctx: None,
    }
}

/// Violation for a query string that could not be decoded at all.
pub(crate) fn query_invalid(message: &str) -> FieldViolation {
    FieldViolation {
        kind: "query_invalid".to_owned(),
        loc: vec![Location::Query.as_str().to_owned()],
        msg: message.to_owned(),
        input: Value::Null,
        ctx: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn malformed_id_yields_int_parsing_detail() {
        let err = parse_user_id("abc").expect_err("malformed");
        assert_eq!(err.code(), ErrorCode::MalformedIdentifier);
        assert_eq!(
            err.details(),
            Some(&json!([{
                "type": "int_parsing",
                "loc": ["path", "user_id"],
                "msg": "Input should be a valid integer, unable to parse string as an integer",
                "input": "abc"
            }]))
        );
    }

    #[rstest]
    #[case("0")]
    #[case("-5")]
    fn out_of_range_id_is_invalid_identifier(#[case] raw: &str) {
        let err = parse_user_id(raw).expect_err("out of range");
        assert_eq!(err.code(), ErrorCode::InvalidIdentifier);
        assert_eq!(err.message(), "Invalid user ID");
        assert!(err.details().is_none());
    }

    #[test]
    fn absent_page_params_use_defaults() {
        let request = parse_page_request(None, None).expect("defaults");
        assert_eq!((request.page(), request.size()), (1, 6));
    }

    #[test]
    fn non_integer_params_are_all_reported() {
        let err = parse_page_request(Some("one"), Some("x")).expect_err("malformed");
        assert_eq!(err.code(), ErrorCode::InvalidPageParams);
        let details = err.details().expect("details");
        assert_eq!(details[0]["loc"], json!(["query", "page"]));
        assert_eq!(details[1]["loc"], json!(["query", "size"]));
        assert_eq!(details[1]["type"], json!("int_parsing"));
    }

    #[rstest]
    #[case(Some("0"), None, "page", "greater_than_equal", json!({ "ge": 1 }))]
    #[case(None, Some("0"), "size", "greater_than_equal", json!({ "ge": 1 }))]
    #[case(None, Some("150"), "size", "less_than_equal", json!({ "le": 100 }))]
    fn bound_violations_carry_constraint_context(
        #[case] page: Option<&str>,
        #[case] size: Option<&str>,
        #[case] field: &str,
        #[case] kind: &str,
        #[case] ctx: Value,
    ) {
        let err = parse_page_request(page, size).expect_err("out of bounds");
        let details = err.details().expect("details");
        assert_eq!(details[0]["loc"], json!(["query", field]));
        assert_eq!(details[0]["type"], json!(kind));
        assert_eq!(details[0]["ctx"], ctx);
    }

    #[test]
    fn blank_name_maps_to_string_too_short() {
        let err = UserValidationError::EmptyName {
            field: UserField::FirstName,
        };
        let violation = user_field_violation(&err, Some(" "));
        assert_eq!(violation.kind, "string_too_short");
        assert_eq!(violation.loc, vec!["body", "first_name"]);
        assert_eq!(violation.input, json!(" "));
    }
}
