//! Shared validation helpers for inbound HTTP adapters.
//!
//! Translate field-level domain validation failures into `400` responses
//! with a machine-readable `field`/`code` detail payload.

use serde_json::json;

use crate::domain::{Description, Error, FieldValidationError, Name};

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &str {
        self.0
    }
}

fn code_for(err: &FieldValidationError) -> &'static str {
    match err {
        FieldValidationError::EmptyName => "empty_name",
        FieldValidationError::NameTooLong { .. } => "name_too_long",
        FieldValidationError::DescriptionTooLong { .. } => "description_too_long",
    }
}

fn field_error(err: &FieldValidationError, field: FieldName) -> Error {
    Error::invalid_request(err.to_string()).with_details(json!({
        "field": field.as_str(),
        "code": code_for(err),
    }))
}

/// Validate a required name field.
pub(crate) fn parse_name(value: String, field: FieldName) -> Result<Name, Error> {
    Name::new(value).map_err(|err| field_error(&err, field))
}

/// Validate an optional description field.
pub(crate) fn parse_description(
    value: Option<String>,
    field: FieldName,
) -> Result<Option<Description>, Error> {
    value
        .map(|v| Description::new(v).map_err(|err| field_error(&err, field)))
        .transpose()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::{DESCRIPTION_MAX, NAME_MAX};
    use rstest::rstest;
    use serde_json::Value;

    #[rstest]
    fn valid_fields_pass_through() {
        let name = parse_name("Antwerp".into(), FieldName::new("name")).expect("valid");
        assert_eq!(name.as_str(), "Antwerp");
        let description =
            parse_description(None, FieldName::new("description")).expect("valid");
        assert!(description.is_none());
    }

    #[rstest]
    #[case(String::new(), "empty_name")]
    #[case("x".repeat(NAME_MAX + 1), "name_too_long")]
    fn invalid_names_carry_field_details(#[case] input: String, #[case] code: &str) {
        let err = parse_name(input, FieldName::new("name")).expect_err("invalid");
        assert_eq!(err.code(), crate::domain::ErrorCode::InvalidRequest);
        let details = err.details().expect("details present");
        assert_eq!(details.get("field").and_then(Value::as_str), Some("name"));
        assert_eq!(details.get("code").and_then(Value::as_str), Some(code));
    }

    #[rstest]
    fn overlong_descriptions_carry_field_details() {
        let err = parse_description(
            Some("x".repeat(DESCRIPTION_MAX + 1)),
            FieldName::new("description"),
        )
        .expect_err("invalid");
        let details = err.details().expect("details present");
        assert_eq!(
            details.get("code").and_then(Value::as_str),
            Some("description_too_long")
        );
    }
}
