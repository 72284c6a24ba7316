//! Shared validation helpers for inbound HTTP adapters.
//!
//! Query parameters on the listing endpoint are lenient: a value that does
//! not parse is treated as absent rather than rejected.

use std::str::FromStr;

use pagination::Cursor;
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
        }
    }
}

/// Newtype wrapper for HTTP field names.
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

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::validation(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

/// Trimmed value, or `None` when absent or blank.
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_owned())
        .filter(|trimmed| !trimmed.is_empty())
}

/// Parsed value, or `None` when absent, blank or malformed.
pub(crate) fn lenient<T: FromStr>(value: Option<&str>, field: FieldName) -> Option<T> {
    let raw = value.map(str::trim).filter(|raw| !raw.is_empty())?;
    match raw.parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            debug!(field = field.as_str(), value = raw, "ignoring malformed query parameter");
            None
        }
    }
}

/// Decoded cursor, or `None` when absent or malformed.
pub(crate) fn lenient_cursor(value: Option<&str>) -> Option<Cursor> {
    lenient(value, FieldName::new("cursor"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;

    const YEAR: FieldName = FieldName::new("year");

    #[rstest]
    #[case(Some("2010"), Some(2010))]
    #[case(Some(" 1999 "), Some(1999))]
    #[case(Some("abc"), None)]
    #[case(Some(""), None)]
    #[case(None, None)]
    fn lenient_numbers(#[case] raw: Option<&str>, #[case] expected: Option<i32>) {
        assert_eq!(lenient::<i32>(raw, YEAR), expected);
    }

    #[rstest]
    #[case(Some("40"), Some(Cursor::from_offset(40)))]
    #[case(Some("-1"), None)]
    #[case(Some("next"), None)]
    #[case(None, None)]
    fn lenient_cursors(#[case] raw: Option<&str>, #[case] expected: Option<Cursor>) {
        assert_eq!(lenient_cursor(raw), expected);
    }

    #[rstest]
    #[case(Some("  Drama ".to_owned()), Some("Drama".to_owned()))]
    #[case(Some("   ".to_owned()), None)]
    #[case(None, None)]
    fn non_blank_trims(#[case] raw: Option<String>, #[case] expected: Option<String>) {
        assert_eq!(non_blank(raw), expected);
    }

    #[rstest]
    fn missing_field_carries_field_details() {
        let err = missing_field_error(FieldName::new("rating"));
        assert_eq!(err.code(), DomainCode::ValidationError);
        assert_eq!(
            err.details(),
            Some(&json!({ "field": "rating", "code": "missing_field" }))
        );
    }
}
