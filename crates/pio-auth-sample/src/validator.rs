//! Request body validation.

use pio_spi::FormBody;
use thiserror::Error;

use crate::ERROR_REQUIRED_PARAM_MISSING;

/// Parameter name reported when the whole body is missing.
pub const BODY_PARAM: &str = "Body";

/// Validation failures for a request body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required parameter is absent or empty.
    #[error("required parameter missing: {param}")]
    MissingParameter {
        /// Name of the parameter.
        param: String,
    },
}

impl ValidationError {
    /// Creates a missing-parameter error.
    #[must_use]
    pub fn missing(param: impl Into<String>) -> Self {
        Self::MissingParameter {
            param: param.into(),
        }
    }

    /// Returns the message catalog key describing this error.
    #[must_use]
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::MissingParameter { .. } => ERROR_REQUIRED_PARAM_MISSING,
        }
    }

    /// Returns the offending parameter name.
    #[must_use]
    pub fn param(&self) -> &str {
        match self {
            Self::MissingParameter { param } => param,
        }
    }
}

/// Returns the first value of `key`.
///
/// Additional values are ignored. Whitespace-only values are returned as-is.
///
/// ## Errors
///
/// Returns [`ValidationError::MissingParameter`] if the parameter is absent,
/// has no values, or its first value is empty.
pub fn get_single_value<'a>(body: &'a FormBody, key: &str) -> Result<&'a str, ValidationError> {
    body.get(key)
        .and_then(|values| values.first())
        .map(String::as_str)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ValidationError::missing(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pio_spi::form_body;

    #[test]
    fn returns_first_value() {
        let body = form_body([("k", "first"), ("k", "second")]);
        assert_eq!(get_single_value(&body, "k"), Ok("first"));
    }

    #[test]
    fn absent_parameter_is_missing() {
        let body = form_body([("other", "x")]);
        assert_eq!(
            get_single_value(&body, "k"),
            Err(ValidationError::missing("k"))
        );
    }

    #[test]
    fn empty_first_value_is_missing() {
        let body = form_body([("k", ""), ("k", "later")]);
        assert_eq!(
            get_single_value(&body, "k"),
            Err(ValidationError::missing("k"))
        );
    }

    #[test]
    fn no_values_is_missing() {
        let mut body = FormBody::new();
        body.insert("k".to_string(), Vec::new());
        assert_eq!(
            get_single_value(&body, "k"),
            Err(ValidationError::missing("k"))
        );
    }

    #[test]
    fn whitespace_value_is_kept() {
        let body = form_body([("k", " ")]);
        assert_eq!(get_single_value(&body, "k"), Ok(" "));
    }

    #[test]
    fn error_carries_message_key_and_param() {
        let err = ValidationError::missing(BODY_PARAM);
        assert_eq!(err.message_key(), "error.required.param.missing");
        assert_eq!(err.param(), "Body");
    }
}
