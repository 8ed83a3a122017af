use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::validation::FieldErrors;

/// Serializable error taxonomy sent over the wire. The HTTP status
/// code is derived from the variant when the response is built.
#[derive(Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Error {
    Internal,
    NotFound,
    Unauthorized,
    Forbidden,
    InvalidFormBody(FieldErrors),
    ReadonlyMode,
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Internal => f.write_str("Failed to perform request"),
            Error::NotFound => f.write_str("Requested resource not found"),
            Error::Unauthorized => f.write_str("Authentication required"),
            Error::Forbidden => f.write_str("User has no access to this resource"),
            Error::InvalidFormBody(..) => f.write_str("User performed request with invalid body"),
            Error::ReadonlyMode => f.write_str("Attempt to write read-only database"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::Token;

    #[track_caller]
    fn assert_unit_variant(value: Error, variant: &'static str) {
        serde_test::assert_tokens(
            &value,
            &[
                Token::Struct {
                    name: "Error",
                    len: 1,
                },
                Token::Str("type"),
                Token::Str(variant),
                Token::StructEnd,
            ],
        );
    }

    #[test]
    fn test_serde_impl() {
        assert_unit_variant(Error::Internal, "internal");
        assert_unit_variant(Error::NotFound, "not_found");
        assert_unit_variant(Error::Unauthorized, "unauthorized");
        assert_unit_variant(Error::Forbidden, "forbidden");
        assert_unit_variant(Error::ReadonlyMode, "readonly_mode");
    }

    #[test]
    fn test_form_body_variant_to_json() {
        let mut fields = FieldErrors::new();
        fields.insert("title", "Title is required");

        let value = serde_json::to_value(Error::InvalidFormBody(fields)).unwrap();
        assert_eq!(value["type"], "invalid_form_body");
        assert_eq!(value["title"][0], "Title is required");
    }
}
