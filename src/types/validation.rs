use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*$")
        .expect("compile email regex")
});

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email) && email.len() <= 254
}

/// Form types implement this so handlers can reject bad input with a
/// single `form.validate()?` before touching the database.
pub trait Validate {
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Per-field validation messages, serialized as a plain JSON map of
/// field name to messages.
#[derive(Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<Cow<'static, str>, Vec<Cow<'static, str>>>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Shorthand for the common one-field-one-message case.
    #[must_use]
    pub fn single(
        field: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        let mut this = Self::new();
        this.insert(field, message);
        this
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&[Cow<'static, str>]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Turns the accumulated messages into a `Result`, the usual
    /// last step of a [`Validate`] implementation.
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("gush@gmail.com"));
        assert!(is_valid_email("basma@example.com"));
        assert!(!is_valid_email("nada_neutho"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("someone@"));
    }

    #[test]
    fn test_field_errors_builder() {
        let mut errors = FieldErrors::new();
        assert!(errors.is_empty());
        assert!(std::mem::take(&mut errors).into_result().is_ok());

        errors.insert("title", "Title is required");
        errors.insert("title", "Title is too long");
        errors.insert("content", "Content is required");

        assert_eq!(errors.field("title").map(<[_]>::len), Some(2));
        assert_eq!(errors.field("content").map(<[_]>::len), Some(1));
        assert!(errors.field("author_id").is_none());
        assert!(errors.into_result().is_err());
    }
}
