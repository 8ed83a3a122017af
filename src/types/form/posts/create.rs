use serde::Deserialize;

use crate::types::{
    id::{marker::UserMarker, Id},
    validation::{FieldErrors, Validate},
};

/// Body of `POST /api/posts`. Every field is optional at the serde
/// level so that a missing one surfaces as a validation message
/// instead of a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct Request {
    pub title: Option<String>,
    pub content: Option<String>,
    // The previous frontend sent `authorId`, sometimes as a numeric
    // string. `Id`'s deserializer coerces both forms.
    #[serde(default, alias = "authorId")]
    pub author_id: Option<Id<UserMarker>>,
}

impl Validate for Request {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut fields = FieldErrors::new();
        if self.title.as_deref().map_or(true, |v| v.trim().is_empty()) {
            fields.insert("title", "Title is required");
        }

        if self.content.as_deref().map_or(true, |v| v.trim().is_empty()) {
            fields.insert("content", "Content is required");
        }

        if self.author_id.is_none() {
            fields.insert("author_id", "Author id is required");
        }

        fields.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_are_reported_individually() {
        let form: Request = serde_json::from_str("{}").unwrap();
        let errors = form.validate().unwrap_err();
        assert!(errors.field("title").is_some());
        assert!(errors.field("content").is_some());
        assert!(errors.field("author_id").is_some());
    }

    #[test]
    fn test_blank_fields_rejected() {
        let form: Request =
            serde_json::from_str(r#"{"title": "  ", "content": "", "author_id": 1}"#).unwrap();
        let errors = form.validate().unwrap_err();
        assert!(errors.field("title").is_some());
        assert!(errors.field("content").is_some());
        assert!(errors.field("author_id").is_none());
    }

    #[test]
    fn test_author_id_aliases_and_coercion() {
        let form: Request =
            serde_json::from_str(r#"{"title": "a", "content": "b", "authorId": "3"}"#).unwrap();
        assert_eq!(form.author_id.map(Id::get), Some(3));
        assert!(form.validate().is_ok());

        let form: Request =
            serde_json::from_str(r#"{"title": "a", "content": "b", "author_id": 7}"#).unwrap();
        assert_eq!(form.author_id.map(Id::get), Some(7));
        assert!(form.validate().is_ok());
    }
}
