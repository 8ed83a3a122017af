use serde::Deserialize;

use crate::types::validation::{FieldErrors, Validate};

/// Body of `PUT /api/posts/{id}`. `published` is a true tri-state:
/// an omitted flag keeps whatever the post already has.
#[derive(Debug, Deserialize)]
pub struct Request {
    pub title: Option<String>,
    pub content: Option<String>,
    pub published: Option<bool>,
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

        fields.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_and_content_required() {
        let form: Request = serde_json::from_str(r#"{"published": true}"#).unwrap();
        let errors = form.validate().unwrap_err();
        assert!(errors.field("title").is_some());
        assert!(errors.field("content").is_some());
    }

    #[test]
    fn test_omitted_published_stays_unset() {
        let form: Request = serde_json::from_str(r#"{"title": "a", "content": "b"}"#).unwrap();
        assert!(form.validate().is_ok());
        assert_eq!(form.published, None);

        let form: Request =
            serde_json::from_str(r#"{"title": "a", "content": "b", "published": false}"#).unwrap();
        assert_eq!(form.published, Some(false));
    }
}
