use serde::Deserialize;

use super::UserData;
use crate::types::validation::{is_valid_email, FieldErrors, Validate};
use crate::util::Sensitive;

/// Body of `POST /api/users/login`. Login doubles as signup: an
/// unknown e-mail creates the account on the spot.
#[derive(Debug, Deserialize)]
pub struct Request {
    pub email: Option<Sensitive<String>>,
    pub password: Option<Sensitive<String>>,
}

impl Validate for Request {
    fn validate(&self) -> Result<(), FieldErrors> {
        let mut fields = FieldErrors::new();
        match self.email.as_ref().map(Sensitive::as_str) {
            None | Some("") => fields.insert("email", "Email is required"),
            Some(email) if !is_valid_email(email) => {
                fields.insert("email", "Invalid e-mail address");
            }
            Some(..) => {}
        }

        if self.password.as_ref().map_or(true, |v| v.as_str().is_empty()) {
            fields.insert("password", "Password is required");
        }

        fields.into_result()
    }
}

#[derive(Debug, serde::Serialize)]
pub struct Response {
    pub token: Sensitive<String>,
    pub user: UserData,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_fields_required() {
        let form: Request = serde_json::from_str("{}").unwrap();
        let errors = form.validate().unwrap_err();
        assert!(errors.field("email").is_some());
        assert!(errors.field("password").is_some());
    }

    #[test]
    fn test_email_must_look_like_an_email() {
        let form: Request =
            serde_json::from_str(r#"{"email": "not-an-email", "password": "pw"}"#).unwrap();
        let errors = form.validate().unwrap_err();
        assert!(errors.field("email").is_some());
        assert!(errors.field("password").is_none());
    }

    #[test]
    fn test_valid_request_passes() {
        let form: Request =
            serde_json::from_str(r#"{"email": "mona@example.com", "password": "pw"}"#).unwrap();
        assert!(form.validate().is_ok());
    }
}
