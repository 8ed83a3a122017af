use actix_web::{http::header, web, FromRequest};
use chrono::Utc;
use futures::future::{ready, Ready};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

use super::Error;
use crate::{
    config,
    schema::User,
    types::{
        id::{marker::UserMarker, Id},
        Error as ErrorType,
    },
    App,
};

/// Header the previous frontend sends its token in. A standard
/// `Authorization: Bearer` header is accepted as well.
pub const TOKEN_HEADER: &str = "authToken";

const SECS_PER_DAY: i64 = 24 * 60 * 60;

/// Claims of a login token. `exp` is validated on decode, so an
/// expired token fails extraction with a 401.
#[derive(Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Jwt {
    pub user_id: Id<UserMarker>,
    pub username: String,
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

impl Jwt {
    /// Signs a token for a freshly authenticated user.
    #[tracing::instrument(skip_all, fields(user.id = %user.id))]
    pub fn issue(auth: &config::Auth, user: &User) -> Result<String, Error> {
        let now = Utc::now().timestamp();
        let claims = Self {
            user_id: user.id,
            username: user.name.clone(),
            is_admin: auth.is_admin_email(&user.email),
            iat: now,
            exp: now + (auth.token_days.get() as i64) * SECS_PER_DAY,
        };

        let header = Header {
            alg: Algorithm::HS512,
            ..Default::default()
        };
        let key = EncodingKey::from_secret(auth.jwt_secret.as_str().as_bytes());
        jsonwebtoken::encode(&header, &claims, &key)
            .map_err(|e| Error::from_context(ErrorType::Internal, e))
    }

    /// Verifies the signature and expiry, returning the claims.
    #[tracing::instrument(skip_all)]
    pub fn decode(auth: &config::Auth, token: &str) -> Result<Self, Error> {
        let key = DecodingKey::from_secret(auth.jwt_secret.as_str().as_bytes());
        let validation = Validation::new(Algorithm::HS512);

        jsonwebtoken::decode::<Self>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| Error::from_context(ErrorType::Unauthorized, e))
    }
}

impl FromRequest for Jwt {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(
        req: &actix_web::HttpRequest,
        _payload: &mut actix_web::dev::Payload,
    ) -> Self::Future {
        #[derive(Debug, ThisError)]
        #[error("No token provided, access denied")]
        struct NoToken;

        #[derive(Debug, ThisError)]
        #[error("The web app has no available configuration")]
        struct NoConfig;

        let token = req
            .headers()
            .get(TOKEN_HEADER)
            .or_else(|| req.headers().get(header::AUTHORIZATION))
            .and_then(|v| v.to_str().ok())
            .map(|v| v.strip_prefix("Bearer ").unwrap_or(v));

        let Some(token) = token else {
            return ready(Err(Error::from_context(ErrorType::Unauthorized, NoToken)));
        };

        let Some(app) = req.app_data::<web::Data<App>>() else {
            return ready(Err(Error::from_context(ErrorType::Internal, NoConfig)));
        };

        ready(Self::decode(&app.config.auth, token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::Sensitive;
    use std::num::NonZeroU64;

    fn test_auth(admin_email: Option<&str>) -> config::Auth {
        config::Auth {
            jwt_secret: Sensitive::new("a-reasonably-long-test-secret".to_string()),
            admin_email: admin_email.map(str::to_string),
            token_days: NonZeroU64::new(30).unwrap(),
        }
    }

    fn test_user() -> User {
        User {
            id: Id::new(42),
            created_at: Utc::now().naive_utc(),
            name: "Mona".into(),
            email: "mona@example.com".into(),
            password_hash: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_issue_then_decode_roundtrip() {
        let auth = test_auth(None);
        let token = Jwt::issue(&auth, &test_user()).unwrap();

        let claims = Jwt::decode(&auth, &token).unwrap();
        assert_eq!(claims.user_id, Id::new(42));
        assert_eq!(claims.username, "Mona");
        assert!(!claims.is_admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_admin_claim_follows_config() {
        let auth = test_auth(Some("mona@example.com"));
        let token = Jwt::issue(&auth, &test_user()).unwrap();
        assert!(Jwt::decode(&auth, &token).unwrap().is_admin);
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let token = Jwt::issue(&test_auth(None), &test_user()).unwrap();

        let mut other = test_auth(None);
        other.jwt_secret = Sensitive::new("a-different-signing-secret!!".to_string());

        let error = Jwt::decode(&other, &token).unwrap_err();
        assert_eq!(error.as_type(), &ErrorType::Unauthorized);
    }

    #[test]
    fn test_decode_rejects_expired_tokens() {
        let auth = test_auth(None);
        let now = Utc::now().timestamp();
        let claims = Jwt {
            user_id: Id::new(42),
            username: "Mona".into(),
            is_admin: false,
            iat: now - 120 * SECS_PER_DAY,
            exp: now - 90 * SECS_PER_DAY,
        };

        let header = Header {
            alg: Algorithm::HS512,
            ..Default::default()
        };
        let key = EncodingKey::from_secret(auth.jwt_secret.as_str().as_bytes());
        let token = jsonwebtoken::encode(&header, &claims, &key).unwrap();

        let error = Jwt::decode(&auth, &token).unwrap_err();
        assert_eq!(error.as_type(), &ErrorType::Unauthorized);
    }
}
