use serde::Deserialize;
use std::num::NonZeroU64;

use crate::util::Sensitive;

#[derive(Debug, Deserialize)]
pub struct Auth {
    /// Secret key used to sign and verify login tokens.
    ///
    /// **Environment variables**:
    /// - `QUILL_AUTH_JWT_SECRET` or `JWT_SECRET`
    pub jwt_secret: Sensitive<String>,
    /// E-mail address of the single administrator account. A user
    /// logging in with this e-mail gets the `is_admin` claim in
    /// their token.
    ///
    /// **Environment variables**:
    /// - `QUILL_AUTH_ADMIN_EMAIL`
    #[serde(default)]
    pub admin_email: Option<String>,
    /// How long issued login tokens stay valid, in days.
    ///
    /// **Environment variables**:
    /// - `QUILL_AUTH_TOKEN_DAYS`
    #[serde(default = "Auth::default_token_days")]
    pub token_days: NonZeroU64,
}

impl Auth {
    pub const JWT_SECRET_MIN: usize = 12;
    pub const JWT_SECRET_MAX: usize = 1024;

    const DEFAULT_TOKEN_DAYS: u64 = 30;

    // Required by serde
    const fn default_token_days() -> NonZeroU64 {
        match NonZeroU64::new(Self::DEFAULT_TOKEN_DAYS) {
            Some(n) => n,
            None => panic!("DEFAULT_TOKEN_DAYS is accidentally set to 0"),
        }
    }

    /// Whether this e-mail belongs to the configured administrator.
    #[must_use]
    pub fn is_admin_email(&self, email: &str) -> bool {
        self.admin_email
            .as_deref()
            .map(|admin| admin.eq_ignore_ascii_case(email))
            .unwrap_or_default()
    }
}
