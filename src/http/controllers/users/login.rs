use actix_web::{
    web::{self, Json},
    HttpResponse,
};
use thiserror::Error as ThisError;

use crate::{
    http::{Error, Jwt},
    schema::User,
    types::{
        form::users::{login, UserData},
        validation::Validate,
        Error as ErrorType,
    },
    util::Sensitive,
    App,
};

/// Login doubles as signup: an unknown e-mail creates the account on
/// the spot, a known one must present the right password. A database
/// failure here is a plain 500 — tokens are only ever issued for rows
/// that exist.
#[tracing::instrument]
pub async fn login(app: web::Data<App>, form: Json<login::Request>) -> Result<HttpResponse, Error> {
    #[derive(Debug, ThisError)]
    #[error("Invalid credentials")]
    struct BadCredentials;

    form.validate()?;

    let form = form.into_inner();
    let email = form.email.map(Sensitive::into_inner).unwrap_or_default();
    let password = form.password.map(Sensitive::into_inner).unwrap_or_default();

    // This flow may insert or update, so always hit the primary.
    let mut conn = app.db_write().await?;

    let user = match User::by_email(&mut conn, &email).await? {
        Some(user) if user.password_hash.is_some() => {
            if !user.verify_password(&password) {
                return Err(Error::from_context(ErrorType::Unauthorized, BadCredentials));
            }
            user
        }
        // Legacy row that predates password storage: adopt the
        // supplied password on first login.
        Some(user) => {
            let hash = User::hash_password(&email, &password);
            User::set_password(&mut conn, user.id, &hash).await?
        }
        None => {
            let name = email
                .split('@')
                .next()
                .filter(|v| !v.is_empty())
                .unwrap_or("User");

            let hash = User::hash_password(&email, &password);
            User::create(&mut conn, name, &email, Some(&hash)).await?
        }
    };

    drop(conn);

    let token = Jwt::issue(&app.config.auth, &user)?;
    Ok(HttpResponse::Ok().json(login::Response {
        token: token.into(),
        user: UserData::from(&user),
    }))
}
