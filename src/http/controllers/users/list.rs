use actix_web::{web, HttpResponse};

use crate::{http::Error, schema::User, types::form::users::DirectoryEntry, App};

/// Author directory backing the "browse authors" page.
#[tracing::instrument]
pub async fn list(app: web::Data<App>) -> Result<HttpResponse, Error> {
    let mut conn = app.db_read().await?;
    let authors = User::all_with_post_count(&mut conn).await?;

    let authors = authors
        .into_iter()
        .map(DirectoryEntry::from)
        .collect::<Vec<_>>();

    Ok(HttpResponse::Ok().json(authors))
}
