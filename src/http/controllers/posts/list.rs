use actix_web::{web, HttpResponse};

use crate::{http::Error, schema::Post, types::form::posts::PostData, App};

#[tracing::instrument]
pub async fn list(app: web::Data<App>) -> Result<HttpResponse, Error> {
    let mut conn = app.db_read().await?;
    let posts = Post::all(&mut conn).await?;

    let posts = posts.into_iter().map(PostData::from).collect::<Vec<_>>();
    Ok(HttpResponse::Ok().json(posts))
}
