use actix_web::{
    web::{self, Json},
    HttpResponse,
};

use crate::{
    http::Error,
    schema::{Post, User},
    types::{
        form::posts::{create, PostData},
        validation::{FieldErrors, Validate},
    },
    App,
};

#[tracing::instrument]
pub async fn create(
    app: web::Data<App>,
    form: Json<create::Request>,
) -> Result<HttpResponse, Error> {
    form.validate()?;

    let form = form.into_inner();
    let title = form.title.unwrap_or_default();
    let content = form.content.unwrap_or_default();
    let Some(author_id) = form.author_id else {
        return Err(FieldErrors::single("author_id", "Author id is required").into());
    };

    let mut conn = app.db_write().await?;

    // The old implementation let the foreign key violation bubble up
    // as a 500 here. An unknown author is the client's mistake.
    let Some(author) = User::by_id(&mut conn, author_id).await? else {
        return Err(FieldErrors::single("author_id", "Author does not exist").into());
    };

    let post = Post::create(&mut conn, title.trim(), &content, author.id).await?;
    Ok(HttpResponse::Created().json(PostData::from_parts(post, &author)))
}
