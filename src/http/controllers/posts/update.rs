use actix_web::{
    web::{self, Json},
    HttpResponse,
};
use thiserror::Error as ThisError;

use crate::{
    http::Error,
    schema::Post,
    types::{
        form::posts::{update, PostAuthor, PostData},
        id::{marker::PostMarker, Id},
        validation::Validate,
        Error as ErrorType,
    },
    App,
};

#[tracing::instrument]
pub async fn update(
    app: web::Data<App>,
    path: web::Path<Id<PostMarker>>,
    form: Json<update::Request>,
) -> Result<HttpResponse, Error> {
    #[derive(Debug, ThisError)]
    #[error("Post not found")]
    struct ResourceError;

    form.validate()?;

    let id = path.into_inner();
    let form = form.into_inner();
    let title = form.title.unwrap_or_default();
    let content = form.content.unwrap_or_default();

    let mut conn = app.db_write().await?;
    let Some(existing) = Post::by_id(&mut conn, id).await? else {
        return Err(Error::from_context(ErrorType::NotFound, ResourceError));
    };

    // An omitted flag keeps whatever the post already has.
    let published = form.published.unwrap_or(existing.published);

    let Some(updated) = Post::update(&mut conn, id, title.trim(), &content, published).await? else {
        return Err(Error::from_context(ErrorType::NotFound, ResourceError));
    };

    Ok(HttpResponse::Ok().json(PostData {
        id: updated.id,
        created_at: updated.created_at,
        updated_at: updated.updated_at,
        title: updated.title,
        content: updated.content,
        published: updated.published,
        author: PostAuthor {
            id: existing.author_id,
            name: existing.author_name,
            email: existing.author_email,
            created_at: existing.author_created_at,
        },
    }))
}
