use actix_web::{web, HttpResponse};
use thiserror::Error as ThisError;

use crate::{
    http::Error,
    schema::Post,
    types::{
        form::posts::PostData,
        id::{marker::PostMarker, Id},
        Error as ErrorType,
    },
    App,
};

#[tracing::instrument]
pub async fn find(
    app: web::Data<App>,
    path: web::Path<Id<PostMarker>>,
) -> Result<HttpResponse, Error> {
    #[derive(Debug, ThisError)]
    #[error("Post not found")]
    struct ResourceError;

    let mut conn = app.db_read().await?;
    let Some(post) = Post::by_id(&mut conn, path.into_inner()).await? else {
        return Err(Error::from_context(ErrorType::NotFound, ResourceError));
    };

    Ok(HttpResponse::Ok().json(PostData::from(post)))
}
