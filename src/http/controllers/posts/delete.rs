use actix_web::{web, HttpResponse};
use serde_json::json;
use thiserror::Error as ThisError;

use crate::{
    http::Error,
    schema::Post,
    types::{
        id::{marker::PostMarker, Id},
        Error as ErrorType,
    },
    App,
};

#[tracing::instrument]
pub async fn delete(
    app: web::Data<App>,
    path: web::Path<Id<PostMarker>>,
) -> Result<HttpResponse, Error> {
    #[derive(Debug, ThisError)]
    #[error("Post not found")]
    struct ResourceError;

    let mut conn = app.db_write().await?;
    if Post::delete(&mut conn, path.into_inner()).await?.is_none() {
        return Err(Error::from_context(ErrorType::NotFound, ResourceError));
    }

    Ok(HttpResponse::Ok().json(json!({
        "message": "Post deleted successfully",
    })))
}
