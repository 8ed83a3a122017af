use actix_web::{
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    http::{header, StatusCode},
    middleware::ErrorHandlerResponse,
    HttpResponse,
};
use tracing::Span;
use tracing_actix_web::{DefaultRootSpanBuilder, RootSpanBuilder};

use crate::types::{validation::FieldErrors, Error as ErrorType};

/// Default root span builder emits every request at INFO which is a
/// lot of noise for health checks and list polling. Same span fields,
/// DEBUG level.
pub struct QuieterRootSpanBuilder;

impl RootSpanBuilder for QuieterRootSpanBuilder {
    fn on_request_start(request: &ServiceRequest) -> Span {
        tracing_actix_web::root_span!(level = tracing::Level::DEBUG, request)
    }

    fn on_request_end<B: MessageBody>(
        span: Span,
        outcome: &Result<ServiceResponse<B>, actix_web::Error>,
    ) {
        DefaultRootSpanBuilder::on_request_end(span, outcome);
    }
}

/// Rewrites error responses that did not come from [`crate::http::Error`]
/// (failed JSON deserialization, unmatched routes, guard rejections)
/// into the same JSON envelope every other error uses.
pub fn handle_actix_web_error<B>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let is_json = res
        .response()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.starts_with("application/json"))
        .unwrap_or_default();

    if is_json {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    }

    let status = res.status();
    let error_type = match status {
        StatusCode::NOT_FOUND => ErrorType::NotFound,
        StatusCode::UNAUTHORIZED => ErrorType::Unauthorized,
        StatusCode::FORBIDDEN => ErrorType::Forbidden,
        StatusCode::SERVICE_UNAVAILABLE => ErrorType::ReadonlyMode,
        StatusCode::BAD_REQUEST => {
            let mut fields = FieldErrors::new();
            fields.insert("body", "Invalid request body");
            ErrorType::InvalidFormBody(fields)
        }
        _ => ErrorType::Internal,
    };

    let (req, _) = res.into_parts();
    let response = HttpResponse::build(status).json(&error_type);
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}
