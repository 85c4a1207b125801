//! JSON response construction.

use crate::envelope::Envelope;
use crate::error::Error;
use crate::server::router::Route;

use bytes::Bytes;
use http::{HeaderValue, StatusCode, header};
use http_body_util::Full;
use serde::Serialize;
use serde_json::json;

/// Content type of every response.
pub const CONTENT_TYPE: &str = "application/json";

/// Response body of every response.
pub type ResponseBody = Full<Bytes>;

/// Message returned when the request body is not valid JSON.
pub const INVALID_REQUEST_BODY: &str = "Invalid request body";

fn response(status: StatusCode, body: impl Into<Bytes>) -> http::Response<ResponseBody> {
    let mut response = http::Response::new(Full::new(body.into()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE));
    response
}

fn error_response(status: StatusCode, message: &str) -> http::Response<ResponseBody> {
    response(status, json!({ "error": message }).to_string())
}

/// Encode an envelope with the route's status code.
///
/// Failed envelopes are always reported as 500.
pub fn envelope<T: Serialize>(route: &Route, envelope: &Envelope<T>) -> http::Response<ResponseBody> {
    let status = if envelope.success {
        route.success_status()
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    match serde_json::to_vec(envelope) {
        Ok(body) => response(status, body),
        Err(error) => rejection(route, &Error::Json(error)),
    }
}

/// `200 {"status": "healthy"}`
pub fn health() -> http::Response<ResponseBody> {
    response(StatusCode::OK, json!({ "status": "healthy" }).to_string())
}

/// `404 {"error": "Not found"}`
pub fn not_found() -> http::Response<ResponseBody> {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

/// Empty `204` answering a CORS preflight.
pub fn preflight() -> http::Response<ResponseBody> {
    let mut response = response(StatusCode::NO_CONTENT, Bytes::new());
    let headers = response.headers_mut();
    headers.remove(header::CONTENT_TYPE);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET,HEAD,PUT,PATCH,POST,DELETE"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type"),
    );
    response
}

/// `500 {"error": "<route message>"}`
pub fn boundary_error(route: &Route) -> http::Response<ResponseBody> {
    error_response(StatusCode::INTERNAL_SERVER_ERROR, route.failure_message())
}

/// Response for a request that never reached the store.
///
/// Validation failures and unreadable bodies are the caller's fault (400);
/// anything else is reported with the route's fixed message.
pub fn rejection(route: &Route, error: &Error) -> http::Response<ResponseBody> {
    tracing::warn!(?route, %error, "request rejected");
    match error {
        Error::Validation(message) => error_response(StatusCode::BAD_REQUEST, message),
        Error::Json(_) => error_response(StatusCode::BAD_REQUEST, INVALID_REQUEST_BODY),
        _ => boundary_error(route),
    }
}
