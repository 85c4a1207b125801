//! HTTP service implementing the hyper `Service` trait.

use crate::error::Error;
use crate::facade::Facade;
use crate::server::{
    dispatch::handle_route,
    response::{self, CONTENT_TYPE, ResponseBody},
    router::resolve_route,
};

use bytes::Bytes;
use http::{HeaderValue, Method, header};
use http_body_util::BodyExt;
use hyper::body::{Body, Incoming};
use std::{convert::Infallible, future::Future, pin::Pin, sync::Arc};

/// Hyper `Service` routing every request onto a [`Facade`].
#[derive(Debug)]
pub struct FacadeService<F: Facade> {
    facade: Arc<F>,
}

impl<F: Facade> FacadeService<F> {
    /// Create a new service around a shared facade.
    pub fn new(facade: Arc<F>) -> Self {
        Self { facade }
    }
}

impl<F: Facade> Clone for FacadeService<F> {
    fn clone(&self) -> Self {
        Self {
            facade: Arc::clone(&self.facade),
        }
    }
}

impl<F: Facade> hyper::service::Service<http::Request<Incoming>> for FacadeService<F> {
    type Response = http::Response<ResponseBody>;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn call(&self, request: http::Request<Incoming>) -> Self::Future {
        let facade = Arc::clone(&self.facade);
        let request_id = uuid::Uuid::new_v4().to_string();

        Box::pin(async move {
            let response = process_request(facade.as_ref(), request).await;
            Ok(add_common_headers(response, &request_id))
        })
    }
}

/// Process a single request through routing, body collection and dispatch.
pub async fn process_request<F, B>(
    facade: &F,
    request: http::Request<B>,
) -> http::Response<ResponseBody>
where
    F: Facade + ?Sized,
    B: Body,
    B::Error: std::fmt::Display,
{
    let (parts, body) = request.into_parts();

    if parts.method == Method::OPTIONS {
        return response::preflight();
    }

    let Some(route) = resolve_route(&parts.method, parts.uri.path()) else {
        tracing::debug!(method = %parts.method, path = parts.uri.path(), "no route");
        return response::not_found();
    };

    let body = match collect_body(body).await {
        Ok(body) => body,
        Err(error) => return response::rejection(&route, &error),
    };

    let response = handle_route(facade, &route, &body).await;
    tracing::debug!(
        method = %parts.method,
        path = parts.uri.path(),
        status = response.status().as_u16(),
        "request handled",
    );
    response
}

/// Collect the incoming body into a single `Bytes` buffer.
async fn collect_body<B>(body: B) -> Result<Bytes, Error>
where
    B: Body,
    B::Error: std::fmt::Display,
{
    body.collect()
        .await
        .map(http_body_util::Collected::to_bytes)
        .map_err(|error| Error::Body(error.to_string()))
}

/// Add the headers every response carries.
fn add_common_headers(
    mut response: http::Response<ResponseBody>,
    request_id: &str,
) -> http::Response<ResponseBody> {
    let has_body = response.status() != http::StatusCode::NO_CONTENT;
    let headers = response.headers_mut();

    if let Ok(value) = HeaderValue::from_str(request_id) {
        headers.entry("x-request-id").or_insert(value);
    }

    if has_body {
        headers
            .entry(header::CONTENT_TYPE)
            .or_insert(HeaderValue::from_static(CONTENT_TYPE));
    }

    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );

    response
}
