//! Static CORS decorator.
//!
//! [`CorsLayer`] wraps any [`tower::Service`] that speaks `http` and stamps a
//! fixed set of `Access-Control-*` headers onto every response. Preflight
//! (`OPTIONS`) requests are answered directly with `204 No Content` and never
//! reach the wrapped service.
//!
//! The request's own headers are not inspected: the configured origin is
//! echoed regardless of what the client sent.

use crate::config::CorsConfig;
use crate::error::{AppError, AppResult};
use http::{header, HeaderMap, HeaderValue, Method, Request, Response, StatusCode};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Value of `Access-Control-Allow-Methods`
pub const ALLOW_METHODS: &str = "GET, POST, PUT, DELETE, OPTIONS";

/// Value of `Access-Control-Allow-Headers`
pub const ALLOW_HEADERS: &str = "Content-Type";

/// Value of `Access-Control-Allow-Credentials`
pub const ALLOW_CREDENTIALS: &str = "true";

/// Layer producing [`Cors`] services
#[derive(Debug, Clone)]
pub struct CorsLayer {
    allowed_origin: HeaderValue,
}

impl CorsLayer {
    /// Build the layer from resolved configuration.
    ///
    /// Fails only if the origin cannot be carried in an HTTP header
    /// (control characters, newlines).
    pub fn new(config: &CorsConfig) -> AppResult<Self> {
        let allowed_origin = HeaderValue::from_str(&config.allowed_origin).map_err(|_| {
            AppError::Configuration(format!(
                "CORS_ORIGIN is not a valid header value: {:?}",
                config.allowed_origin
            ))
        })?;

        Ok(Self { allowed_origin })
    }
}

impl<S> Layer<S> for CorsLayer {
    type Service = Cors<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Cors {
            inner,
            allowed_origin: self.allowed_origin.clone(),
        }
    }
}

/// Service that applies the CORS headers around an inner service
#[derive(Debug, Clone)]
pub struct Cors<S> {
    inner: S,
    allowed_origin: HeaderValue,
}

/// Write the four CORS headers, replacing any existing values
pub fn apply_cors_headers(headers: &mut HeaderMap, allowed_origin: &HeaderValue) {
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, allowed_origin.clone());
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOW_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOW_HEADERS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
        HeaderValue::from_static(ALLOW_CREDENTIALS),
    );
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for Cors<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    ResBody: Default + Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        if req.method() == Method::OPTIONS {
            tracing::debug!(path = %req.uri().path(), "Answering CORS preflight");

            let mut response = Response::new(ResBody::default());
            *response.status_mut() = StatusCode::NO_CONTENT;
            apply_cors_headers(response.headers_mut(), &self.allowed_origin);

            return Box::pin(async move { Ok(response) });
        }

        let allowed_origin = self.allowed_origin.clone();
        let future = self.inner.call(req);

        Box::pin(async move {
            let mut response = future.await?;
            apply_cors_headers(response.headers_mut(), &allowed_origin);
            Ok(response)
        })
    }
}
