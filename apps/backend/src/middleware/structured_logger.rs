//! One `request_completed` event per request.
//!
//! Events carry the matched route pattern (`/teams/{id}/`) rather than the
//! raw path, the site surface that was hit, and for problem responses the
//! `ErrorCode` the handler failed with.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::Level;

use crate::error::AppError;

/// Which part of the site a request hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Api,
    Health,
    Page,
}

impl Surface {
    pub fn of(path: &str) -> Self {
        if path == "/api" || path.starts_with("/api/") {
            Surface::Api
        } else if path == "/health" || path.starts_with("/health/") {
            Surface::Health
        } else {
            Surface::Page
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Surface::Api => "api",
            Surface::Health => "health",
            Surface::Page => "page",
        }
    }
}

/// Level of the completion event. Successful health checks log at debug.
pub fn level_for(surface: Surface, status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else if surface == Surface::Health {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let surface = Surface::of(req.path());
        let route = req
            .match_pattern()
            .unwrap_or_else(|| "<unmatched>".to_string());
        let trace_id = req
            .extensions()
            .get::<String>()
            .cloned()
            .unwrap_or_else(|| "unknown".to_string());

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, error_code) = match &result {
                Ok(res) => (
                    res.status(),
                    res.response()
                        .error()
                        .and_then(|e| e.as_error::<AppError>())
                        .map(|e| e.code().as_str()),
                ),
                Err(err) => (
                    err.as_response_error().status_code(),
                    err.as_error::<AppError>().map(|e| e.code().as_str()),
                ),
            };
            let duration_us = start.elapsed().as_micros() as u64;
            let status_code = status.as_u16();
            let error_code = error_code.unwrap_or("");

            macro_rules! completed {
                ($level:expr) => {
                    tracing::event!(
                        $level,
                        http.method = %method,
                        http.route = %route,
                        http.status_code = status_code,
                        surface = surface.as_str(),
                        error.code = error_code,
                        duration_us,
                        trace_id = %trace_id,
                        "request_completed"
                    )
                };
            }

            let level = level_for(surface, status);
            if level == Level::ERROR {
                completed!(Level::ERROR);
            } else if level == Level::WARN {
                completed!(Level::WARN);
            } else if level == Level::DEBUG {
                completed!(Level::DEBUG);
            } else {
                completed!(Level::INFO);
            }

            result
        })
    }
}
