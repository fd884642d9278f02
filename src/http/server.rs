//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the template router from configuration
//! - Create the Axum app that sends every path to the router
//! - Wire up middleware (tracing, timeout)
//! - Serve on a listener with graceful shutdown

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json,
};
use serde_json::json;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{FallbackConfig, ResponseFormat, RouteConfig, ServerConfig};
use crate::http::response::{render_body, text};
use crate::observability::TracingLogger;
use crate::routing::{CompileError, Router};

/// The template router as used by the HTTP host.
pub type HttpRouter = Router<Request<Body>, Response>;

/// Error type for server assembly.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Template(#[from] CompileError),

    #[error("invalid status code {0}")]
    InvalidStatus(u16),
}

/// HTTP server dispatching every request through the template router.
pub struct HttpServer {
    app: axum::Router,
    router: Arc<HttpRouter>,
    config: ServerConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ServerConfig) -> Result<Self, ServerError> {
        let router = Arc::new(build_router(&config)?);
        let app = Self::build_app(&config, router.clone());
        Ok(Self {
            app,
            router,
            config,
        })
    }

    /// Build the Axum app with all middleware layers.
    #[allow(deprecated)]
    fn build_app(config: &ServerConfig, router: Arc<HttpRouter>) -> axum::Router {
        axum::Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(router)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.listener.request_timeout_secs,
            )))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until `shutdown` completes.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.router.route_count(),
            "HTTP server starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The Axum app, for serving or driving directly.
    pub fn app(&self) -> axum::Router {
        self.app.clone()
    }

    pub fn router(&self) -> Arc<HttpRouter> {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}

async fn dispatch_handler(State(router): State<Arc<HttpRouter>>, request: Request<Body>) -> Response {
    router.dispatch(request)
}

/// Build the template router described by `config`.
pub fn build_router(config: &ServerConfig) -> Result<HttpRouter, ServerError> {
    let router = HttpRouter::new().with_logger(Arc::new(TracingLogger));

    for route in &config.routes {
        router.register_route(&route.template, route_handler(route)?)?;
    }
    for fallback in &config.fallbacks {
        let (status, handler) = fallback_handler(fallback)?;
        router.register_fallback(status, handler);
    }
    Ok(router)
}

fn status_code(code: u16) -> Result<StatusCode, ServerError> {
    StatusCode::from_u16(code).map_err(|_| ServerError::InvalidStatus(code))
}

fn route_handler(
    route: &RouteConfig,
) -> Result<impl Fn(&HttpRouter, Request<Body>) -> Response + Send + Sync + 'static, ServerError> {
    let status = status_code(route.status)?;
    let template = route.template.clone();
    let body = route.body.clone();
    let format = route.format;

    Ok(move |router: &HttpRouter, request: Request<Body>| match format {
        ResponseFormat::Text => {
            let rendered = render_body(&body, |name| {
                router
                    .variable_by_name(name, &request)
                    .ok()
                    .map(|value| value.to_string())
            });
            match rendered {
                Ok(body) => text(status, body),
                Err(missing) => {
                    tracing::error!(
                        template = %template,
                        missing = ?missing,
                        "Unresolved body placeholders"
                    );
                    router
                        .fallback(StatusCode::INTERNAL_SERVER_ERROR, request)
                        .unwrap_or_else(|| StatusCode::INTERNAL_SERVER_ERROR.into_response())
                }
            }
        }
        ResponseFormat::Json => {
            let variables = router.variables_for(&request).unwrap_or_default();
            let document = json!({
                "template": template,
                "variables": variables,
            });
            (status, Json(document)).into_response()
        }
    })
}

fn fallback_handler(
    fallback: &FallbackConfig,
) -> Result<(StatusCode, impl Fn(&HttpRouter, Request<Body>) -> Response + Send + Sync + 'static), ServerError> {
    let status = status_code(fallback.status)?;
    let body = fallback.body.clone();
    Ok((status, move |_: &HttpRouter, _: Request<Body>| text(status, body.clone())))
}
