//! Structured logging.
//!
//! # Responsibilities
//! - Define the events the router reports and the [`RouterLogger`] hook receiving them
//! - Forward events to `tracing` when the host wants them
//! - Initialize the process-wide subscriber for the binary
//!
//! # Design Decisions
//! - The router never logs through a global; the hook is injected at construction
//! - Absent a hook, events go to [`NoopLogger`]
//! - Log level comes from `RUST_LOG`, falling back to the configured level

use axum::http::StatusCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Internal events reported by the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterEvent<'a> {
    RouteRegistered {
        template: &'a str,
        position: usize,
        overwritten: bool,
    },
    RouteRejected {
        template: &'a str,
        reason: String,
    },
    FallbackRegistered {
        status: StatusCode,
        overwritten: bool,
    },
    Dispatched {
        path: &'a str,
        template: &'a str,
    },
    NotFound {
        path: &'a str,
    },
}

/// Hook receiving router events.
pub trait RouterLogger: Send + Sync {
    fn log(&self, event: &RouterEvent<'_>);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl RouterLogger for NoopLogger {
    fn log(&self, _event: &RouterEvent<'_>) {}
}

/// Emits router events as `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl RouterLogger for TracingLogger {
    fn log(&self, event: &RouterEvent<'_>) {
        match event {
            RouterEvent::RouteRegistered {
                template,
                position,
                overwritten,
            } => tracing::info!(
                template = %template,
                position = position,
                overwritten = overwritten,
                "Route registered"
            ),
            RouterEvent::RouteRejected { template, reason } => tracing::error!(
                template = %template,
                reason = %reason,
                "Route rejected"
            ),
            RouterEvent::FallbackRegistered {
                status,
                overwritten,
            } => tracing::info!(
                status = status.as_u16(),
                overwritten = overwritten,
                "Fallback registered"
            ),
            RouterEvent::Dispatched { path, template } => tracing::debug!(
                path = %path,
                template = %template,
                "Route matched"
            ),
            RouterEvent::NotFound { path } => tracing::debug!(path = %path, "No route matched"),
        }
    }
}

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `default_level` when set.
pub fn init(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("pathmux={},tower_http={}", default_level, default_level).into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
