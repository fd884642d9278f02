//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Router internals (register, dispatch)
//!     → RouterEvent
//!     → injected RouterLogger (NoopLogger by default)
//!     → TracingLogger → tracing events
//!
//! HTTP host:
//!     → tower-http TraceLayer (per-request spans)
//!     → tracing-subscriber fmt layer (stdout)
//! ```
//!
//! # Design Decisions
//! - Router logging is a capability handed to the router, not global state
//! - Structured fields on every event for machine parsing

pub mod logging;

pub use logging::{NoopLogger, RouterEvent, RouterLogger, TracingLogger};
