//! HTTP host subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, every path to one handler)
//!     → request.rs (percent-decoded path for matching)
//!     → routing::Router::dispatch (template match or fallback)
//!     → response.rs (text / JSON bodies, status fallbacks)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use server::{build_router, HttpRouter, HttpServer, ServerError};
