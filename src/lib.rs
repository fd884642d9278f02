//! Template-based request router.
//!
//! Routes are registered as path templates such as `/profile/{name:string}/view`
//! and matched in registration order; variables are extracted and cast to their
//! declared kind.

pub mod config;
pub mod http;
pub mod observability;
pub mod routing;

pub use config::schema::ServerConfig;
pub use http::HttpServer;
pub use routing::{CompileError, Kind, QueryError, Router, Value};
