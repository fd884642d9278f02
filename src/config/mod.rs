//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks, templates compiled)
//!     → ServerConfig (validated, immutable)
//!     → http::server builds the router from it
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; routes live for the process lifetime
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, parse_config, ConfigError};
pub use schema::{
    FallbackConfig, ListenerConfig, ObservabilityConfig, ResponseFormat, RouteConfig, ServerConfig,
};
pub use validation::ValidationError;
