//! Configuration schema definitions.
//!
//! This module defines the configuration for the routing server.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address, timeouts).
    pub listener: ListenerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route templates in match order.
    pub routes: Vec<RouteConfig>,

    /// Status-code fallbacks replacing the built-in ones.
    pub fallbacks: Vec<FallbackConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// How a configured route renders its response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// `body` with `{name}` placeholders replaced by bound variables.
    #[default]
    Text,
    /// JSON document listing the template and every bound value.
    Json,
}

/// A route template and the response it serves.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Template such as `/profile/{name:string}/view`.
    pub template: String,

    /// Response body for the text format.
    #[serde(default)]
    pub body: String,

    /// Response status code.
    #[serde(default = "default_status")]
    pub status: u16,

    #[serde(default)]
    pub format: ResponseFormat,
}

fn default_status() -> u16 {
    200
}

/// A status-code fallback body.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FallbackConfig {
    pub status: u16,
    pub body: String,
}
