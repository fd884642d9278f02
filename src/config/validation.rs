//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Compile every route template
//! - Validate status codes and the bind address
//! - Detect duplicate templates and fallbacks
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServerConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::collections::HashSet;
use std::net::SocketAddr;

use axum::http::StatusCode;
use thiserror::Error;

use crate::config::schema::ServerConfig;
use crate::routing::{CompileError, Pattern};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route {index}: {source}")]
    Template {
        index: usize,
        #[source]
        source: CompileError,
    },

    #[error("route {index}: duplicate template \"{template}\"")]
    DuplicateTemplate { index: usize, template: String },

    #[error("invalid status code {0}")]
    InvalidStatus(u16),

    #[error("duplicate fallback for status {0}")]
    DuplicateFallback(u16),

    #[error("invalid bind address \"{0}\"")]
    BindAddress(String),
}

/// Check the configuration, collecting every error found.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    let mut templates = HashSet::new();
    for (index, route) in config.routes.iter().enumerate() {
        if let Err(source) = Pattern::compile(&route.template) {
            errors.push(ValidationError::Template { index, source });
        }
        if !templates.insert(route.template.as_str()) {
            errors.push(ValidationError::DuplicateTemplate {
                index,
                template: route.template.clone(),
            });
        }
        if !is_valid_status(route.status) {
            errors.push(ValidationError::InvalidStatus(route.status));
        }
    }

    let mut statuses = HashSet::new();
    for fallback in &config.fallbacks {
        if !is_valid_status(fallback.status) {
            errors.push(ValidationError::InvalidStatus(fallback.status));
        }
        if !statuses.insert(fallback.status) {
            errors.push(ValidationError::DuplicateFallback(fallback.status));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_valid_status(code: u16) -> bool {
    StatusCode::from_u16(code).is_ok()
}
