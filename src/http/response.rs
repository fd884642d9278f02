//! Response building.
//!
//! # Responsibilities
//! - Plain-text status bodies for the built-in fallbacks
//! - Render configured text bodies, substituting `{name}` placeholders
//!
//! # Design Decisions
//! - Default fallback body is the canonical reason phrase (`Not Found`)
//! - Placeholders that do not resolve are reported back to the caller, not left in the body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::routing::StatusResponse;

impl StatusResponse for Response {
    fn from_status(status: StatusCode) -> Self {
        (status, String::from_status(status)).into_response()
    }
}

/// Plain-text response with the given status.
pub fn text(status: StatusCode, body: impl Into<String>) -> Response {
    (status, body.into()).into_response()
}

/// Replace every `{name}` in `body` with `lookup(name)`.
///
/// Returns the names that `lookup` could not resolve as the error.
pub fn render_body<F>(body: &str, mut lookup: F) -> Result<String, Vec<String>>
where
    F: FnMut(&str) -> Option<String>,
{
    let mut out = String::with_capacity(body.len());
    let mut missing = Vec::new();
    let mut rest = body;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            rest = "";
            break;
        };

        let name = after[..end].trim();
        match lookup(name) {
            Some(value) => out.push_str(&value),
            None => missing.push(name.to_string()),
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);

    if missing.is_empty() {
        Ok(out)
    } else {
        Err(missing)
    }
}
