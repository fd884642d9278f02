//! Request handling.
//!
//! # Responsibilities
//! - Expose the request path to the router
//!
//! # Design Decisions
//! - Paths are percent-decoded before matching, so `/user/j%C3%B6rg` binds `jörg`
//! - A path that does not decode to UTF-8 is matched as sent

use std::borrow::Cow;

use axum::http::Request;

use crate::routing::RequestPath;

impl<B> RequestPath for Request<B> {
    fn path(&self) -> Cow<'_, str> {
        let raw = self.uri().path();
        urlencoding::decode(raw).unwrap_or(Cow::Borrowed(raw))
    }
}
