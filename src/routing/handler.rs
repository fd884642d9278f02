//! Handler and request contracts shared by the route table and the dispatcher.

use std::borrow::Cow;
use std::sync::Arc;

use axum::http::StatusCode;

use crate::routing::router::Router;

/// A request handler.
///
/// Handlers receive the router that dispatched them so they can query bound
/// variables or invoke a fallback explicitly. No router lock is held while a
/// handler runs.
pub trait Handler<Req, Res>: Send + Sync + 'static {
    fn call(&self, router: &Router<Req, Res>, request: Req) -> Res;
}

impl<F, Req, Res> Handler<Req, Res> for F
where
    F: Fn(&Router<Req, Res>, Req) -> Res + Send + Sync + 'static,
{
    fn call(&self, router: &Router<Req, Res>, request: Req) -> Res {
        self(router, request)
    }
}

/// Shared handler reference stored by routes and fallbacks.
pub type BoxHandler<Req, Res> = Arc<dyn Handler<Req, Res>>;

/// Access to the (percent-decoded) path of an inbound request.
pub trait RequestPath {
    fn path(&self) -> Cow<'_, str>;
}

impl RequestPath for str {
    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl RequestPath for String {
    fn path(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl<T: RequestPath + ?Sized> RequestPath for &T {
    fn path(&self) -> Cow<'_, str> {
        (**self).path()
    }
}

/// Responses that can be built from a bare status code.
///
/// Used for the default fallbacks installed by [`Router::new`].
pub trait StatusResponse {
    fn from_status(status: StatusCode) -> Self;
}

impl StatusResponse for String {
    fn from_status(status: StatusCode) -> Self {
        status
            .canonical_reason()
            .unwrap_or(status.as_str())
            .to_string()
    }
}

/// A handler that always answers with `status`.
pub fn status_handler<Req, Res>(status: StatusCode) -> BoxHandler<Req, Res>
where
    Req: 'static,
    Res: StatusResponse + 'static,
{
    Arc::new(move |_: &Router<Req, Res>, _: Req| Res::from_status(status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_paths() {
        assert_eq!("/a/b".path(), "/a/b");
        assert_eq!(String::from("/c").path(), "/c");
        let nested: &&str = &"/d";
        assert_eq!(nested.path(), "/d");
    }

    #[test]
    fn test_status_text() {
        assert_eq!(String::from_status(StatusCode::NOT_FOUND), "Not Found");
        assert_eq!(
            String::from_status(StatusCode::INTERNAL_SERVER_ERROR),
            "Internal Server Error"
        );
    }
}
