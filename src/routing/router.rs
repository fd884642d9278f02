//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Register routes and fallbacks under a write lock
//! - Find the first matching route for a request and invoke its handler
//! - Answer variable queries for a request path
//!
//! # Design Decisions
//! - One reader/writer lock guards the whole table; dispatch and queries only read
//! - Handlers are cloned out of the table and run with no lock held
//! - First registered wins among overlapping templates
//! - Explicit not-found fallback rather than an error from dispatch

use std::sync::Arc;

use axum::http::StatusCode;
use parking_lot::RwLock;

use crate::observability::logging::{NoopLogger, RouterEvent, RouterLogger};
use crate::routing::error::{CompileError, QueryError};
use crate::routing::handler::{status_handler, BoxHandler, Handler, RequestPath, StatusResponse};
use crate::routing::kind::Value;
use crate::routing::table::{RouteHandle, RouteTable};

/// A template router dispatching `Req` values to handlers producing `Res`.
pub struct Router<Req, Res> {
    table: RwLock<RouteTable<Req, Res>>,
    logger: Arc<dyn RouterLogger>,
}

impl<Req, Res> Router<Req, Res>
where
    Req: 'static,
    Res: StatusResponse + 'static,
{
    /// Create a router with plain status fallbacks for 404 and 500.
    pub fn new() -> Self {
        let router = Self::with_not_found(status_handler(StatusCode::NOT_FOUND));
        router.table.write().register_fallback(
            StatusCode::INTERNAL_SERVER_ERROR,
            status_handler(StatusCode::INTERNAL_SERVER_ERROR),
        );
        router
    }
}

impl<Req, Res> Default for Router<Req, Res>
where
    Req: 'static,
    Res: StatusResponse + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Req: 'static, Res: 'static> Router<Req, Res> {
    /// Create a router whose only fallback is `not_found`.
    pub fn with_not_found(not_found: BoxHandler<Req, Res>) -> Self {
        Self {
            table: RwLock::new(RouteTable::new(not_found)),
            logger: Arc::new(NoopLogger),
        }
    }

    /// Replace the event hook.
    pub fn with_logger(mut self, logger: Arc<dyn RouterLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Register `handler` for `template`.
    ///
    /// Re-registering an identical template replaces its handler and variables
    /// without moving it in the match order. On error the table is unchanged.
    pub fn register_route<H>(&self, template: &str, handler: H) -> Result<RouteHandle, CompileError>
    where
        H: Handler<Req, Res>,
    {
        let result = self.table.write().register(template, Arc::new(handler));

        match &result {
            Ok(handle) => self.logger.log(&RouterEvent::RouteRegistered {
                template,
                position: handle.position,
                overwritten: handle.overwritten,
            }),
            Err(e) => self.logger.log(&RouterEvent::RouteRejected {
                template,
                reason: e.to_string(),
            }),
        }
        result
    }

    /// Insert or replace the fallback for `status`.
    ///
    /// Returns true when a handler for `status` already existed.
    pub fn register_fallback<H>(&self, status: StatusCode, handler: H) -> bool
    where
        H: Handler<Req, Res>,
    {
        let overwritten = self
            .table
            .write()
            .register_fallback(status, Arc::new(handler));
        self.logger.log(&RouterEvent::FallbackRegistered {
            status,
            overwritten,
        });
        overwritten
    }

    /// Dispatch `request` to the first matching route, or to the not-found fallback.
    pub fn dispatch(&self, request: Req) -> Res
    where
        Req: RequestPath,
    {
        let path = request.path().into_owned();
        let (handler, template) = {
            let table = self.table.read();
            match table.first_match(&path) {
                Some(route) => (route.handler(), Some(route.template().to_string())),
                None => (table.not_found(), None),
            }
        };

        match &template {
            Some(template) => self.logger.log(&RouterEvent::Dispatched {
                path: &path,
                template,
            }),
            None => self.logger.log(&RouterEvent::NotFound { path: &path }),
        }

        handler.call(self, request)
    }

    /// Invoke the fallback registered for `status`, if any.
    pub fn fallback(&self, status: StatusCode, request: Req) -> Option<Res> {
        let handler = self.table.read().fallback(status)?;
        Some(handler.call(self, request))
    }

    /// Invoke the not-found fallback.
    pub fn not_found(&self, request: Req) -> Res {
        let handler = self.table.read().not_found();
        handler.call(self, request)
    }

    /// Typed values bound by every route matching the request path, in
    /// registration order.
    pub fn variables_for<P>(&self, request: &P) -> Result<Vec<Value>, QueryError>
    where
        P: RequestPath + ?Sized,
    {
        let path = request.path();
        let values: Vec<Value> = self
            .table
            .read()
            .bindings(&path)
            .map(|binding| binding.value())
            .collect();

        if values.is_empty() {
            return Err(QueryError::NoVariablesMatched {
                path: path.into_owned(),
            });
        }
        Ok(values)
    }

    /// The value bound to `name` for the request path.
    ///
    /// When several matching routes declare `name`, the last one in
    /// registration order wins.
    pub fn variable_by_name<P>(&self, name: &str, request: &P) -> Result<Value, QueryError>
    where
        P: RequestPath + ?Sized,
    {
        let path = request.path();
        let table = self.table.read();

        let mut any_bound = false;
        let mut found = None;
        for binding in table.bindings(&path) {
            any_bound = true;
            if binding.name() == name {
                found = Some(binding.value());
            }
        }

        match found {
            Some(value) => Ok(value),
            None if !any_bound => Err(QueryError::NoVariablesMatched {
                path: path.into_owned(),
            }),
            None => Err(QueryError::VariableNotFound {
                name: name.to_string(),
            }),
        }
    }

    /// The template `path` would be dispatched to.
    pub fn matched_template(&self, path: &str) -> Option<String> {
        self.table
            .read()
            .first_match(path)
            .map(|route| route.template().to_string())
    }

    /// Registered templates in match order.
    pub fn templates(&self) -> Vec<String> {
        self.table
            .read()
            .routes()
            .iter()
            .map(|route| route.template().to_string())
            .collect()
    }

    pub fn route_count(&self) -> usize {
        self.table.read().len()
    }
}

impl<Req, Res> std::fmt::Debug for Router<Req, Res> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("table", &*self.table.read())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    type TestRouter = Router<&'static str, String>;

    fn reply(text: &'static str) -> impl Fn(&TestRouter, &'static str) -> String {
        move |_: &TestRouter, _: &'static str| text.to_string()
    }

    #[test]
    fn test_dispatch_and_not_found() {
        let router = TestRouter::new();
        router.register_route("/hello", reply("Hello World")).unwrap();
        assert_eq!(router.dispatch("/hello"), "Hello World");
        assert_eq!(router.dispatch("/hello/"), "Hello World");
        assert_eq!(router.dispatch("/nope"), "Not Found");
    }

    #[test]
    fn test_custom_not_found() {
        let router = TestRouter::new();
        let overwritten = router.register_fallback(StatusCode::NOT_FOUND, reply("Couldn't find the handler"));
        assert!(overwritten);
        assert_eq!(router.dispatch("/notfound"), "Couldn't find the handler");
    }

    #[test]
    fn test_default_fallbacks() {
        let router = TestRouter::new();
        assert_eq!(
            router.fallback(StatusCode::INTERNAL_SERVER_ERROR, "/x").as_deref(),
            Some("Internal Server Error")
        );
        assert!(router.fallback(StatusCode::SERVICE_UNAVAILABLE, "/x").is_none());
        assert!(!router.register_fallback(StatusCode::SERVICE_UNAVAILABLE, reply("busy")));
        assert_eq!(router.not_found("/x"), "Not Found");
    }

    #[test]
    fn test_first_registered_wins() {
        let router = TestRouter::new();
        router.register_route("/a/{x}", reply("var")).unwrap();
        router.register_route("/a/b", reply("lit")).unwrap();
        assert_eq!(router.dispatch("/a/b"), "var");
        assert_eq!(router.matched_template("/a/b").as_deref(), Some("/a/{x}"));
    }

    #[test]
    fn test_variable_queries() {
        let router = TestRouter::new();
        router.register_route("/test/{age: int}/{name: string}", reply("ok")).unwrap();

        let values = router.variables_for("/test/1234/darwin").unwrap();
        assert_eq!(values, vec![Value::Int(1234), Value::Str("darwin".into())]);
        assert_eq!(
            router.variable_by_name("name", "/test/1234/darwin").unwrap(),
            Value::Str("darwin".into())
        );
    }

    #[test]
    fn test_query_errors() {
        let router = TestRouter::new();
        router.register_route("/test/no/variables", reply("ok")).unwrap();
        router.register_route("/test/{profile: string}/bad", reply("ok")).unwrap();

        let err = router.variables_for("/test/no/variables").unwrap_err();
        assert_eq!(
            err.to_string(),
            "No variables matched for the route and request \"/test/no/variables\""
        );
        let err = router.variable_by_name("name", "/test/no/variables").unwrap_err();
        assert!(matches!(err, QueryError::NoVariablesMatched { .. }));

        let err = router.variable_by_name("name", "/test/darwin/bad").unwrap_err();
        assert_eq!(err.to_string(), "No variable was found that matched for \"name\"");
    }

    #[test]
    fn test_last_binding_wins_by_name() {
        let router = TestRouter::new();
        router.register_route("/u/{id:int}", reply("a")).unwrap();
        router.register_route("/u/{id}", reply("b")).unwrap();
        assert_eq!(
            router.variables_for("/u/5").unwrap(),
            vec![Value::Int(5), Value::Str("5".into())]
        );
        assert_eq!(router.variable_by_name("id", "/u/5").unwrap(), Value::Str("5".into()));
    }

    #[test]
    fn test_handler_queries_router() {
        let router = TestRouter::new();
        router
            .register_route("/profile/{name}/view", |r: &TestRouter, req: &'static str| {
                r.variable_by_name("name", req).unwrap().to_string()
            })
            .unwrap();
        assert_eq!(router.dispatch("/profile/darwin/view"), "darwin");
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl RouterLogger for Recorder {
        fn log(&self, event: &RouterEvent<'_>) {
            self.0.lock().unwrap().push(format!("{:?}", event));
        }
    }

    #[derive(Default)]
    struct Reentrant(std::sync::OnceLock<std::sync::Weak<TestRouter>>);

    impl RouterLogger for Reentrant {
        fn log(&self, event: &RouterEvent<'_>) {
            if let RouterEvent::Dispatched { .. } = event {
                if let Some(router) = self.0.get().and_then(|weak| weak.upgrade()) {
                    router.register_route("/from-logger", reply("logged")).unwrap();
                }
            }
        }
    }

    #[test]
    fn test_logger_may_call_back_into_router() {
        let hook = Arc::new(Reentrant::default());
        let router = Arc::new(TestRouter::new().with_logger(hook.clone()));
        hook.0.set(Arc::downgrade(&router)).unwrap();

        router.register_route("/a", reply("a")).unwrap();
        assert_eq!(router.dispatch("/a"), "a");
        assert_eq!(router.dispatch("/from-logger"), "logged");
        assert_eq!(router.route_count(), 2);
    }

    #[test]
    fn test_logger_receives_events() {
        let recorder = Arc::new(Recorder::default());
        let router = TestRouter::new().with_logger(recorder.clone());
        router.register_route("/a", reply("a")).unwrap();
        let _ = router.register_route("/b/{", reply("b"));
        router.dispatch("/a");
        router.dispatch("/missing");

        let events = recorder.0.lock().unwrap();
        assert_eq!(events.len(), 4);
        assert!(events[0].starts_with("RouteRegistered"));
        assert!(events[1].starts_with("RouteRejected"));
        assert!(events[2].starts_with("Dispatched"));
        assert!(events[3].starts_with("NotFound"));
    }
}
