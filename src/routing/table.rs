//! Route storage.
//!
//! # Responsibilities
//! - Own compiled routes in registration order
//! - Insert-or-overwrite by exact template string
//! - Own the status-code keyed fallback handlers
//!
//! # Design Decisions
//! - Registration order is match priority; overwriting keeps the original position
//! - Compilation happens before any mutation, so a failed registration changes nothing
//! - The not-found handler lives outside the map so it can never be missing

use std::collections::HashMap;
use std::fmt;

use axum::http::StatusCode;

use crate::routing::error::CompileError;
use crate::routing::handler::BoxHandler;
use crate::routing::matcher::{Binding, Matcher};
use crate::routing::pattern::{Pattern, VariableSpec};

/// A compiled template bound to its handler.
pub struct Route<Req, Res> {
    pattern: Pattern,
    handler: BoxHandler<Req, Res>,
}

impl<Req, Res> Route<Req, Res> {
    pub fn template(&self) -> &str {
        self.pattern.template()
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn handler(&self) -> BoxHandler<Req, Res> {
        self.handler.clone()
    }

    pub fn has_variables(&self) -> bool {
        self.pattern.has_variables()
    }
}

impl<Req, Res> fmt::Debug for Route<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("pattern", &self.pattern)
            .finish_non_exhaustive()
    }
}

/// Snapshot of a registered route returned by registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteHandle {
    /// Position in the match order.
    pub position: usize,
    pub template: String,
    pub variables: Vec<VariableSpec>,
    /// True when the registration replaced an existing route.
    pub overwritten: bool,
}

/// Ordered routes plus fallback handlers.
pub struct RouteTable<Req, Res> {
    routes: Vec<Route<Req, Res>>,
    not_found: BoxHandler<Req, Res>,
    fallbacks: HashMap<StatusCode, BoxHandler<Req, Res>>,
}

impl<Req, Res> RouteTable<Req, Res> {
    /// Create an empty table with the given not-found handler.
    pub fn new(not_found: BoxHandler<Req, Res>) -> Self {
        Self {
            routes: Vec::new(),
            not_found,
            fallbacks: HashMap::new(),
        }
    }

    /// Register `handler` under `template`.
    pub fn register(
        &mut self,
        template: &str,
        handler: BoxHandler<Req, Res>,
    ) -> Result<RouteHandle, CompileError> {
        let pattern = Pattern::compile(template)?;
        let variables = pattern.variables().cloned().collect();

        let (position, overwritten) = match self.position_of(template) {
            Some(position) => {
                let route = &mut self.routes[position];
                route.pattern = pattern;
                route.handler = handler;
                (position, true)
            }
            None => {
                self.routes.push(Route { pattern, handler });
                (self.routes.len() - 1, false)
            }
        };

        Ok(RouteHandle {
            position,
            template: template.to_string(),
            variables,
            overwritten,
        })
    }

    /// Insert or replace the fallback for `status`.
    ///
    /// Returns true when a handler was already registered for that code.
    pub fn register_fallback(&mut self, status: StatusCode, handler: BoxHandler<Req, Res>) -> bool {
        if status == StatusCode::NOT_FOUND {
            self.not_found = handler;
            return true;
        }
        self.fallbacks.insert(status, handler).is_some()
    }

    pub fn fallback(&self, status: StatusCode) -> Option<BoxHandler<Req, Res>> {
        if status == StatusCode::NOT_FOUND {
            return Some(self.not_found.clone());
        }
        self.fallbacks.get(&status).cloned()
    }

    pub fn not_found(&self) -> BoxHandler<Req, Res> {
        self.not_found.clone()
    }

    /// The first route, in registration order, matching `path`.
    pub fn first_match(&self, path: &str) -> Option<&Route<Req, Res>> {
        self.routes.iter().find(|route| route.pattern.matches(path))
    }

    /// Bindings from every route matching `path`, in registration order.
    pub fn bindings<'a, 'p>(&'a self, path: &'p str) -> impl Iterator<Item = Binding<'a, 'p>> {
        self.routes
            .iter()
            .filter_map(move |route| route.pattern.captures(path))
            .flatten()
    }

    pub fn position_of(&self, template: &str) -> Option<usize> {
        self.routes
            .iter()
            .position(|route| route.template() == template)
    }

    pub fn routes(&self) -> &[Route<Req, Res>] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl<Req, Res> fmt::Debug for RouteTable<Req, Res> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fallbacks: Vec<_> = self.fallbacks.keys().map(StatusCode::as_u16).collect();
        fallbacks.push(StatusCode::NOT_FOUND.as_u16());
        fallbacks.sort_unstable();

        f.debug_struct("RouteTable")
            .field("routes", &self.routes)
            .field("fallbacks", &fallbacks)
            .finish()
    }
}
