//! Path matching logic.
//!
//! # Responsibilities
//! - Compare a normalized request path against a compiled template
//! - Capture the raw text bound to each variable
//!
//! # Design Decisions
//! - Literal matching is case-sensitive and exact
//! - Segment counts must agree; a variable never spans more than one segment
//! - Single forward pass, short-circuits on the first literal mismatch, no backtracking

use std::fmt;

use crate::routing::kind::Value;
use crate::routing::pattern::{split_path, Pattern, Segment, VariableSpec};

/// A variable captured by a successful match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding<'a, 'p> {
    pub spec: &'a VariableSpec,
    pub raw: &'p str,
}

impl Binding<'_, '_> {
    pub fn name(&self) -> &str {
        &self.spec.name
    }

    /// Cast the captured text to the declared kind.
    pub fn value(&self) -> Value {
        self.spec.kind.bind(self.raw)
    }
}

/// Trait for matching request paths against a route condition.
pub trait Matcher: Send + Sync + fmt::Debug {
    /// Returns the captured variables if `path` matches, in declaration order.
    fn captures<'a, 'p>(&'a self, path: &'p str) -> Option<Vec<Binding<'a, 'p>>>;

    /// Returns true if `path` matches this condition.
    fn matches(&self, path: &str) -> bool {
        self.captures(path).is_some()
    }
}

impl Matcher for Pattern {
    fn captures<'a, 'p>(&'a self, path: &'p str) -> Option<Vec<Binding<'a, 'p>>> {
        let segments = self.segments();
        if split_path(path).count() != segments.len() {
            return None;
        }

        let mut bindings = Vec::new();
        for (segment, part) in segments.iter().zip(split_path(path)) {
            match segment {
                Segment::Literal(text) => {
                    if text != part {
                        return None;
                    }
                }
                Segment::Variable(spec) => bindings.push(Binding { spec, raw: part }),
            }
        }
        Some(bindings)
    }
}
