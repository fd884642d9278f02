//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     template string
//!     → pattern.rs (compile into literal / variable segments)
//!     → table.rs (insert or overwrite in place)
//!
//! Incoming Request (path):
//!     → router.rs (scan routes in registration order)
//!     → matcher.rs (positional segment match, capture raw text)
//!     → handler invoked, or not-found fallback
//!
//! Variable query (from inside a handler):
//!     → bindings of every matching route
//!     → kind.rs (cast raw text to typed values)
//! ```
//!
//! # Design Decisions
//! - No regex, no wildcards: one variable is exactly one segment
//! - Deterministic: same table and path always pick the same route
//! - First match wins (ordered by registration)

pub mod error;
pub mod handler;
pub mod kind;
pub mod matcher;
pub mod pattern;
pub mod router;
pub mod table;

pub use error::{CompileError, QueryError};
pub use handler::{BoxHandler, Handler, RequestPath, StatusResponse};
pub use kind::{Kind, Value};
pub use matcher::{Binding, Matcher};
pub use pattern::{Pattern, Segment, VariableSpec};
pub use router::Router;
pub use table::{Route, RouteHandle, RouteTable};
