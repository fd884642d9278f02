//! Routing error types.

use thiserror::Error;

/// Errors raised while compiling a route template.
///
/// Registration surfaces these to the caller and leaves the route table unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    #[error("Missing '{{' or '}}' in route variable declaration of \"{template}\"")]
    UnbalancedBraces { template: String },

    #[error("Missing the variable name in variable declaration \"{segment}\"")]
    MissingVariableName { segment: String },

    #[error("Missing variable information in variable declaration \"{segment}\"")]
    EmptyVariableBody { segment: String },

    #[error("Unexpected brace in route segment \"{segment}\"")]
    MisplacedBrace { segment: String },
}

/// Errors returned by the variable query API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("No variables matched for the route and request \"{path}\"")]
    NoVariablesMatched { path: String },

    #[error("No variable was found that matched for \"{name}\"")]
    VariableNotFound { name: String },
}
