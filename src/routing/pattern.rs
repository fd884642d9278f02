//! Template compilation.
//!
//! # Responsibilities
//! - Split a template such as `/profile/{name:string}/view` into segments
//! - Validate brace balance and variable declarations
//! - Resolve each variable's type tag
//!
//! # Design Decisions
//! - Empty components are dropped, so `/a/b`, `a/b` and `/a/b/` compile identically
//! - One variable always spans exactly one segment

use crate::routing::error::CompileError;
use crate::routing::kind::Kind;

/// A named, typed path variable.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VariableSpec {
    pub name: String,
    pub kind: Kind,
}

impl VariableSpec {
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// One `/`-delimited component of a compiled template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Variable(VariableSpec),
}

/// A compiled route template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    template: String,
    segments: Vec<Segment>,
}

impl Pattern {
    /// Compile a template into its segments.
    pub fn compile(template: &str) -> Result<Self, CompileError> {
        let opening = template.matches('{').count();
        let closing = template.matches('}').count();
        if opening != closing {
            return Err(CompileError::UnbalancedBraces {
                template: template.to_string(),
            });
        }

        let segments = split_path(template)
            .map(compile_segment)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    /// The template string exactly as registered.
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Variables in left-to-right order of appearance.
    pub fn variables(&self) -> impl Iterator<Item = &VariableSpec> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Variable(spec) => Some(spec),
            Segment::Literal(_) => None,
        })
    }

    pub fn variable_count(&self) -> usize {
        self.variables().count()
    }

    pub fn has_variables(&self) -> bool {
        self.variables().next().is_some()
    }
}

/// Split a template or request path into its non-empty components.
pub(crate) fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|part| !part.is_empty())
}

fn compile_segment(raw: &str) -> Result<Segment, CompileError> {
    let trimmed = raw.trim();

    if let Some(body) = trimmed
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
    {
        // Nested braces are never valid inside a declaration.
        if body.contains(['{', '}']) {
            return Err(CompileError::MisplacedBrace {
                segment: raw.to_string(),
            });
        }
        return parse_variable(raw, body).map(Segment::Variable);
    }

    if trimmed.contains(['{', '}']) {
        return Err(CompileError::MisplacedBrace {
            segment: raw.to_string(),
        });
    }

    Ok(Segment::Literal(raw.to_string()))
}

fn parse_variable(raw: &str, body: &str) -> Result<VariableSpec, CompileError> {
    if body.trim().is_empty() {
        return Err(CompileError::EmptyVariableBody {
            segment: raw.to_string(),
        });
    }

    let (name, tag) = match body.split_once(':') {
        Some((name, tag)) => (name.trim(), Some(tag)),
        None => (body.trim(), None),
    };

    if name.is_empty() {
        return Err(CompileError::MissingVariableName {
            segment: raw.to_string(),
        });
    }

    let kind = tag.map(Kind::from_tag).unwrap_or_default();
    Ok(VariableSpec::new(name, kind))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn specs(template: &str) -> Vec<VariableSpec> {
        Pattern::compile(template)
            .unwrap()
            .variables()
            .cloned()
            .collect()
    }

    #[test]
    fn test_literal_template() {
        let pattern = Pattern::compile("/test/testing").unwrap();
        assert_eq!(
            pattern.segments(),
            &[
                Segment::Literal("test".into()),
                Segment::Literal("testing".into())
            ]
        );
        assert!(!pattern.has_variables());
    }

    #[test]
    fn test_slashes_normalize() {
        let a = Pattern::compile("/a/b").unwrap();
        let b = Pattern::compile("a/b/").unwrap();
        let c = Pattern::compile("//a//b").unwrap();
        assert_eq!(a.segments(), b.segments());
        assert_eq!(a.segments(), c.segments());
        assert_eq!(a.template(), "/a/b");
    }

    #[test]
    fn test_variable_kinds() {
        assert_eq!(
            specs("/test/{name: string}/test"),
            vec![VariableSpec::new("name", Kind::String)]
        );
        assert_eq!(
            specs("/test/{age: Int}/test"),
            vec![VariableSpec::new("age", Kind::Int)]
        );
        assert_eq!(
            specs("/test/{name: StRiNg}/{age: INT}"),
            vec![
                VariableSpec::new("name", Kind::String),
                VariableSpec::new("age", Kind::Int)
            ]
        );
    }

    #[test]
    fn test_untagged_defaults_to_string() {
        assert_eq!(
            specs("/test/{name}/test"),
            vec![VariableSpec::new("name", Kind::String)]
        );
    }

    #[test]
    fn test_unknown_tag_is_generic() {
        assert_eq!(
            specs("/price/{amount: decimal}"),
            vec![VariableSpec::new("amount", Kind::Generic)]
        );
    }

    #[test]
    fn test_variable_order() {
        let names: Vec<_> = specs("/test/{name}/{age:int}/{profile}/{count}")
            .into_iter()
            .map(|spec| spec.name)
            .collect();
        assert_eq!(names, ["name", "age", "profile", "count"]);
        assert_eq!(Pattern::compile("/test/{name}/x/{age:int}").unwrap().variable_count(), 2);
        assert_eq!(Pattern::compile("/test/x").unwrap().variable_count(), 0);
    }

    #[test]
    fn test_unbalanced_braces() {
        let err = Pattern::compile("/test/{name: string/test").unwrap_err();
        assert!(matches!(err, CompileError::UnbalancedBraces { .. }));

        let err = Pattern::compile("/a/name}/b").unwrap_err();
        assert!(matches!(err, CompileError::UnbalancedBraces { .. }));
    }

    #[test]
    fn test_missing_name() {
        let err = Pattern::compile("/test/{:string}/test").unwrap_err();
        assert_eq!(
            err,
            CompileError::MissingVariableName {
                segment: "{:string}".into()
            }
        );
        let err = Pattern::compile("/test/{ : int}").unwrap_err();
        assert!(matches!(err, CompileError::MissingVariableName { .. }));
    }

    #[test]
    fn test_empty_body() {
        let err = Pattern::compile("/test/{}/test").unwrap_err();
        assert!(matches!(err, CompileError::EmptyVariableBody { .. }));
        let err = Pattern::compile("/test/{  }").unwrap_err();
        assert!(matches!(err, CompileError::EmptyVariableBody { .. }));
    }

    #[test]
    fn test_misplaced_braces() {
        for template in ["/a{b}/c", "/{a}b/c", "/a/{{b}}", "/a/{/b}"] {
            let err = Pattern::compile(template).unwrap_err();
            assert!(
                matches!(err, CompileError::MisplacedBrace { .. }),
                "{} -> {:?}",
                template,
                err
            );
        }
    }

    #[test]
    fn test_error_messages() {
        let err = Pattern::compile("/test/{}/test").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing variable information in variable declaration \"{}\""
        );
        let err = Pattern::compile("/t/{a").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing '{' or '}' in route variable declaration of \"/t/{a\""
        );
    }
}
