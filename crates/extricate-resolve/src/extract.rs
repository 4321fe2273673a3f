//! Symbol reference extraction from method bodies.
//!
//! This module decides which identifier occurrences count as dependency
//! signals. Two kinds are collected: the accessed name of every
//! member-access expression (`x.Foo()` contributes `Foo`), and every
//! parameter's declared type. Declared types of the method itself, local
//! variable declarations, and literals are deliberately not collected.
//!
//! This is a heuristic under-approximation: the goal is real, provable
//! project dependencies, not a complete call graph. False negatives are
//! tolerated; false positives are not.

use extricate_schemas::{MethodBody, SymbolReferenceNode};

/// Which syntax position a reference was collected from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// The accessed-name node of a member-access expression.
    MemberAccess,
    /// A parameter's declared type node.
    ParameterType,
}

/// One extracted reference: the node plus where it came from.
#[derive(Debug, Clone, Copy)]
pub struct SymbolReference<'a> {
    pub kind: ReferenceKind,
    pub node: &'a SymbolReferenceNode,
}

impl<'a> SymbolReference<'a> {
    /// The identifier text, for diagnostics.
    pub fn name(&self) -> &'a str {
        &self.node.name
    }
}

/// Yields every dependency-relevant reference in a method body as one lazy
/// sequence: all member-access references first, then all parameter-type
/// references, each kind in document order.
///
/// Parameters whose type could not be determined (an implicitly typed loop
/// variable, say) are silently skipped - absence of a type node is not an
/// error.
pub fn method_references(
    body: &MethodBody,
) -> impl Iterator<Item = SymbolReference<'_>> {
    let member_accesses =
        body.member_accesses.iter().map(|node| SymbolReference {
            kind: ReferenceKind::MemberAccess,
            node,
        });

    let parameter_types = body
        .parameters
        .iter()
        .filter_map(|parameter| parameter.type_reference.as_ref())
        .map(|node| SymbolReference {
            kind: ReferenceKind::ParameterType,
            node,
        });

    member_accesses.chain(parameter_types)
}

#[cfg(test)]
mod tests {
    use extricate_schemas::ParameterNode;

    use super::*;

    fn node(name: &str) -> SymbolReferenceNode {
        SymbolReferenceNode {
            name: name.to_string(),
            symbol: None,
        }
    }

    #[test]
    fn test_empty_body_yields_nothing() {
        let body = MethodBody::default();
        assert_eq!(method_references(&body).count(), 0);
    }

    #[test]
    fn test_member_accesses_precede_parameter_types() {
        let body = MethodBody {
            member_accesses: vec![node("Helper"), node("WriteLine")],
            parameters: vec![ParameterNode {
                name: "input".to_string(),
                type_reference: Some(node("JObject")),
            }],
        };

        let collected: Vec<(ReferenceKind, &str)> = method_references(&body)
            .map(|r| (r.kind, r.name()))
            .collect();

        assert_eq!(
            collected,
            vec![
                (ReferenceKind::MemberAccess, "Helper"),
                (ReferenceKind::MemberAccess, "WriteLine"),
                (ReferenceKind::ParameterType, "JObject"),
            ]
        );
    }

    #[test]
    fn test_untyped_parameters_skipped() {
        let body = MethodBody {
            member_accesses: Vec::new(),
            parameters: vec![
                ParameterNode {
                    name: "item".to_string(),
                    type_reference: None,
                },
                ParameterNode {
                    name: "count".to_string(),
                    type_reference: Some(node("Int32")),
                },
            ],
        };

        let names: Vec<&str> =
            method_references(&body).map(|r| r.name()).collect();
        assert_eq!(names, vec!["Int32"]);
    }
}
