//! Named type extraction from native type expressions and resolved doc types.

use forbid_lint_core::{Name, ResolvedType, TypeNode};

/// Builtin and pseudo types that never name a class.
const BUILTIN_TYPES: &[&str] = &[
    "string", "int", "float", "bool", "array", "object", "callable", "iterable", "mixed", "void",
    "null", "false", "true", "never", "self", "parent", "static",
];

/// Returns true if `name` is a builtin or pseudo type.
#[must_use]
pub fn is_builtin(name: &str) -> bool {
    BUILTIN_TYPES.iter().any(|b| b.eq_ignore_ascii_case(name))
}

/// Collects the named references of a native type expression in
/// traversal order, without deduplication.
#[must_use]
pub fn named_types(ty: &TypeNode) -> Vec<&Name> {
    let mut out = Vec::new();
    collect(ty, &mut out);
    out
}

fn collect<'a>(ty: &'a TypeNode, out: &mut Vec<&'a Name>) {
    match ty {
        TypeNode::Name(name) if !is_builtin(&name.name) => out.push(name),
        TypeNode::Name(_) | TypeNode::Keyword(_) => {}
        TypeNode::Nullable(inner) => collect(inner, out),
        TypeNode::Union(types) | TypeNode::Intersection(types) => {
            for t in types {
                collect(t, out);
            }
        }
    }
}

/// Collects the class names a resolved doc type denotes, with builtins
/// removed the same way as for native types.
#[must_use]
pub fn resolved_names(ty: &ResolvedType) -> Vec<&str> {
    ty.class_names()
        .into_iter()
        .filter(|name| !is_builtin(name))
        .collect()
}
