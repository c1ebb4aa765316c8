//! Rule trait for defining per-node lint rules.

use crate::context::NodeContext;
use crate::node::{Node, NodeKind};
use crate::types::Diagnostic;

/// A lint rule invoked by the host once per subscribed node.
///
/// Rules must not keep state across visits: the host may visit nodes in any
/// order and in parallel.
///
/// # Example
///
/// ```ignore
/// use forbid_lint_core::{Diagnostic, Node, NodeContext, NodeKind, Rule};
///
/// pub struct NoAnonymousClasses;
///
/// impl Rule for NoAnonymousClasses {
///     fn name(&self) -> &'static str { "no-anonymous-classes" }
///     fn node_kinds(&self) -> &'static [NodeKind] { &[NodeKind::ClassLike] }
///
///     fn check(&self, _ctx: &NodeContext<'_>, node: &Node) -> Vec<Diagnostic> {
///         match node {
///             Node::ClassLike(c) if c.name.is_none() => vec![Diagnostic::new(
///                 "Anonymous classes are not allowed.",
///                 "no-anonymous-class",
///                 c.line,
///             )],
///             _ => vec![],
///         }
///     }
/// }
/// ```
pub trait Rule: Send + Sync {
    /// Returns the kebab-case name of this rule (e.g., "forbidden-type-usage").
    fn name(&self) -> &'static str;

    /// Returns a brief description of what this rule checks.
    fn description(&self) -> &'static str {
        ""
    }

    /// Node categories this rule wants to be called for.
    fn node_kinds(&self) -> &'static [NodeKind];

    /// Checks a single node and returns its diagnostics in traversal order.
    ///
    /// Never fails: conditions the rule cannot evaluate produce no
    /// diagnostics.
    fn check(&self, ctx: &NodeContext<'_>, node: &Node) -> Vec<Diagnostic>;
}

/// Type alias for boxed Rule trait objects.
pub type RuleBox = Box<dyn Rule>;
