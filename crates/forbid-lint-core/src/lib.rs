//! # forbid-lint-core
//!
//! Core framework for type-usage linting on top of a host analysis engine.
//!
//! The host parses the target codebase, resolves types and documentation,
//! and hands nodes to registered rules. This crate defines the seam:
//!
//! - [`Node`] and friends: the node model rules consume
//! - [`Scope`], [`ClassHierarchy`] and [`DocResolver`]: host capabilities
//! - [`Rule`] trait for per-node rules
//! - [`Analyzer`] for dispatching nodes to subscribed rules
//! - [`Diagnostic`] and [`Violation`] for representing findings
//!
//! ## Example
//!
//! ```ignore
//! use forbid_lint_core::{Analyzer, NodeContext};
//!
//! let analyzer = Analyzer::builder()
//!     .rule(MyRule::new())
//!     .build();
//!
//! let ctx = NodeContext::new(&scope, &docs);
//! let violations = analyzer.check_node(&ctx, &node);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod config;
mod context;
pub mod memory;
mod node;
mod rule;
mod types;

pub use analyzer::{Analyzer, AnalyzerBuilder};
pub use config::{Config, ConfigError, RuleConfig};
pub use context::{
    ClassHierarchy, DocResolver, NodeContext, ParamTag, ResolvedDoc, ResolvedType, Scope, VarTag,
};
pub use node::{
    ClassKind, ClassLike, DocComment, DocumentedStatement, FunctionKind, FunctionLike, Name, Node,
    NodeKind, Param, Property, TypeNode,
};
pub use rule::{Rule, RuleBox};
pub use types::{Diagnostic, LintResult, Violation};
