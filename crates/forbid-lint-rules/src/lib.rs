//! # forbid-lint-rules
//!
//! Built-in lint rules for forbid-lint.
//!
//! ## Available Rules
//!
//! | Name | Description |
//! |------|-------------|
//! | `forbidden-type-usage` | Forbids references to configured types |
//!
//! ## Usage
//!
//! ```ignore
//! use forbid_lint_core::Analyzer;
//! use forbid_lint_rules::{ForbiddenTypeConfig, ForbiddenTypeUsage, ForbiddenTypes};
//!
//! let types = ForbiddenTypes::from_entries([
//!     ForbiddenTypeConfig::new("App\\Legacy\\Registry", "Use the container instead"),
//! ])?;
//!
//! let analyzer = Analyzer::builder()
//!     .rule(ForbiddenTypeUsage::new(types))
//!     .build();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod forbidden_type_usage;

pub use forbidden_type_usage::{
    ForbiddenTypeConfig, ForbiddenTypeUsage, ForbiddenTypes, MatchResult, TypeConfigError,
    UsageContext,
};

/// Re-export core types for convenience.
pub use forbid_lint_core::{Diagnostic, Rule};
