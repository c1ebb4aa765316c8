//! # forbid-lint
//!
//! Forbidden type usage linter for host static-analysis engines.
//!
//! This is the main facade crate that re-exports the core framework and
//! the built-in rules, and builds them from a configuration file.
//!
//! ## Quick Start
//!
//! ```toml
//! # forbid-lint.toml
//! [rules.forbidden-type-usage.types]
//! "App\\Legacy\\Registry" = "Use the container instead"
//! "App\\Model\\Base" = { description = "Use read models", withSubclasses = true }
//! ```
//!
//! ```rust,ignore
//! let analyzer = forbid_lint::load_analyzer("forbid-lint.toml")?;
//!
//! // Inside the host's node visitor:
//! let ctx = forbid_lint::NodeContext::new(&scope, &docs);
//! for violation in analyzer.check_node(&ctx, &node) {
//!     report(violation);
//! }
//! ```

#![forbid(unsafe_code)]

// Re-export core types and traits
pub use forbid_lint_core::*;

/// Built-in rules.
pub mod rules {
    pub use forbid_lint_rules::*;
}

mod setup;

pub use setup::{analyzer_from_config, load_analyzer, rules_from_config, SetupError};
