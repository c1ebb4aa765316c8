//! Building the rule set and analyzer from configuration.

use forbid_lint_core::{Analyzer, Config, ConfigError, RuleBox};
use forbid_lint_rules::forbidden_type_usage::{self, ForbiddenTypeUsage};
use forbid_lint_rules::{ForbiddenTypes, TypeConfigError};
use std::path::Path;
use tracing::info;

/// Option key holding the denylist of the forbidden-type-usage rule.
const TYPES_KEY: &str = "types";

/// Errors from loading configuration and building rules.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum SetupError {
    /// The configuration file could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The `types` option is present but not a table.
    #[error("rules.{rule}.{key} must be a table")]
    #[diagnostic(code(forbid_lint::setup::not_a_table))]
    NotATable {
        /// Rule section.
        rule: &'static str,
        /// Offending key.
        key: &'static str,
    },

    /// The denylist is malformed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Types(#[from] TypeConfigError),
}

/// Builds the built-in rules from configuration.
///
/// A missing `[rules.forbidden-type-usage.types]` table yields the rule
/// with an empty denylist.
///
/// # Errors
///
/// Returns an error if the denylist is malformed.
pub fn rules_from_config(config: &Config) -> Result<Vec<RuleBox>, SetupError> {
    let section = config.rule(forbidden_type_usage::NAME);
    let types = match section.and_then(|s| s.options.get(TYPES_KEY)) {
        None => ForbiddenTypes::new(),
        Some(value) => {
            let table = value.as_table().ok_or(SetupError::NotATable {
                rule: forbidden_type_usage::NAME,
                key: TYPES_KEY,
            })?;
            ForbiddenTypes::from_table(table)?
        }
    };

    Ok(vec![Box::new(ForbiddenTypeUsage::new(types))])
}

/// Builds an analyzer with the built-in rules from configuration.
///
/// # Errors
///
/// Returns an error if the denylist is malformed.
pub fn analyzer_from_config(config: Config) -> Result<Analyzer, SetupError> {
    let rules = rules_from_config(&config)?;
    let mut builder = Analyzer::builder().config(config);
    for rule in rules {
        builder = builder.rule_box(rule);
    }
    Ok(builder.build())
}

/// Loads a configuration file and builds an analyzer from it.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or if the
/// denylist is malformed.
pub fn load_analyzer(path: impl AsRef<Path>) -> Result<Analyzer, SetupError> {
    let path = path.as_ref();
    let config = Config::from_file(path)?;
    let analyzer = analyzer_from_config(config)?;
    info!(
        "Loaded {} rule(s) from {}",
        analyzer.rule_count(),
        path.display()
    );
    Ok(analyzer)
}
