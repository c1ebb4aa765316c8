//! Denylist normalization.
//!
//! Raw configuration maps a type name either to a description string or to
//! a record:
//!
//! ```toml
//! "App\\Legacy\\Registry" = "Use the container instead"
//! "App\\Http\\Request" = { description = "Inject a PSR request", typeHintOnly = true }
//! "App\\Model\\Base" = { withSubclasses = true }
//! ```
//!
//! Both shapes are resolved here, once, into [`ForbiddenTypeConfig`].

use std::collections::HashMap;

const DESCRIPTION: &str = "description";
const TYPE_HINT_ONLY: &str = "typeHintOnly";
const WITH_SUBCLASSES: &str = "withSubclasses";

/// Policy for one forbidden type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForbiddenTypeConfig {
    /// Forbidden type name, without a leading namespace separator.
    pub type_name: String,
    /// Explanation appended to diagnostics (may be empty).
    pub description: String,
    /// Only report type-hint usages; extends/implements/use are exempt.
    pub type_hint_only: bool,
    /// Also report subclasses of this type.
    pub with_subclasses: bool,
}

impl ForbiddenTypeConfig {
    /// Creates a policy with both flags off.
    #[must_use]
    pub fn new(type_name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            type_name: normalize_name(&type_name.into()).to_string(),
            description: description.into(),
            type_hint_only: false,
            with_subclasses: false,
        }
    }

    /// Sets whether only type-hint usages are reported.
    #[must_use]
    pub fn type_hint_only(mut self, value: bool) -> Self {
        self.type_hint_only = value;
        self
    }

    /// Sets whether subclasses are reported.
    #[must_use]
    pub fn with_subclasses(mut self, value: bool) -> Self {
        self.with_subclasses = value;
        self
    }
}

/// Errors from normalizing the denylist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum TypeConfigError {
    /// A configured type name is empty.
    #[error("forbidden type name must not be empty")]
    #[diagnostic(code(forbid_lint::types::empty_name))]
    EmptyTypeName,

    /// Two entries normalize to the same type name.
    #[error("forbidden type `{type_name}` is configured more than once")]
    #[diagnostic(
        code(forbid_lint::types::duplicate),
        help("`\\Foo` and `Foo` name the same type")
    )]
    DuplicateType {
        /// The duplicated type.
        type_name: String,
    },

    /// The value is neither a description string nor a record.
    #[error(
        "forbidden type `{type_name}`: expected a description string or a table, found {found}"
    )]
    #[diagnostic(code(forbid_lint::types::invalid_value))]
    InvalidValue {
        /// The offending type.
        type_name: String,
        /// TOML type that was found.
        found: &'static str,
    },

    /// A record field has the wrong type.
    #[error("forbidden type `{type_name}`: `{field}` must be a {expected}, found {found}")]
    #[diagnostic(code(forbid_lint::types::invalid_field))]
    InvalidField {
        /// The offending type.
        type_name: String,
        /// The offending field.
        field: &'static str,
        /// Expected TOML type.
        expected: &'static str,
        /// TOML type that was found.
        found: &'static str,
    },

    /// A record contains an unknown field.
    #[error("forbidden type `{type_name}`: unknown field `{field}`")]
    #[diagnostic(
        code(forbid_lint::types::unknown_field),
        help("supported fields are `description`, `typeHintOnly` and `withSubclasses`")
    )]
    UnknownField {
        /// The offending type.
        type_name: String,
        /// The unknown field.
        field: String,
    },
}

/// The normalized denylist, in configuration order.
///
/// Order matters: subclass matching picks the first eligible ancestor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForbiddenTypes {
    entries: Vec<ForbiddenTypeConfig>,
    index: HashMap<String, usize>,
}

impl ForbiddenTypes {
    /// Creates an empty denylist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalizes a raw configuration table.
    ///
    /// # Errors
    ///
    /// Returns an error naming the offending type and field for any value
    /// that is not a string or a well-formed record.
    pub fn from_table(table: &toml::Table) -> Result<Self, TypeConfigError> {
        Self::from_entries(
            table
                .iter()
                .map(|(name, value)| normalize_entry(name, value))
                .collect::<Result<Vec<_>, _>>()?,
        )
    }

    /// Builds a denylist from already-typed entries.
    ///
    /// # Errors
    ///
    /// Returns an error for empty or duplicate type names.
    pub fn from_entries<I>(entries: I) -> Result<Self, TypeConfigError>
    where
        I: IntoIterator<Item = ForbiddenTypeConfig>,
    {
        let mut types = Self::new();
        for mut entry in entries {
            entry.type_name = normalize_name(&entry.type_name).to_string();
            if entry.type_name.is_empty() {
                return Err(TypeConfigError::EmptyTypeName);
            }
            if types.index.contains_key(&entry.type_name) {
                return Err(TypeConfigError::DuplicateType {
                    type_name: entry.type_name,
                });
            }
            types
                .index
                .insert(entry.type_name.clone(), types.entries.len());
            types.entries.push(entry);
        }
        Ok(types)
    }

    /// Looks up a type by exact name.
    #[must_use]
    pub fn get(&self, type_name: &str) -> Option<&ForbiddenTypeConfig> {
        self.index
            .get(normalize_name(type_name))
            .map(|&i| &self.entries[i])
    }

    /// Iterates entries in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &ForbiddenTypeConfig> {
        self.entries.iter()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is forbidden.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if any entry also forbids subclasses.
    #[must_use]
    pub fn has_subclass_entries(&self) -> bool {
        self.entries.iter().any(|e| e.with_subclasses)
    }
}

/// Strips the leading namespace separator of a fully qualified name.
pub(crate) fn normalize_name(name: &str) -> &str {
    name.trim_start_matches('\\')
}

fn normalize_entry(
    type_name: &str,
    value: &toml::Value,
) -> Result<ForbiddenTypeConfig, TypeConfigError> {
    match value {
        toml::Value::String(description) => {
            Ok(ForbiddenTypeConfig::new(type_name, description.as_str()))
        }
        toml::Value::Table(record) => normalize_record(type_name, record),
        other => Err(TypeConfigError::InvalidValue {
            type_name: type_name.to_string(),
            found: other.type_str(),
        }),
    }
}

fn normalize_record(
    type_name: &str,
    record: &toml::Table,
) -> Result<ForbiddenTypeConfig, TypeConfigError> {
    if let Some(field) = record
        .keys()
        .find(|k| ![DESCRIPTION, TYPE_HINT_ONLY, WITH_SUBCLASSES].contains(&k.as_str()))
    {
        return Err(TypeConfigError::UnknownField {
            type_name: type_name.to_string(),
            field: field.clone(),
        });
    }

    let description = match record.get(DESCRIPTION) {
        None => String::new(),
        Some(toml::Value::String(s)) => s.clone(),
        Some(other) => {
            return Err(TypeConfigError::InvalidField {
                type_name: type_name.to_string(),
                field: DESCRIPTION,
                expected: "string",
                found: other.type_str(),
            })
        }
    };

    Ok(ForbiddenTypeConfig::new(type_name, description)
        .type_hint_only(bool_field(type_name, record, TYPE_HINT_ONLY)?)
        .with_subclasses(bool_field(type_name, record, WITH_SUBCLASSES)?))
}

fn bool_field(
    type_name: &str,
    record: &toml::Table,
    field: &'static str,
) -> Result<bool, TypeConfigError> {
    match record.get(field) {
        None => Ok(false),
        Some(toml::Value::Boolean(b)) => Ok(*b),
        Some(other) => Err(TypeConfigError::InvalidField {
            type_name: type_name.to_string(),
            field,
            expected: "boolean",
            found: other.type_str(),
        }),
    }
}
