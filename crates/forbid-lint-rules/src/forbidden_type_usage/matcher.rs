//! Forbidden-type matching against the denylist and the class hierarchy.

use super::config::{normalize_name, ForbiddenTypes};
use forbid_lint_core::ClassHierarchy;
use tracing::trace;

/// Where a type reference appears.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageContext {
    /// Parameter, return or property type (native or doc tag).
    TypeHint,
    /// `extends`, `implements` or trait `use`.
    Structural,
}

impl UsageContext {
    fn is_type_hint(self) -> bool {
        self == Self::TypeHint
    }
}

/// A matched forbidden type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult {
    /// Configured type that matched.
    pub type_name: String,
    /// Effective description, suffixed with the ancestor for subclass matches.
    pub description: String,
    /// Flag of the matched entry.
    pub type_hint_only: bool,
    /// Flag of the matched entry.
    pub with_subclasses: bool,
    /// Forbidden ancestor when matched through the subclass walk.
    pub ancestor: Option<String>,
}

impl ForbiddenTypes {
    /// Decides whether `name`, used in `context`, is forbidden.
    ///
    /// Exact matches are decisive: an exact entry exempted by
    /// `type_hint_only` in a structural context yields no match, without
    /// falling through to the subclass walk. Otherwise the first
    /// `with_subclasses` entry (in configuration order) that `name` strictly
    /// descends from wins. Names the hierarchy does not know only match
    /// exactly.
    #[must_use]
    pub fn find(
        &self,
        name: &str,
        context: UsageContext,
        hierarchy: &dyn ClassHierarchy,
    ) -> Option<MatchResult> {
        let name = normalize_name(name);

        if let Some(entry) = self.get(name) {
            if entry.type_hint_only && !context.is_type_hint() {
                return None;
            }
            return Some(MatchResult {
                type_name: entry.type_name.clone(),
                description: entry.description.clone(),
                type_hint_only: entry.type_hint_only,
                with_subclasses: entry.with_subclasses,
                ancestor: None,
            });
        }

        if !self.has_subclass_entries() || !hierarchy.has_class(name) {
            return None;
        }

        self.iter()
            .filter(|entry| entry.with_subclasses)
            .filter(|entry| context.is_type_hint() || !entry.type_hint_only)
            .filter(|entry| hierarchy.has_class(&entry.type_name))
            .find(|entry| hierarchy.is_subclass_of(name, &entry.type_name))
            .map(|entry| {
                trace!("{} matched as subclass of {}", name, entry.type_name);
                let suffix = format!("(subclass of {})", entry.type_name);
                MatchResult {
                    type_name: entry.type_name.clone(),
                    description: if entry.description.is_empty() {
                        suffix
                    } else {
                        format!("{} {suffix}", entry.description)
                    },
                    type_hint_only: entry.type_hint_only,
                    with_subclasses: entry.with_subclasses,
                    ancestor: Some(entry.type_name.clone()),
                }
            })
    }
}
