//! In-memory host adapters.
//!
//! Hosts that precompute their class universe and doc resolutions can use
//! these directly; tests use them as fakes.

use crate::context::{ClassHierarchy, DocResolver, ResolvedDoc, Scope};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// A class universe declared as direct parent edges.
#[derive(Debug, Clone, Default)]
pub struct ClassMap {
    parents: HashMap<String, Vec<String>>,
}

impl ClassMap {
    /// Creates an empty class map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a class with its direct supertypes (parent class first,
    /// then interfaces).
    #[must_use]
    pub fn class<I, S>(mut self, name: impl Into<String>, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parents
            .insert(name.into(), parents.into_iter().map(Into::into).collect());
        self
    }

    /// Declares a class without supertypes.
    #[must_use]
    pub fn root(mut self, name: impl Into<String>) -> Self {
        self.parents.insert(name.into(), Vec::new());
        self
    }

    /// Returns the number of declared classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    /// Returns true if no class is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }
}

impl ClassHierarchy for ClassMap {
    fn has_class(&self, name: &str) -> bool {
        self.parents.contains_key(name)
    }

    fn ancestors(&self, name: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        seen.insert(name);

        let mut queue: Vec<&str> = self
            .parents
            .get(name)
            .map(|p| p.iter().map(String::as_str).collect())
            .unwrap_or_default();
        queue.reverse();

        // Depth-first along the first parent so the extends chain comes first.
        while let Some(current) = queue.pop() {
            if !seen.insert(current) {
                continue;
            }
            chain.push(current.to_string());
            if let Some(next) = self.parents.get(current) {
                queue.extend(next.iter().rev().map(String::as_str));
            }
        }

        chain
    }
}

/// A fixed scope.
#[derive(Debug, Clone, Default)]
pub struct StaticScope {
    file: PathBuf,
    class_name: Option<String>,
    trait_name: Option<String>,
    function_name: Option<String>,
    classes: ClassMap,
}

impl StaticScope {
    /// Creates a top-level scope in `file`.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            ..Self::default()
        }
    }

    /// Sets the class universe.
    #[must_use]
    pub fn with_classes(mut self, classes: ClassMap) -> Self {
        self.classes = classes;
        self
    }

    /// Sets the enclosing class.
    #[must_use]
    pub fn in_class(mut self, name: impl Into<String>) -> Self {
        self.class_name = Some(name.into());
        self
    }

    /// Sets the enclosing trait.
    #[must_use]
    pub fn in_trait(mut self, name: impl Into<String>) -> Self {
        self.trait_name = Some(name.into());
        self
    }

    /// Sets the enclosing function.
    #[must_use]
    pub fn in_function(mut self, name: impl Into<String>) -> Self {
        self.function_name = Some(name.into());
        self
    }
}

impl Scope for StaticScope {
    fn file(&self) -> &Path {
        &self.file
    }

    fn class_name(&self) -> Option<&str> {
        self.class_name.as_deref()
    }

    fn trait_name(&self) -> Option<&str> {
        self.trait_name.as_deref()
    }

    fn function_name(&self) -> Option<&str> {
        self.function_name.as_deref()
    }

    fn hierarchy(&self) -> &dyn ClassHierarchy {
        &self.classes
    }
}

/// Doc resolutions keyed by raw comment text.
///
/// Comments not in the table resolve to no tags.
#[derive(Debug, Clone, Default)]
pub struct DocTable {
    entries: HashMap<String, ResolvedDoc>,
}

impl DocTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the resolution of a comment.
    #[must_use]
    pub fn doc(mut self, text: impl Into<String>, resolved: ResolvedDoc) -> Self {
        self.entries.insert(text.into(), resolved);
        self
    }
}

impl DocResolver for DocTable {
    fn resolve(
        &self,
        _file: &Path,
        _class_name: Option<&str>,
        _trait_name: Option<&str>,
        _function_name: Option<&str>,
        doc: &str,
    ) -> ResolvedDoc {
        self.entries.get(doc).cloned().unwrap_or_default()
    }
}
