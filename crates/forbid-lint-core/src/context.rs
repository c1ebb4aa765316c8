//! Host capabilities provided to rules.
//!
//! Rules never walk the host's reflection or type system directly. They see
//! the enclosing [`Scope`], an ancestor-chain view of the class universe via
//! [`ClassHierarchy`], and resolved doc tags via [`DocResolver`].

use std::path::Path;

/// Ancestor-chain view of the host's class universe.
pub trait ClassHierarchy {
    /// Returns true if the host knows `name` as a class-like.
    fn has_class(&self, name: &str) -> bool;

    /// Returns the ordered supertypes `name` transitively extends or
    /// implements, nearest first, excluding `name` itself.
    ///
    /// Unknown names have an empty chain.
    fn ancestors(&self, name: &str) -> Vec<String>;

    /// Returns true if `class` is a strict descendant of `ancestor`.
    fn is_subclass_of(&self, class: &str, ancestor: &str) -> bool {
        self.ancestors(class).iter().any(|a| a == ancestor)
    }
}

/// The enclosing scope of a visited node.
pub trait Scope {
    /// File the node belongs to.
    fn file(&self) -> &Path;

    /// Enclosing class name, if any.
    fn class_name(&self) -> Option<&str>;

    /// Enclosing trait name, if any.
    fn trait_name(&self) -> Option<&str>;

    /// Enclosing function or method name, if any.
    fn function_name(&self) -> Option<&str>;

    /// Class hierarchy of the analysed codebase.
    fn hierarchy(&self) -> &dyn ClassHierarchy;
}

/// Resolves raw doc comments into typed tags.
pub trait DocResolver {
    /// Resolves `doc` in the context of the given file and enclosing
    /// declarations.
    fn resolve(
        &self,
        file: &Path,
        class_name: Option<&str>,
        trait_name: Option<&str>,
        function_name: Option<&str>,
        doc: &str,
    ) -> ResolvedDoc;
}

/// A type as resolved by the host from a doc tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    /// An object of the named class.
    Object(String),
    /// `class-string<Name>`.
    ClassString(String),
    /// A generic object such as `Collection<int, User>`.
    Generic {
        /// The generic class.
        class: String,
        /// Type arguments.
        args: Vec<ResolvedType>,
    },
    /// `A|B`
    Union(Vec<ResolvedType>),
    /// `A&B`
    Intersection(Vec<ResolvedType>),
    /// `T[]` or `array<K, T>`.
    Array(Box<ResolvedType>),
    /// Any non-object type (`int`, `null`, `mixed`, ...).
    Keyword(String),
}

impl ResolvedType {
    /// Shorthand for an object type.
    #[must_use]
    pub fn object(name: impl Into<String>) -> Self {
        Self::Object(name.into())
    }

    /// Shorthand for a keyword type.
    #[must_use]
    pub fn keyword(name: impl Into<String>) -> Self {
        Self::Keyword(name.into())
    }

    /// Returns the concrete class names this type denotes, in order.
    ///
    /// Generic arguments and array element types are not part of the
    /// denoted object type and are skipped.
    #[must_use]
    pub fn class_names(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_class_names(&mut names);
        names
    }

    fn collect_class_names<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Object(name) | Self::ClassString(name) => out.push(name),
            Self::Generic { class, .. } => out.push(class),
            Self::Union(types) | Self::Intersection(types) => {
                for ty in types {
                    ty.collect_class_names(out);
                }
            }
            Self::Array(_) | Self::Keyword(_) => {}
        }
    }
}

/// A resolved `@var` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VarTag {
    /// Variable name without `$`, when the tag names one.
    pub variable: Option<String>,
    /// Resolved type.
    pub ty: ResolvedType,
}

/// A resolved `@param` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamTag {
    /// Parameter name without `$`.
    pub name: String,
    /// Resolved type.
    pub ty: ResolvedType,
}

/// All resolved tags of one doc comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedDoc {
    /// `@var` tags in source order.
    pub vars: Vec<VarTag>,
    /// `@param` tags in source order.
    pub params: Vec<ParamTag>,
    /// `@return` tag type.
    pub return_type: Option<ResolvedType>,
}

impl ResolvedDoc {
    /// Creates an empty resolution.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `@var` tag.
    #[must_use]
    pub fn var(mut self, variable: Option<&str>, ty: ResolvedType) -> Self {
        self.vars.push(VarTag {
            variable: variable.map(String::from),
            ty,
        });
        self
    }

    /// Adds a `@param` tag.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, ty: ResolvedType) -> Self {
        self.params.push(ParamTag {
            name: name.into(),
            ty,
        });
        self
    }

    /// Sets the `@return` tag.
    #[must_use]
    pub fn returns(mut self, ty: ResolvedType) -> Self {
        self.return_type = Some(ty);
        self
    }

    /// Finds the `@param` tag for a parameter name.
    #[must_use]
    pub fn param_tag(&self, name: &str) -> Option<&ParamTag> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Returns true if no tags were resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty() && self.params.is_empty() && self.return_type.is_none()
    }
}

/// Context provided to rules for each visited node.
#[derive(Clone, Copy)]
pub struct NodeContext<'a> {
    /// Enclosing scope of the node.
    pub scope: &'a dyn Scope,
    /// Doc comment resolver.
    pub docs: &'a dyn DocResolver,
}

impl<'a> NodeContext<'a> {
    /// Creates a new node context.
    #[must_use]
    pub fn new(scope: &'a dyn Scope, docs: &'a dyn DocResolver) -> Self {
        Self { scope, docs }
    }

    /// Resolves a doc comment in this node's scope, overriding the
    /// enclosing class and function names where the node itself defines them.
    #[must_use]
    pub fn resolve_doc(
        &self,
        class_name: Option<&str>,
        trait_name: Option<&str>,
        function_name: Option<&str>,
        doc: &str,
    ) -> ResolvedDoc {
        self.docs.resolve(
            self.scope.file(),
            class_name.or_else(|| self.scope.class_name()),
            trait_name.or_else(|| self.scope.trait_name()),
            function_name.or_else(|| self.scope.function_name()),
            doc,
        )
    }

    /// Resolves a doc comment on a member of a class-like declaration.
    ///
    /// The declaration alone names the enclosing class or trait; nothing is
    /// inherited from the surrounding scope, so an anonymous class declared
    /// inside a method does not resolve against the outer class.
    #[must_use]
    pub fn resolve_member_doc(
        &self,
        class_name: Option<&str>,
        trait_name: Option<&str>,
        doc: &str,
    ) -> ResolvedDoc {
        self.docs.resolve(self.scope.file(), class_name, trait_name, None, doc)
    }
}

impl std::fmt::Debug for NodeContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeContext")
            .field("file", &self.scope.file())
            .field("class", &self.scope.class_name())
            .field("function", &self.scope.function_name())
            .finish_non_exhaustive()
    }
}
