//! Node model handed to rules by the host.
//!
//! These types mirror the parts of the host AST that carry type references.
//! Names are expected to be already resolved by the host (fully qualified,
//! aliases expanded).

/// Node categories a rule can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Class, interface, trait or enum declaration.
    ClassLike,
    /// Function, method, closure or arrow function.
    FunctionLike,
    /// Any other statement carrying a doc comment.
    DocumentedStatement,
}

/// A single node visited by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Class-like declaration.
    ClassLike(ClassLike),
    /// Function-like declaration.
    FunctionLike(FunctionLike),
    /// Statement with a doc comment.
    DocumentedStatement(DocumentedStatement),
}

impl Node {
    /// Returns the category of this node.
    #[must_use]
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::ClassLike(_) => NodeKind::ClassLike,
            Self::FunctionLike(_) => NodeKind::FunctionLike,
            Self::DocumentedStatement(_) => NodeKind::DocumentedStatement,
        }
    }

    /// Returns the line the node starts on.
    #[must_use]
    pub fn line(&self) -> usize {
        match self {
            Self::ClassLike(c) => c.line,
            Self::FunctionLike(f) => f.line,
            Self::DocumentedStatement(s) => s.line,
        }
    }
}

impl From<ClassLike> for Node {
    fn from(value: ClassLike) -> Self {
        Self::ClassLike(value)
    }
}

impl From<FunctionLike> for Node {
    fn from(value: FunctionLike) -> Self {
        Self::FunctionLike(value)
    }
}

impl From<DocumentedStatement> for Node {
    fn from(value: DocumentedStatement) -> Self {
        Self::DocumentedStatement(value)
    }
}

/// A resolved class-like name with the line it appears on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name {
    /// Resolved name (e.g., `App\Model\User`).
    pub name: String,
    /// Line number (1-indexed).
    pub line: usize,
}

impl Name {
    /// Creates a new name reference.
    #[must_use]
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            line,
        }
    }
}

/// A native type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
    /// A named type reference.
    Name(Name),
    /// A keyword type the host already recognised as builtin (`int`, `void`, ...).
    Keyword(Name),
    /// `?T`
    Nullable(Box<TypeNode>),
    /// `A|B`
    Union(Vec<TypeNode>),
    /// `A&B`
    Intersection(Vec<TypeNode>),
}

impl TypeNode {
    /// Shorthand for a named type reference.
    #[must_use]
    pub fn name(name: impl Into<String>, line: usize) -> Self {
        Self::Name(Name::new(name, line))
    }

    /// Shorthand for a keyword type.
    #[must_use]
    pub fn keyword(name: impl Into<String>, line: usize) -> Self {
        Self::Keyword(Name::new(name, line))
    }

    /// Shorthand for a nullable wrapper.
    #[must_use]
    pub fn nullable(inner: TypeNode) -> Self {
        Self::Nullable(Box::new(inner))
    }
}

/// A raw doc comment as it appears in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocComment {
    /// Full comment text including delimiters.
    pub text: String,
    /// Line the comment starts on (1-indexed).
    pub start_line: usize,
}

impl DocComment {
    /// Creates a new doc comment.
    #[must_use]
    pub fn new(text: impl Into<String>, start_line: usize) -> Self {
        Self {
            text: text.into(),
            start_line,
        }
    }
}

/// Kind of class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    /// `class`
    Class,
    /// `interface`
    Interface,
    /// `trait`
    Trait,
    /// `enum`
    Enum,
}

/// A class-like declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassLike {
    /// Declaration kind.
    pub kind: ClassKind,
    /// Resolved name; `None` for anonymous classes.
    pub name: Option<String>,
    /// Extended supertypes.
    pub extends: Vec<Name>,
    /// Implemented interfaces.
    pub implements: Vec<Name>,
    /// Traits pulled in with `use`.
    pub trait_uses: Vec<Name>,
    /// Property declarations in source order.
    pub properties: Vec<Property>,
    /// Line the declaration starts on.
    pub line: usize,
}

impl ClassLike {
    /// Creates an empty declaration of the given kind.
    #[must_use]
    pub fn new(kind: ClassKind, name: Option<String>, line: usize) -> Self {
        Self {
            kind,
            name,
            extends: Vec::new(),
            implements: Vec::new(),
            trait_uses: Vec::new(),
            properties: Vec::new(),
            line,
        }
    }

    /// Creates an empty named `class` declaration.
    #[must_use]
    pub fn class(name: impl Into<String>, line: usize) -> Self {
        Self::new(ClassKind::Class, Some(name.into()), line)
    }

    /// Creates an empty anonymous class.
    #[must_use]
    pub fn anonymous(line: usize) -> Self {
        Self::new(ClassKind::Class, None, line)
    }

    /// Adds an extended supertype.
    #[must_use]
    pub fn extends(mut self, name: Name) -> Self {
        self.extends.push(name);
        self
    }

    /// Adds an implemented interface.
    #[must_use]
    pub fn implements(mut self, name: Name) -> Self {
        self.implements.push(name);
        self
    }

    /// Adds a used trait.
    #[must_use]
    pub fn uses(mut self, name: Name) -> Self {
        self.trait_uses.push(name);
        self
    }

    /// Adds a property declaration.
    #[must_use]
    pub fn property(mut self, property: Property) -> Self {
        self.properties.push(property);
        self
    }
}

/// A property declaration, possibly declaring several properties at once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    /// Declared property names without the `$` sigil.
    pub names: Vec<String>,
    /// Native type, if any.
    pub type_hint: Option<TypeNode>,
    /// Doc comment attached to the declaration.
    pub doc: Option<DocComment>,
    /// Line the declaration starts on.
    pub line: usize,
}

impl Property {
    /// Creates an untyped single-name property.
    #[must_use]
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            names: vec![name.into()],
            type_hint: None,
            doc: None,
            line,
        }
    }

    /// Adds a co-declared property name.
    #[must_use]
    pub fn and(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    /// Sets the native type.
    #[must_use]
    pub fn typed(mut self, type_hint: TypeNode) -> Self {
        self.type_hint = Some(type_hint);
        self
    }

    /// Sets the doc comment.
    #[must_use]
    pub fn doc(mut self, doc: DocComment) -> Self {
        self.doc = Some(doc);
        self
    }
}

/// Kind of function-like node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKind {
    /// Free function.
    Function,
    /// Class method.
    Method,
    /// `function () use (...) {}`
    Closure,
    /// `fn () => ...`
    ArrowFunction,
}

/// A function-like declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionLike {
    /// Kind of callable.
    pub kind: FunctionKind,
    /// Name for functions and methods.
    pub name: Option<String>,
    /// Parameters in declaration order.
    pub params: Vec<Param>,
    /// Native return type, if any.
    pub return_type: Option<TypeNode>,
    /// Doc comment attached to the declaration.
    pub doc: Option<DocComment>,
    /// Line the declaration starts on.
    pub line: usize,
}

impl FunctionLike {
    /// Creates an empty callable of the given kind.
    #[must_use]
    pub fn new(kind: FunctionKind, name: Option<String>, line: usize) -> Self {
        Self {
            kind,
            name,
            params: Vec::new(),
            return_type: None,
            doc: None,
            line,
        }
    }

    /// Creates an empty free function.
    #[must_use]
    pub fn function(name: impl Into<String>, line: usize) -> Self {
        Self::new(FunctionKind::Function, Some(name.into()), line)
    }

    /// Creates an empty method.
    #[must_use]
    pub fn method(name: impl Into<String>, line: usize) -> Self {
        Self::new(FunctionKind::Method, Some(name.into()), line)
    }

    /// Adds a parameter.
    #[must_use]
    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Sets the native return type.
    #[must_use]
    pub fn returns(mut self, type_hint: TypeNode) -> Self {
        self.return_type = Some(type_hint);
        self
    }

    /// Sets the doc comment.
    #[must_use]
    pub fn doc(mut self, doc: DocComment) -> Self {
        self.doc = Some(doc);
        self
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    /// Parameter name without the `$` sigil.
    pub name: String,
    /// Native type, if any.
    pub type_hint: Option<TypeNode>,
    /// Line the parameter is declared on.
    pub line: usize,
}

impl Param {
    /// Creates an untyped parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, line: usize) -> Self {
        Self {
            name: name.into(),
            type_hint: None,
            line,
        }
    }

    /// Sets the native type.
    #[must_use]
    pub fn typed(mut self, type_hint: TypeNode) -> Self {
        self.type_hint = Some(type_hint);
        self
    }
}

/// A statement that carries a doc comment (e.g., an assignment with `@var`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentedStatement {
    /// The attached doc comment.
    pub doc: DocComment,
    /// Line the statement starts on.
    pub line: usize,
}

impl DocumentedStatement {
    /// Creates a new documented statement.
    #[must_use]
    pub fn new(doc: DocComment, line: usize) -> Self {
        Self { doc, line }
    }
}
