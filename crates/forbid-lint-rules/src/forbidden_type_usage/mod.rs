//! Rule to forbid usages of configured types.
//!
//! # Rationale
//!
//! Legacy or deprecated types tend to spread through signatures, property
//! declarations and doc tags long after a replacement exists. This rule
//! reports every place a denylisted type is referenced.
//!
//! # Configuration
//!
//! ```toml
//! [rules.forbidden-type-usage.types]
//! "App\\Legacy\\Registry" = "Use the container instead"
//! "App\\Http\\Request" = { description = "Inject a PSR request", typeHintOnly = true }
//! "App\\Model\\Base" = { withSubclasses = true }
//! ```
//!
//! - `typeHintOnly`: skip `extends`, `implements` and trait `use` (default: false)
//! - `withSubclasses`: also report subclasses of the type (default: false)
//!
//! # Scope
//!
//! Structural checks (extends/implements/use) run on named `class`
//! declarations only. Interfaces, traits, enums and anonymous classes are
//! still checked for property types.

mod config;
mod doc_tags;
mod matcher;
mod type_refs;

pub use config::{ForbiddenTypeConfig, ForbiddenTypes, TypeConfigError};
pub use doc_tags::{find_tag_line, DocTag};
pub use matcher::{MatchResult, UsageContext};
pub use type_refs::{is_builtin, named_types, resolved_names};

use doc_tags::TagRefs;
use forbid_lint_core::{
    ClassKind, ClassLike, Diagnostic, DocumentedStatement, FunctionKind, FunctionLike, Name, Node,
    NodeContext, NodeKind, Rule, TypeNode,
};
use std::sync::Arc;
use tracing::debug;

/// Rule name for forbidden-type-usage.
pub const NAME: &str = "forbidden-type-usage";

/// Stable diagnostic identifiers.
pub mod identifiers {
    /// A class extends a forbidden type.
    pub const EXTENDS: &str = "forbidden-extends";
    /// A class implements a forbidden interface.
    pub const IMPLEMENTS: &str = "forbidden-implements";
    /// A class uses a forbidden trait.
    pub const TRAIT: &str = "forbidden-trait";
    /// A property has a forbidden native type.
    pub const PROPERTY_TYPE: &str = "forbidden-property-type";
    /// A parameter has a forbidden native type.
    pub const PARAM_TYPE: &str = "forbidden-param-type";
    /// A callable has a forbidden native return type.
    pub const RETURN_TYPE: &str = "forbidden-return-type";
    /// A `@param` tag references a forbidden type.
    pub const DOC_PARAM_TYPE: &str = "forbidden-doc-param-type";
    /// A `@return` tag references a forbidden type.
    pub const DOC_RETURN_TYPE: &str = "forbidden-doc-return-type";
    /// A `@var` tag references a forbidden type.
    pub const DOC_VAR_TYPE: &str = "forbidden-doc-var-type";
}

const ANONYMOUS_CLASS: &str = "class@anonymous";

/// Forbids references to configured types in type hints, structural
/// declarations and doc tags.
#[derive(Debug, Clone, Default)]
pub struct ForbiddenTypeUsage {
    types: Arc<ForbiddenTypes>,
}

impl ForbiddenTypeUsage {
    /// Creates the rule from a normalized denylist.
    #[must_use]
    pub fn new(types: ForbiddenTypes) -> Self {
        debug!("{NAME}: {} forbidden type(s) configured", types.len());
        Self {
            types: Arc::new(types),
        }
    }

    /// Creates the rule from a raw configuration table.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry is malformed.
    pub fn from_table(table: &toml::Table) -> Result<Self, TypeConfigError> {
        ForbiddenTypes::from_table(table).map(Self::new)
    }

    /// Returns the normalized denylist.
    #[must_use]
    pub fn types(&self) -> &ForbiddenTypes {
        &self.types
    }
}

impl Rule for ForbiddenTypeUsage {
    fn name(&self) -> &'static str {
        NAME
    }

    fn description(&self) -> &'static str {
        "Forbids references to configured types"
    }

    fn node_kinds(&self) -> &'static [NodeKind] {
        &[
            NodeKind::ClassLike,
            NodeKind::FunctionLike,
            NodeKind::DocumentedStatement,
        ]
    }

    fn check(&self, ctx: &NodeContext<'_>, node: &Node) -> Vec<Diagnostic> {
        if self.types.is_empty() {
            return Vec::new();
        }

        let mut checker = Checker {
            ctx,
            types: &self.types,
            diagnostics: Vec::new(),
        };
        match node {
            Node::ClassLike(class) => checker.check_class(class),
            Node::FunctionLike(function) => checker.check_function(function),
            Node::DocumentedStatement(stmt) => checker.check_statement(stmt),
        }
        checker.diagnostics
    }
}

struct Checker<'a> {
    ctx: &'a NodeContext<'a>,
    types: &'a ForbiddenTypes,
    diagnostics: Vec<Diagnostic>,
}

impl Checker<'_> {
    fn check_class(&mut self, class: &ClassLike) {
        let label = class.name.as_deref().unwrap_or(ANONYMOUS_CLASS);

        if class.kind == ClassKind::Class && class.name.is_some() {
            for parent in &class.extends {
                self.report_structural(parent, identifiers::EXTENDS, |t| {
                    format!("Class {label} extends forbidden class {t}")
                });
            }
            for interface in &class.implements {
                self.report_structural(interface, identifiers::IMPLEMENTS, |t| {
                    format!("Class {label} implements forbidden interface {t}")
                });
            }
            for used in &class.trait_uses {
                self.report_structural(used, identifiers::TRAIT, |t| {
                    format!("Class {label} uses forbidden trait {t}")
                });
            }
        }

        for property in &class.properties {
            let Some(type_hint) = &property.type_hint else {
                continue;
            };
            let props = property_list(label, &property.names);
            self.report_type_node(type_hint, identifiers::PROPERTY_TYPE, |t| {
                format!("Property {props} has forbidden type {t}")
            });
        }

        let (doc_class, doc_trait) = match class.kind {
            ClassKind::Trait => (None, Some(label)),
            ClassKind::Class | ClassKind::Interface | ClassKind::Enum => (Some(label), None),
        };
        for property in &class.properties {
            let Some(doc) = &property.doc else {
                continue;
            };
            let resolved = self.ctx.resolve_member_doc(doc_class, doc_trait, &doc.text);
            let props = property_list(label, &property.names);
            for tag in doc_tags::var_refs(&resolved, doc) {
                self.report_tag(&tag, identifiers::DOC_VAR_TYPE, |t| {
                    format!("Doc tag @var for property {props} has forbidden type {t}")
                });
            }
        }
    }

    fn check_function(&mut self, function: &FunctionLike) {
        let label = self.function_label(function);

        for param in &function.params {
            let Some(type_hint) = &param.type_hint else {
                continue;
            };
            self.report_type_node(type_hint, identifiers::PARAM_TYPE, |t| {
                format!("Parameter ${} of {label} has forbidden type {t}", param.name)
            });
        }

        if let Some(return_type) = &function.return_type {
            self.report_type_node(return_type, identifiers::RETURN_TYPE, |t| {
                format!("Return type of {label} has forbidden type {t}")
            });
        }

        let Some(doc) = &function.doc else {
            return;
        };
        let own_name = match function.kind {
            FunctionKind::Function | FunctionKind::Method => function.name.as_deref(),
            FunctionKind::Closure | FunctionKind::ArrowFunction => None,
        };
        let resolved = self.ctx.resolve_doc(None, None, own_name, &doc.text);

        for param in &function.params {
            if let Some(tag) = doc_tags::param_refs(&resolved, doc, &param.name) {
                self.report_tag(&tag, identifiers::DOC_PARAM_TYPE, |t| {
                    format!(
                        "Doc tag @param for parameter ${} of {label} has forbidden type {t}",
                        param.name
                    )
                });
            }
        }

        if let Some(tag) = doc_tags::return_refs(&resolved, doc) {
            self.report_tag(&tag, identifiers::DOC_RETURN_TYPE, |t| {
                format!("Doc tag @return of {label} has forbidden type {t}")
            });
        }
    }

    fn check_statement(&mut self, stmt: &DocumentedStatement) {
        let resolved = self.ctx.resolve_doc(None, None, None, &stmt.doc.text);
        for tag in doc_tags::var_refs(&resolved, &stmt.doc) {
            let subject = match tag.variable {
                Some(var) => format!("Doc tag @var for variable ${var}"),
                None => "Doc tag @var".to_string(),
            };
            self.report_tag(&tag, identifiers::DOC_VAR_TYPE, |t| {
                format!("{subject} has forbidden type {t}")
            });
        }
    }

    fn function_label(&self, function: &FunctionLike) -> String {
        let name = function.name.as_deref().unwrap_or("{closure}");
        match function.kind {
            FunctionKind::Method => match self
                .ctx
                .scope
                .class_name()
                .or_else(|| self.ctx.scope.trait_name())
            {
                Some(owner) => format!("method {owner}::{name}()"),
                None => format!("method {name}()"),
            },
            FunctionKind::Function => format!("function {name}()"),
            FunctionKind::Closure => "anonymous function".to_string(),
            FunctionKind::ArrowFunction => "arrow function".to_string(),
        }
    }

    fn report_structural(
        &mut self,
        name: &Name,
        identifier: &str,
        subject: impl Fn(&str) -> String,
    ) {
        self.report(&name.name, UsageContext::Structural, name.line, identifier, &subject);
    }

    fn report_type_node(
        &mut self,
        ty: &TypeNode,
        identifier: &str,
        subject: impl Fn(&str) -> String,
    ) {
        for name in type_refs::named_types(ty) {
            self.report(&name.name, UsageContext::TypeHint, name.line, identifier, &subject);
        }
    }

    fn report_tag(
        &mut self,
        tag: &TagRefs<'_>,
        identifier: &str,
        subject: impl Fn(&str) -> String,
    ) {
        for name in &tag.names {
            self.report(name, UsageContext::TypeHint, tag.line, identifier, &subject);
        }
    }

    fn report(
        &mut self,
        name: &str,
        context: UsageContext,
        line: usize,
        identifier: &str,
        subject: &dyn Fn(&str) -> String,
    ) {
        let Some(found) = self.types.find(name, context, self.ctx.scope.hierarchy()) else {
            return;
        };
        let message = with_description(subject(name), &found.description);
        self.diagnostics.push(Diagnostic::new(message, identifier, line));
    }
}

/// `C::$a, $b`
fn property_list(class: &str, names: &[String]) -> String {
    let vars: Vec<String> = names.iter().map(|n| format!("${n}")).collect();
    format!("{class}::{}", vars.join(", "))
}

/// Terminates the subject sentence and appends the description as a
/// second sentence.
fn with_description(subject: String, description: &str) -> String {
    let description = description.trim();
    if description.is_empty() {
        return format!("{subject}.");
    }
    if description.ends_with(['.', '!', '?']) {
        format!("{subject}. {description}")
    } else {
        format!("{subject}. {description}.")
    }
}
