//! Behavioural properties of the forbidden-type-usage rule.

use forbid_lint_core::memory::{ClassMap, DocTable, StaticScope};
use forbid_lint_core::{
    ClassHierarchy, ClassLike, FunctionLike, Name, Node, NodeContext, Param, Property, Rule,
    Scope, TypeNode,
};
use forbid_lint_rules::{ForbiddenTypeConfig, ForbiddenTypeUsage, ForbiddenTypes, UsageContext};
use proptest::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

const BUILTINS: &[&str] = &[
    "string", "int", "float", "bool", "array", "object", "callable", "iterable", "mixed", "void",
    "null", "false", "true", "never", "self", "parent", "static",
];

fn rule(entries: Vec<ForbiddenTypeConfig>) -> ForbiddenTypeUsage {
    ForbiddenTypeUsage::new(ForbiddenTypes::from_entries(entries).unwrap())
}

fn param_of(ty: TypeNode) -> Node {
    FunctionLike::function("f", 1)
        .param(Param::new("p", 1).typed(ty))
        .into()
}

fn check(rule: &ForbiddenTypeUsage, scope: &dyn Scope, node: &Node) -> usize {
    let docs = DocTable::new();
    rule.check(&NodeContext::new(scope, &docs), node).len()
}

/// Hierarchy that counts every query made against it.
struct CountingHierarchy {
    inner: ClassMap,
    calls: AtomicUsize,
}

impl ClassHierarchy for CountingHierarchy {
    fn has_class(&self, name: &str) -> bool {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.has_class(name)
    }

    fn ancestors(&self, name: &str) -> Vec<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.ancestors(name)
    }
}

struct CountingScope {
    file: PathBuf,
    hierarchy: CountingHierarchy,
}

impl Scope for CountingScope {
    fn file(&self) -> &Path {
        &self.file
    }

    fn class_name(&self) -> Option<&str> {
        None
    }

    fn trait_name(&self) -> Option<&str> {
        None
    }

    fn function_name(&self) -> Option<&str> {
        None
    }

    fn hierarchy(&self) -> &dyn ClassHierarchy {
        &self.hierarchy
    }
}

#[test]
fn empty_configuration_never_touches_the_hierarchy() {
    let scope = CountingScope {
        file: PathBuf::from("a.php"),
        hierarchy: CountingHierarchy {
            inner: ClassMap::new().root("Base").class("Sub", ["Base"]),
            calls: AtomicUsize::new(0),
        },
    };
    let rule = ForbiddenTypeUsage::default();
    let class: Node = ClassLike::class("Sub", 1)
        .extends(Name::new("Base", 1))
        .property(Property::new("p", 2).typed(TypeNode::name("Base", 2)))
        .into();

    assert_eq!(check(&rule, &scope, &class), 0);
    assert_eq!(check(&rule, &scope, &param_of(TypeNode::name("Sub", 1))), 0);
    assert_eq!(scope.hierarchy.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn exact_only_configuration_never_touches_the_hierarchy() {
    let scope = CountingScope {
        file: PathBuf::from("a.php"),
        hierarchy: CountingHierarchy {
            inner: ClassMap::new().root("Base").class("Sub", ["Base"]),
            calls: AtomicUsize::new(0),
        },
    };
    let rule = rule(vec![ForbiddenTypeConfig::new("Base", "")]);

    assert_eq!(check(&rule, &scope, &param_of(TypeNode::name("Base", 1))), 1);
    assert_eq!(check(&rule, &scope, &param_of(TypeNode::name("Sub", 1))), 0);
    assert_eq!(scope.hierarchy.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn type_hint_only_exempts_extends_but_not_params() {
    let rule = rule(vec![ForbiddenTypeConfig::new("X", "").type_hint_only(true)]);
    let scope = StaticScope::new("a.php").with_classes(ClassMap::new().root("X"));

    let class: Node = ClassLike::class("C", 1).extends(Name::new("X", 1)).into();
    assert_eq!(check(&rule, &scope, &class), 0);
    assert_eq!(check(&rule, &scope, &param_of(TypeNode::name("X", 2))), 1);
}

#[test]
fn direct_subclass_without_flag_is_allowed() {
    let rule = rule(vec![ForbiddenTypeConfig::new("X", "")]);
    let scope =
        StaticScope::new("a.php").with_classes(ClassMap::new().root("X").class("Y", ["X"]));
    assert_eq!(check(&rule, &scope, &param_of(TypeNode::name("Y", 1))), 0);
}

#[test]
fn union_and_nullable_report_once() {
    let rule = rule(vec![ForbiddenTypeConfig::new("X", "")]);
    let scope = StaticScope::new("a.php");

    let union = TypeNode::Union(vec![TypeNode::name("X", 1), TypeNode::keyword("string", 1)]);
    assert_eq!(check(&rule, &scope, &param_of(union)), 1);
    assert_eq!(
        check(&rule, &scope, &param_of(TypeNode::nullable(TypeNode::name("X", 1)))),
        1
    );
}

fn builtin_name() -> impl Strategy<Value = String> {
    (prop::sample::select(BUILTINS), any::<bool>()).prop_map(|(name, upper)| {
        if upper {
            name.to_uppercase()
        } else {
            name.to_string()
        }
    })
}

fn class_name() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{0,8}"
}

fn usage_context() -> impl Strategy<Value = UsageContext> {
    prop_oneof![Just(UsageContext::TypeHint), Just(UsageContext::Structural)]
}

proptest! {
    #[test]
    fn builtins_never_match(name in builtin_name()) {
        let rule = rule(vec![ForbiddenTypeConfig::new(name.clone(), "")]);
        let scope = StaticScope::new("a.php");
        prop_assert_eq!(check(&rule, &scope, &param_of(TypeNode::name(name, 1))), 0);
    }

    #[test]
    fn matching_is_idempotent(
        forbidden in class_name(),
        queried in class_name(),
        with_subclasses in any::<bool>(),
        type_hint_only in any::<bool>(),
        context in usage_context(),
    ) {
        let types = ForbiddenTypes::from_entries([ForbiddenTypeConfig::new(forbidden.clone(), "d")
            .with_subclasses(with_subclasses)
            .type_hint_only(type_hint_only)])
            .unwrap();
        let classes = ClassMap::new()
            .root(forbidden.clone())
            .class(format!("{queried}Child"), [forbidden]);

        let first = types.find(&queried, context, &classes);
        let second = types.find(&queried, context, &classes);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn subclass_matching_is_idempotent(
        forbidden in class_name(),
        type_hint_only in any::<bool>(),
        context in usage_context(),
    ) {
        let child = format!("{forbidden}Child");
        let types = ForbiddenTypes::from_entries([ForbiddenTypeConfig::new(forbidden.clone(), "d")
            .with_subclasses(true)
            .type_hint_only(type_hint_only)])
            .unwrap();
        let classes = ClassMap::new()
            .root(forbidden.clone())
            .class(child.clone(), [forbidden.clone()]);

        let first = types.find(&child, context, &classes);
        let second = types.find(&child, context, &classes);
        prop_assert_eq!(&first, &second);

        let expect_match = context == UsageContext::TypeHint || !type_hint_only;
        prop_assert_eq!(first.is_some(), expect_match);
        if let Some(found) = first {
            prop_assert_eq!(found.ancestor, Some(forbidden));
        }
    }

    #[test]
    fn subclass_descriptions_name_the_ancestor(base in class_name(), unrelated in class_name()) {
        prop_assume!(base != unrelated);
        let child = format!("{base}Child");
        prop_assume!(child != unrelated);

        let types = ForbiddenTypes::from_entries([
            ForbiddenTypeConfig::new(base.clone(), "no").with_subclasses(true),
        ])
        .unwrap();
        let classes = ClassMap::new()
            .root(base.clone())
            .class(child.clone(), [base.clone()])
            .root(unrelated.clone());

        let found = types.find(&child, UsageContext::TypeHint, &classes).unwrap();
        let suffix = format!("(subclass of {base})");
        prop_assert!(found.description.ends_with(&suffix));
        prop_assert!(types.find(&unrelated, UsageContext::TypeHint, &classes).is_none());
    }
}
