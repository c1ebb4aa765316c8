//! Core analyzer for dispatching host nodes to rules.

use crate::config::Config;
use crate::context::NodeContext;
use crate::node::{Node, NodeKind};
use crate::rule::{Rule, RuleBox};
use crate::types::{LintResult, Violation};

use tracing::{debug, info};

/// Builder for configuring an [`Analyzer`].
#[derive(Default)]
pub struct AnalyzerBuilder {
    rules: Vec<RuleBox>,
    config: Option<Config>,
}

impl AnalyzerBuilder {
    /// Creates a new builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rule to the analyzer.
    #[must_use]
    pub fn rule<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Adds a boxed rule to the analyzer.
    #[must_use]
    pub fn rule_box(mut self, rule: RuleBox) -> Self {
        self.rules.push(rule);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Builds the analyzer.
    #[must_use]
    pub fn build(self) -> Analyzer {
        Analyzer {
            rules: self.rules,
            config: self.config.unwrap_or_default(),
        }
    }
}

/// Dispatches visited nodes to the rules subscribed to their kind.
///
/// Use [`Analyzer::builder()`] to construct an instance.
pub struct Analyzer {
    rules: Vec<RuleBox>,
    config: Config,
}

impl Analyzer {
    /// Creates a new builder for configuring an analyzer.
    #[must_use]
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Returns the number of registered rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Returns the node kinds any enabled rule subscribes to, so the host
    /// can skip nodes nobody listens for.
    #[must_use]
    pub fn node_kinds(&self) -> Vec<NodeKind> {
        let mut kinds = Vec::new();
        for rule in self.enabled_rules() {
            for kind in rule.node_kinds() {
                if !kinds.contains(kind) {
                    kinds.push(*kind);
                }
            }
        }
        kinds
    }

    /// Checks a single node against every subscribed, enabled rule.
    ///
    /// Violations keep each rule's traversal order; rules run in
    /// registration order.
    #[must_use]
    pub fn check_node(&self, ctx: &NodeContext<'_>, node: &Node) -> Vec<Violation> {
        let kind = node.kind();
        let mut violations = Vec::new();

        for rule in self.enabled_rules() {
            if !rule.node_kinds().contains(&kind) {
                continue;
            }

            let diagnostics = rule.check(ctx, node);
            if !diagnostics.is_empty() {
                debug!(
                    "{} reported {} diagnostic(s) in {}",
                    rule.name(),
                    diagnostics.len(),
                    ctx.scope.file().display()
                );
            }
            violations.extend(
                diagnostics
                    .into_iter()
                    .map(|d| Violation::new(rule.name(), ctx.scope.file(), d)),
            );
        }

        violations
    }

    /// Checks a stream of visited nodes and aggregates the results.
    pub fn analyze<'a, I>(&self, visits: I) -> LintResult
    where
        I: IntoIterator<Item = (NodeContext<'a>, &'a Node)>,
    {
        info!("Starting analysis with {} rule(s)", self.rules.len());

        let mut result = LintResult::new();
        for (ctx, node) in visits {
            result.violations.extend(self.check_node(&ctx, node));
            result.nodes_checked += 1;
        }

        info!(
            "Analysis complete: {} violations in {} nodes",
            result.violations.len(),
            result.nodes_checked
        );

        result
    }

    fn enabled_rules(&self) -> impl Iterator<Item = &RuleBox> {
        self.rules.iter().filter(|rule| {
            let enabled = self.config.is_rule_enabled(rule.name());
            if !enabled {
                debug!("Skipping disabled rule: {}", rule.name());
            }
            enabled
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{DocTable, StaticScope};
    use crate::node::{ClassLike, DocComment, DocumentedStatement, FunctionLike};
    use crate::types::Diagnostic;

    struct LineRule {
        name: &'static str,
        kinds: &'static [NodeKind],
    }

    impl Rule for LineRule {
        fn name(&self) -> &'static str {
            self.name
        }

        fn node_kinds(&self) -> &'static [NodeKind] {
            self.kinds
        }

        fn check(&self, _ctx: &NodeContext<'_>, node: &Node) -> Vec<Diagnostic> {
            vec![Diagnostic::new(self.name, "line", node.line())]
        }
    }

    fn analyzer(config: Config) -> Analyzer {
        Analyzer::builder()
            .rule(LineRule {
                name: "classes",
                kinds: &[NodeKind::ClassLike],
            })
            .rule(LineRule {
                name: "callables",
                kinds: &[NodeKind::FunctionLike, NodeKind::ClassLike],
            })
            .config(config)
            .build()
    }

    #[test]
    fn test_dispatch_by_kind() {
        let analyzer = analyzer(Config::default());
        let scope = StaticScope::new("src/a.php");
        let docs = DocTable::new();
        let ctx = NodeContext::new(&scope, &docs);

        let class: Node = ClassLike::class("C", 3).into();
        let function: Node = FunctionLike::function("f", 9).into();
        let stmt: Node = DocumentedStatement::new(DocComment::new("/** */", 12), 12).into();

        let rules: Vec<String> = analyzer
            .check_node(&ctx, &class)
            .into_iter()
            .map(|v| v.rule)
            .collect();
        assert_eq!(rules, vec!["classes", "callables"]);
        assert_eq!(analyzer.check_node(&ctx, &function).len(), 1);
        assert!(analyzer.check_node(&ctx, &stmt).is_empty());
    }

    #[test]
    fn test_disabled_rule_is_skipped() {
        let config = Config::parse("[rules.classes]\nenabled = false\n").unwrap();
        let analyzer = analyzer(config);
        assert_eq!(
            analyzer.node_kinds(),
            vec![NodeKind::FunctionLike, NodeKind::ClassLike]
        );

        let scope = StaticScope::new("src/a.php");
        let docs = DocTable::new();
        let class: Node = ClassLike::class("C", 3).into();
        let result = analyzer.analyze([(NodeContext::new(&scope, &docs), &class)]);
        assert_eq!(result.nodes_checked, 1);
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].rule, "callables");
        assert_eq!(result.violations[0].file, std::path::PathBuf::from("src/a.php"));
    }
}
