//! Type references from resolved doc tags.
//!
//! The host resolves tags semantically but does not say which line a tag is
//! on. Lines are recovered by scanning the raw comment text, see
//! [`find_tag_line`].

use super::type_refs::resolved_names;
use forbid_lint_core::{DocComment, ResolvedDoc};
use regex::Regex;
use std::sync::OnceLock;

/// A doc tag that can reference types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocTag {
    /// `@var`
    Var,
    /// `@param`
    Param,
    /// `@return`
    Return,
}

impl DocTag {
    /// Tag text including the `@`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Var => "@var",
            Self::Param => "@param",
            Self::Return => "@return",
        }
    }

    /// The tag name ending at a word boundary, compiled once.
    fn pattern(self) -> Option<&'static Regex> {
        static VAR: OnceLock<Option<Regex>> = OnceLock::new();
        static PARAM: OnceLock<Option<Regex>> = OnceLock::new();
        static RETURN: OnceLock<Option<Regex>> = OnceLock::new();

        let cell = match self {
            Self::Var => &VAR,
            Self::Param => &PARAM,
            Self::Return => &RETURN,
        };
        cell.get_or_init(|| Regex::new(&format!(r"{}\b", regex::escape(self.as_str()))).ok())
            .as_ref()
    }
}

/// `$name` as a whole word.
fn variable_pattern() -> Option<&'static Regex> {
    static VARIABLE: OnceLock<Option<Regex>> = OnceLock::new();
    VARIABLE
        .get_or_init(|| Regex::new(r"\$(\w+)").ok())
        .as_ref()
}

/// Named types referenced by one doc tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TagRefs<'a> {
    /// Variable named by the tag, if any.
    pub variable: Option<&'a str>,
    /// Referenced class names, in order.
    pub names: Vec<&'a str>,
    /// Best-effort source line of the tag.
    pub line: usize,
}

/// Finds the line of a doc tag inside a comment.
///
/// Returns the first comment line containing `tag` at a word boundary, or,
/// when `variable` is given, containing `tag` followed later on the same
/// line by `$variable` at a word boundary. Falls back to the comment's start
/// line.
///
/// This is a text heuristic, not source mapping: a tag spread over several
/// lines, or repeated for different variables, reports the first line that
/// matches.
#[must_use]
pub fn find_tag_line(doc: &DocComment, tag: DocTag, variable: Option<&str>) -> usize {
    let Some(tag_re) = tag.pattern() else {
        return doc.start_line;
    };
    let matches_line = |line: &str| {
        let Some(found) = tag_re.find(line) else {
            return false;
        };
        let Some(var) = variable else {
            return true;
        };
        variable_pattern().is_some_and(|var_re| {
            var_re
                .captures_iter(&line[found.end()..])
                .any(|caps| &caps[1] == var)
        })
    };

    doc.text
        .lines()
        .position(matches_line)
        .map_or(doc.start_line, |offset| doc.start_line + offset)
}

/// All `@var` tags of a comment.
pub(crate) fn var_refs<'a>(resolved: &'a ResolvedDoc, doc: &DocComment) -> Vec<TagRefs<'a>> {
    if resolved.vars.is_empty() {
        return Vec::new();
    }

    let line = find_tag_line(doc, DocTag::Var, None);
    resolved
        .vars
        .iter()
        .map(|tag| TagRefs {
            variable: tag.variable.as_deref(),
            names: resolved_names(&tag.ty),
            line,
        })
        .collect()
}

/// The `@param` tag for one parameter.
pub(crate) fn param_refs<'a>(
    resolved: &'a ResolvedDoc,
    doc: &DocComment,
    param: &str,
) -> Option<TagRefs<'a>> {
    let tag = resolved.param_tag(param)?;
    Some(TagRefs {
        variable: Some(tag.name.as_str()),
        names: resolved_names(&tag.ty),
        line: find_tag_line(doc, DocTag::Param, Some(param)),
    })
}

/// The `@return` tag.
pub(crate) fn return_refs<'a>(resolved: &'a ResolvedDoc, doc: &DocComment) -> Option<TagRefs<'a>> {
    let ty = resolved.return_type.as_ref()?;
    Some(TagRefs {
        variable: None,
        names: resolved_names(ty),
        line: find_tag_line(doc, DocTag::Return, None),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use forbid_lint_core::ResolvedType;

    fn comment(text: &str) -> DocComment {
        DocComment::new(text, 10)
    }

    #[test]
    fn test_param_line_matches_variable() {
        let doc = comment("/**\n * @param Foo $a\n * @param Bar $x\n */");
        assert_eq!(find_tag_line(&doc, DocTag::Param, Some("x")), 12);
        assert_eq!(find_tag_line(&doc, DocTag::Param, Some("a")), 11);
    }

    #[test]
    fn test_param_variable_needs_word_boundary() {
        let doc = comment("/**\n * @param Foo $xy\n * @param Foo $x\n */");
        assert_eq!(find_tag_line(&doc, DocTag::Param, Some("x")), 12);
    }

    #[test]
    fn test_tag_needs_word_boundary() {
        let doc = comment("/**\n * @returns nothing\n * @return Foo\n */");
        assert_eq!(find_tag_line(&doc, DocTag::Return, None), 12);
    }

    #[test]
    fn test_prefixed_tags_do_not_match() {
        let doc = comment("/**\n * @phpstan-var Foo\n * @var Foo\n */");
        assert_eq!(find_tag_line(&doc, DocTag::Var, None), 12);
    }

    #[test]
    fn test_single_line_comment() {
        let doc = comment("/** @param Foo $x */");
        assert_eq!(find_tag_line(&doc, DocTag::Param, Some("x")), 10);
    }

    #[test]
    fn test_falls_back_to_start_line() {
        let doc = comment("/**\n * Nothing here.\n */");
        assert_eq!(find_tag_line(&doc, DocTag::Return, None), 10);
        assert_eq!(find_tag_line(&doc, DocTag::Param, Some("x")), 10);
    }

    #[test]
    fn test_param_line_without_variable_on_same_line_falls_back() {
        let doc = comment("/**\n * @param Foo\n *        $x\n */");
        assert_eq!(find_tag_line(&doc, DocTag::Param, Some("x")), 10);
    }

    #[test]
    fn test_tag_patterns_are_compiled_once() {
        for tag in [DocTag::Var, DocTag::Param, DocTag::Return] {
            let first = tag.pattern().unwrap();
            assert!(std::ptr::eq(first, tag.pattern().unwrap()));
            assert!(first.is_match(&format!(" * {} Foo", tag.as_str())));
        }
        assert!(std::ptr::eq(variable_pattern().unwrap(), variable_pattern().unwrap()));
    }

    #[test]
    fn test_param_variable_must_follow_the_tag() {
        let doc = comment("/**\n * $x is documented below\n * @param Foo $x\n */");
        assert_eq!(find_tag_line(&doc, DocTag::Param, Some("x")), 12);
    }

    #[test]
    fn test_var_refs_share_the_first_var_line() {
        let doc = comment("/**\n * @var Foo $a\n * @var Bar $b\n */");
        let resolved = ResolvedDoc::new()
            .var(Some("a"), ResolvedType::object("Foo"))
            .var(Some("b"), ResolvedType::object("Bar"));

        let refs = var_refs(&resolved, &doc);
        assert_eq!(refs.len(), 2);
        assert_eq!(refs[1].variable, Some("b"));
        assert_eq!(refs[1].names, vec!["Bar"]);
        assert!(refs.iter().all(|r| r.line == 11));
    }

    #[test]
    fn test_param_refs_only_for_documented_params() {
        let doc = comment("/**\n * @param Foo|null $x\n */");
        let resolved = ResolvedDoc::new().param(
            "x",
            ResolvedType::Union(vec![
                ResolvedType::object("Foo"),
                ResolvedType::keyword("null"),
            ]),
        );

        let refs = param_refs(&resolved, &doc, "x").unwrap();
        assert_eq!(refs.names, vec!["Foo"]);
        assert_eq!(refs.line, 11);
        assert!(param_refs(&resolved, &doc, "y").is_none());
    }

    #[test]
    fn test_return_refs_include_class_strings() {
        let doc = comment("/**\n * @return class-string<Foo>\n */");
        let resolved = ResolvedDoc::new().returns(ResolvedType::ClassString("Foo".to_string()));

        let refs = return_refs(&resolved, &doc).unwrap();
        assert_eq!(refs.names, vec!["Foo"]);
        assert_eq!(refs.line, 11);
        assert!(return_refs(&ResolvedDoc::new(), &doc).is_none());
    }
}
