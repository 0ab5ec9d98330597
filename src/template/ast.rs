//! Abstract Syntax Tree for content templates

use crate::config::IdentifierMap;
use crate::TemplateContext;

/// A parsed template
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub nodes: Vec<Node>,
}

/// Template node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Literal text, possibly holding `{placeholder}`s
    Text(String),
    /// `IF(...) ... [ELSE ...] ENDIF`
    Conditional(Conditional),
}

/// A conditional block.
///
/// Branches are node sequences so nesting could be represented, but the
/// parser pairs each `IF` with the first following `ENDIF`, so today they
/// only ever hold text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conditional {
    pub condition: TemplateCondition,
    pub then_branch: Vec<Node>,
    pub else_branch: Option<Vec<Node>>,
}

/// Single equality test, `Identifier[Subfield]=Literal`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateCondition {
    pub identifier: String,
    pub expected: String,
}

impl TemplateCondition {
    /// Read an `IF(...)` header. Anything other than one `=` test is rejected.
    pub fn parse(header: &str) -> Option<Self> {
        let pos = header.find('=')?;
        let identifier = header[..pos].trim();
        let expected = header[pos + 1..].trim();

        // `!=`, `<=`, `>=` and `==` are not part of the template grammar
        if identifier.is_empty()
            || identifier.ends_with(|c: char| matches!(c, '!' | '<' | '>'))
            || expected.starts_with('=')
        {
            return None;
        }

        let expected = strip_quotes(expected);
        if expected.is_empty() {
            return None;
        }

        Some(Self {
            identifier: identifier.to_string(),
            expected: expected.to_string(),
        })
    }

    /// Whether the context value for the identifier equals the literal
    pub fn holds(&self, context: &TemplateContext, identifiers: &IdentifierMap) -> bool {
        identifiers
            .resolve(&self.identifier, context)
            .is_some_and(|actual| actual.trim() == self.expected)
    }
}

fn strip_quotes(text: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = text
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner.trim();
        }
    }
    text
}

impl Template {
    /// Whether the template holds any conditional block
    pub fn has_conditionals(&self) -> bool {
        self.nodes
            .iter()
            .any(|node| matches!(node, Node::Conditional(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_condition_header() {
        let cond = TemplateCondition::parse("Medicare[PlanType]=PPO").unwrap();
        assert_eq!(cond.identifier, "Medicare[PlanType]");
        assert_eq!(cond.expected, "PPO");

        let cond = TemplateCondition::parse(" Plan[Name] = \"Gold Plus\" ").unwrap();
        assert_eq!(cond.identifier, "Plan[Name]");
        assert_eq!(cond.expected, "Gold Plus");
    }

    #[test]
    fn test_reject_non_equality_headers() {
        for header in ["Medicare[PlanType]", "A!=B", "A>=1", "A==B", "=PPO", "A=", "A=''"] {
            assert!(TemplateCondition::parse(header).is_none(), "Accepted: {}", header);
        }
    }

    #[test]
    fn test_condition_holds() {
        let cond = TemplateCondition::parse("Medicare[PlanType]=PPO").unwrap();
        let mut ctx = TemplateContext::new();
        assert!(!cond.holds(&ctx, &IdentifierMap::default()));

        ctx.insert("PlanType".to_string(), "PPO".to_string());
        assert!(cond.holds(&ctx, &IdentifierMap::default()));

        ctx.insert("PlanType".to_string(), "ppo".to_string());
        assert!(!cond.holds(&ctx, &IdentifierMap::default()));
    }
}
