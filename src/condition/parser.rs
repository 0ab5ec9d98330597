//! Condition string parser
//!
//! Total over its input: anything it cannot read is dropped, and an input
//! with nothing usable yields the editor's default model.

use crate::condition::model::{Condition, ConditionGroup, ConditionGroupSet, Logic, Operator};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

static JUNCTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(?:AND|OR)\b").expect("valid regex"));

/// Leftmost operator wins; at one position the two-character operators are
/// tried before the one-character ones.
static OPERATOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(.*?)(>=|<=|!=|=|>|<|\bcontains\b|\bstartsWith\b|\bendsWith\b)(.*)$")
        .expect("valid regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Junction {
    And,
    Or,
}

impl Junction {
    fn from_match(text: &str) -> Self {
        if text.eq_ignore_ascii_case("or") {
            Junction::Or
        } else {
            Junction::And
        }
    }
}

/// Parse a condition string into the editable model
pub fn parse(condition: &str) -> ConditionGroupSet {
    parse_with(condition, &TracingSink)
}

/// Parse, reporting dropped pieces to `sink`
pub fn parse_with(condition: &str, sink: &dyn DiagnosticSink) -> ConditionGroupSet {
    let condition = condition.trim();
    if condition.is_empty() {
        return ConditionGroupSet::new();
    }

    let mut groups = Vec::new();
    for group_text in split_junctions(condition, |j| j == Junction::Or) {
        match parse_group(group_text, sink) {
            Some(group) => groups.push(group),
            None => sink.report(&Diagnostic::DroppedGroup {
                raw: group_text.trim().to_string(),
            }),
        }
    }

    if groups.is_empty() {
        sink.report(&Diagnostic::DefaultedModel {
            input: condition.to_string(),
        });
        return ConditionGroupSet::new();
    }

    ConditionGroupSet::from_groups(groups)
}

fn parse_group(text: &str, sink: &dyn DiagnosticSink) -> Option<ConditionGroup> {
    let text = text.trim();

    let (raw_conditions, logic) = match unwrap_group(text) {
        // Explicit group: only OR groups are written with parentheses, so a
        // wrapped group is OR unless it is joined by AND alone
        Some(inner) => {
            let has_or = split_junctions(inner, |j| j == Junction::Or).len() > 1;
            let has_and = split_junctions(inner, |j| j == Junction::And).len() > 1;
            let logic = if has_and && !has_or {
                Logic::And
            } else {
                Logic::Or
            };
            (split_junctions(inner, |_| true), logic)
        }
        None => (split_junctions(text, |j| j == Junction::And), Logic::And),
    };

    let mut conditions = Vec::with_capacity(raw_conditions.len());
    for raw in raw_conditions {
        match parse_single_condition(raw) {
            Some(condition) => conditions.push(condition),
            None => sink.report(&Diagnostic::DroppedCondition {
                raw: raw.trim().to_string(),
            }),
        }
    }

    if conditions.is_empty() {
        return None;
    }
    Some(ConditionGroup::new(conditions, logic))
}

/// Split on junction words at parenthesis depth zero
fn split_junctions(text: &str, accept: impl Fn(Junction) -> bool) -> SmallVec<[&str; 4]> {
    let mut pieces = SmallVec::new();
    let mut start = 0;
    let mut scanned = 0;
    let mut depth = 0usize;

    for m in JUNCTION.find_iter(text) {
        depth = advance_depth(depth, &text[scanned..m.start()]);
        scanned = m.end();
        if depth == 0 && accept(Junction::from_match(m.as_str())) {
            pieces.push(&text[start..m.start()]);
            start = m.end();
        }
    }
    pieces.push(&text[start..]);
    pieces
}

fn advance_depth(depth: usize, segment: &str) -> usize {
    segment.chars().fold(depth, |depth, c| match c {
        '(' => depth + 1,
        ')' => depth.saturating_sub(1),
        _ => depth,
    })
}

/// Inner text when the whole group sits inside one pair of parentheses
fn unwrap_group(text: &str) -> Option<&str> {
    let inner = text.strip_prefix('(')?.strip_suffix(')')?;
    let mut depth = 1usize;
    for c in inner.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return None;
                }
            }
            _ => {}
        }
    }
    Some(inner)
}

/// Drop parentheses left over from hand-typed nesting
fn strip_stray_parens(raw: &str) -> &str {
    let mut raw = raw.trim();
    let opens = raw.matches('(').count();
    let closes = raw.matches(')').count();
    if opens > closes {
        raw = raw.trim_start_matches('(');
    } else if closes > opens {
        raw = raw.trim_end_matches(')');
    }
    raw.trim()
}

fn parse_single_condition(raw: &str) -> Option<Condition> {
    let raw = strip_stray_parens(raw);
    let caps = OPERATOR.captures(raw)?;

    let field = caps.get(1)?.as_str().trim();
    let operator = Operator::from_token(caps.get(2)?.as_str())?;
    let value = caps.get(3)?.as_str().trim();

    if field.is_empty() || value.is_empty() {
        return None;
    }

    Some(Condition::new(field, operator, value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn single(input: &str) -> Condition {
        let set = parse(input);
        assert_eq!(set.groups.len(), 1, "Expected one group for: {}", input);
        assert_eq!(set.groups[0].conditions.len(), 1, "Expected one condition for: {}", input);
        set.groups[0].conditions[0].clone()
    }

    #[test]
    fn test_parse_simple_condition() {
        let cond = single("Medicare[PlanType]=PPO");
        assert_eq!(cond, Condition::new("Medicare[PlanType]", Operator::Equal, "PPO"));
    }

    #[test]
    fn test_parse_all_operators() {
        let operators = [
            ("Age>5", Operator::Greater),
            ("Age<5", Operator::Less),
            ("Age>=5", Operator::GreaterEqual),
            ("Age<=5", Operator::LessEqual),
            ("Age=5", Operator::Equal),
            ("Age!=5", Operator::NotEqual),
            ("Name contains Bob", Operator::Contains),
            ("Name startsWith Bo", Operator::StartsWith),
            ("Name endsWith ob", Operator::EndsWith),
        ];

        for (cond_str, expected_op) in operators {
            let cond = single(cond_str);
            assert_eq!(cond.operator, Some(expected_op), "Failed for: {}", cond_str);
        }
    }

    #[test]
    fn test_parse_two_character_operator_first() {
        let cond = single("Patient[Age]>=65");
        assert_eq!(cond.field, "Patient[Age]");
        assert_eq!(cond.operator, Some(Operator::GreaterEqual));
        assert_eq!(cond.value, "65");
    }

    #[test]
    fn test_parse_leftmost_operator_wins() {
        let cond = single("Coverage[Type]=A>B");
        assert_eq!(cond.field, "Coverage[Type]");
        assert_eq!(cond.operator, Some(Operator::Equal));
        assert_eq!(cond.value, "A>B");

        let cond = single("Name contains a=b");
        assert_eq!(cond.operator, Some(Operator::Contains));
        assert_eq!(cond.value, "a=b");
    }

    #[test]
    fn test_parse_word_operator_needs_boundary() {
        let set = parse("Plancontainsx");
        assert!(set.is_blank());
    }

    #[test]
    fn test_parse_end_to_end_example() {
        let set = parse("Medicare[PlanType]=PPO AND Patient[Age]>=65 OR Coverage[Type]=HMO");
        assert_eq!(
            set.complete_groups(),
            vec![
                (
                    Logic::And,
                    vec![
                        Condition::new("Medicare[PlanType]", Operator::Equal, "PPO"),
                        Condition::new("Patient[Age]", Operator::GreaterEqual, "65"),
                    ]
                ),
                (
                    Logic::And,
                    vec![Condition::new("Coverage[Type]", Operator::Equal, "HMO")]
                ),
            ]
        );
    }

    #[test]
    fn test_parse_junctions_case_insensitive() {
        let set = parse("A=1 and B=2 or C=3");
        assert_eq!(set.groups.len(), 2);
        assert_eq!(set.groups[0].conditions.len(), 2);
    }

    #[test]
    fn test_parse_junction_inside_word_is_not_split() {
        let cond = single("State=Oregon");
        assert_eq!(cond.value, "Oregon");
        let cond = single("Brand=ANDROID");
        assert_eq!(cond.value, "ANDROID");
    }

    #[test]
    fn test_parse_parenthesized_or_group() {
        let set = parse("(A=1 OR B=2) OR C=3");
        assert_eq!(set.groups.len(), 2);
        assert_eq!(set.groups[0].logic, Logic::Or);
        assert_eq!(set.groups[0].conditions.len(), 2);
        assert_eq!(set.groups[1].logic, Logic::And);
    }

    #[test]
    fn test_parse_parenthesized_and_group() {
        let set = parse("(A=1 AND B=2)");
        assert_eq!(set.groups.len(), 1);
        assert_eq!(set.groups[0].logic, Logic::And);
        assert_eq!(set.groups[0].conditions.len(), 2);
    }

    #[test]
    fn test_parse_parenthesized_single_condition_is_or() {
        let set = parse("(A=1) OR B=2");
        assert_eq!(set.groups.len(), 2);
        assert_eq!(set.groups[0].logic, Logic::Or);
        assert_eq!(set.groups[1].logic, Logic::And);
    }

    #[test]
    fn test_parse_not_wrapped_when_parens_close_early() {
        assert_eq!(unwrap_group("(A=1) AND (B=2)"), None);
        assert_eq!(unwrap_group("(A=1 OR B=2)"), Some("A=1 OR B=2"));
    }

    #[test]
    fn test_parse_drops_conditions_without_operator() {
        let set = parse("A=1 AND garbage OR nothing here");
        assert_eq!(set.groups.len(), 1);
        assert_eq!(set.groups[0].conditions, vec![Condition::new("A", Operator::Equal, "1")]);
    }

    #[test]
    fn test_parse_drops_empty_field_or_value() {
        let set = parse("=5 AND Age>= ");
        assert!(set.is_blank());
        assert_eq!(set.groups.len(), 1);
    }

    #[test]
    fn test_parse_empty_returns_default() {
        for input in ["", "   ", "\n\t"] {
            let set = parse(input);
            assert_eq!(set.groups.len(), 1);
            assert_eq!(set.groups[0].conditions, vec![Condition::blank()]);
        }
    }

    #[test]
    fn test_parse_control_characters_do_not_panic() {
        let set = parse("\u{0}\u{1b}[31m OR \u{7f}");
        assert!(set.is_blank());

        let cond = single("Plan\u{0}Type=P\u{1}PO");
        assert_eq!(cond.operator, Some(Operator::Equal));
    }

    #[test]
    fn test_parse_reports_diagnostics() {
        let seen = RefCell::new(Vec::new());
        let sink = |d: &Diagnostic| seen.borrow_mut().push(d.clone());

        let set = parse_with("nonsense", &sink);
        assert!(set.is_blank());
        assert_eq!(
            seen.into_inner(),
            vec![
                Diagnostic::DroppedCondition {
                    raw: "nonsense".to_string()
                },
                Diagnostic::DroppedGroup {
                    raw: "nonsense".to_string()
                },
                Diagnostic::DefaultedModel {
                    input: "nonsense".to_string()
                },
            ]
        );
    }
}
