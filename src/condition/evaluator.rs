//! Condition evaluator
//!
//! Checks a condition model against a plan context: OR across groups,
//! each group's own logic within it.

use crate::condition::model::{Condition, ConditionGroupSet, Logic, Operator};
use crate::config::IdentifierMap;
use crate::TemplateContext;
use std::cmp::Ordering;

/// Evaluate a model against a context. A model without any complete
/// condition places no restriction and evaluates to true.
pub fn evaluate(
    set: &ConditionGroupSet,
    context: &TemplateContext,
    identifiers: &IdentifierMap,
) -> bool {
    let mut restricted = false;

    for group in &set.groups {
        let mut conditions = group.complete_conditions().peekable();
        if conditions.peek().is_none() {
            continue;
        }
        restricted = true;

        let matched = match group.logic {
            Logic::And => conditions.all(|c| check_single(c, context, identifiers)),
            Logic::Or => conditions.any(|c| check_single(c, context, identifiers)),
        };
        if matched {
            return true;
        }
    }

    !restricted
}

fn check_single(cond: &Condition, context: &TemplateContext, identifiers: &IdentifierMap) -> bool {
    let Some(operator) = cond.operator else {
        return false;
    };
    let Some(actual) = identifiers.resolve(cond.field.trim(), context) else {
        return false;
    };
    let actual = actual.trim();
    let expected = cond.value.trim();

    match operator {
        Operator::Equal => values_equal(actual, expected),
        Operator::NotEqual => !values_equal(actual, expected),
        Operator::Greater => compare(actual, expected) == Ordering::Greater,
        Operator::Less => compare(actual, expected) == Ordering::Less,
        Operator::GreaterEqual => compare(actual, expected) != Ordering::Less,
        Operator::LessEqual => compare(actual, expected) != Ordering::Greater,
        Operator::Contains => actual.to_lowercase().contains(&expected.to_lowercase()),
        Operator::StartsWith => actual.to_lowercase().starts_with(&expected.to_lowercase()),
        Operator::EndsWith => actual.to_lowercase().ends_with(&expected.to_lowercase()),
    }
}

fn as_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn values_equal(actual: &str, expected: &str) -> bool {
    match (as_number(actual), as_number(expected)) {
        (Some(a), Some(e)) => a == e,
        _ => actual == expected,
    }
}

/// Numeric when both sides are numbers, lexicographic otherwise
fn compare(actual: &str, expected: &str) -> Ordering {
    match (as_number(actual), as_number(expected)) {
        (Some(a), Some(e)) => a.partial_cmp(&e).unwrap_or(Ordering::Equal),
        _ => actual.cmp(expected),
    }
}
