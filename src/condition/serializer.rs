//! Canonical string form of a condition model

use crate::condition::model::{Condition, ConditionGroup, ConditionGroupSet, Logic};
use crate::condition::sanitize::{sanitize_expression, sanitize_field, sanitize_value};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};

/// Serialize a model into its canonical expression string
pub fn serialize(set: &ConditionGroupSet) -> String {
    serialize_with(set, &TracingSink)
}

/// Serialize, reporting skipped incomplete conditions to `sink`
pub fn serialize_with(set: &ConditionGroupSet, sink: &dyn DiagnosticSink) -> String {
    let groups: Vec<String> = set
        .groups
        .iter()
        .filter_map(|group| serialize_group(group, sink))
        .collect();

    if groups.is_empty() {
        return String::new();
    }
    sanitize_expression(&groups.join(" OR "))
}

fn serialize_group(group: &ConditionGroup, sink: &dyn DiagnosticSink) -> Option<String> {
    let mut parts = Vec::with_capacity(group.conditions.len());

    for (index, condition) in group.conditions.iter().enumerate() {
        match serialize_condition(condition) {
            Some(text) => parts.push(text),
            None => sink.report(&Diagnostic::SkippedIncomplete {
                group_id: group.id.clone(),
                index,
            }),
        }
    }

    if parts.is_empty() {
        return None;
    }

    let separator = format!(" {} ", group.logic);
    let joined = parts.join(separator.as_str());
    // OR groups keep their logic across a re-parse only when wrapped
    match group.logic {
        Logic::And => Some(joined),
        Logic::Or => Some(format!("({})", joined)),
    }
}

fn serialize_condition(condition: &Condition) -> Option<String> {
    if !condition.is_complete() {
        return None;
    }
    let operator = condition.operator?;
    let field = sanitize_field(&condition.field);
    let value = sanitize_value(&condition.value);
    if field.is_empty() || value.is_empty() {
        return None;
    }

    if operator.is_word() {
        Some(format!("{} {} {}", field, operator, value))
    } else {
        Some(format!("{}{}{}", field, operator, value))
    }
}
