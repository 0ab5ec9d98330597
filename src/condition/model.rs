//! Editable model for condition expressions
//!
//! An expression is a set of groups ORed together. Each group holds
//! conditions joined by a single logic operator. The model is what a
//! condition-builder dialog edits row by row.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    /// Equal (=)
    #[serde(rename = "=")]
    Equal,
    /// Not equal (!=)
    #[serde(rename = "!=")]
    NotEqual,
    /// Greater than (>)
    #[serde(rename = ">")]
    Greater,
    /// Less than (<)
    #[serde(rename = "<")]
    Less,
    /// Greater than or equal (>=)
    #[serde(rename = ">=")]
    GreaterEqual,
    /// Less than or equal (<=)
    #[serde(rename = "<=")]
    LessEqual,
    /// Substring test (contains)
    #[serde(rename = "contains")]
    Contains,
    /// Prefix test (startsWith)
    #[serde(rename = "startsWith")]
    StartsWith,
    /// Suffix test (endsWith)
    #[serde(rename = "endsWith")]
    EndsWith,
}

impl Operator {
    /// Every operator, in the order the builder UI lists them
    pub const ALL: [Operator; 9] = [
        Operator::Equal,
        Operator::NotEqual,
        Operator::Greater,
        Operator::Less,
        Operator::GreaterEqual,
        Operator::LessEqual,
        Operator::Contains,
        Operator::StartsWith,
        Operator::EndsWith,
    ];

    /// Token used in the expression string
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::GreaterEqual => ">=",
            Operator::LessEqual => "<=",
            Operator::Contains => "contains",
            Operator::StartsWith => "startsWith",
            Operator::EndsWith => "endsWith",
        }
    }

    /// Look up an operator by its exact token
    pub fn from_token(token: &str) -> Option<Operator> {
        Operator::ALL.into_iter().find(|op| op.as_str() == token)
    }

    /// Word operators are written with spaces around them
    pub fn is_word(self) -> bool {
        matches!(
            self,
            Operator::Contains | Operator::StartsWith | Operator::EndsWith
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Junction used between the conditions of one group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Logic {
    #[default]
    #[serde(rename = "AND")]
    And,
    #[serde(rename = "OR")]
    Or,
}

impl Logic {
    pub fn as_str(self) -> &'static str {
        match self {
            Logic::And => "AND",
            Logic::Or => "OR",
        }
    }
}

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One `field operator value` test
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: Option<Operator>,
    pub value: String,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator: Some(operator),
            value: value.into(),
        }
    }

    /// Blank row as shown when a condition is added in the editor
    pub fn blank() -> Self {
        Self::default()
    }

    /// A condition is complete once field, operator and value are all set
    pub fn is_complete(&self) -> bool {
        self.operator.is_some() && !self.field.trim().is_empty() && !self.value.trim().is_empty()
    }
}

/// Conditions combined with one logic operator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionGroup {
    /// UI identity only, never compared semantically
    pub id: String,
    pub conditions: Vec<Condition>,
    #[serde(default)]
    pub logic: Logic,
}

impl ConditionGroup {
    /// Group with a fresh id
    pub fn new(conditions: Vec<Condition>, logic: Logic) -> Self {
        Self {
            id: new_group_id(),
            conditions,
            logic,
        }
    }

    /// Group holding a single blank condition
    pub fn blank() -> Self {
        Self::new(vec![Condition::blank()], Logic::And)
    }

    /// Complete conditions in authored order
    pub fn complete_conditions(&self) -> impl Iterator<Item = &Condition> {
        self.conditions.iter().filter(|c| c.is_complete())
    }
}

/// Random group id, e.g. `group-3fa9c01e`
fn new_group_id() -> String {
    format!("group-{:08x}", rand::random::<u32>())
}

/// Replacement values for one condition row
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConditionEdit {
    pub field: Option<String>,
    pub operator: Option<Option<Operator>>,
    pub value: Option<String>,
}

/// The whole expression: groups always ORed together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionGroupSet {
    pub groups: Vec<ConditionGroup>,
}

impl Default for ConditionGroupSet {
    fn default() -> Self {
        Self::new()
    }
}

impl ConditionGroupSet {
    /// Editor default: one group with one blank condition
    pub fn new() -> Self {
        Self {
            groups: vec![ConditionGroup::blank()],
        }
    }

    pub fn from_groups(groups: Vec<ConditionGroup>) -> Self {
        if groups.is_empty() {
            return Self::new();
        }
        Self { groups }
    }

    /// True when no group holds a complete condition
    pub fn is_blank(&self) -> bool {
        self.groups.iter().all(|g| g.complete_conditions().next().is_none())
    }

    pub fn group(&self, group_id: &str) -> Option<&ConditionGroup> {
        self.groups.iter().find(|g| g.id == group_id)
    }

    fn group_mut(&mut self, group_id: &str) -> Option<&mut ConditionGroup> {
        self.groups.iter_mut().find(|g| g.id == group_id)
    }

    /// Append a new group with one blank condition, returning its id
    pub fn add_group(&mut self) -> String {
        let group = ConditionGroup::blank();
        let id = group.id.clone();
        self.groups.push(group);
        id
    }

    /// Whether removing this group would leave the set empty.
    /// The editor asks for confirmation in that case.
    pub fn is_last_group(&self, group_id: &str) -> bool {
        self.groups.len() == 1 && self.groups[0].id == group_id
    }

    /// Remove a group. Removing the final group resets to the default model.
    pub fn remove_group(&mut self, group_id: &str) -> bool {
        let before = self.groups.len();
        self.groups.retain(|g| g.id != group_id);
        let removed = self.groups.len() != before;
        if self.groups.is_empty() {
            *self = Self::new();
        }
        removed
    }

    /// Append a blank condition to a group
    pub fn add_condition(&mut self, group_id: &str) -> bool {
        match self.group_mut(group_id) {
            Some(group) => {
                group.conditions.push(Condition::blank());
                true
            }
            None => false,
        }
    }

    /// Remove one condition; a group left without conditions goes away
    pub fn remove_condition(&mut self, group_id: &str, index: usize) -> bool {
        let Some(group) = self.group_mut(group_id) else {
            return false;
        };
        if index >= group.conditions.len() {
            return false;
        }
        group.conditions.remove(index);
        if group.conditions.is_empty() {
            self.remove_group(group_id);
        }
        true
    }

    /// Apply an edit to one condition row
    pub fn update_condition(&mut self, group_id: &str, index: usize, edit: ConditionEdit) -> bool {
        let Some(condition) = self
            .group_mut(group_id)
            .and_then(|g| g.conditions.get_mut(index))
        else {
            return false;
        };
        if let Some(field) = edit.field {
            condition.field = field;
        }
        if let Some(operator) = edit.operator {
            condition.operator = operator;
        }
        if let Some(value) = edit.value {
            condition.value = value;
        }
        true
    }

    pub fn set_logic(&mut self, group_id: &str, logic: Logic) -> bool {
        match self.group_mut(group_id) {
            Some(group) => {
                group.logic = logic;
                true
            }
            None => false,
        }
    }

    /// Id-free view of the complete conditions, one entry per non-empty group
    pub fn complete_groups(&self) -> Vec<(Logic, Vec<Condition>)> {
        self.groups
            .iter()
            .map(|g| (g.logic, g.complete_conditions().cloned().collect::<Vec<_>>()))
            .filter(|(_, conditions)| !conditions.is_empty())
            .collect()
    }
}
