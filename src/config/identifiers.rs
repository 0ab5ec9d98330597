//! Identifier to context-key resolution
//!
//! Conditions name values as `Identifier[Subfield]`; the context is keyed by
//! plain names. Resolution order: explicit mapping, the identifier itself,
//! then the bracketed subfield.

use crate::TemplateContext;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Fixed mapping from condition identifiers to context keys
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct IdentifierMap {
    entries: BTreeMap<String, String>,
}

impl Default for IdentifierMap {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert("Medicare[PlanType]".to_string(), "PlanType".to_string());
        entries.insert("Medicare[PlanName]".to_string(), "planName".to_string());
        entries.insert("Plan[Name]".to_string(), "planName".to_string());
        entries.insert("Plan[Id]".to_string(), "planId".to_string());
        Self { entries }
    }
}

impl IdentifierMap {
    /// Map with no explicit entries, resolving by name only
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, identifier: impl Into<String>, key: impl Into<String>) {
        self.entries.insert(identifier.into(), key.into());
    }

    /// Merge entries from another map, overriding existing identifiers
    pub fn extend(&mut self, other: IdentifierMap) {
        self.entries.extend(other.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Context key an identifier maps to, if explicitly configured
    pub fn key_for(&self, identifier: &str) -> Option<&str> {
        self.entries.get(identifier).map(String::as_str)
    }

    /// Look up the context value for an identifier
    pub fn resolve<'a>(&self, identifier: &str, context: &'a TemplateContext) -> Option<&'a str> {
        self.key_for(identifier)
            .and_then(|key| context.get(key))
            .or_else(|| context.get(identifier))
            .or_else(|| subfield(identifier).and_then(|name| context.get(name)))
            .map(String::as_str)
    }
}

/// `PlanType` from `Medicare[PlanType]`
pub fn subfield(identifier: &str) -> Option<&str> {
    let open = identifier.find('[')?;
    let inner = identifier[open + 1..].strip_suffix(']')?;
    let inner = inner.trim();
    if inner.is_empty() {
        None
    } else {
        Some(inner)
    }
}
