//! Rule content: a canonical condition plus per-language templates
//!
//! Each language is an independent template; nothing is shared between them.

use crate::condition::{parse, serialize, ConditionGroupSet};
use crate::template::{Renderer, TemplateCache};
use crate::TemplateContext;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Templates keyed by language code ("en", "es", ...)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedContent {
    templates: BTreeMap<String, String>,
}

impl LocalizedContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template for a language, returning the previous one
    pub fn insert(&mut self, language: impl Into<String>, template: impl Into<String>) -> Option<String> {
        self.templates.insert(language.into(), template.into())
    }

    pub fn get(&self, language: &str) -> Option<&str> {
        self.templates.get(language).map(String::as_str)
    }

    pub fn remove(&mut self, language: &str) -> Option<String> {
        self.templates.remove(language)
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.templates.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Render every language against the same context
    pub fn render_all(&self, renderer: &Renderer, context: &TemplateContext) -> BTreeMap<String, String> {
        self.templates
            .iter()
            .map(|(language, template)| (language.clone(), renderer.render(template, context)))
            .collect()
    }

    /// Same as [`render_all`](Self::render_all), reusing parsed templates
    pub fn render_all_cached(
        &self,
        cache: &TemplateCache,
        renderer: &Renderer,
        context: &TemplateContext,
    ) -> BTreeMap<String, String> {
        self.templates
            .iter()
            .map(|(language, template)| {
                (language.clone(), cache.render(renderer, template, context))
            })
            .collect()
    }
}

impl<L: Into<String>, T: Into<String>> FromIterator<(L, T)> for LocalizedContent {
    fn from_iter<I: IntoIterator<Item = (L, T)>>(iter: I) -> Self {
        Self {
            templates: iter
                .into_iter()
                .map(|(language, template)| (language.into(), template.into()))
                .collect(),
        }
    }
}

/// The engine-facing part of a rule record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleContent {
    pub id: String,
    pub name: String,
    /// Canonical condition expression, stored as opaque text
    #[serde(default)]
    pub condition: String,
    #[serde(default)]
    pub content: LocalizedContent,
}

impl RuleContent {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Editable model for the stored condition
    pub fn condition_model(&self) -> ConditionGroupSet {
        parse(&self.condition)
    }

    /// Store the canonical form of an edited model
    pub fn set_condition_model(&mut self, model: &ConditionGroupSet) {
        self.condition = serialize(model);
    }
}
