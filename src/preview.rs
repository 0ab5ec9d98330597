//! Plan-aware preview for the template editor
//!
//! Resolves a plan from the catalog into a context and renders rule content
//! against it through a shared template cache.

use crate::condition::evaluate;
use crate::config::EngineConfig;
use crate::content::RuleContent;
use crate::error::{Result, RuleEngineError};
use crate::template::{Renderer, TemplateCache};
use crate::TemplateContext;
use std::collections::BTreeMap;

/// Preview service owned by one editor
#[derive(Debug)]
pub struct Previewer {
    config: EngineConfig,
    renderer: Renderer,
    cache: TemplateCache,
}

impl Previewer {
    pub fn new(config: EngineConfig) -> Self {
        let renderer = Renderer::new(config.identifiers.clone(), config.render);
        Self {
            config,
            renderer,
            cache: TemplateCache::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn cache(&self) -> &TemplateCache {
        &self.cache
    }

    /// Render context for a plan in the catalog
    pub fn context_for(&self, plan_id: &str) -> Result<TemplateContext> {
        let plan = self.config.plan(plan_id).ok_or_else(|| {
            tracing::warn!(plan_id, "preview requested for unknown plan");
            RuleEngineError::PlanNotFound(plan_id.to_string())
        })?;
        Ok(plan.context())
    }

    /// Render one template for a plan
    pub fn preview(&self, template: &str, plan_id: &str) -> Result<String> {
        let context = self.context_for(plan_id)?;
        Ok(self.cache.render(&self.renderer, template, &context))
    }

    /// Render every language of a rule for a plan
    pub fn preview_rule(&self, rule: &RuleContent, plan_id: &str) -> Result<BTreeMap<String, String>> {
        let context = self.context_for(plan_id)?;
        let rendered = rule
            .content
            .render_all_cached(&self.cache, &self.renderer, &context);
        tracing::debug!(
            rule_id = %rule.id,
            plan_id,
            languages = rendered.len(),
            cached_templates = self.cache.len(),
            "rendered rule preview"
        );
        Ok(rendered)
    }

    /// Whether the rule's condition holds for a plan
    pub fn is_eligible(&self, rule: &RuleContent, plan_id: &str) -> Result<bool> {
        let context = self.context_for(plan_id)?;
        Ok(evaluate(
            &rule.condition_model(),
            &context,
            &self.config.identifiers,
        ))
    }
}
