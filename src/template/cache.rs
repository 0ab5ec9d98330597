//! Parsed template cache - caller-owned, fast hashing
//!
//! A preview pane re-renders the same template on every plan switch and
//! keystroke; this keeps the parsed AST around between renders.

use crate::template::ast::Template;
use crate::template::parser::parse_template;
use crate::template::renderer::Renderer;
use crate::TemplateContext;
use ahash::AHashMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// Cache of parsed templates keyed by source text
#[derive(Debug, Default)]
pub struct TemplateCache {
    entries: RwLock<AHashMap<String, Arc<Template>>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(AHashMap::with_capacity(capacity)),
        }
    }

    /// Get or parse a template, caching the AST
    #[inline]
    pub fn get_or_parse(&self, source: &str) -> Arc<Template> {
        // Fast path: check read lock first
        {
            let entries = self.entries.read();
            if let Some(template) = entries.get(source) {
                return Arc::clone(template);
            }
        }

        // Slow path: parse and cache
        let template = Arc::new(parse_template(source));
        let mut entries = self.entries.write();
        Arc::clone(
            entries
                .entry(source.to_string())
                .or_insert_with(|| Arc::clone(&template)),
        )
    }

    /// Render a template through the cache
    pub fn render(&self, renderer: &Renderer, source: &str, context: &TemplateContext) -> String {
        let template = self.get_or_parse(source);
        renderer.render_template(&template, context)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Drop every cached template
    pub fn clear(&self) {
        self.entries.write().clear();
    }
}
