//! Template renderer
//!
//! Evaluates conditional blocks, substitutes `{placeholder}`s and applies
//! the configured line-break form.

use crate::config::{IdentifierMap, LineBreak, RenderOptions};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::template::ast::{Node, Template};
use crate::template::parser::parse_template_with;
use crate::TemplateContext;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{\s*([A-Za-z0-9_.\-]+)\s*\}").expect("valid regex"));

/// Renders templates with a fixed identifier map and output options
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    pub identifiers: IdentifierMap,
    pub options: RenderOptions,
}

impl Renderer {
    pub fn new(identifiers: IdentifierMap, options: RenderOptions) -> Self {
        Self {
            identifiers,
            options,
        }
    }

    /// Parse and render a template source
    pub fn render(&self, source: &str, context: &TemplateContext) -> String {
        self.render_with(source, context, &TracingSink)
    }

    /// Parse and render, reporting fail-open fallbacks to `sink`
    pub fn render_with(
        &self,
        source: &str,
        context: &TemplateContext,
        sink: &dyn DiagnosticSink,
    ) -> String {
        let template = parse_template_with(source, sink);
        self.render_template_with(&template, context, sink)
    }

    /// Render an already parsed template
    pub fn render_template(&self, template: &Template, context: &TemplateContext) -> String {
        self.render_template_with(template, context, &TracingSink)
    }

    pub fn render_template_with(
        &self,
        template: &Template,
        context: &TemplateContext,
        sink: &dyn DiagnosticSink,
    ) -> String {
        let mut out = String::new();
        self.render_nodes(&template.nodes, context, sink, &mut out);
        apply_line_breaks(&out, self.options.line_break)
    }

    fn render_nodes(
        &self,
        nodes: &[Node],
        context: &TemplateContext,
        sink: &dyn DiagnosticSink,
        out: &mut String,
    ) {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(&substitute(text, context, sink)),
                Node::Conditional(block) => {
                    let branch = if block.condition.holds(context, &self.identifiers) {
                        Some(&block.then_branch)
                    } else {
                        block.else_branch.as_ref()
                    };
                    if let Some(branch) = branch {
                        let mut selected = String::new();
                        self.render_nodes(branch, context, sink, &mut selected);
                        out.push_str(selected.trim());
                    }
                }
            }
        }
    }
}

/// Render with the default identifier map and options
pub fn render(source: &str, context: &TemplateContext) -> String {
    Renderer::default().render(source, context)
}

/// Replace `{name}` with `context[name]` in one pass; unknown names stay as written
pub fn substitute(text: &str, context: &TemplateContext, sink: &dyn DiagnosticSink) -> String {
    PLACEHOLDER
        .replace_all(text, |caps: &Captures| match context.get(&caps[1]) {
            Some(value) => value.clone(),
            None => {
                sink.report(&Diagnostic::MissingVariable {
                    name: caps[1].to_string(),
                });
                caps[0].to_string()
            }
        })
        .into_owned()
}

/// Newline output keeps the author's line endings untouched
fn apply_line_breaks(text: &str, line_break: LineBreak) -> String {
    match line_break {
        LineBreak::Newline => text.to_string(),
        LineBreak::Html => text.replace("\r\n", "\n").replace('\n', line_break.as_str()),
    }
}
