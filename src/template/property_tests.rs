//! Property tests for template module
//!
//! Fail-open rendering, branch selection, substitution and cache consistency.

use proptest::prelude::*;

use crate::template::cache::TemplateCache;
use crate::template::lexer::tokenize;
use crate::template::renderer::{render, Renderer};
use crate::TemplateContext;

// ═══════════════════════════════════════════════════════════════════════════
// Strategy generators for property tests
// ═══════════════════════════════════════════════════════════════════════════

/// Lower-case prose: never contains keywords or placeholders
fn prose_strategy() -> impl Strategy<Value = String> {
    "[a-z ,.\n]{0,40}"
}

/// Branch text without surrounding whitespace
fn branch_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z ]{0,15}[a-z]"
}

fn plan_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("PPO".to_string()),
        Just("HMO".to_string()),
        Just("PFFS".to_string()),
        Just("SNP".to_string()),
    ]
}

fn placeholder_name_strategy() -> impl Strategy<Value = String> {
    "[a-z][A-Za-z0-9_]{0,10}"
}

fn context_with(pairs: &[(&str, &str)]) -> TemplateContext {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════════
// Property Tests
// ═══════════════════════════════════════════════════════════════════════════

proptest! {
    /// Rendering never fails on arbitrary input
    #[test]
    fn prop_render_is_total(source in "\\PC{0,120}", plan_type in plan_type_strategy()) {
        let ctx = context_with(&[("PlanType", plan_type.as_str())]);
        let _ = render(&source, &ctx);
    }

    /// Tokens always cover the source exactly
    #[test]
    fn prop_tokens_cover_source(source in "(\\PC|IF\\(|ELSE|ENDIF|\\)){0,40}") {
        let rebuilt: String = tokenize(&source).iter().map(|t| t.raw).collect();
        prop_assert_eq!(rebuilt, source);
    }

    /// Text without keywords or placeholders passes through unchanged
    #[test]
    fn prop_plain_text_unchanged(source in prose_strategy()) {
        prop_assert_eq!(render(&source, &TemplateContext::new()), source);
    }

    /// An IF without ENDIF renders as the literal input
    #[test]
    fn prop_missing_endif_is_literal(body in prose_strategy(), plan_type in plan_type_strategy()) {
        let source = format!("IF(Medicare[PlanType]=PPO)\n{}", body);
        let ctx = context_with(&[("PlanType", plan_type.as_str())]);
        prop_assert_eq!(render(&source, &ctx), source);
    }

    /// The IF branch is kept exactly when the condition holds
    #[test]
    fn prop_branch_selection(
        then_text in branch_strategy(),
        else_text in branch_strategy(),
        plan_type in plan_type_strategy()
    ) {
        let source = format!("IF(Medicare[PlanType]=PPO)\n{}\nELSE\n{}\nENDIF", then_text, else_text);
        let ctx = context_with(&[("PlanType", plan_type.as_str())]);
        let expected = if plan_type == "PPO" { then_text } else { else_text };
        prop_assert_eq!(render(&source, &ctx), expected);
    }

    /// Known placeholders are replaced, unknown ones stay visible
    #[test]
    fn prop_placeholder_substitution(name in placeholder_name_strategy(), value in "[A-Za-z ]{0,12}") {
        let source = format!("Hello {{{}}}", name);

        let ctx = context_with(&[(name.as_str(), value.as_str())]);
        prop_assert_eq!(render(&source, &ctx), format!("Hello {}", value));

        prop_assert_eq!(render(&source, &TemplateContext::new()), source);
    }

    /// Cached rendering matches direct rendering
    #[test]
    fn prop_cache_consistency(
        then_text in branch_strategy(),
        plan_type in plan_type_strategy()
    ) {
        let cache = TemplateCache::new();
        let renderer = Renderer::default();
        let source = format!("IF(Medicare[PlanType]=HMO)\n{}\nENDIF {{planName}}", then_text);
        let ctx = context_with(&[("PlanType", plan_type.as_str()), ("planName", "Acme")]);

        let direct = renderer.render(&source, &ctx);
        let cached_first = cache.render(&renderer, &source, &ctx);
        let cached_second = cache.render(&renderer, &source, &ctx);

        prop_assert_eq!(&direct, &cached_first);
        prop_assert_eq!(&cached_first, &cached_second);
        prop_assert_eq!(cache.len(), 1);
    }
}
