//! Benefit Rules Core - condition expression and content template engine
//!
//! This crate holds the two interpreters behind benefit-plan rule authoring:
//!
//! - [`condition`]: converts flat expressions such as
//!   `Medicare[PlanType]=PPO AND Patient[Age]>=65 OR Coverage[Type]=HMO`
//!   to and from an editable model of condition groups.
//! - [`template`]: renders localized content templates with
//!   `IF(...) ... ELSE ... ENDIF` blocks and `{placeholder}` variables.
//!
//! Both are total: malformed input degrades to a default model or literal
//! text, never an error. Anything worth knowing about such input is
//! reported through [`diagnostics`].
//!
//! ```
//! use benefit_rules_core::{parse, serialize, render, TemplateContext};
//!
//! let model = parse("Medicare[PlanType]=PPO AND Patient[Age]>=65 OR Coverage[Type]=HMO");
//! assert_eq!(model.groups.len(), 2);
//! assert_eq!(
//!     serialize(&model),
//!     "Medicare[PlanType]=PPO AND Patient[Age]>=65 OR Coverage[Type]=HMO"
//! );
//!
//! let mut context = TemplateContext::new();
//! context.insert("PlanType".to_string(), "PPO".to_string());
//! assert_eq!(render("IF(Medicare[PlanType]=PPO)\nA\nELSE\nB\nENDIF", &context), "A");
//! ```

pub mod condition;
pub mod config;
pub mod content;
pub mod diagnostics;
pub mod error;
pub mod preview;
pub mod template;

use std::collections::HashMap;

/// Flat variable name to display string mapping supplied per render
pub type TemplateContext = HashMap<String, String>;

pub use crate::condition::{
    evaluate, parse, parse_with, serialize, serialize_with, Condition, ConditionEdit,
    ConditionGroup, ConditionGroupSet, Logic, Operator,
};
pub use crate::config::{EngineConfig, IdentifierMap, LineBreak, PlanConfig, RenderOptions};
pub use crate::content::{LocalizedContent, RuleContent};
pub use crate::diagnostics::{Diagnostic, DiagnosticSink, NoopSink, TracingSink};
pub use crate::error::{Result, RuleEngineError};
pub use crate::preview::Previewer;
pub use crate::template::{parse_template, render, Renderer, Template, TemplateCache};
