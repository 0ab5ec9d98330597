//! Plan catalog entries

use crate::TemplateContext;
use serde::Deserialize;
use std::collections::BTreeMap;

/// One selectable plan and the values it contributes to a render context
#[derive(Debug, Clone, Deserialize)]
pub struct PlanConfig {
    pub id: String,
    #[serde(alias = "planName", alias = "plan_name")]
    pub name: String,
    /// Extra context values, e.g. {"PlanType": "PPO", "copay": "$20"}
    #[serde(default)]
    pub values: BTreeMap<String, String>,
}

impl PlanConfig {
    /// Context for rendering: `planId`, `planName`, then the plan's values.
    /// Explicit values win over the derived keys.
    pub fn context(&self) -> TemplateContext {
        let mut context = TemplateContext::with_capacity(self.values.len() + 2);
        context.insert("planId".to_string(), self.id.clone());
        context.insert("planName".to_string(), self.name.clone());
        for (key, value) in &self.values {
            context.insert(key.clone(), value.clone());
        }
        context
    }
}
