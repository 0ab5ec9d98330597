//! Engine configuration
//!
//! Loaded from JSON. Every section is optional:
//!
//! ```json
//! {
//!   "identifiers": {"Coverage[Type]": "coverageType"},
//!   "render": {"line_break": "html"},
//!   "plans": [{"id": "H1234-001", "name": "Medicare Advantage Plus", "values": {"PlanType": "PPO"}}]
//! }
//! ```

mod identifiers;
mod plan;
mod render;

pub use identifiers::*;
pub use plan::*;
pub use render::*;

use crate::error::{Result, RuleEngineError};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Complete engine configuration
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub identifiers: IdentifierMap,
    pub render: RenderOptions,
    pub plans: Vec<PlanConfig>,
}

/// On-disk shape; `identifiers` entries are merged over the built-in map
#[derive(Deserialize)]
struct RawEngineConfig {
    #[serde(default)]
    identifiers: Option<IdentifierMap>,
    #[serde(default)]
    render: RenderOptions,
    #[serde(default)]
    plans: Vec<PlanConfig>,
}

impl EngineConfig {
    /// Parse configuration from a JSON string
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawEngineConfig = serde_json::from_str(json)?;

        let mut identifiers = IdentifierMap::default();
        if let Some(overrides) = raw.identifiers {
            identifiers.extend(overrides);
        }

        let config = Self {
            identifiers,
            render: raw.render,
            plans: raw.plans,
        };
        config.validate()?;
        tracing::debug!(
            plans = config.plans.len(),
            identifiers = config.identifiers.len(),
            "loaded engine config"
        );
        Ok(config)
    }

    /// Read and parse a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Plan ids must be unique and non-empty
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::with_capacity(self.plans.len());
        for plan in &self.plans {
            if plan.id.trim().is_empty() {
                return Err(RuleEngineError::InvalidConfig(format!(
                    "plan '{}' has an empty id",
                    plan.name
                )));
            }
            if !seen.insert(plan.id.as_str()) {
                return Err(RuleEngineError::InvalidConfig(format!(
                    "duplicate plan id: {}",
                    plan.id
                )));
            }
        }
        Ok(())
    }

    pub fn plan(&self, plan_id: &str) -> Option<&PlanConfig> {
        self.plans.iter().find(|p| p.id == plan_id)
    }
}
