//! Condition expression parsing, serialization and evaluation
//!
//! This module converts strings like
//! "Medicare[PlanType]=PPO AND Patient[Age]>=65 OR Coverage[Type]=HMO"
//! to and from the editable group model.

pub mod evaluator;
mod model;
pub mod parser;
pub mod sanitize;
pub mod serializer;


pub use evaluator::*;
pub use model::*;
pub use parser::*;
pub use serializer::*;
