//! Localized content templates
//!
//! Handles templates like "IF(Medicare[PlanType]=PPO)\nWelcome to {planName}\nELSE\n...\nENDIF"
//! and renders them against a plan context.

mod ast;
pub mod cache;
pub mod lexer;
pub mod parser;
mod renderer;

#[cfg(test)]
mod property_tests;

pub use ast::*;
pub use cache::*;
pub use parser::*;
pub use renderer::*;
