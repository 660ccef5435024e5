// censor-core/src/engine.rs
//! Defines the core `LineEngine` trait.
//!
//! A line engine answers a single question: does this line contain a console
//! logging call? The censor operation uses it to decide which lines to drop,
//! so swapping the engine swaps the matching policy without touching the
//! splitting, joining or scoping logic.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;

use crate::config::{CensorConfig, MatchPolicy};
use crate::engines::call_pattern_engine::CallPatternEngine;
use crate::engines::substring_engine::SubstringEngine;

/// A pluggable test for console logging lines.
pub trait LineEngine: Send + Sync + std::fmt::Debug {
    /// Returns true when `line` must be dropped.
    ///
    /// `line` never contains a `\n`.
    fn is_console_line(&self, line: &str) -> bool;

    /// Short identifier used in logs and reports.
    fn name(&self) -> &'static str;
}

/// Builds the engine selected by `config.policy`.
pub fn build_engine(config: &CensorConfig) -> Result<Box<dyn LineEngine>> {
    let engine: Box<dyn LineEngine> = match config.policy {
        MatchPolicy::Substring => Box::new(SubstringEngine::new(&config.methods)),
        MatchPolicy::CallPattern => Box::new(CallPatternEngine::new(&config.methods)?),
    };
    log::debug!("Built '{}' line engine for methods {:?}.", engine.name(), config.methods);
    Ok(engine)
}
