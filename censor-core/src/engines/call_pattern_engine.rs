// censor-core/src/engines/call_pattern_engine.rs
//! A `LineEngine` that drops only lines containing a call-shaped console
//! expression: `console.` + method + optional whitespace + `(`.
//!
//! Compiled patterns are cached per method list so repeated engines (one per
//! blob in callback mode, say) share one `Regex`.
//! License: MIT OR APACHE 2.0

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use anyhow::{anyhow, Result};
use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};

use crate::config::MAX_PATTERN_LENGTH;
use crate::engine::LineEngine;
use crate::errors::CensorError;

/// Call pattern for the built-in `log` and `error` methods.
pub const DEFAULT_CALL_PATTERN: &str = r"console\.(?:log|error)\s*\(";

lazy_static! {
    static ref PATTERN_CACHE: RwLock<HashMap<Vec<String>, Arc<Regex>>> = RwLock::new(HashMap::new());
    static ref DEFAULT_REGEX: Arc<Regex> =
        Arc::new(Regex::new(DEFAULT_CALL_PATTERN).expect("default call pattern is valid"));
}

/// Builds the regex source for `methods`, e.g. `console\.(?:log|error)\s*\(`.
pub fn call_pattern_source(methods: &[String]) -> String {
    let alternation = methods
        .iter()
        .map(|m| regex::escape(m))
        .collect::<Vec<_>>()
        .join("|");
    format!(r"console\.(?:{})\s*\(", alternation)
}

/// Compiles the call pattern for `methods`.
pub fn compile_call_pattern(methods: &[String]) -> Result<Regex, CensorError> {
    let source = call_pattern_source(methods);
    if source.len() > MAX_PATTERN_LENGTH {
        return Err(CensorError::PatternLengthExceeded(source.len(), MAX_PATTERN_LENGTH));
    }
    RegexBuilder::new(&source)
        .size_limit(1 << 20)
        .build()
        .map_err(|e| CensorError::PatternCompilationError(source, e))
}

/// Returns the cached pattern for `methods`, compiling it on first use.
pub fn get_or_compile_pattern(methods: &[String]) -> Result<Arc<Regex>> {
    {
        let cache = PATTERN_CACHE.read().map_err(|_| anyhow!("call pattern cache poisoned"))?;
        if let Some(regex) = cache.get(methods) {
            return Ok(Arc::clone(regex));
        }
    }

    let compiled = Arc::new(compile_call_pattern(methods)?);
    debug!("Compiled call pattern '{}'.", compiled.as_str());
    PATTERN_CACHE
        .write()
        .map_err(|_| anyhow!("call pattern cache poisoned"))?
        .insert(methods.to_vec(), Arc::clone(&compiled));
    Ok(compiled)
}

#[derive(Debug, Clone)]
pub struct CallPatternEngine {
    regex: Arc<Regex>,
}

impl CallPatternEngine {
    pub fn new(methods: &[String]) -> Result<Self> {
        Ok(Self { regex: get_or_compile_pattern(methods)? })
    }

    /// Engine for the built-in `log` and `error` methods. Infallible.
    pub fn with_default_methods() -> Self {
        Self { regex: Arc::clone(&DEFAULT_REGEX) }
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl LineEngine for CallPatternEngine {
    fn is_console_line(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    fn name(&self) -> &'static str {
        "call_pattern"
    }
}
