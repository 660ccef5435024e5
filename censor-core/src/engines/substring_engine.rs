// censor-core/src/engines/substring_engine.rs
//! A `LineEngine` that drops any line mentioning `console.<method>`.
//!
//! This is the looser policy: `console.logger(..)` and commented mentions such
//! as `// console.log disabled` are dropped as well.
//! License: MIT OR APACHE 2.0

use crate::engine::LineEngine;

#[derive(Debug, Clone)]
pub struct SubstringEngine {
    needles: Vec<String>,
}

impl SubstringEngine {
    pub fn new(methods: &[String]) -> Self {
        let needles = methods.iter().map(|m| format!("console.{}", m)).collect();
        Self { needles }
    }
}

impl LineEngine for SubstringEngine {
    fn is_console_line(&self, line: &str) -> bool {
        self.needles.iter().any(|needle| line.contains(needle.as_str()))
    }

    fn name(&self) -> &'static str {
        "substring"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> SubstringEngine {
        SubstringEngine::new(&["log".to_string(), "error".to_string()])
    }

    #[test]
    fn matches_calls_and_mentions() {
        let engine = engine();
        assert!(engine.is_console_line(r#"    console.log("x")"#));
        assert!(engine.is_console_line(r#"console.error("y");  // trailing"#));
        assert!(engine.is_console_line("// console.log disabled"));
        assert!(engine.is_console_line("console.logger.info(1)"));
    }

    #[test]
    fn ignores_other_methods() {
        let engine = engine();
        assert!(!engine.is_console_line("console.warn('w')"));
        assert!(!engine.is_console_line("const log = 1;"));
        assert!(!engine.is_console_line(""));
    }
}
