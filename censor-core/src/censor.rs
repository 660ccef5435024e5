// censor-core/src/censor.rs
//! The censor operation: drop every console logging line from a payload.
//!
//! Payloads are bytes. In-scope payloads are decoded as UTF-8, split on `\n`,
//! filtered line by line, and re-joined with `\n`. Trailing carriage returns are
//! stripped from each line, so `\r\n` input comes out with bare `\n`. A trailing
//! newline survives because the split keeps the final empty segment.
//! Out-of-scope payloads are returned byte-for-byte.

use std::borrow::Cow;

use anyhow::Result;
use log::{debug, trace, warn};
use serde::Serialize;

use crate::config::{CensorConfig, DecodePolicy};
use crate::engine::{build_engine, LineEngine};
use crate::engines::call_pattern_engine::CallPatternEngine;
use crate::errors::CensorError;
use crate::scope::{Scope, TargetMatcher};

/// A line dropped by a censor run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemovedLine {
    /// 1-based line number in the input payload.
    pub line_number: usize,
    /// The line as decoded, without its terminator.
    pub text: String,
}

/// Outcome of a single censor run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CensorReport {
    /// The resulting payload.
    #[serde(skip)]
    pub output: Vec<u8>,
    /// False when a path-gated run skipped the payload.
    pub in_scope: bool,
    /// Number of `\n`-separated lines in the input (0 when out of scope).
    pub lines_in: usize,
    /// Dropped lines, in input order.
    pub removed: Vec<RemovedLine>,
}

impl CensorReport {
    pub fn changed(&self) -> bool {
        !self.removed.is_empty()
    }
}

/// A configured censor: one line engine plus the target paths it guards.
#[derive(Debug)]
pub struct Censor {
    engine: Box<dyn LineEngine>,
    targets: TargetMatcher,
    decode: DecodePolicy,
}

impl Censor {
    pub fn new(config: CensorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            engine: build_engine(&config)?,
            targets: TargetMatcher::new(&config.target_paths),
            decode: config.decode,
        })
    }

    pub fn engine(&self) -> &dyn LineEngine {
        self.engine.as_ref()
    }

    /// Decides whether a payload with this path is censored under `scope`.
    pub fn in_scope(&self, path: Option<&str>, scope: Scope) -> bool {
        match scope {
            Scope::Always => true,
            Scope::PathGated => path.is_some_and(|p| self.targets.is_target(p)),
        }
    }

    /// Runs the censor over `payload` and reports what was dropped.
    pub fn apply(&self, payload: &[u8], path: Option<&str>, scope: Scope) -> Result<CensorReport, CensorError> {
        if !self.in_scope(path, scope) {
            debug!("Path {:?} is out of scope; payload left untouched.", path);
            return Ok(CensorReport {
                output: payload.to_vec(),
                in_scope: false,
                lines_in: 0,
                removed: Vec::new(),
            });
        }

        let text = self.decode(payload)?;
        let mut kept: Vec<&str> = Vec::new();
        let mut removed = Vec::new();
        let mut lines_in = 0;

        for (index, raw) in text.split('\n').enumerate() {
            lines_in += 1;
            let line = raw.trim_end_matches('\r');
            if self.engine.is_console_line(line) {
                trace!("Dropping line {}: {}", index + 1, line);
                removed.push(RemovedLine { line_number: index + 1, text: line.to_string() });
            } else {
                kept.push(line);
            }
        }

        debug!(
            "Censored {} of {} line(s) with the '{}' engine.",
            removed.len(),
            lines_in,
            self.engine.name()
        );

        Ok(CensorReport {
            output: kept.join("\n").into_bytes(),
            in_scope: true,
            lines_in,
            removed,
        })
    }

    /// Like [`Censor::apply`] but returns only the resulting payload.
    pub fn censor_bytes(&self, payload: &[u8], path: Option<&str>, scope: Scope) -> Result<Vec<u8>, CensorError> {
        Ok(self.apply(payload, path, scope)?.output)
    }

    fn decode<'a>(&self, payload: &'a [u8]) -> Result<Cow<'a, str>, CensorError> {
        match self.decode {
            DecodePolicy::Lossy => Ok(String::from_utf8_lossy(payload)),
            DecodePolicy::Strict => std::str::from_utf8(payload)
                .map(Cow::Borrowed)
                .map_err(|e| CensorError::InvalidUtf8 { valid_up_to: e.valid_up_to() }),
        }
    }
}

impl Default for Censor {
    fn default() -> Self {
        let config = CensorConfig::default();
        Self {
            engine: Box::new(CallPatternEngine::with_default_methods()),
            targets: TargetMatcher::new(&config.target_paths),
            decode: config.decode,
        }
    }
}

/// Censors `payload` with the built-in configuration.
///
/// Never fails: the default decode policy is lossy.
pub fn censor(payload: &[u8], path: Option<&str>, scope: Scope) -> Vec<u8> {
    match Censor::default().apply(payload, path, scope) {
        Ok(report) => report.output,
        Err(e) => {
            warn!("Censoring with the built-in configuration failed ({}); payload left untouched.", e);
            payload.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MatchPolicy, TARGET_PATH};

    fn run(input: &str) -> String {
        String::from_utf8(censor(input.as_bytes(), None, Scope::Always)).unwrap()
    }

    #[test]
    fn drops_console_line_between_others() {
        assert_eq!(run("a\nconsole.log(\"x\")\nb"), "a\nb");
    }

    #[test]
    fn sole_console_line_leaves_empty_output() {
        assert_eq!(run("console.error(\"y\");  // trailing"), "");
    }

    #[test]
    fn default_policy_keeps_commented_mention() {
        assert_eq!(run("// console.log disabled\nx"), "// console.log disabled\nx");
    }

    #[test]
    fn crlf_is_normalized() {
        assert_eq!(run("a\r\nconsole.log(1)\r\nb\r\n"), "a\nb\n");
    }

    #[test]
    fn trailing_newline_is_preserved() {
        assert_eq!(run("a\nb\n"), "a\nb\n");
        assert_eq!(run("a\nconsole.log(1)\n"), "a\n");
        assert_eq!(run(""), "");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let out = censor(b"ok\xff\nconsole.log(1)", None, Scope::Always);
        assert_eq!(String::from_utf8(out).unwrap(), "ok\u{FFFD}");
    }

    #[test]
    fn path_gated_only_touches_target() {
        let content = b"const id = 1;\nconsole.log(id)\nreturn id;";
        let censored = censor(content, Some(TARGET_PATH), Scope::PathGated);
        assert_eq!(censored, b"const id = 1;\nreturn id;");
        assert_eq!(censor(content, Some("other/file.ts"), Scope::PathGated), content);
        assert_eq!(censor(content, None, Scope::PathGated), content);
    }

    #[test]
    fn out_of_scope_keeps_invalid_bytes() {
        let payload = b"\xfe\xff console.log(1)\r\n";
        assert_eq!(censor(payload, Some("other/file.ts"), Scope::PathGated), payload);
    }

    #[test]
    fn report_lists_removed_lines() {
        let censor = Censor::new(CensorConfig::default()).unwrap();
        let report = censor.apply(b"a\n  console.log(1)\nb\nconsole.error(2)", None, Scope::Always).unwrap();
        assert!(report.in_scope);
        assert!(report.changed());
        assert_eq!(report.lines_in, 4);
        assert_eq!(
            report.removed,
            vec![
                RemovedLine { line_number: 2, text: "  console.log(1)".to_string() },
                RemovedLine { line_number: 4, text: "console.error(2)".to_string() },
            ]
        );
    }

    #[test]
    fn strict_decode_rejects_invalid_utf8() {
        let config = CensorConfig { decode: DecodePolicy::Strict, ..CensorConfig::default() };
        let censor = Censor::new(config).unwrap();
        let err = censor.apply(b"ab\xffcd", None, Scope::Always).unwrap_err();
        assert!(matches!(err, CensorError::InvalidUtf8 { valid_up_to: 2 }));
    }

    #[test]
    fn default_censor_uses_call_pattern_engine() {
        let censor = Censor::default();
        assert_eq!(censor.engine().name(), "call_pattern");
        assert!(censor.in_scope(Some(TARGET_PATH), Scope::PathGated));
        let out = censor.censor_bytes(b"// console.log disabled\nconsole.log(1)", None, Scope::Always).unwrap();
        assert_eq!(out, b"// console.log disabled");
    }

    #[test]
    fn substring_policy_drops_mentions() {
        let config = CensorConfig { policy: MatchPolicy::Substring, ..CensorConfig::default() };
        let censor = Censor::new(config).unwrap();
        let out = censor.censor_bytes(b"// console.log disabled\nx", None, Scope::Always).unwrap();
        assert_eq!(out, b"x");
    }
}
