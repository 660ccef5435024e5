// censor-core/src/scope.rs
//! Decides whether a payload is in scope for censoring.
//!
//! Stream mode censors everything. Callback mode only censors payloads whose
//! path names one of the configured target files.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// A shell-escaped bracket segment: `\[name\]`.
    static ref ESCAPED_BRACKETS: Regex =
        Regex::new(r"\\\[([^\\\[\]/]*)\\\]").expect("escaped bracket pattern is valid");
}

/// Whether the in-scope path check is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scope {
    /// Every payload is censored; the path is ignored.
    #[default]
    Always,
    /// Only payloads whose path matches a target path are censored.
    PathGated,
}

/// Matches paths against the configured target paths.
///
/// Paths are compared after normalisation: an escaped bracket pair
/// (`\[tokenId\]`) is unescaped, remaining backslashes become `/`, and a
/// leading `./` is removed. A lone `\[` is a Windows separator before a bracket.
/// A path matches when it equals a target or ends with `/` followed by one,
/// so repository-relative and absolute paths both resolve.
#[derive(Debug, Clone)]
pub struct TargetMatcher {
    targets: Vec<String>,
}

impl TargetMatcher {
    pub fn new<S: AsRef<str>>(targets: &[S]) -> Self {
        let mut normalized: Vec<String> = Vec::with_capacity(targets.len());
        for target in targets {
            let n = normalize_path(target.as_ref());
            if !n.is_empty() && !normalized.contains(&n) {
                normalized.push(n);
            }
        }
        Self { targets: normalized }
    }

    pub fn is_target(&self, path: &str) -> bool {
        let path = normalize_path(path);
        self.targets.iter().any(|target| {
            path == *target
                || (path.len() > target.len()
                    && path.ends_with(target.as_str())
                    && path.as_bytes()[path.len() - target.len() - 1] == b'/')
        })
    }

    /// Normalised targets, in configuration order.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }
}

/// Normalises a path for comparison. Never used to rewrite stored paths.
pub fn normalize_path(path: &str) -> String {
    let unescaped = ESCAPED_BRACKETS.replace_all(path, "[$1]").replace('\\', "/");
    let mut trimmed = unescaped.trim();
    while let Some(rest) = trimmed.strip_prefix("./") {
        trimmed = rest;
    }
    trimmed.to_string()
}
