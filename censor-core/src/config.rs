//! Configuration management for `censor-core`.
//!
//! This module defines what a censor run looks for and where it applies: the
//! target paths that gate callback mode, the line matching policy, the console
//! methods that count as logging calls, and the decoding policy. It handles
//! YAML (de)serialization and provides utilities for loading, merging and
//! validating these configs.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use log::{debug, info};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::engines::call_pattern_engine::call_pattern_source;
use crate::errors::CensorError;

/// Maximum allowed length for a generated console call pattern.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Forward-slash form of the token route handler path.
pub const TARGET_PATH: &str = "app/api/v1/tokens/[tokenId]/route.ts";

/// Shell-escaped bracket form of [`TARGET_PATH`].
pub const TARGET_PATH_ESCAPED: &str = r"app/api/v1/tokens/\[tokenId\]/route.ts";

lazy_static! {
    static ref JS_IDENTIFIER: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$")
        .expect("identifier pattern is valid");
}

/// How a line is tested for a console logging call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Drop any line containing `console.<method>`, call or not.
    Substring,
    /// Drop only lines shaped like a call: `console.<method>` then optional whitespace then `(`.
    #[default]
    CallPattern,
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MatchPolicy::Substring => write!(f, "substring"),
            MatchPolicy::CallPattern => write!(f, "call_pattern"),
        }
    }
}

/// What to do with payload bytes that are not valid UTF-8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Replace invalid sequences with U+FFFD.
    #[default]
    Lossy,
    /// Fail with [`CensorError::InvalidUtf8`].
    Strict,
}

/// The effective configuration of a censor run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct CensorConfig {
    /// Paths that are in scope for path-gated runs.
    pub target_paths: Vec<String>,
    /// Line matching policy.
    pub policy: MatchPolicy,
    /// Console methods treated as logging calls (`log` matches `console.log`).
    pub methods: Vec<String>,
    /// Decoding policy for non UTF-8 payloads.
    pub decode: DecodePolicy,
}

impl Default for CensorConfig {
    fn default() -> Self {
        Self {
            target_paths: vec![TARGET_PATH.to_string(), TARGET_PATH_ESCAPED.to_string()],
            policy: MatchPolicy::CallPattern,
            methods: vec!["log".to_string(), "error".to_string()],
            decode: DecodePolicy::Lossy,
        }
    }
}

/// A user-supplied configuration file. Every field is optional; present fields
/// override the defaults in [`merge_config`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserConfig {
    pub target_paths: Option<Vec<String>>,
    pub policy: Option<MatchPolicy>,
    pub methods: Option<Vec<String>>,
    pub decode: Option<DecodePolicy>,
}

impl UserConfig {
    /// Loads a user configuration from a YAML file without validating it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading censor configuration from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: UserConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }
}

impl CensorConfig {
    /// Loads the built-in configuration embedded in the binary.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default configuration from embedded string...");
        let default_yaml = include_str!("../config/default_config.yaml");
        let config: CensorConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default configuration")?;
        Ok(config)
    }

    /// Loads a YAML file, merges it over the built-in defaults and validates the result.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let user = UserConfig::load_from_file(path.as_ref())?;
        let config = merge_config(Self::load_default()?, Some(user));
        config.validate()?;
        info!(
            "Loaded configuration: policy={}, methods={:?}, {} target path(s).",
            config.policy,
            config.methods,
            config.target_paths.len()
        );
        Ok(config)
    }

    /// Checks the configuration for problems, reporting all of them at once.
    pub fn validate(&self) -> Result<(), CensorError> {
        let mut errors = Vec::new();

        if self.methods.is_empty() {
            errors.push("`methods` must name at least one console method.".to_string());
        }
        let mut seen = HashSet::new();
        for method in &self.methods {
            if !JS_IDENTIFIER.is_match(method) {
                errors.push(format!("Method '{}' is not a valid identifier.", method));
            } else if !seen.insert(method.as_str()) {
                errors.push(format!("Duplicate method found: '{}'.", method));
            }
        }

        if self.target_paths.is_empty() {
            errors.push("`target_paths` must contain at least one path.".to_string());
        }
        for target in &self.target_paths {
            if target.trim().is_empty() {
                errors.push("A target path is empty.".to_string());
            }
        }

        let pattern_len = call_pattern_source(&self.methods).len();
        if pattern_len > MAX_PATTERN_LENGTH {
            errors.push(CensorError::PatternLengthExceeded(pattern_len, MAX_PATTERN_LENGTH).to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(CensorError::InvalidConfig(errors.join("\n")))
        }
    }
}

/// Merges a user configuration over the defaults. Fields present in the user
/// file replace the default value wholesale.
pub fn merge_config(default_config: CensorConfig, user_config: Option<UserConfig>) -> CensorConfig {
    let mut merged = default_config;

    if let Some(user) = user_config {
        if let Some(target_paths) = user.target_paths {
            debug!("Overriding target paths with {} user value(s).", target_paths.len());
            merged.target_paths = target_paths;
        }
        if let Some(policy) = user.policy {
            debug!("Overriding match policy with user value: {}", policy);
            merged.policy = policy;
        }
        if let Some(methods) = user.methods {
            debug!("Overriding console methods with user value: {:?}", methods);
            merged.methods = methods;
        }
        if let Some(decode) = user.decode {
            merged.decode = decode;
        }
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_default_matches_code_default() {
        let loaded = CensorConfig::load_default().unwrap();
        assert_eq!(loaded, CensorConfig::default());
    }

    #[test]
    fn default_config_is_valid() {
        assert!(CensorConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_collects_every_problem() {
        let config = CensorConfig {
            target_paths: vec!["  ".to_string()],
            methods: vec!["log".to_string(), "log".to_string(), "not-a-method".to_string()],
            ..CensorConfig::default()
        };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("Duplicate method found: 'log'."));
        assert!(message.contains("Method 'not-a-method' is not a valid identifier."));
        assert!(message.contains("A target path is empty."));
    }

    #[test]
    fn validate_rejects_empty_methods() {
        let config = CensorConfig { methods: Vec::new(), ..CensorConfig::default() };
        assert!(matches!(config.validate(), Err(CensorError::InvalidConfig(_))));
    }

    #[test]
    fn validate_rejects_overlong_pattern() {
        let methods = (0..100).map(|i| format!("method_{i}")).collect();
        let config = CensorConfig { methods, ..CensorConfig::default() };
        let message = config.validate().unwrap_err().to_string();
        assert!(message.contains("exceeds maximum allowed (500)"));
    }

    #[test]
    fn merge_without_user_config_keeps_defaults() {
        assert_eq!(merge_config(CensorConfig::default(), None), CensorConfig::default());
    }

    #[test]
    fn merge_overrides_only_present_fields() {
        let user = UserConfig {
            policy: Some(MatchPolicy::Substring),
            methods: Some(vec!["warn".to_string()]),
            ..UserConfig::default()
        };
        let merged = merge_config(CensorConfig::default(), Some(user));
        assert_eq!(merged.policy, MatchPolicy::Substring);
        assert_eq!(merged.methods, vec!["warn".to_string()]);
        assert_eq!(merged.target_paths, CensorConfig::default().target_paths);
        assert_eq!(merged.decode, DecodePolicy::Lossy);
    }
}
