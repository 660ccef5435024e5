// censor-core/src/lib.rs
//! # Censor Core Library
//!
//! `censor-core` strips lines containing `console.log(...)` or `console.error(...)`
//! calls from a source payload. It is pure and stateless: bytes in, bytes out,
//! with no I/O and no knowledge of how payloads are obtained or persisted.
//!
//! ## Modules
//!
//! * `config`: `CensorConfig` (target paths, match policy, methods, decode policy) and its YAML loaders.
//! * `engine`: the `LineEngine` trait that decides whether a line is a console logging line.
//! * `engines`: the `substring` and `call_pattern` implementations of `LineEngine`.
//! * `scope`: `Scope` and the `TargetMatcher` used by path-gated runs.
//! * `censor`: the censor operation itself and its `CensorReport`.
//! * `blob`: the callback adapter for history-rewriting drivers.
//! * `errors`: the `CensorError` type.
//!
//! ## Usage Example
//!
//! ```rust
//! use censor_core::{censor, Scope};
//!
//! let input = b"a\nconsole.log(\"x\")\nb";
//! assert_eq!(censor(input, None, Scope::Always), b"a\nb");
//!
//! let route = b"const id = 1;\nconsole.log(id)";
//! let out = censor(route, Some("app/api/v1/tokens/[tokenId]/route.ts"), Scope::PathGated);
//! assert_eq!(out, b"const id = 1;");
//! assert_eq!(censor(route, Some("other/file.ts"), Scope::PathGated), route);
//! ```
//!
//! ## Matching policy
//!
//! The default policy is `call_pattern`: a line is dropped when it matches
//! `console\.(log|error)\s*\(`. Lines that only mention the text, such as
//! `// console.log disabled` or `console.logger(..)`, are kept. The
//! `substring` policy drops any line containing `console.log` or
//! `console.error`.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod blob;
pub mod censor;
pub mod config;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod scope;

pub use blob::{Blob, BlobCallback};
pub use censor::{censor, Censor, CensorReport, RemovedLine};
pub use config::{
    merge_config, CensorConfig, DecodePolicy, MatchPolicy, UserConfig, MAX_PATTERN_LENGTH,
    TARGET_PATH, TARGET_PATH_ESCAPED,
};
pub use engine::{build_engine, LineEngine};
pub use engines::call_pattern_engine::CallPatternEngine;
pub use engines::substring_engine::SubstringEngine;
pub use errors::CensorError;
pub use scope::{normalize_path, Scope, TargetMatcher};
