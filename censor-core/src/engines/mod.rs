// censor-core/src/engines/mod.rs
//! Line engine implementations.
//!
//! Each engine lives in its own file and implements the `LineEngine` trait:
//!
//! * `substring_engine`: plain containment of `console.<method>`.
//! * `call_pattern_engine`: call-shaped regex `console\.(<methods>)\s*\(`.

pub mod call_pattern_engine;
pub mod substring_engine;
