// censor/src/lib.rs
//! # Censor CLI Application
//!
//! Stream-mode front end for `censor-core`: reads a payload from stdin or a
//! file, drops console logging lines, and writes the result to stdout or a file.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

pub use commands::censor::{run_censor, CensorOptions};
