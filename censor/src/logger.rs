// censor/src/logger.rs
//! Logger setup for the `censor` binary.
//!
//! Logs always go to stderr so they never mix with the censored payload on stdout.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

const CRATES: [&str; 2] = ["censor", "censor_core"];

/// Initializes `env_logger`, honouring `RUST_LOG` (default `warn`).
///
/// `level_override` replaces the level of this tool's crates; `Some(LevelFilter::Off)`
/// silences everything.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    builder.target(Target::Stderr).format_timestamp(None);

    match level_override {
        Some(LevelFilter::Off) => {
            builder.filter_level(LevelFilter::Off);
        }
        Some(level) => {
            for krate in CRATES {
                builder.filter_module(krate, level);
            }
        }
        None => {}
    }

    // A second init (tests, embedding) is not an error worth surfacing.
    builder.try_init().ok();
}
