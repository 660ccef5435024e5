// censor/src/commands/mod.rs
pub mod censor;
