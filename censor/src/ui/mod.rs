// censor/src/ui/mod.rs
//! Terminal presentation: the removal summary and the diff view.

pub mod diff_viewer;
pub mod summary;
