// censor-core/src/blob.rs
//! Callback-mode adapter for history-rewriting drivers.
//!
//! A driver walks every stored blob in a repository's history and hands each
//! one to a [`BlobCallback`]. The driver owns iteration, commit rewriting and
//! persistence; the callback only rewrites `data` in place.

use anyhow::Result;
use log::info;

use crate::censor::Censor;
use crate::scope::Scope;

/// A stored content blob as seen by a rewrite driver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blob {
    /// Original path of the blob, as raw bytes. Never modified.
    pub path: Vec<u8>,
    /// Blob content.
    pub data: Vec<u8>,
}

impl Blob {
    pub fn new(path: impl Into<Vec<u8>>, data: impl Into<Vec<u8>>) -> Self {
        Self { path: path.into(), data: data.into() }
    }

    /// Lossily decoded path.
    pub fn path_lossy(&self) -> String {
        String::from_utf8_lossy(&self.path).into_owned()
    }
}

/// Invoked by a rewrite driver once per blob.
pub trait BlobCallback {
    /// Possibly rewrites `blob.data`. Returns true when the bytes changed.
    fn on_blob(&self, blob: &mut Blob) -> Result<bool>;
}

impl BlobCallback for Censor {
    fn on_blob(&self, blob: &mut Blob) -> Result<bool> {
        let path = blob.path_lossy();
        if !self.in_scope(Some(&path), Scope::PathGated) {
            return Ok(false);
        }

        let report = self.apply(&blob.data, Some(&path), Scope::PathGated)?;
        if report.changed() {
            info!("Removed {} console line(s) from blob at {}.", report.removed.len(), path);
        }

        let replaced = report.output != blob.data;
        blob.data = report.output;
        Ok(replaced)
    }
}
