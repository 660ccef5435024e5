// censor/src/ui/diff_viewer.rs
//! Unified diff of a payload before and after censoring.

use anyhow::Result;
use diffy::{create_patch, PatchFormatter};
use std::io::Write;

/// Writes a unified diff of `original` against `censored`.
///
/// Non UTF-8 bytes are shown as U+FFFD; the diff is for people, not for `patch`.
pub fn print_diff<W: Write>(
    original: &[u8],
    censored: &[u8],
    writer: &mut W,
    supports_color: bool,
) -> Result<()> {
    let original = String::from_utf8_lossy(original);
    let censored = String::from_utf8_lossy(censored);
    let patch = create_patch(&original, &censored);

    if patch.hunks().is_empty() {
        writeln!(writer, "No changes.")?;
        return Ok(());
    }

    let formatter = if supports_color {
        PatchFormatter::new().with_color()
    } else {
        PatchFormatter::new()
    };
    write!(writer, "{}", formatter.fmt_patch(&patch))?;
    Ok(())
}
