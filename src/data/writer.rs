//! Index artifact writing.
//!
//! The artifact is published atomically: serialized into a temp file in
//! the destination directory, then renamed over the previous artifact.
//! Readers only ever see a fully written index, never a partial one.
//! Any failure aborts the build; there is no partial-success state.

use super::types::PostMeta;
use anyhow::{Context, Result};
use std::{fs, io::Write, path::Path};
use tempfile::NamedTempFile;

/// Serialize the sorted post collection to `dest`.
///
/// Output is pretty-printed JSON with a trailing newline and is
/// byte-deterministic for unchanged input.
pub fn write_index(posts: &[PostMeta], dest: &Path) -> Result<()> {
    let dir = match dest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory `{}`", dir.display()))?;

    // Temp file must live in the destination directory so the final
    // rename stays on one filesystem.
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("failed to create temp file in `{}`", dir.display()))?;
    serde_json::to_writer_pretty(&mut tmp, posts).context("failed to serialize post index")?;
    tmp.write_all(b"\n").context("failed to write post index")?;
    tmp.persist(dest)
        .with_context(|| format!("failed to publish index to `{}`", dest.display()))?;

    Ok(())
}
