//! URL-safe slug derivation.
//!
//! Slugs come from the content file's stem: transliterated to ASCII,
//! lowercased, with everything non-alphanumeric collapsed into single
//! dashes. The slug is the post's primary key, so filenames are
//! expected to be unique within the content directory (the build
//! rejects collisions).

use anyhow::{Result, bail};
use deunicode::deunicode;
use std::path::Path;

/// Convert arbitrary text to a URL-safe slug.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode(text.trim());
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Derive a post slug from its source file path.
pub fn slug_from_path(path: &Path) -> Result<String> {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .unwrap_or_default();

    let slug = slugify(&stem);
    if slug.is_empty() {
        bail!("cannot derive a slug from `{}`", path.display());
    }
    Ok(slug)
}
