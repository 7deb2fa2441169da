//! Front matter parsing.
//!
//! Posts are Markdown files opening with a `+++`-delimited TOML header:
//!
//! ```text
//! +++
//! title = "Hello World"
//! date = "2024-01-15"
//! tags = ["rust", "blog"]
//! +++
//!
//! Body text starts here.
//! ```
//!
//! The header and body are returned separately. A missing or malformed
//! header is an error for the caller: the index build aborts on the
//! first bad file instead of silently skipping it, since a missing post
//! is worse than a failed build in a small personal corpus.

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{fs, path::Path};

/// Delimiter line opening and closing the front matter header.
pub const FRONT_MATTER_DELIMITER: &str = "+++";

/// Typed front matter header of a post.
///
/// `title` and `date` are mandatory; everything else falls back to
/// site-level defaults or stays empty.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrontMatter {
    /// Display title, also the target of fuzzy search.
    pub title: String,

    /// Author display name. Falls back to `[base].author` when absent.
    #[serde(default)]
    pub author: Option<String>,

    /// Author avatar reference. Falls back to `[base].avatar` when absent.
    #[serde(default)]
    pub avatar: Option<String>,

    /// Publication date, `YYYY-MM-DD` or RFC 3339.
    pub date: String,

    /// Free-text tags driving related-post resolution.
    #[serde(default)]
    pub tags: Vec<String>,

    /// Cover image reference (display only).
    #[serde(default)]
    pub img: Option<String>,

    /// Short description (display only).
    #[serde(default)]
    pub description: Option<String>,

    /// Drafts are excluded from the index entirely.
    #[serde(default)]
    pub draft: bool,
}

/// A content file split into its parsed header and raw body.
#[derive(Debug, Clone)]
pub struct Document {
    pub matter: FrontMatter,
    pub body: String,
}

/// Read and parse a content file from disk.
pub fn read_document(path: &Path) -> Result<Document> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read `{}`", path.display()))?;
    parse_document(&raw).with_context(|| format!("invalid front matter in `{}`", path.display()))
}

/// Split raw content into front matter and body.
///
/// The first line must be the opening delimiter; header lines run until
/// the closing delimiter line; everything after is the body, verbatim.
pub fn parse_document(raw: &str) -> Result<Document> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);
    let mut lines = raw.lines();

    if lines.next().map(str::trim_end) != Some(FRONT_MATTER_DELIMITER) {
        bail!("missing opening `{FRONT_MATTER_DELIMITER}` delimiter on the first line");
    }

    let mut header = String::new();
    let mut closed = false;
    for line in &mut lines {
        if line.trim_end() == FRONT_MATTER_DELIMITER {
            closed = true;
            break;
        }
        header.push_str(line);
        header.push('\n');
    }
    if !closed {
        bail!("unterminated front matter: missing closing `{FRONT_MATTER_DELIMITER}`");
    }

    let matter: FrontMatter = toml::from_str(&header).context("malformed header")?;
    if matter.title.trim().is_empty() {
        bail!("front matter `title` must not be empty");
    }

    let body = lines.collect::<Vec<_>>().join("\n");
    Ok(Document { matter, body })
}
