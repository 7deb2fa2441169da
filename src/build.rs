//! Index build pipeline.
//!
//! One-shot, single-threaded batch run, invoked out-of-band from any
//! request serving:
//!
//! ```text
//! build_index()
//!     │
//!     ├── collect_content_files()   walk content dir, deterministic order
//!     ├── read_document()           front matter + body per file (fatal on error)
//!     ├── build_tag_index()         tag -> posts
//!     ├── resolve_related()         freeze each post's related list
//!     ├── sort_by_recency()         global createdAt-descending order
//!     └── write_index()             atomic artifact publish
//! ```
//!
//! Every failure aborts the whole build: a half-correct static dataset
//! silently served to readers is worse than a build that visibly fails.

use crate::{
    config::SiteConfig,
    content::{frontmatter::read_document, slug::slug_from_path},
    data::{
        relate::{build_tag_index, resolve_related, sort_by_recency},
        types::PostMeta,
        writer::write_index,
    },
    log,
};
use anyhow::{Context, Result, bail};
use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Build the post index artifact from the content directory.
pub fn build_index(config: &SiteConfig) -> Result<()> {
    let content = &config.build.content;
    let output = &config.build.output;

    let files = collect_content_files(content)?;
    log!("build"; "scanning {} content file(s) in `{}`", files.len(), content.display());

    let mut posts = Vec::with_capacity(files.len());
    let mut seen_slugs = FxHashSet::default();
    let mut drafts = 0usize;

    for path in &files {
        let document = read_document(path)?;
        if document.matter.draft {
            drafts += 1;
            continue;
        }

        let slug = slug_from_path(path)?;
        if !seen_slugs.insert(slug.clone()) {
            bail!(
                "duplicate slug `{slug}` (from `{}`); content filenames must be unique",
                path.display()
            );
        }

        let source = path
            .strip_prefix(content)
            .with_context(|| format!("`{}` is not in the content directory", path.display()))?
            .to_str()
            .context("invalid path encoding")?
            .replace('\\', "/");

        posts.push(PostMeta::from_matter(slug, source, document.matter, config)?);
    }

    let index = build_tag_index(&posts);
    resolve_related(&mut posts, &index);
    sort_by_recency(&mut posts);

    write_index(&posts, output)?;

    if drafts > 0 {
        log!("build"; "skipped {drafts} draft(s)");
    }
    log!("build"; "indexed {} post(s) -> `{}`", posts.len(), output.display());
    Ok(())
}

/// Collect all Markdown files under `dir` in a deterministic order.
///
/// Walk errors propagate: an unreadable content tree is a failed build,
/// not a smaller index.
fn collect_content_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("failed to walk `{}`", dir.display()))?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == "md")
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
