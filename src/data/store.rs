//! Runtime post store.
//!
//! Loads the index artifact once and owns the frozen collection for
//! the life of the process. Two lazy caches sit on top:
//!
//! - a slug-to-position map, built behind a `OnceLock` on the first
//!   lookup and reused thereafter
//! - a body cache, filled per slug on first request from the source
//!   file and memoized in an `RwLock`ed map
//!
//! Both are write-once-or-append, read-heavy structures; neither is
//! invalidated until process restart even if the underlying storage
//! changes (the collection is static per build).

use super::types::PostMeta;
use crate::content::frontmatter::read_document;
use anyhow::{Context, Result};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, OnceLock},
};

/// Frozen post collection plus lazy lookup caches.
#[derive(Debug)]
pub struct PostStore {
    posts: Vec<PostMeta>,
    content_dir: PathBuf,
    by_slug: OnceLock<FxHashMap<String, usize>>,
    bodies: RwLock<FxHashMap<String, Arc<String>>>,
}

impl PostStore {
    /// Load the artifact from disk.
    ///
    /// `content_dir` is where post bodies are read from on demand.
    pub fn load(artifact: &Path, content_dir: &Path) -> Result<Self> {
        let raw = fs::read_to_string(artifact)
            .with_context(|| format!("failed to read index artifact `{}`", artifact.display()))?;
        let posts: Vec<PostMeta> = serde_json::from_str(&raw)
            .with_context(|| format!("malformed index artifact `{}`", artifact.display()))?;

        Ok(Self {
            posts,
            content_dir: content_dir.to_path_buf(),
            by_slug: OnceLock::new(),
            bodies: RwLock::new(FxHashMap::default()),
        })
    }

    /// The full collection in artifact order (newest first).
    pub fn posts(&self) -> &[PostMeta] {
        &self.posts
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// O(1) lookup by slug. `None` is the expected not-found condition
    /// for unknown or unpublished slugs, not an error.
    pub fn by_slug(&self, slug: &str) -> Option<&PostMeta> {
        let map = self.by_slug.get_or_init(|| {
            self.posts
                .iter()
                .enumerate()
                .map(|(position, post)| (post.slug.clone(), position))
                .collect()
        });
        map.get(slug).map(|&position| &self.posts[position])
    }

    /// Post body for `slug`, loaded lazily and memoized per process.
    ///
    /// Returns `Ok(None)` for an unknown slug. A read failure for a
    /// known slug propagates: the index names a source file that should
    /// exist in this build.
    pub fn body(&self, slug: &str) -> Result<Option<Arc<String>>> {
        let Some(post) = self.by_slug(slug) else {
            return Ok(None);
        };

        if let Some(body) = self.bodies.read().get(slug) {
            return Ok(Some(body.clone()));
        }

        let source = self.content_dir.join(&post.source);
        let document = read_document(&source)?;
        let body = Arc::new(document.body);
        self.bodies.write().insert(slug.to_owned(), body.clone());
        Ok(Some(body))
    }
}
