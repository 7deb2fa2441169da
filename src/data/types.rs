//! Post metadata types serialized into the index artifact.
//!
//! The artifact is a single JSON array of [`PostMeta`] records, sorted
//! by `createdAt` descending, with `related` precomputed at build time.
//! Field names are camelCase on the wire.

use crate::{
    config::SiteConfig,
    content::{date::parse_epoch_ms, frontmatter::FrontMatter},
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Maximum number of related posts stored per post.
pub const RELATED_LIMIT: usize = 3;

/// Denormalized author identity (no foreign key at this layer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAuthor {
    pub name: String,

    /// Avatar reference (URL or site-relative path)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Lightweight, precomputed descriptor for one blog post.
///
/// One entry per post in the artifact; the body content is *not* here,
/// it is loaded lazily through [`crate::data::store::PostStore`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PostMeta {
    /// Unique, URL-safe identifier derived from the source filename.
    pub slug: String,

    /// Display title; target of alphabetical sort and fuzzy search.
    pub title: String,

    pub author: PostAuthor,

    /// Publication time in epoch milliseconds.
    pub created_at: i64,

    /// Free-text tags; drive relatedness.
    #[serde(default)]
    pub hashtags: Vec<String>,

    /// Cover image reference (display only, not used in ranking)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,

    /// Short description (display only, not used in ranking)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Up to [`RELATED_LIMIT`] other posts' slugs, frozen at build time.
    #[serde(default)]
    pub related: Vec<String>,

    /// Source file path relative to the content directory, for lazy
    /// body loading at request time.
    pub source: String,
}

impl PostMeta {
    /// Build a `PostMeta` from a parsed front matter header.
    ///
    /// `related` starts empty and is filled in by the resolver. Author
    /// identity falls back to the `[base]` config section when the
    /// front matter does not carry its own.
    pub fn from_matter(
        slug: String,
        source: String,
        matter: FrontMatter,
        config: &SiteConfig,
    ) -> Result<Self> {
        let created_at = parse_epoch_ms(&matter.date)
            .with_context(|| format!("post `{slug}`: invalid `date`"))?;

        let author = PostAuthor {
            name: matter.author.unwrap_or_else(|| config.base.author.clone()),
            avatar: matter.avatar.or_else(|| config.base.avatar.clone()),
        };

        Ok(Self {
            slug,
            title: matter.title,
            author,
            created_at,
            hashtags: matter.tags,
            img: matter.img,
            description: matter.description,
            related: Vec::new(),
            source,
        })
    }
}

/// Tag index: tag name to positions in the post collection.
///
/// Bucket order preserves discovery order of the posts; the map itself
/// iterates tags alphabetically.
pub type TagIndex = BTreeMap<String, Vec<usize>>;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_matter() -> FrontMatter {
        FrontMatter {
            title: "Hello".into(),
            author: Some("Alice".into()),
            avatar: None,
            date: "2024-01-15".into(),
            tags: vec!["rust".into()],
            img: Some("/img/hello.png".into()),
            description: Some("greeting".into()),
            draft: false,
        }
    }

    #[test]
    fn test_from_matter_basic() {
        let config = SiteConfig::default();
        let meta = PostMeta::from_matter(
            "hello".into(),
            "hello.md".into(),
            sample_matter(),
            &config,
        )
        .unwrap();

        assert_eq!(meta.slug, "hello");
        assert_eq!(meta.title, "Hello");
        assert_eq!(meta.author.name, "Alice");
        assert_eq!(meta.created_at, 1_705_276_800_000);
        assert_eq!(meta.hashtags, vec!["rust"]);
        assert!(meta.related.is_empty());
    }

    #[test]
    fn test_from_matter_author_fallback() {
        let mut config = SiteConfig::default();
        config.base.author = "Site Owner".into();
        config.base.avatar = Some("/img/owner.png".into());

        let mut matter = sample_matter();
        matter.author = None;
        matter.avatar = None;

        let meta =
            PostMeta::from_matter("hello".into(), "hello.md".into(), matter, &config).unwrap();
        assert_eq!(meta.author.name, "Site Owner");
        assert_eq!(meta.author.avatar.as_deref(), Some("/img/owner.png"));
    }

    #[test]
    fn test_from_matter_invalid_date() {
        let config = SiteConfig::default();
        let mut matter = sample_matter();
        matter.date = "last tuesday".into();

        let err = PostMeta::from_matter("hello".into(), "hello.md".into(), matter, &config)
            .unwrap_err();
        assert!(err.to_string().contains("hello"));
    }

    #[test]
    fn test_post_meta_json_shape() {
        let config = SiteConfig::default();
        let meta = PostMeta::from_matter(
            "hello".into(),
            "hello.md".into(),
            sample_matter(),
            &config,
        )
        .unwrap();

        let json = serde_json::to_value(&meta).unwrap();
        assert_eq!(json["slug"], "hello");
        assert_eq!(json["createdAt"], 1_705_276_800_000_i64);
        assert_eq!(json["author"]["name"], "Alice");
    }

    #[test]
    fn test_post_meta_json_omits_absent_optionals() {
        let config = SiteConfig::default();
        let mut matter = sample_matter();
        matter.img = None;
        matter.description = None;

        let meta =
            PostMeta::from_matter("hello".into(), "hello.md".into(), matter, &config).unwrap();
        let json = serde_json::to_value(&meta).unwrap();
        assert!(json.get("img").is_none());
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_post_meta_json_roundtrip() {
        let config = SiteConfig::default();
        let meta = PostMeta::from_matter(
            "hello".into(),
            "hello.md".into(),
            sample_matter(),
            &config,
        )
        .unwrap();

        let json = serde_json::to_string(&meta).unwrap();
        let back: PostMeta = serde_json::from_str(&json).unwrap();
        assert_eq!(back.slug, meta.slug);
        assert_eq!(back.created_at, meta.created_at);
        assert_eq!(back.hashtags, meta.hashtags);
        assert_eq!(back.source, meta.source);
    }
}
