//! Tag index and related-post resolution.
//!
//! Runs once per build over the full post collection:
//!
//! ```text
//! build_tag_index()            tag -> [post positions, discovery order]
//!         │
//! resolve_related()            per post: union tag buckets, drop self,
//!         │                    sort by recency, truncate to 3 slugs
//! sort_by_recency()            global createdAt-descending order
//! ```
//!
//! Recency ties are broken by slug ascending so repeated builds over
//! unchanged input produce byte-identical artifacts.

use super::types::{PostMeta, RELATED_LIMIT, TagIndex};
use rustc_hash::FxHashSet;

/// Group posts by tag, preserving discovery order within each bucket.
pub fn build_tag_index(posts: &[PostMeta]) -> TagIndex {
    let mut index = TagIndex::new();
    for (position, post) in posts.iter().enumerate() {
        for tag in &post.hashtags {
            index.entry(tag.clone()).or_default().push(position);
        }
    }
    index
}

/// Fill in each post's `related` list from the tag index.
pub fn resolve_related(posts: &mut [PostMeta], index: &TagIndex) {
    let related: Vec<Vec<String>> = posts
        .iter()
        .enumerate()
        .map(|(position, post)| {
            let mut seen = FxHashSet::default();
            let mut candidates: Vec<usize> = Vec::new();

            for tag in &post.hashtags {
                if let Some(bucket) = index.get(tag) {
                    for &other in bucket {
                        if other != position && seen.insert(other) {
                            candidates.push(other);
                        }
                    }
                }
            }

            candidates.sort_by(|&a, &b| compare_by_recency(&posts[a], &posts[b]));
            candidates
                .into_iter()
                .take(RELATED_LIMIT)
                .map(|other| posts[other].slug.clone())
                .collect()
        })
        .collect();

    for (post, slugs) in posts.iter_mut().zip(related) {
        post.related = slugs;
    }
}

/// Sort the whole collection newest-first for the artifact.
pub fn sort_by_recency(posts: &mut [PostMeta]) {
    posts.sort_by(|a, b| compare_by_recency(a, b));
}

/// Newest first; equal timestamps order by slug ascending.
fn compare_by_recency(a: &PostMeta, b: &PostMeta) -> std::cmp::Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| a.slug.cmp(&b.slug))
}
