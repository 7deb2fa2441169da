//! Runtime query engine over the frozen post collection.
//!
//! Three composable operations, always applied in the same order:
//!
//! ```text
//! search(keyword)  ──►  sort(by)  ──►  paginate(page, limit)
//! ```
//!
//! The chain is recomputed on every call against the shared, immutable
//! collection; nothing is cached and nothing is mutated. That holds up
//! because the collection is small and static per process lifetime.

use crate::data::types::PostMeta;
use clap::ValueEnum;
use fuzzy_matcher::{FuzzyMatcher, skim::SkimMatcherV2};
use serde::Serialize;

/// Sort order for query results.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Ascending, case-folded lexicographic order on `title`
    Title,
    /// Descending order on `createdAt` (newest first)
    #[default]
    Date,
}

/// One query: search keyword, sort order, page selection.
#[derive(Debug, Clone)]
pub struct QueryParams {
    pub keyword: String,
    pub sort: SortBy,
    /// 1-based page number; values below 1 are clamped up.
    pub page: usize,
    /// Posts per page; values below 1 are clamped up.
    pub limit: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            keyword: String::new(),
            sort: SortBy::default(),
            page: 1,
            limit: 10,
        }
    }
}

/// One page of query results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPage {
    pub posts: Vec<PostMeta>,
    pub current_page: usize,
    /// `ceil(matching / limit)`; an out-of-range request still reports
    /// the real count alongside its empty slice.
    pub page_count: usize,
}

/// Answer one query: search, then sort, then paginate.
pub fn run_query(posts: &[PostMeta], params: &QueryParams) -> QueryPage {
    let filtered = search(posts, &params.keyword);
    let sorted = sort(filtered, params.sort);
    paginate(&sorted, params.page, params.limit)
}

/// Fuzzy-filter posts by title.
///
/// An empty keyword matches everything, preserving input order.
/// Matches are ranked by similarity score, most relevant first; equal
/// scores keep input order (stable sort). No matches is an empty list,
/// not an error.
fn search<'a>(posts: &'a [PostMeta], keyword: &str) -> Vec<&'a PostMeta> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        return posts.iter().collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut scored: Vec<(i64, &PostMeta)> = posts
        .iter()
        .filter_map(|post| {
            matcher
                .fuzzy_match(&post.title, keyword)
                .map(|score| (score, post))
        })
        .collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0));
    scored.into_iter().map(|(_, post)| post).collect()
}

/// Order the (possibly filtered) result; the shared collection itself
/// is never reordered.
fn sort(mut posts: Vec<&PostMeta>, by: SortBy) -> Vec<&PostMeta> {
    match by {
        SortBy::Title => posts.sort_by(|a, b| title_key(&a.title).cmp(&title_key(&b.title))),
        SortBy::Date => posts.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
    posts
}

/// Case-folded comparison key, a locale-tolerant approximation of
/// lexicographic title order.
fn title_key(title: &str) -> String {
    title.to_lowercase()
}

/// Extract the 1-based page slice `[(page-1)*limit, page*limit)`.
///
/// Out-of-range pages return an empty slice with the page count intact.
fn paginate(posts: &[&PostMeta], page: usize, limit: usize) -> QueryPage {
    let limit = limit.max(1);
    let page = page.max(1);
    let page_count = posts.len().div_ceil(limit);

    let start = (page - 1).saturating_mul(limit);
    let slice = posts
        .iter()
        .skip(start)
        .take(limit)
        .map(|post| (*post).clone())
        .collect();

    QueryPage {
        posts: slice,
        current_page: page,
        page_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::types::PostAuthor;

    fn post(slug: &str, title: &str, created_at: i64) -> PostMeta {
        PostMeta {
            slug: slug.into(),
            title: title.into(),
            author: PostAuthor {
                name: "tester".into(),
                avatar: None,
            },
            created_at,
            hashtags: Vec::new(),
            img: None,
            description: None,
            related: Vec::new(),
            source: format!("{slug}.md"),
        }
    }

    fn sample_posts() -> Vec<PostMeta> {
        vec![
            post("rust-intro", "Getting Started with Rust", 300),
            post("async", "Async Rust in Practice", 200),
            post("gardening", "A Gardening Diary", 100),
        ]
    }

    fn params(keyword: &str, sort: SortBy, page: usize, limit: usize) -> QueryParams {
        QueryParams {
            keyword: keyword.into(),
            sort,
            page,
            limit,
        }
    }

    #[test]
    fn test_empty_keyword_returns_all_in_input_order_before_sort() {
        let posts = sample_posts();
        let found = search(&posts, "");
        let slugs: Vec<_> = found.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["rust-intro", "async", "gardening"]);
    }

    #[test]
    fn test_whitespace_keyword_matches_everything() {
        let posts = sample_posts();
        assert_eq!(search(&posts, "   ").len(), 3);
    }

    #[test]
    fn test_search_filters_by_title() {
        let posts = sample_posts();
        let found = search(&posts, "rust");
        assert_eq!(found.len(), 2);
        for p in &found {
            assert!(p.title.to_lowercase().contains("rust"));
        }
    }

    #[test]
    fn test_search_tolerates_partial_input() {
        let posts = sample_posts();
        let found = search(&posts, "gardn");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].slug, "gardening");
    }

    #[test]
    fn test_search_no_matches_is_empty_not_error() {
        let posts = sample_posts();
        assert!(search(&posts, "quantum chromodynamics").is_empty());
    }

    #[test]
    fn test_sort_title_ascending_case_insensitive() {
        let posts = vec![
            post("b", "banana", 1),
            post("a", "Apple", 2),
            post("c", "cherry", 3),
        ];
        let sorted = sort(posts.iter().collect(), SortBy::Title);
        let titles: Vec<_> = sorted.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Apple", "banana", "cherry"]);
    }

    #[test]
    fn test_sort_date_descending() {
        let posts = sample_posts();
        let sorted = sort(posts.iter().rev().collect(), SortBy::Date);
        let stamps: Vec<_> = sorted.iter().map(|p| p.created_at).collect();
        assert_eq!(stamps, [300, 200, 100]);
    }

    #[test]
    fn test_sort_never_mutates_input_collection() {
        let posts = sample_posts();
        let _ = run_query(&posts, &params("", SortBy::Title, 1, 10));
        let slugs: Vec<_> = posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, ["rust-intro", "async", "gardening"]);
    }

    #[test]
    fn test_paginate_fifteen_posts_page_two() {
        let posts: Vec<_> = (0..15)
            .map(|i| post(&format!("p{i:02}"), &format!("Post {i:02}"), 1000 - i))
            .collect();
        let page = run_query(&posts, &params("", SortBy::Date, 2, 10));

        assert_eq!(page.posts.len(), 5);
        assert_eq!(page.page_count, 2);
        assert_eq!(page.current_page, 2);
        assert_eq!(page.posts[0].slug, "p10");
        assert_eq!(page.posts[4].slug, "p14");
    }

    #[test]
    fn test_paginate_out_of_range_page_is_empty_with_count() {
        let posts = sample_posts();
        let page = run_query(&posts, &params("", SortBy::Date, 7, 10));

        assert!(page.posts.is_empty());
        assert_eq!(page.page_count, 1);
        assert_eq!(page.current_page, 7);
    }

    #[test]
    fn test_paginate_exact_multiple() {
        let posts: Vec<_> = (0..20)
            .map(|i| post(&format!("p{i:02}"), &format!("Post {i:02}"), 1000 - i))
            .collect();
        let page = run_query(&posts, &params("", SortBy::Date, 2, 10));

        assert_eq!(page.posts.len(), 10);
        assert_eq!(page.page_count, 2);
    }

    #[test]
    fn test_paginate_clamps_zero_page_and_limit() {
        let posts = sample_posts();
        let page = run_query(&posts, &params("", SortBy::Date, 0, 0));

        assert_eq!(page.current_page, 1);
        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.page_count, 3);
    }

    #[test]
    fn test_page_count_on_filtered_results() {
        let posts = sample_posts();
        // Two titles match "rust", one per page
        let page = run_query(&posts, &params("rust", SortBy::Date, 1, 1));

        assert_eq!(page.page_count, 2);
        assert_eq!(page.posts.len(), 1);
    }

    #[test]
    fn test_query_on_empty_collection() {
        let page = run_query(&[], &QueryParams::default());
        assert!(page.posts.is_empty());
        assert_eq!(page.page_count, 0);
    }

    #[test]
    fn test_search_then_sort_composition() {
        // Search narrows to the two Rust posts, title sort orders them
        let posts = sample_posts();
        let page = run_query(&posts, &params("rust", SortBy::Title, 1, 10));

        let titles: Vec<_> = page.posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["Async Rust in Practice", "Getting Started with Rust"]);
    }

    #[test]
    fn test_query_page_serializes_camel_case() {
        let page = run_query(&sample_posts(), &QueryParams::default());
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("currentPage").is_some());
        assert!(json.get("pageCount").is_some());
    }
}
