//! Plume - a blog post metadata indexer.
//!
//! `build` turns a directory of Markdown posts with TOML front matter
//! into a single JSON index artifact with precomputed related posts;
//! `query` and `show` answer search/sort/paginate and slug lookups
//! against that artifact.

mod build;
mod cli;
mod config;
mod content;
mod data;
mod logger;
mod query;

use anyhow::Result;
use build::build_index;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use content::date::format_ymd;
use data::store::PostStore;
use query::{QueryPage, QueryParams, run_query};
use std::path::Path;

fn main() -> Result<()> {
    let cli: &'static Cli = Box::leak(Box::new(Cli::parse()));
    let config: &'static SiteConfig = Box::leak(Box::new(load_config(cli)?));

    match &cli.command {
        Commands::Build => build_index(config),
        Commands::Query {
            keyword,
            sort,
            page,
            limit,
        } => query_posts(
            config,
            &QueryParams {
                keyword: keyword.clone().unwrap_or_default(),
                sort: *sort,
                page: *page,
                limit: *limit,
            },
        ),
        Commands::Show { slug } => show_post(config, slug),
    }
}

/// Load and validate configuration from CLI arguments.
///
/// A missing config file is fine: defaults apply and CLI flags
/// override them.
fn load_config(cli: &'static Cli) -> Result<SiteConfig> {
    let root = cli.root.as_deref().unwrap_or(Path::new("./"));
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);
    config.validate()?;

    Ok(config)
}

/// Answer one search/sort/paginate query against the built index.
fn query_posts(config: &SiteConfig, params: &QueryParams) -> Result<()> {
    let store = PostStore::load(&config.build.output, &config.build.content)?;
    let page = run_query(store.posts(), params);
    print_page(&page);
    Ok(())
}

fn print_page(page: &QueryPage) {
    log!(
        "query";
        "page {}/{} - {} post(s)",
        page.current_page,
        page.page_count,
        page.posts.len()
    );
    for post in &page.posts {
        println!(
            "{}  {:<48}  {}",
            format_ymd(post.created_at),
            post.title,
            post.slug
        );
    }
}

/// Print one post's metadata and lazily loaded body.
///
/// An unknown slug is an expected not-found condition, reported as a
/// message rather than a propagated error.
fn show_post(config: &SiteConfig, slug: &str) -> Result<()> {
    let store = PostStore::load(&config.build.output, &config.build.content)?;

    let Some(post) = store.by_slug(slug) else {
        log!("show"; "no post found for slug `{slug}`");
        return Ok(());
    };

    log!("show"; "{} ({})", post.title, format_ymd(post.created_at));
    println!("author:  {}", post.author.name);
    if !post.hashtags.is_empty() {
        println!("tags:    {}", post.hashtags.join(", "));
    }
    if !post.related.is_empty() {
        println!("related: {}", post.related.join(", "));
    }
    if let Some(description) = &post.description {
        println!("about:   {description}");
    }

    if let Some(body) = store.body(slug)? {
        println!("\n{}", body.trim());
    }

    Ok(())
}
