//! Command-line interface definitions.
//!
//! Defines all CLI arguments and subcommands using clap.

use crate::query::SortBy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Plume blog metadata indexer CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Project root directory
    #[arg(short, long)]
    pub root: Option<PathBuf>,

    /// Content directory path (relative to project root)
    #[arg(short, long)]
    pub content: Option<PathBuf>,

    /// Output artifact path (relative to project root)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Config file name (default: plume.toml)
    #[arg(short = 'C', long, default_value = "plume.toml")]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Scan the content directory and write the post index artifact
    Build,

    /// Search, sort and paginate posts from the built index
    Query {
        /// Keyword for fuzzy title search (omit to match everything)
        keyword: Option<String>,

        /// Sort order applied after search filtering
        #[arg(short, long, value_enum, default_value = "date")]
        sort: SortBy,

        /// 1-based page number
        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// Number of posts per page
        #[arg(short, long, default_value_t = 10)]
        limit: usize,
    },

    /// Look up a single post by slug and print its metadata and body
    Show {
        /// URL-safe post identifier (derived from the source filename)
        slug: String,
    },
}

#[allow(unused)]
impl Cli {
    pub const fn is_build(&self) -> bool {
        matches!(self.command, Commands::Build)
    }
    pub const fn is_query(&self) -> bool {
        matches!(self.command, Commands::Query { .. })
    }
    pub const fn is_show(&self) -> bool {
        matches!(self.command, Commands::Show { .. })
    }
}
