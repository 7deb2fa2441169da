//! `[build]` section configuration.
//!
//! Paths for the index build: where content lives and where the
//! artifact is written.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in plume.toml - build paths.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"
/// output = "public/posts.json"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory (set from CLI, never from the config file)
    #[serde(skip)]
    pub root: Option<PathBuf>,

    /// Content directory holding the Markdown posts.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Output path of the JSON index artifact.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,
}
