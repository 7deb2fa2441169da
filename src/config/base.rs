//! `[base]` section configuration.
//!
//! Site identity used as the fallback author for posts whose front
//! matter carries no author of its own.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[base]` section in plume.toml - site metadata.
///
/// # Example
/// ```toml
/// [base]
/// title = "My Blog"
/// author = "Alice"
/// avatar = "/images/alice.png"
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BaseConfig {
    /// Site title.
    #[serde(default)]
    pub title: String,

    /// Fallback author name for posts without one in front matter.
    #[serde(default = "defaults::base::author")]
    #[educe(Default = defaults::base::author())]
    pub author: String,

    /// Fallback author avatar reference (URL or site-relative path).
    #[serde(default)]
    pub avatar: Option<String>,
}
