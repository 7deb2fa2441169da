//! Content-file reading: front matter, slugs and dates.

pub mod date;
pub mod frontmatter;
pub mod slug;
