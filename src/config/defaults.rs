//! Default values for config sections.

pub mod base {
    pub fn author() -> String {
        "anonymous".into()
    }
}

pub mod build {
    use std::path::PathBuf;

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn output() -> PathBuf {
        PathBuf::from("public").join("posts.json")
    }
}
