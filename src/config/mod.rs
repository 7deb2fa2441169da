//! Site configuration management for `plume.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                      |
//! |-------------|----------------------------------------------|
//! | `[base]`    | Site metadata (title, fallback author)       |
//! | `[build]`   | Content directory and artifact output path   |
//!
//! # Example
//!
//! ```toml
//! [base]
//! title = "My Blog"
//! author = "Alice"
//!
//! [build]
//! content = "content"
//! output = "public/posts.json"
//! ```
//!
//! The config file is optional: every field has a default, and the
//! CLI `--root`/`--content`/`--output` flags override whatever the
//! file says.

mod base;
mod build;
pub mod defaults;
mod error;

use base::BaseConfig;
use build::BuildConfig;
use error::ConfigError;

use crate::cli::Cli;
use anyhow::{Result, bail};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing plume.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    /// CLI arguments reference
    #[serde(skip)]
    pub cli: Option<&'static Cli>,

    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Basic site information
    #[serde(default)]
    pub base: BaseConfig,

    /// Build settings
    #[serde(default)]
    pub build: BuildConfig,
}

impl SiteConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).map_err(ConfigError::Toml)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Get CLI arguments reference
    pub fn get_cli(&self) -> &'static Cli {
        self.cli.unwrap()
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &'static Cli) {
        self.cli = Some(cli);

        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());

        self.set_root(&root);
        self.update_path_with_root(&root);
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Update all paths relative to root directory and normalize to absolute paths
    fn update_path_with_root(&mut self, root: &Path) {
        let cli = self.get_cli();

        // Apply CLI overrides first
        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        // Normalize root to absolute path
        let root = Self::normalize_path(root);
        self.set_root(&root);

        // Normalize config path
        self.config_path = Self::normalize_path(&root.join(&cli.config));

        // Normalize content and artifact paths
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration for the current command
    pub fn validate(&self) -> Result<()> {
        let cli = self.get_cli();

        if cli.is_build() {
            if !self.build.content.is_dir() {
                bail!(ConfigError::Validation(format!(
                    "content directory not found: `{}`",
                    self.build.content.display()
                )));
            }
        } else if !self.build.output.is_file() {
            bail!(ConfigError::Validation(format!(
                "index artifact not found: `{}` (run `plume build` first)",
                self.build.output.display()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn leaked_cli(args: &[&str]) -> &'static Cli {
        Box::leak(Box::new(Cli::try_parse_from(args).unwrap()))
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = SiteConfig::from_str("").unwrap();
        assert_eq!(config.base.author, "anonymous");
        assert_eq!(config.build.content, PathBuf::from("content"));
    }

    #[test]
    fn test_update_with_cli_overrides_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().to_path_buf();
        let cli = leaked_cli(&[
            "plume",
            "--root",
            root.to_str().unwrap(),
            "--content",
            "posts",
            "--output",
            "dist/index.json",
            "build",
        ]);

        let mut config = SiteConfig::default();
        config.update_with_cli(cli);

        assert!(config.build.content.is_absolute());
        assert!(config.build.content.ends_with("posts"));
        assert!(config.build.output.ends_with("dist/index.json"));
    }

    #[test]
    fn test_validate_build_requires_content_dir() {
        let dir = tempfile::tempdir().unwrap();
        let cli = leaked_cli(&["plume", "--root", dir.path().to_str().unwrap(), "build"]);

        let mut config = SiteConfig::default();
        config.update_with_cli(cli);

        // No content/ directory inside the temp root
        assert!(config.validate().is_err());

        std::fs::create_dir_all(dir.path().join("content")).unwrap();
        let mut config = SiteConfig::default();
        config.update_with_cli(cli);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_query_requires_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let cli = leaked_cli(&["plume", "--root", dir.path().to_str().unwrap(), "query"]);

        let mut config = SiteConfig::default();
        config.update_with_cli(cli);
        assert!(config.validate().is_err());

        let artifact = dir.path().join("public").join("posts.json");
        std::fs::create_dir_all(artifact.parent().unwrap()).unwrap();
        std::fs::write(&artifact, "[]").unwrap();

        let mut config = SiteConfig::default();
        config.update_with_cli(cli);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_normalize_path_relative() {
        let normalized = SiteConfig::normalize_path(Path::new("some/relative/path"));
        assert!(normalized.is_absolute());
    }
}
