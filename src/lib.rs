//! content-store: front-matter content store for Markdown blogs
//!
//! This crate loads authored pages and posts, parses their front matter
//! (YAML, TOML or JSON), validates it and exposes a queryable document set
//! to whatever renders the site.

pub mod commands;
pub mod config;
pub mod content;

use anyhow::Result;
use std::path::Path;

/// Configuration file looked up in the base directory
pub const CONFIG_FILE: &str = "content.yml";

/// A content directory together with its configuration
#[derive(Debug, Clone)]
pub struct ContentStore {
    /// Store configuration
    pub config: config::StoreConfig,
    /// Base directory
    pub base_dir: std::path::PathBuf,
    /// Content (source) directory
    pub content_dir: std::path::PathBuf,
}

impl ContentStore {
    /// Create a new store from a directory, reading `content.yml` if present
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let config_path = base_dir.as_ref().join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::StoreConfig::load(&config_path)?
        } else {
            config::StoreConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create a store with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::StoreConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let content_dir = base_dir.join(&config.content_dir);

        Self {
            config,
            base_dir,
            content_dir,
        }
    }

    /// Read every source file and load it.
    ///
    /// Only configuration problems fail here; per-document problems are
    /// reported in [`content::Loaded::errors`].
    pub fn load(&self) -> Result<content::Loaded> {
        let source_options = self.config.source_options()?;
        let load_options = self.config.load_options()?;

        let (sources, read_errors) = content::collect_sources(&self.content_dir, &source_options);
        tracing::debug!("Found {} sources in {:?}", sources.len(), self.content_dir);

        let mut loaded = content::load_all(&sources, &load_options);
        if !read_errors.is_empty() {
            let mut errors = read_errors;
            errors.append(&mut loaded.errors);
            loaded.errors = errors;
        }

        tracing::info!(
            "Loaded {} documents ({} rejected)",
            loaded.documents.len(),
            loaded.errors.len()
        );
        Ok(loaded)
    }
}
