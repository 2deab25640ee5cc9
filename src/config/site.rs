//! Store configuration (content.yml)

use anyhow::{Context, Result};
use chrono_tz::Tz;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::content::{DisplayDefaults, LoadOptions, SourceOptions};

/// Main store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    // Directory
    pub content_dir: String,
    pub extensions: Vec<String>,
    /// Regexes matched against paths relative to the content directory
    pub ignore_files: Vec<String>,

    // Dates
    /// IANA name used for dates written without an offset
    pub timezone: String,
    /// List documents dated in the future
    pub future: bool,

    // Listing
    pub summary_length: usize,
    pub display: DisplayDefaults,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            content_dir: "content".to_string(),
            extensions: vec!["md".to_string(), "markdown".to_string()],
            ignore_files: Vec::new(),

            timezone: "UTC".to_string(),
            future: true,

            summary_length: 70,
            display: DisplayDefaults::default(),

            extra: HashMap::new(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: StoreConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        Ok(config)
    }

    /// Parsed `timezone`
    pub fn tz(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("Invalid timezone {:?}: {}", self.timezone, e))
    }

    pub fn load_options(&self) -> Result<LoadOptions> {
        Ok(LoadOptions {
            timezone: self.tz()?,
        })
    }

    pub fn source_options(&self) -> Result<SourceOptions> {
        let ignore = self
            .ignore_files
            .iter()
            .map(|pattern| {
                Regex::new(pattern).with_context(|| format!("Invalid ignore_files pattern {:?}", pattern))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SourceOptions {
            extensions: self.extensions.clone(),
            ignore,
        })
    }
}
