//! Raw document sources and their discovery on disk

use std::fs;
use std::path::{Component, Path, PathBuf};

use regex::Regex;
use walkdir::WalkDir;

use super::{ContentError, ErrorList};

/// Unparsed text of one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawSource {
    /// Document path the source will be loaded under
    pub path: String,
    /// File the text was read from, if any
    pub origin: Option<PathBuf>,
    /// Front matter followed by the body
    pub text: String,
}

impl RawSource {
    pub fn new(path: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            origin: None,
            text: text.into(),
        }
    }

    /// Read a file under `content_dir`, deriving the document path from its location
    pub fn from_file(content_dir: &Path, file: &Path) -> std::io::Result<Self> {
        let text = fs::read_to_string(file)?;
        let relative = file.strip_prefix(content_dir).unwrap_or(file);
        Ok(Self {
            path: document_path(relative),
            origin: Some(file.to_path_buf()),
            text,
        })
    }

    /// Human-readable name for messages: the origin file, else the position
    /// in the source list
    pub fn label(&self, index: usize) -> String {
        match &self.origin {
            Some(origin) => origin.display().to_string(),
            None => format!("source #{}", index),
        }
    }
}

/// Which files count as sources
#[derive(Debug, Clone)]
pub struct SourceOptions {
    /// File extensions to load, without the dot
    pub extensions: Vec<String>,
    /// Skip files whose path relative to the content directory matches
    pub ignore: Vec<Regex>,
}

impl Default for SourceOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["md".to_string(), "markdown".to_string()],
            ignore: Vec::new(),
        }
    }
}

impl SourceOptions {
    fn accepts(&self, relative: &Path) -> bool {
        let has_extension = relative
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
            .unwrap_or(false);
        if !has_extension {
            return false;
        }

        let normalized = join_components(relative);
        !self.ignore.iter().any(|re| re.is_match(&normalized))
    }
}

/// Read every source file below `content_dir`, in file-name order.
///
/// Files that cannot be read are reported and skipped.
pub fn collect_sources(content_dir: &Path, options: &SourceOptions) -> (Vec<RawSource>, ErrorList) {
    let mut sources = Vec::new();
    let mut errors = Vec::new();

    if !content_dir.exists() {
        tracing::warn!("Content directory {:?} does not exist", content_dir);
        return (sources, errors);
    }

    for entry in WalkDir::new(content_dir)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_else(|| content_dir.display().to_string());
                errors.push(ContentError::Unreadable {
                    path,
                    message: e.to_string(),
                });
                continue;
            }
        };

        let path = entry.path();
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = path.strip_prefix(content_dir).unwrap_or(path);
        if !options.accepts(relative) {
            tracing::debug!("Ignoring {:?}", relative);
            continue;
        }

        match RawSource::from_file(content_dir, path) {
            Ok(source) => sources.push(source),
            Err(e) => {
                tracing::warn!("Failed to read {:?}: {}", path, e);
                errors.push(ContentError::Unreadable {
                    path: path.display().to_string(),
                    message: e.to_string(),
                });
            }
        }
    }

    (sources, errors)
}

/// Document path for a file location relative to the content directory.
///
/// The extension is dropped and `index` / `_index` files stand for their
/// directory: `posts/hello/index.md` becomes `posts/hello`. An index file at
/// the top level keeps the name `index`.
pub fn document_path(relative: &Path) -> String {
    let without_ext = relative.with_extension("");
    let mut parts: Vec<String> = without_ext
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.len() > 1 && matches!(parts.last().map(String::as_str), Some("index" | "_index")) {
        parts.pop();
    } else if parts.len() == 1 && parts[0] == "_index" {
        parts[0] = "index".to_string();
    }

    parts.join("/")
}

fn join_components(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}
