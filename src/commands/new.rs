//! Create a new document

use anyhow::Result;
use chrono::Utc;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::content::ContentDocument;
use crate::ContentStore;

/// Write a scaffold document and return the file it was written to.
///
/// Without an explicit `path` the document goes to `posts/<slug>`.
pub fn create_document(
    store: &ContentStore,
    title: &str,
    path: Option<&str>,
    draft: bool,
) -> Result<PathBuf> {
    let doc_path = match path {
        Some(p) => p.trim_matches('/').to_string(),
        None => format!("posts/{}", slug::slugify(title)),
    };
    if doc_path.is_empty() {
        anyhow::bail!("Cannot derive a path from title: {:?}", title);
    }
    if !Path::new(&doc_path)
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        anyhow::bail!("Invalid document path: {:?}", doc_path);
    }

    let tz = store.config.tz()?;
    let now = Utc::now().with_timezone(&tz).fixed_offset();

    let mut doc = ContentDocument::new(doc_path.clone(), title, now);
    doc.draft = draft;

    let file_path = store.content_dir.join(format!("{}.md", doc_path));
    let bundle_path = store.content_dir.join(&doc_path).join("index.md");

    // Check if the document already exists in either layout
    for existing in [&file_path, &bundle_path] {
        if existing.exists() {
            anyhow::bail!("File already exists: {:?}", existing);
        }
    }

    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&file_path, doc.to_source()?)?;

    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}
