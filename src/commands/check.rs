//! Validate every document

use anyhow::Result;

use crate::ContentStore;

/// Load everything and report every rejected source
pub fn run(store: &ContentStore) -> Result<()> {
    let loaded = store.load()?;

    for error in &loaded.errors {
        println!("error: {}", error);
    }

    let drafts = loaded.documents.iter().filter(|doc| doc.draft).count();
    println!(
        "{} documents loaded ({} drafts), {} errors",
        loaded.documents.len(),
        drafts,
        loaded.errors.len()
    );

    if !loaded.errors.is_empty() {
        anyhow::bail!("{} sources failed validation", loaded.errors.len());
    }

    Ok(())
}
