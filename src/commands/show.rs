//! Show a single document

use anyhow::Result;

use crate::ContentStore;

/// Print one document by path, drafts included
pub fn run(store: &ContentStore, path: &str, json: bool) -> Result<()> {
    let loaded = store.load()?;

    let path = path.trim_matches('/');
    let Some(doc) = loaded.documents.get(path) else {
        anyhow::bail!("No document at path: {}", path);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(doc)?);
        return Ok(());
    }

    let display = doc.display(&store.config.display);
    println!("path:       {}", doc.path);
    println!("title:      {}", doc.title);
    println!("date:       {}", doc.date.to_rfc3339());
    println!("draft:      {}", doc.draft);
    println!("tags:       {}", join(doc.tags.iter()));
    println!("categories: {}", join(doc.categories.iter()));
    if let Some(summary) = &doc.summary {
        println!("summary:    {}", summary);
    }
    println!(
        "sharing:    {}",
        join(doc.sharing_links.iter().map(|link| link.as_str()))
    );
    println!(
        "display:    toc={} breadcrumbs={} author={} summary={}",
        display.show_table_of_contents,
        display.show_breadcrumbs,
        display.show_author,
        display.show_summary
    );

    Ok(())
}

fn join<T: AsRef<str>>(items: impl Iterator<Item = T>) -> String {
    items
        .map(|item| item.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
