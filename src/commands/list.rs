//! List site content

use anyhow::Result;
use chrono::{DateTime, FixedOffset, Local, Utc};

use crate::content::{Facet, ListFilter};
use crate::ContentStore;

/// List published documents, newest first
pub fn run(store: &ContentStore, filter: &ListFilter) -> Result<()> {
    let loaded = store.load()?;

    let filter = cap_future(filter, store.config.future, Utc::now().fixed_offset());

    let documents = loaded.documents.list_published(&filter);
    println!("Documents ({}):", documents.len());
    for doc in documents {
        println!(
            "  {} - {} [{}]",
            doc.date.with_timezone(&Local).format("%Y-%m-%d"),
            doc.title,
            doc.path
        );
        let summary = doc.summary_text(store.config.summary_length);
        if !summary.is_empty() {
            println!("      {}", summary);
        }
    }

    if !loaded.errors.is_empty() {
        tracing::warn!(
            "{} sources were skipped, run `check` for details",
            loaded.errors.len()
        );
    }

    Ok(())
}

/// Without `future`, nothing dated after `now` is listed, whatever `--until` says
fn cap_future(filter: &ListFilter, future: bool, now: DateTime<FixedOffset>) -> ListFilter {
    let mut filter = filter.clone();
    if !future {
        filter.until = Some(filter.until.map_or(now, |until| until.min(now)));
    }
    filter
}

/// List tag or category usage over published documents
pub fn run_terms(store: &ContentStore, facet: Facet) -> Result<()> {
    let loaded = store.load()?;

    let counts = match facet {
        Facet::Tags => loaded.documents.tag_counts(),
        Facet::Categories => loaded.documents.category_counts(),
    };

    let heading = match facet {
        Facet::Tags => "Tags",
        Facet::Categories => "Categories",
    };
    println!("{} ({}):", heading, counts.len());
    for (term, count) in counts {
        println!("  {} ({})", term, count);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    #[test]
    fn test_cap_future_bounds_explicit_until() {
        let now = at("2024-06-01T00:00:00+00:00");
        let filter = ListFilter::new().until(at("2030-01-01T00:00:00+00:00"));

        assert_eq!(cap_future(&filter, false, now).until, Some(now));
        assert_eq!(
            cap_future(&filter, true, now).until,
            Some(at("2030-01-01T00:00:00+00:00"))
        );
    }

    #[test]
    fn test_cap_future_keeps_earlier_until() {
        let now = at("2024-06-01T00:00:00+00:00");
        let earlier = at("2024-01-01T00:00:00+00:00");

        let filter = ListFilter::new().until(earlier);
        assert_eq!(cap_future(&filter, false, now).until, Some(earlier));
        assert_eq!(cap_future(&ListFilter::new(), false, now).until, Some(now));
        assert_eq!(cap_future(&ListFilter::new(), true, now).until, None);
    }
}
