//! Listing and lookup over a loaded document set

use chrono::{DateTime, FixedOffset};

use super::{ContentDocument, DocumentSet};

/// Narrows a published listing.
///
/// Tag and category terms are compared by slug, so `Rust` matches `rust`.
/// Both ends of the date range are inclusive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFilter {
    pub tag: Option<String>,
    pub category: Option<String>,
    pub since: Option<DateTime<FixedOffset>>,
    pub until: Option<DateTime<FixedOffset>>,
}

impl ListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn since(mut self, since: DateTime<FixedOffset>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn until(mut self, until: DateTime<FixedOffset>) -> Self {
        self.until = Some(until);
        self
    }

    /// Whether a document passes the filter. Drafts are not considered here.
    pub fn matches(&self, document: &ContentDocument) -> bool {
        if let Some(tag) = &self.tag {
            if !has_term(document.tags.iter(), tag) {
                return false;
            }
        }
        if let Some(category) = &self.category {
            if !has_term(document.categories.iter(), category) {
                return false;
            }
        }
        if let Some(since) = &self.since {
            if document.date < *since {
                return false;
            }
        }
        if let Some(until) = &self.until {
            if document.date > *until {
                return false;
            }
        }
        true
    }
}

fn has_term<'a>(mut terms: impl Iterator<Item = &'a String>, wanted: &str) -> bool {
    let wanted = slug::slugify(wanted);
    terms.any(|term| slug::slugify(term) == wanted)
}

/// Published documents matching `filter`, newest first.
///
/// Drafts are never included. Documents sharing a date are ordered by path.
pub fn list_published<'a>(documents: &'a DocumentSet, filter: &ListFilter) -> Vec<&'a ContentDocument> {
    let mut listed: Vec<&ContentDocument> = documents
        .iter()
        .filter(|doc| doc.is_published() && filter.matches(doc))
        .collect();

    // Sort by date descending (newest first)
    listed.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.path.cmp(&b.path)));
    listed
}

/// Direct lookup by path, drafts included
pub fn get_by_path<'a>(documents: &'a DocumentSet, path: &str) -> Option<&'a ContentDocument> {
    documents.get(path)
}
