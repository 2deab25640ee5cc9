//! Document validation

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};

use indexmap::IndexSet;

use super::{ContentDocument, ContentError, ErrorList, Facet, MetadataIssue};

/// Check a document against the schema invariants.
///
/// Returns an empty list for a well-formed document. Required fields and the
/// date format are already enforced when a document is parsed; this covers
/// what the type system cannot.
pub fn validate(document: &ContentDocument) -> ErrorList {
    let mut issues = Vec::new();

    if document.path.trim().is_empty() {
        issues.push(MetadataIssue::EmptyPath);
    }

    if document.title.trim().is_empty() {
        issues.push(MetadataIssue::EmptyTitle);
    }

    check_terms(Facet::Tags, &document.tags, &mut issues);
    check_terms(Facet::Categories, &document.categories, &mut issues);

    let mut seen = HashSet::new();
    for link in &document.sharing_links {
        if !seen.insert(*link) {
            issues.push(MetadataIssue::RepeatedSharingLink(*link));
        }
    }

    issues
        .into_iter()
        .map(|issue| ContentError::malformed(document.path.clone(), issue))
        .collect()
}

/// Terms are compared by slug, the way they end up in taxonomy URLs
fn check_terms(facet: Facet, terms: &IndexSet<String>, issues: &mut Vec<MetadataIssue>) {
    let mut by_slug: HashMap<String, &str> = HashMap::new();

    for term in terms {
        if term.trim().is_empty() {
            issues.push(MetadataIssue::BlankTerm(facet));
            continue;
        }

        let key = slug::slugify(term);
        if key.is_empty() {
            continue;
        }

        match by_slug.entry(key) {
            Entry::Occupied(first) => issues.push(MetadataIssue::CollidingTerms {
                facet,
                first: first.get().to_string(),
                second: term.clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(term);
            }
        }
    }
}
