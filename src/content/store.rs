//! Loading raw sources into a validated document set

use std::collections::HashMap;

use chrono_tz::Tz;
use indexmap::IndexMap;
use rayon::prelude::*;

use super::query::{self, ListFilter};
use super::validate::validate;
use super::{ContentDocument, ContentError, ErrorList, RawSource};

/// Options for turning raw sources into documents
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Timezone for dates written without an offset
    pub timezone: Tz,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { timezone: Tz::UTC }
    }
}

/// Documents keyed by path, in load order
#[derive(Debug, Clone, Default)]
pub struct DocumentSet {
    documents: IndexMap<String, ContentDocument>,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document unless its path is taken. Returns the rejected document.
    pub(crate) fn insert(&mut self, document: ContentDocument) -> Result<(), ContentDocument> {
        if self.documents.contains_key(&document.path) {
            return Err(document);
        }
        self.documents.insert(document.path.clone(), document);
        Ok(())
    }

    pub fn get(&self, path: &str) -> Option<&ContentDocument> {
        self.documents.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.documents.contains_key(path)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentDocument> {
        self.documents.values()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Published documents matching `filter`, newest first
    pub fn list_published(&self, filter: &ListFilter) -> Vec<&ContentDocument> {
        query::list_published(self, filter)
    }

    /// Tag usage over published documents, most used first.
    ///
    /// Terms are grouped by slug, the same way filters match them, and shown
    /// with the first spelling met in load order.
    pub fn tag_counts(&self) -> Vec<(String, usize)> {
        self.term_counts(|doc| doc.tags.iter())
    }

    /// Category usage over published documents, most used first
    pub fn category_counts(&self) -> Vec<(String, usize)> {
        self.term_counts(|doc| doc.categories.iter())
    }

    fn term_counts<'a, F, I>(&'a self, terms: F) -> Vec<(String, usize)>
    where
        F: Fn(&'a ContentDocument) -> I,
        I: Iterator<Item = &'a String>,
    {
        let mut counts: HashMap<String, (String, usize)> = HashMap::new();
        for doc in self.iter().filter(|doc| doc.is_published()) {
            for term in terms(doc) {
                let mut key = slug::slugify(term);
                if key.is_empty() {
                    key = term.clone();
                }
                counts.entry(key).or_insert_with(|| (term.clone(), 0)).1 += 1;
            }
        }

        let mut counts: Vec<_> = counts.into_values().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }
}

/// Result of a load: every document that made it, and why the rest did not
#[derive(Debug, Default)]
pub struct Loaded {
    pub documents: DocumentSet,
    pub errors: ErrorList,
}

impl Loaded {
    /// Fail if any source was rejected
    pub fn into_result(self) -> Result<DocumentSet, ErrorList> {
        if self.errors.is_empty() {
            Ok(self.documents)
        } else {
            Err(self.errors)
        }
    }
}

/// Parse and validate every source.
///
/// A malformed source is reported and skipped without affecting the others.
/// When two sources share a path the earlier one wins and the later one is
/// reported as a duplicate.
pub fn load_all(sources: &[RawSource], options: &LoadOptions) -> Loaded {
    let parsed: Vec<Result<ContentDocument, ErrorList>> = sources
        .par_iter()
        .map(|source| load_one(source, options))
        .collect();

    let mut loaded = Loaded::default();
    let mut owners: HashMap<String, usize> = HashMap::new();

    for (index, result) in parsed.into_iter().enumerate() {
        let document = match result {
            Ok(document) => document,
            Err(errors) => {
                for e in &errors {
                    tracing::warn!("Skipping {}: {}", sources[index].label(index), e);
                }
                loaded.errors.extend(errors);
                continue;
            }
        };

        if let Err(rejected) = loaded.documents.insert(document) {
            let kept = owners
                .get(&rejected.path)
                .map(|&i| sources[i].label(i))
                .unwrap_or_default();
            let error = ContentError::DuplicatePath {
                path: rejected.path,
                kept,
                rejected: sources[index].label(index),
            };
            tracing::warn!("{}", error);
            loaded.errors.push(error);
            continue;
        }

        tracing::debug!("Loaded {}", sources[index].path);
        owners.insert(sources[index].path.clone(), index);
    }

    loaded
}

fn load_one(source: &RawSource, options: &LoadOptions) -> Result<ContentDocument, ErrorList> {
    let document = ContentDocument::parse(&source.path, &source.text, &options.timezone)
        .map_err(|issue| vec![ContentError::malformed(source.path.clone(), issue)])?;

    let errors = validate(&document);
    if errors.is_empty() {
        Ok(document)
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MetadataIssue;

    fn valid(path: &str, title: &str) -> RawSource {
        RawSource::new(
            path,
            format!("---\ntitle: {}\ndate: 2024-02-01\ntags: [notes]\n---\n{} body\n", title, title),
        )
    }

    #[test]
    fn test_load_all_valid() {
        let sources = vec![valid("a", "A"), valid("b", "B")];
        let loaded = load_all(&sources, &LoadOptions::default());
        assert!(loaded.errors.is_empty());
        assert_eq!(loaded.documents.len(), 2);
        assert_eq!(loaded.documents.get("b").unwrap().body, "B body\n");
    }

    #[test]
    fn test_one_malformed_document_does_not_stop_the_rest() {
        let sources = vec![
            valid("a", "A"),
            RawSource::new("broken", "---\ntitle: No date here\n---\nbody\n"),
            valid("c", "C"),
        ];
        let loaded = load_all(&sources, &LoadOptions::default());

        assert_eq!(loaded.documents.len(), 2);
        assert!(loaded.documents.contains("a"));
        assert!(loaded.documents.contains("c"));
        assert!(!loaded.documents.contains("broken"));
        assert_eq!(
            loaded.errors,
            vec![ContentError::malformed(
                "broken",
                MetadataIssue::MissingField("date")
            )]
        );
    }

    #[test]
    fn test_duplicate_path_first_wins() {
        let sources = vec![valid("about", "First"), valid("about", "Second")];
        let loaded = load_all(&sources, &LoadOptions::default());

        assert_eq!(loaded.documents.len(), 1);
        assert_eq!(loaded.documents.get("about").unwrap().title, "First");
        assert_eq!(
            loaded.errors,
            vec![ContentError::DuplicatePath {
                path: "about".to_string(),
                kept: "source #0".to_string(),
                rejected: "source #1".to_string(),
            }]
        );
    }

    #[test]
    fn test_malformed_first_copy_lets_second_load() {
        let sources = vec![
            RawSource::new("about", "no front matter at all"),
            valid("about", "Second"),
        ];
        let loaded = load_all(&sources, &LoadOptions::default());
        assert_eq!(loaded.documents.get("about").unwrap().title, "Second");
        assert_eq!(loaded.errors.len(), 1);
        assert!(loaded.errors[0].is_malformed());
    }

    #[test]
    fn test_validation_failures_are_rejected() {
        let sources = vec![RawSource::new(
            "posts/tags",
            "---\ntitle: Tags\ndate: 2024-01-01\ntags: [Rust, rust]\n---\n",
        )];
        let loaded = load_all(&sources, &LoadOptions::default());
        assert!(loaded.documents.is_empty());
        assert_eq!(loaded.errors.len(), 1);
        assert!(loaded.into_result().is_err());
    }

    #[test]
    fn test_naive_dates_use_configured_timezone() {
        let options = LoadOptions {
            timezone: chrono_tz::Asia::Tokyo,
        };
        let loaded = load_all(&[valid("a", "A")], &options);
        let doc = loaded.documents.get("a").unwrap();
        assert_eq!(doc.date.to_rfc3339(), "2024-02-01T00:00:00+09:00");
    }

    #[test]
    fn test_term_counts_skip_drafts() {
        let sources = vec![
            valid("a", "A"),
            valid("b", "B"),
            RawSource::new(
                "c",
                "---\ntitle: C\ndate: 2024-01-01\ndraft: true\ntags: [notes, secret]\n---\n",
            ),
        ];
        let documents = load_all(&sources, &LoadOptions::default())
            .into_result()
            .unwrap();
        assert_eq!(documents.tag_counts(), vec![("notes".to_string(), 2)]);
        assert!(documents.category_counts().is_empty());
    }

    #[test]
    fn test_term_counts_group_by_slug() {
        let sources = vec![
            RawSource::new("a", "---\ntitle: A\ndate: 2024-01-01\ntags: [Rust]\n---\n"),
            RawSource::new("b", "---\ntitle: B\ndate: 2024-01-02\ntags: [rust, cli]\n---\n"),
        ];
        let documents = load_all(&sources, &LoadOptions::default())
            .into_result()
            .unwrap();
        assert_eq!(
            documents.tag_counts(),
            vec![("Rust".to_string(), 2), ("cli".to_string(), 1)]
        );
        assert_eq!(documents.list_published(&ListFilter::new().tag("rust")).len(), 2);
    }

    #[test]
    fn test_local_time_in_dst_gap_still_loads() {
        let options = LoadOptions {
            timezone: chrono_tz::Europe::Lisbon,
        };
        let sources = vec![RawSource::new(
            "a",
            "---\ntitle: Spring forward\ndate: 2024-03-31 01:30\n---\n",
        )];
        let loaded = load_all(&sources, &options);
        assert!(loaded.errors.is_empty(), "{:?}", loaded.errors);
        let doc = loaded.documents.get("a").unwrap();
        assert_eq!(doc.date.to_rfc3339(), "2024-03-31T01:30:00+00:00");
    }
}
