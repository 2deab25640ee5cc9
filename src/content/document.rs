//! The content document model

use chrono::{DateTime, FixedOffset};
use chrono_tz::Tz;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

use super::summary;
use super::{DisplayDefaults, DisplayOptions, FrontMatter, MetadataIssue, ResolvedDisplay, SharingLink};

/// A page or post with its metadata and body
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentDocument {
    /// Unique identifier, derived from the source location
    pub path: String,

    /// Publication date
    pub date: DateTime<FixedOffset>,

    /// Document title
    pub title: String,

    /// Drafts are left out of every listing but can still be looked up by path
    pub draft: bool,

    /// Tags, in authoring order
    pub tags: IndexSet<String>,

    /// Categories, in authoring order
    pub categories: IndexSet<String>,

    /// Short description written by the author
    pub summary: Option<String>,

    /// Display flags set by the document
    #[serde(flatten)]
    pub display: DisplayOptions,

    /// Sharing links, in display order
    pub sharing_links: Vec<SharingLink>,

    /// Custom front-matter fields
    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub extra: IndexMap<String, serde_yaml::Value>,

    /// Raw body text after the front matter
    pub body: String,
}

impl ContentDocument {
    /// Create a new document with minimal required fields
    pub fn new(path: impl Into<String>, title: impl Into<String>, date: DateTime<FixedOffset>) -> Self {
        Self {
            path: path.into(),
            date,
            title: title.into(),
            draft: false,
            tags: IndexSet::new(),
            categories: IndexSet::new(),
            summary: None,
            display: DisplayOptions::default(),
            sharing_links: Vec::new(),
            extra: IndexMap::new(),
            body: String::new(),
        }
    }

    /// Parse a raw source: front-matter block followed by the body
    pub fn parse(path: &str, text: &str, tz: &Tz) -> Result<Self, MetadataIssue> {
        let (fm, body) = FrontMatter::parse(text)?;
        Self::from_front_matter(path, fm, body, tz)
    }

    /// Build a document from parsed front matter, enforcing required fields
    pub fn from_front_matter(
        path: &str,
        fm: FrontMatter,
        body: &str,
        tz: &Tz,
    ) -> Result<Self, MetadataIssue> {
        let date = match fm.date.as_deref() {
            None => return Err(MetadataIssue::MissingField("date")),
            Some(raw) => fm
                .parse_date(tz)
                .ok_or_else(|| MetadataIssue::InvalidDate(raw.to_string()))?,
        };

        let title = fm.title.ok_or(MetadataIssue::MissingField("title"))?;

        let sharing_links = fm
            .sharing_links
            .iter()
            .map(|link| {
                link.parse::<SharingLink>()
                    .map_err(|e| MetadataIssue::UnknownSharingLink(e.0))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            path: path.to_string(),
            date,
            title,
            draft: fm.draft,
            tags: collect_terms(fm.tags),
            categories: collect_terms(fm.categories),
            summary: fm.summary,
            display: DisplayOptions {
                show_table_of_contents: fm.show_table_of_contents,
                show_breadcrumbs: fm.show_breadcrumbs,
                show_author: fm.show_author,
                show_summary: fm.show_summary,
            },
            sharing_links,
            extra: fm.extra,
            body: body.to_string(),
        })
    }

    /// Front matter describing this document
    pub fn front_matter(&self) -> FrontMatter {
        FrontMatter {
            title: Some(self.title.clone()),
            date: Some(self.date.to_rfc3339()),
            draft: self.draft,
            summary: self.summary.clone(),
            tags: self.tags.iter().cloned().collect(),
            categories: self.categories.iter().cloned().collect(),
            show_table_of_contents: self.display.show_table_of_contents,
            show_breadcrumbs: self.display.show_breadcrumbs,
            show_author: self.display.show_author,
            show_summary: self.display.show_summary,
            sharing_links: self
                .sharing_links
                .iter()
                .map(|link| link.as_str().to_string())
                .collect(),
            extra: self.extra.clone(),
        }
    }

    /// Serialize back to source text with a YAML front-matter block
    pub fn to_source(&self) -> Result<String, serde_yaml::Error> {
        let yaml = self.front_matter().to_yaml()?;
        Ok(format!("---\n{}---\n\n{}", yaml, self.body))
    }

    pub fn is_published(&self) -> bool {
        !self.draft
    }

    /// Display flags with the site defaults applied
    pub fn display(&self, defaults: &DisplayDefaults) -> ResolvedDisplay {
        self.display.resolve(defaults)
    }

    /// Summary for listings: the authored summary, else the text before a
    /// `<!--more-->` divider, else the first `words` words of the body
    pub fn summary_text(&self, words: usize) -> String {
        if let Some(summary) = &self.summary {
            return summary.trim().to_string();
        }
        match summary::split_manual(&self.body) {
            Some(manual) => summary::plain_text(manual, usize::MAX),
            None => summary::plain_text(&self.body, words),
        }
    }
}

fn collect_terms(terms: Vec<String>) -> IndexSet<String> {
    terms.into_iter().map(|t| t.trim().to_string()).collect()
}
