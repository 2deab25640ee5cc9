//! Error types reported while loading and validating documents

use std::fmt;

use thiserror::Error;

use super::SharingLink;

/// Errors collected while loading a document set.
///
/// None of these abort a load: the offending source is left out of the set
/// and the error is reported next to the documents that did load.
pub type ErrorList = Vec<ContentError>;

/// A taxonomy facet of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Facet {
    Tags,
    Categories,
}

impl fmt::Display for Facet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Facet::Tags => f.write_str("tags"),
            Facet::Categories => f.write_str("categories"),
        }
    }
}

/// What exactly is wrong with a document's metadata
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MetadataIssue {
    #[error("no front-matter block found")]
    MissingFrontMatter,

    #[error("unterminated {0} front-matter block")]
    UnterminatedFrontMatter(&'static str),

    #[error("invalid {format} front-matter: {message}")]
    Syntax {
        format: &'static str,
        message: String,
    },

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("`date` is not a valid timestamp: {0:?}")]
    InvalidDate(String),

    #[error("`title` is empty")]
    EmptyTitle,

    #[error("document path is empty")]
    EmptyPath,

    #[error("{0} contains a blank entry")]
    BlankTerm(Facet),

    #[error("{facet} entries {first:?} and {second:?} name the same term")]
    CollidingTerms {
        facet: Facet,
        first: String,
        second: String,
    },

    #[error("unknown sharing link {0:?}")]
    UnknownSharingLink(String),

    #[error("sharing link `{0}` is listed more than once")]
    RepeatedSharingLink(SharingLink),
}

/// Content store errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContentError {
    #[error("malformed metadata in `{path}`: {issue}")]
    MalformedMetadata { path: String, issue: MetadataIssue },

    #[error("duplicate path `{path}`: {rejected} rejected, already defined by {kept}")]
    DuplicatePath {
        path: String,
        kept: String,
        rejected: String,
    },

    #[error("failed to read {path}: {message}")]
    Unreadable { path: String, message: String },
}

impl ContentError {
    /// Shorthand for a [`ContentError::MalformedMetadata`]
    pub fn malformed(path: impl Into<String>, issue: MetadataIssue) -> Self {
        ContentError::MalformedMetadata {
            path: path.into(),
            issue,
        }
    }

    /// Path of the document (or file) the error is about
    pub fn path(&self) -> &str {
        match self {
            ContentError::MalformedMetadata { path, .. }
            | ContentError::DuplicatePath { path, .. }
            | ContentError::Unreadable { path, .. } => path,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, ContentError::MalformedMetadata { .. })
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, ContentError::DuplicatePath { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ContentError::malformed("posts/hello", MetadataIssue::MissingField("date"));
        assert_eq!(
            err.to_string(),
            "malformed metadata in `posts/hello`: missing required field `date`"
        );

        let err = ContentError::DuplicatePath {
            path: "about".to_string(),
            kept: "about.md".to_string(),
            rejected: "about/index.md".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate path `about`: about/index.md rejected, already defined by about.md"
        );
        assert_eq!(err.path(), "about");
        assert!(err.is_duplicate());
        assert!(!err.is_malformed());
    }

    #[test]
    fn test_issue_messages_name_the_facet() {
        let issue = MetadataIssue::CollidingTerms {
            facet: Facet::Tags,
            first: "Rust".to_string(),
            second: "rust".to_string(),
        };
        assert_eq!(
            issue.to_string(),
            "tags entries \"Rust\" and \"rust\" name the same term"
        );
        assert_eq!(
            MetadataIssue::RepeatedSharingLink(SharingLink::Bluesky).to_string(),
            "sharing link `bluesky` is listed more than once"
        );
    }
}
