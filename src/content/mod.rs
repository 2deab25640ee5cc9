//! Content module - documents, front matter, loading and queries

mod display;
mod document;
mod error;
mod frontmatter;
pub mod query;
mod sharing;
pub mod source;
mod store;
mod summary;
mod validate;

pub use display::{DisplayDefaults, DisplayOptions, ResolvedDisplay};
pub use document::ContentDocument;
pub use error::{ContentError, ErrorList, Facet, MetadataIssue};
pub use frontmatter::{parse_date_string, FrontMatter};
pub use query::{get_by_path, list_published, ListFilter};
pub use sharing::{SharingLink, UnknownPlatform};
pub use source::{collect_sources, RawSource, SourceOptions};
pub use store::{load_all, DocumentSet, LoadOptions, Loaded};
pub use validate::validate;
