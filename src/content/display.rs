//! Per-document display flags and their site-wide defaults

use serde::{Deserialize, Serialize};

/// Display flags as authored in a document's front matter.
///
/// Each flag is independent: `None` means the document did not set it and the
/// site default from [`DisplayDefaults`] applies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayOptions {
    pub show_table_of_contents: Option<bool>,
    pub show_breadcrumbs: Option<bool>,
    pub show_author: Option<bool>,
    pub show_summary: Option<bool>,
}

/// Site-wide values used for flags a document leaves unset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayDefaults {
    /// Render a table of contents. Default: `false`
    pub show_table_of_contents: bool,
    /// Render breadcrumbs above the title. Default: `false`
    pub show_breadcrumbs: bool,
    /// Render the author block. Default: `true`
    pub show_author: bool,
    /// Render the summary above the body. Default: `false`
    pub show_summary: bool,
}

impl Default for DisplayDefaults {
    fn default() -> Self {
        Self {
            show_table_of_contents: false,
            show_breadcrumbs: false,
            show_author: true,
            show_summary: false,
        }
    }
}

/// Display flags with every default applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedDisplay {
    pub show_table_of_contents: bool,
    pub show_breadcrumbs: bool,
    pub show_author: bool,
    pub show_summary: bool,
}

impl DisplayOptions {
    /// Fill unset flags from the site defaults
    pub fn resolve(&self, defaults: &DisplayDefaults) -> ResolvedDisplay {
        ResolvedDisplay {
            show_table_of_contents: self
                .show_table_of_contents
                .unwrap_or(defaults.show_table_of_contents),
            show_breadcrumbs: self.show_breadcrumbs.unwrap_or(defaults.show_breadcrumbs),
            show_author: self.show_author.unwrap_or(defaults.show_author),
            show_summary: self.show_summary.unwrap_or(defaults.show_summary),
        }
    }
}
