//! Front-matter parsing

use chrono::{
    DateTime, Duration, FixedOffset, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone,
};
use chrono_tz::Tz;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

use super::MetadataIssue;

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, SeqAccess, Visitor};
    use std::fmt;

    struct StringOrVec;

    impl<'de> Visitor<'de> for StringOrVec {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or a list of strings")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value.to_string()])
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(vec![value])
        }

        fn visit_seq<S>(self, mut seq: S) -> Result<Self::Value, S::Error>
        where
            S: SeqAccess<'de>,
        {
            let mut vec = Vec::new();
            while let Some(item) = seq.next_element::<String>()? {
                vec.push(item);
            }
            Ok(vec)
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(StringOrVec)
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Front-matter block of a document, as authored.
///
/// Everything is optional here; required fields are enforced when the block is
/// turned into a [`ContentDocument`](super::ContentDocument).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "is_false")]
    pub draft: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(
        deserialize_with = "string_or_vec",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,
    #[serde(
        deserialize_with = "string_or_vec",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub categories: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_table_of_contents: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_breadcrumbs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_author: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_summary: Option<bool>,
    #[serde(
        deserialize_with = "string_or_vec",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub sharing_links: Vec<String>,

    /// Additional custom fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl FrontMatter {
    /// Parse front-matter from content string
    /// Returns (front_matter, remaining_content)
    pub fn parse(content: &str) -> Result<(Self, &str), MetadataIssue> {
        let content = content.trim_start_matches('\u{feff}').trim_start();

        if content.starts_with("---") {
            return Self::parse_yaml(content);
        }

        if content.starts_with("+++") {
            return Self::parse_toml(content);
        }

        if content.starts_with('{') {
            return Self::parse_json(content);
        }

        Err(MetadataIssue::MissingFrontMatter)
    }

    fn parse_yaml(content: &str) -> Result<(Self, &str), MetadataIssue> {
        let (yaml_content, remaining) =
            split_fenced(content, "---").ok_or(MetadataIssue::UnterminatedFrontMatter("YAML"))?;

        if yaml_content.trim().is_empty() {
            return Ok((FrontMatter::default(), remaining));
        }

        let fm = serde_yaml::from_str::<FrontMatter>(yaml_content).map_err(|e| {
            MetadataIssue::Syntax {
                format: "YAML",
                message: e.to_string(),
            }
        })?;
        Ok((fm, remaining))
    }

    fn parse_toml(content: &str) -> Result<(Self, &str), MetadataIssue> {
        let (toml_content, remaining) =
            split_fenced(content, "+++").ok_or(MetadataIssue::UnterminatedFrontMatter("TOML"))?;

        let syntax = |message: String| MetadataIssue::Syntax {
            format: "TOML",
            message,
        };

        let table: toml::Table = toml::from_str(toml_content).map_err(|e| syntax(e.to_string()))?;

        // TOML has native datetimes; dates are carried as text everywhere else
        let mut value = toml::Value::Table(table);
        stringify_datetimes(&mut value);

        let fm: FrontMatter = value.try_into().map_err(|e| syntax(e.to_string()))?;
        Ok((fm, remaining))
    }

    fn parse_json(content: &str) -> Result<(Self, &str), MetadataIssue> {
        let end_pos = json_object_end(content).ok_or(MetadataIssue::UnterminatedFrontMatter("JSON"))?;

        let json_content = &content[..end_pos];
        let remaining = content[end_pos..].trim_start_matches(['\n', '\r']);

        let fm: FrontMatter =
            serde_json::from_str(json_content).map_err(|e| MetadataIssue::Syntax {
                format: "JSON",
                message: e.to_string(),
            })?;

        Ok((fm, remaining))
    }

    /// Serialize as a YAML block, without the `---` fences
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Parse the date string, interpreting dates without an offset in `tz`
    pub fn parse_date(&self, tz: &Tz) -> Option<DateTime<FixedOffset>> {
        self.date.as_ref().and_then(|s| parse_date_string(s, tz))
    }
}

/// Split a fenced block (`---` or `+++`) from the text that follows it.
/// The fences must sit on their own lines.
fn split_fenced<'a>(content: &'a str, fence: &str) -> Option<(&'a str, &'a str)> {
    let rest = content.strip_prefix(fence)?;
    let newline = rest.find('\n')?;
    if !rest[..newline].trim().is_empty() {
        return None;
    }
    let rest = &rest[newline + 1..];

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == fence {
            let block = &rest[..offset];
            let remaining = rest[offset + line.len()..].trim_start_matches(['\n', '\r']);
            return Some((block, remaining));
        }
        offset += line.len();
    }

    None
}

/// Byte offset just past the JSON object that opens `content`
fn json_object_end(content: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in content.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

fn stringify_datetimes(value: &mut toml::Value) {
    match value {
        toml::Value::Datetime(dt) => {
            let text = dt.to_string();
            *value = toml::Value::String(text);
        }
        toml::Value::Array(items) => items.iter_mut().for_each(stringify_datetimes),
        toml::Value::Table(table) => table
            .iter_mut()
            .for_each(|(_, v)| stringify_datetimes(v)),
        _ => {}
    }
}

const OFFSET_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%z",
    "%Y-%m-%d %H:%M:%S %z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

const DATETIME_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
];

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parse a date string in various formats.
///
/// Strings carrying an offset keep it; naive dates and date-times are taken as
/// local time in `tz` (midnight for a bare date).
pub fn parse_date_string(s: &str, tz: &Tz) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }

    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return localize(&dt, tz);
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return localize(&d.and_hms_opt(0, 0, 0)?, tz);
        }
    }

    None
}

fn localize(naive: &NaiveDateTime, tz: &Tz) -> Option<DateTime<FixedOffset>> {
    match tz.from_local_datetime(naive) {
        LocalResult::Single(dt) => Some(dt.fixed_offset()),
        LocalResult::Ambiguous(earliest, _) => Some(earliest.fixed_offset()),
        // Skipped by a forward transition: keep the offset in force the day before
        LocalResult::None => {
            let before = tz.from_local_datetime(&(*naive - Duration::days(1))).earliest()?;
            before.offset().fix().from_local_datetime(naive).single()
        }
    }
}
