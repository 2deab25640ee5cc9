//! Sharing link platforms

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A platform a document can be shared to, in the identifiers the theme uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SharingLink {
    Facebook,
    Twitter,
    XTwitter,
    Mastodon,
    Pinterest,
    Reddit,
    Linkedin,
    Email,
    Threads,
    Telegram,
    Line,
    Weibo,
    Xing,
    Bluesky,
}

impl SharingLink {
    pub const ALL: [SharingLink; 14] = [
        SharingLink::Facebook,
        SharingLink::Twitter,
        SharingLink::XTwitter,
        SharingLink::Mastodon,
        SharingLink::Pinterest,
        SharingLink::Reddit,
        SharingLink::Linkedin,
        SharingLink::Email,
        SharingLink::Threads,
        SharingLink::Telegram,
        SharingLink::Line,
        SharingLink::Weibo,
        SharingLink::Xing,
        SharingLink::Bluesky,
    ];

    /// Identifier as written in front matter
    pub fn as_str(&self) -> &'static str {
        match self {
            SharingLink::Facebook => "facebook",
            SharingLink::Twitter => "twitter",
            SharingLink::XTwitter => "x-twitter",
            SharingLink::Mastodon => "mastodon",
            SharingLink::Pinterest => "pinterest",
            SharingLink::Reddit => "reddit",
            SharingLink::Linkedin => "linkedin",
            SharingLink::Email => "email",
            SharingLink::Threads => "threads",
            SharingLink::Telegram => "telegram",
            SharingLink::Line => "line",
            SharingLink::Weibo => "weibo",
            SharingLink::Xing => "xing",
            SharingLink::Bluesky => "bluesky",
        }
    }
}

impl fmt::Display for SharingLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised platform identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPlatform(pub String);

impl FromStr for SharingLink {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SharingLink::ALL
            .into_iter()
            .find(|link| link.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_platforms() {
        assert_eq!("linkedin".parse::<SharingLink>(), Ok(SharingLink::Linkedin));
        assert_eq!(" Reddit ".parse::<SharingLink>(), Ok(SharingLink::Reddit));
        assert_eq!("x-twitter".parse::<SharingLink>(), Ok(SharingLink::XTwitter));
        assert_eq!(
            "myspace".parse::<SharingLink>(),
            Err(UnknownPlatform("myspace".to_string()))
        );
    }

    #[test]
    fn test_serde_identifiers_match_as_str() {
        for link in SharingLink::ALL {
            let json = serde_json::to_string(&link).unwrap();
            assert_eq!(json, format!("\"{}\"", link.as_str()));
        }
    }
}
