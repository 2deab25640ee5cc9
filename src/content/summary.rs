//! Plain-text summaries extracted from a Markdown body

use lazy_static::lazy_static;
use pulldown_cmark::{Event, Parser, Tag, TagEnd};
use regex::Regex;

lazy_static! {
    static ref MORE_DIVIDER: Regex = Regex::new(r"(?i)<!--\s*more\s*-->").unwrap();
}

/// Text before a `<!--more-->` divider, if the body has one
pub fn split_manual(body: &str) -> Option<&str> {
    MORE_DIVIDER.find(body).map(|m| body[..m.start()].trim())
}

/// First `max_words` words of the body's readable text.
///
/// Code blocks and raw HTML are skipped; inline code is kept.
pub fn plain_text(markdown: &str, max_words: usize) -> String {
    let mut text = String::new();
    let mut code_depth = 0usize;

    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => code_depth += 1,
            Event::End(TagEnd::CodeBlock) => code_depth = code_depth.saturating_sub(1),
            Event::Text(t) | Event::Code(t) if code_depth == 0 => text.push_str(&t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            Event::End(TagEnd::Paragraph) | Event::End(TagEnd::Heading(_)) | Event::End(TagEnd::Item) => {
                text.push(' ')
            }
            _ => {}
        }
    }

    text.split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ")
}
