//! Language classification for fetched resources.
//!
//! Classification walks [`RULES`] in order and the first matching rule decides
//! the language. A declared content type is trusted first, the body is sniffed
//! next, and URL extensions are the weakest structural cue. Anything unmatched
//! is rendered as [`LanguageTag::Markup`].

use reqwest::Url;
use serde::de::IgnoredAny;

use crate::{constants::source::SNIFF_WINDOW_CHARS, models::language::LanguageTag};

/// Lowercased inputs shared by every rule.
pub struct Signals<'a> {
    pub path: String,
    pub prefix: String,
    pub content_type: String,
    pub body: &'a str,
}

impl<'a> Signals<'a> {
    pub fn new(url: &Url, body: &'a str, content_type: Option<&str>) -> Self {
        Self {
            path: url.path().to_lowercase(),
            prefix: body
                .chars()
                .take(SNIFF_WINDOW_CHARS)
                .collect::<String>()
                .to_lowercase(),
            content_type: content_type.unwrap_or_default().to_lowercase(),
            body,
        }
    }
}

pub struct Rule {
    pub name: &'static str,
    pub language: LanguageTag,
    pub matches: fn(&Signals) -> bool,
}

pub const RULES: &[Rule] = &[
    Rule {
        name: "declared-json",
        language: LanguageTag::Json,
        matches: declared_json,
    },
    Rule {
        name: "sniffed-json",
        language: LanguageTag::Json,
        matches: sniffed_json,
    },
    Rule {
        name: "javascript",
        language: LanguageTag::Javascript,
        matches: javascript,
    },
    Rule {
        name: "css",
        language: LanguageTag::Css,
        matches: css,
    },
    Rule {
        name: "json-extension",
        language: LanguageTag::Json,
        matches: json_extension,
    },
    Rule {
        name: "xml",
        language: LanguageTag::Xml,
        matches: xml,
    },
    Rule {
        name: "html",
        language: LanguageTag::Html,
        matches: html,
    },
];

pub fn classify(url: &Url, body: &str, content_type: Option<&str>) -> LanguageTag {
    let signals = Signals::new(url, body, content_type);

    match RULES.iter().find(|rule| (rule.matches)(&signals)) {
        Some(rule) => {
            log::debug!("Classified {} as {} (rule {})", url, rule.language, rule.name);
            rule.language
        }
        None => {
            log::debug!("Classified {} as markup (no rule matched)", url);
            LanguageTag::Markup
        }
    }
}

fn declared_json(s: &Signals) -> bool {
    s.content_type.contains("application/json") || s.content_type.contains("text/json")
}

// Both must hold: object/array shape in the window, and the whole body parses.
fn sniffed_json(s: &Signals) -> bool {
    let head = s.prefix.trim_start();
    (head.starts_with('{') || head.starts_with('['))
        && serde_json::from_str::<IgnoredAny>(s.body).is_ok()
}

fn javascript(s: &Signals) -> bool {
    s.path.contains(".js") || s.prefix.contains("javascript")
}

fn css(s: &Signals) -> bool {
    s.path.contains(".css") || s.content_type.contains("text/css")
}

// Paths ending in ".json" also contain ".js" and match `javascript` first.
fn json_extension(s: &Signals) -> bool {
    s.path.contains(".json")
}

fn xml(s: &Signals) -> bool {
    s.path.contains(".xml") || s.prefix.contains("<?xml")
}

fn html(s: &Signals) -> bool {
    s.prefix.contains("<!doctype html") || s.prefix.contains("<html")
}
