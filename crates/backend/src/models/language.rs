use serde::Serialize;
use std::fmt;

/// Grammar selected for a fetched resource.
///
/// `Markup` is the generic HTML/XML-like fallback; every classification ends in
/// one of these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    Json,
    Javascript,
    Css,
    Xml,
    Html,
    Markup,
}

impl LanguageTag {
    pub const ALL: [LanguageTag; 6] = [
        LanguageTag::Json,
        LanguageTag::Javascript,
        LanguageTag::Css,
        LanguageTag::Xml,
        LanguageTag::Html,
        LanguageTag::Markup,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::Json => "json",
            LanguageTag::Javascript => "javascript",
            LanguageTag::Css => "css",
            LanguageTag::Xml => "xml",
            LanguageTag::Html => "html",
            LanguageTag::Markup => "markup",
        }
    }

    /// Resolves the language names used by tree-sitter injection queries.
    pub fn from_injection_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "javascript" => Some(LanguageTag::Javascript),
            "css" => Some(LanguageTag::Css),
            _ => None,
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
