use anyhow::{Context, Result};
use std::{borrow::Cow, collections::HashMap};
use tree_sitter_highlight::{HighlightConfiguration, HighlightEvent, Highlighter};

use crate::{
    models::language::LanguageTag,
    utils::escape::{escape_html, push_escaped},
};

const HIGHLIGHT_NAMES: &[&str] = &[
    "attribute",
    "boolean",
    "comment",
    "constant",
    "constant.builtin",
    "constructor",
    "embedded",
    "escape",
    "function",
    "function.builtin",
    "function.method",
    "keyword",
    "label",
    "number",
    "operator",
    "property",
    "punctuation",
    "punctuation.bracket",
    "punctuation.delimiter",
    "punctuation.special",
    "string",
    "string.special",
    "tag",
    "tag.error",
    "type",
    "type.builtin",
    "variable",
    "variable.builtin",
    "variable.parameter",
];

/// Process-wide table of compiled grammars, keyed by [`LanguageTag`].
///
/// Built once at start-up and read-only afterwards, so it can be shared across
/// requests behind an `Arc`. The `markup` grammar is always present.
pub struct GrammarRegistry {
    grammars: HashMap<LanguageTag, HighlightConfiguration>,
    class_names: Vec<String>,
}

impl GrammarRegistry {
    pub fn new() -> Result<Self> {
        Self::with_languages(&LanguageTag::ALL)
    }

    /// Compiles grammars for `languages` plus the `markup` fallback.
    ///
    /// A grammar that fails to compile is logged and skipped; requests for it
    /// fall back to `markup`. Failing to compile `markup` is an error.
    pub fn with_languages(languages: &[LanguageTag]) -> Result<Self> {
        let mut grammars = HashMap::new();

        for &language in languages.iter().chain([LanguageTag::Markup].iter()) {
            if grammars.contains_key(&language) {
                continue;
            }

            match Self::load_grammar(language) {
                Ok(config) => {
                    grammars.insert(language, config);
                }
                Err(e) if language == LanguageTag::Markup => {
                    return Err(e).context("Failed to load fallback markup grammar");
                }
                Err(e) => log::warn!("Grammar for {} unavailable: {}", language, e),
            }
        }

        log::info!("Loaded {} grammar(s)", grammars.len());

        Ok(Self {
            grammars,
            class_names: HIGHLIGHT_NAMES
                .iter()
                .map(|name| name.replace('.', " "))
                .collect(),
        })
    }

    fn load_grammar(language: LanguageTag) -> Result<HighlightConfiguration> {
        let mut config = match language {
            LanguageTag::Json => HighlightConfiguration::new(
                tree_sitter_json::LANGUAGE.into(),
                "json",
                tree_sitter_json::HIGHLIGHTS_QUERY,
                "",
                "",
            )?,
            LanguageTag::Javascript => HighlightConfiguration::new(
                tree_sitter_javascript::LANGUAGE.into(),
                "javascript",
                tree_sitter_javascript::HIGHLIGHT_QUERY,
                "",
                tree_sitter_javascript::LOCALS_QUERY,
            )?,
            LanguageTag::Css => HighlightConfiguration::new(
                tree_sitter_css::LANGUAGE.into(),
                "css",
                tree_sitter_css::HIGHLIGHTS_QUERY,
                "",
                "",
            )?,
            LanguageTag::Xml => HighlightConfiguration::new(
                tree_sitter_xml::LANGUAGE_XML.into(),
                "xml",
                tree_sitter_xml::XML_HIGHLIGHT_QUERY,
                "",
                "",
            )?,
            LanguageTag::Html | LanguageTag::Markup => HighlightConfiguration::new(
                tree_sitter_html::LANGUAGE.into(),
                language.as_str(),
                tree_sitter_html::HIGHLIGHTS_QUERY,
                tree_sitter_html::INJECTIONS_QUERY,
                "",
            )?,
        };
        config.configure(HIGHLIGHT_NAMES);
        Ok(config)
    }

    pub fn contains(&self, language: LanguageTag) -> bool {
        self.grammars.contains_key(&language)
    }

    /// Renders `content` as escaped markup with `<span class="...">` tokens.
    ///
    /// Never fails: a missing grammar or a highlighting error falls back to the
    /// `markup` grammar, and failing that to plain escaped text.
    pub fn highlight(&self, content: &str, language: LanguageTag) -> String {
        let mut highlighter = Highlighter::new();

        if language != LanguageTag::Markup {
            match self.grammars.get(&language) {
                Some(config) => match self.render(&mut highlighter, config, content) {
                    Ok(html) => return html,
                    Err(e) => {
                        log::warn!("Highlighting as {} failed, using markup: {}", language, e)
                    }
                },
                None => log::debug!("No grammar for {}, using markup", language),
            }
        }

        self.grammars
            .get(&LanguageTag::Markup)
            .and_then(|config| {
                self.render(&mut highlighter, config, content)
                    .map_err(|e| log::warn!("Markup highlighting failed: {}", e))
                    .ok()
            })
            .unwrap_or_else(|| escape_html(content))
    }

    fn render(
        &self,
        highlighter: &mut Highlighter,
        config: &HighlightConfiguration,
        code: &str,
    ) -> Result<String, tree_sitter_highlight::Error> {
        let events = highlighter.highlight(config, code.as_bytes(), None, |name| {
            LanguageTag::from_injection_name(name).and_then(|tag| self.grammars.get(&tag))
        })?;

        let mut html = String::with_capacity(code.len() * 2);
        for event in events {
            match event? {
                HighlightEvent::Source { start, end } => {
                    push_escaped(&mut html, &source_slice(code, start, end));
                }
                HighlightEvent::HighlightStart(highlight) => {
                    let class = self
                        .class_names
                        .get(highlight.0)
                        .map(String::as_str)
                        .unwrap_or_default();
                    html.push_str("<span class=\"");
                    html.push_str(class);
                    html.push_str("\">");
                }
                HighlightEvent::HighlightEnd => html.push_str("</span>"),
            }
        }

        Ok(html)
    }
}

fn source_slice(code: &str, start: usize, end: usize) -> Cow<'_, str> {
    match code.get(start..end) {
        Some(text) => Cow::Borrowed(text),
        None => String::from_utf8_lossy(&code.as_bytes()[start..end]),
    }
}
