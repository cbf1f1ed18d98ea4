use reqwest::Url;
use serde::Serialize;

use crate::{constants::source::UNKNOWN_CONTENT_TYPE, models::language::LanguageTag};

/// A validated `/api/fetch-source` call.
#[derive(Debug, Clone)]
pub struct SourceRequest {
    pub url: Url,
    /// The `url` parameter as the caller sent it (trimmed), echoed back in the response.
    pub requested: String,
}

/// Body and headers of a 2xx upstream response.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub raw_body: String,
    pub content_type: Option<String>,
    pub http_status: u16,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderedSource {
    pub url: String,
    pub language: LanguageTag,
    pub content: String,
    pub formatted_code: String,
    pub size: usize,
    pub content_type: String,
}

impl RenderedSource {
    pub fn assemble(
        request: SourceRequest,
        language: LanguageTag,
        content: String,
        formatted_code: String,
        content_type: Option<String>,
    ) -> Self {
        Self {
            url: request.requested,
            language,
            size: content.len(),
            content,
            formatted_code,
            content_type: content_type.unwrap_or_else(|| UNKNOWN_CONTENT_TYPE.to_string()),
        }
    }
}
