//! Validate → fetch → classify → highlight → assemble.
//!
//! Validation happens while extracting [`SourceRequest`] from the query string;
//! [`run`] drives the remaining stages and short-circuits on the first failure.

pub mod classify;
pub mod fetch;
pub mod highlight;
pub mod validate;

use std::{
    panic::{self, AssertUnwindSafe},
    sync::Arc,
};

use crate::{
    env::state::AppState,
    models::{
        error::PipelineError,
        source::{FetchResult, RenderedSource, SourceRequest},
    },
    utils::escape::escape_html,
};

pub async fn run(
    state: &AppState,
    request: SourceRequest,
) -> Result<RenderedSource, PipelineError> {
    let FetchResult {
        raw_body,
        content_type,
        http_status,
    } = state.fetcher.fetch(&request.url).await?;

    let language = classify::classify(&request.url, &raw_body, content_type.as_deref());
    log::info!(
        "Rendering {} as {} (status {}, {} bytes)",
        request.url,
        language,
        http_status,
        raw_body.len()
    );

    let grammars = Arc::clone(&state.grammars);
    let (content, formatted_code) = tokio::task::spawn_blocking(move || {
        let highlighted =
            panic::catch_unwind(AssertUnwindSafe(|| grammars.highlight(&raw_body, language)));
        let formatted = highlighted.unwrap_or_else(|_| {
            log::error!("Highlighter panicked, returning escaped text");
            escape_html(&raw_body)
        });
        (raw_body, formatted)
    })
    .await
    .map_err(PipelineError::internal)?;

    Ok(RenderedSource::assemble(
        request,
        language,
        content,
        formatted_code,
        content_type,
    ))
}
