use reqwest::Url;

use crate::models::error::PipelineError;

/// Accepts absolute `http`/`https` URLs only.
///
/// The URL parser lowercases the scheme, so the check is exact equality against
/// the normalized scheme.
pub fn validate(input: &str) -> Result<Url, PipelineError> {
    let url = Url::parse(input.trim()).map_err(|_| PipelineError::invalid_url())?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(PipelineError::invalid_url()),
    }
}
