use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::{
    models::{error::PipelineError, source::SourceRequest},
    pipeline::validate::validate,
};

#[derive(Deserialize)]
struct FetchSourceQuery {
    url: Option<String>,
}

#[async_trait]
impl<S> FromRequestParts<S> for SourceRequest
where
    S: Send + Sync,
{
    type Rejection = PipelineError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let requested = Query::<FetchSourceQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(query)| query.url)
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(PipelineError::missing_parameter)?;

        let url = validate(&requested)?;

        Ok(SourceRequest { url, requested })
    }
}
