use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::{error::Error as StdError, fmt};

use crate::{
    constants::source::{FETCH_FAILED_MESSAGE, INVALID_URL_MESSAGE, MISSING_URL_MESSAGE},
    pipeline::fetch::FetchError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingParameter,
    InvalidUrl,
    Upstream,
    Network,
    Internal,
}

#[derive(Debug, Clone)]
pub struct PipelineError {
    pub kind: ErrorKind,
    pub message: String,
    pub details: Option<String>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl PipelineError {
    pub fn missing_parameter() -> Self {
        Self {
            kind: ErrorKind::MissingParameter,
            message: MISSING_URL_MESSAGE.to_string(),
            details: None,
        }
    }

    pub fn invalid_url() -> Self {
        Self {
            kind: ErrorKind::InvalidUrl,
            message: INVALID_URL_MESSAGE.to_string(),
            details: None,
        }
    }

    pub fn internal(details: impl fmt::Display) -> Self {
        Self {
            kind: ErrorKind::Internal,
            message: "Failed to render source".to_string(),
            details: Some(details.to_string()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ErrorKind::MissingParameter | ErrorKind::InvalidUrl => StatusCode::BAD_REQUEST,
            ErrorKind::Upstream | ErrorKind::Network | ErrorKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<FetchError> for PipelineError {
    fn from(err: FetchError) -> Self {
        let kind = match err {
            FetchError::Status { .. } => ErrorKind::Upstream,
            _ => ErrorKind::Network,
        };

        Self {
            kind,
            message: format!("{}: {}", FETCH_FAILED_MESSAGE, err.summary()),
            details: Some(error_chain(&err)),
        }
    }
}

/// Joins an error with all of its sources, outermost first.
fn error_chain(err: &dyn StdError) -> String {
    let mut chain = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.details {
            Some(details) => write!(f, "{} ({})", self.message, details),
            None => f.write_str(&self.message),
        }
    }
}

impl StdError for PipelineError {}

impl IntoResponse for PipelineError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("Source request failed: {}", self);
        } else {
            log::warn!("Rejected source request: {}", self);
        }

        let body = ErrorBody {
            error: &self.message,
            details: self.details.as_deref(),
        };
        (status, Json(body)).into_response()
    }
}
