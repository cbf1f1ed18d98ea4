pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; SourceViewer/1.0)";

pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Number of leading body characters inspected by the classifier.
pub const SNIFF_WINDOW_CHARS: usize = 200;

/// Reported as `contentType` when the upstream sent no `content-type` header.
pub const UNKNOWN_CONTENT_TYPE: &str = "unknown";

pub const MISSING_URL_MESSAGE: &str = "URL parameter is required";

pub const INVALID_URL_MESSAGE: &str = "Invalid URL format";

pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch URL";
