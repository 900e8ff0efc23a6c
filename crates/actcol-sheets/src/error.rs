use thiserror::Error;

/// Failures that abort an ingestion cycle. None of them yield partial data.
#[derive(Debug, Error)]
pub enum SheetsError {
    #[error("missing required environment variable: GOOGLE_SHEETS_PUBLISHED_URL")]
    MissingSourceUrl,

    #[error("invalid sheet URL \"{url}\": {reason}")]
    InvalidSourceUrl { url: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("sheet publish error: HTTP {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },
}
