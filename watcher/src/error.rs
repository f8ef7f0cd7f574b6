use thiserror::Error;

/// Everything that can go wrong inside one poll cycle.
///
/// None of these stop the watcher: the loop reports them to the operator and
/// retries from the same cursor on the next cycle.
#[derive(Debug, Error)]
pub enum WatchError {
    #[error("status endpoint unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("status endpoint returned HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("response body is not valid JSON: {0}")]
    PayloadFormat(String),

    #[error("response is not a JSON object")]
    Shape,

    #[error("homework entry #{index} is not a JSON object")]
    EntryShape { index: usize },

    #[error("response field `{field}` is missing or not a list")]
    MissingField { field: &'static str },

    #[error("response field `{field}` is missing or not an integer")]
    MissingCursor { field: &'static str },

    #[error("homework entry has no name")]
    MissingName,

    #[error("unknown homework status `{status}`")]
    UnknownStatus { status: String },

    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

impl WatchError {
    /// Stable label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            WatchError::Transport(_) => "transport",
            WatchError::HttpStatus { .. } => "http_status",
            WatchError::PayloadFormat(_) => "payload_format",
            WatchError::Shape | WatchError::EntryShape { .. } => "shape",
            WatchError::MissingField { .. } => "missing_field",
            WatchError::MissingCursor { .. } => "missing_cursor",
            WatchError::MissingName => "missing_name",
            WatchError::UnknownStatus { .. } => "unknown_status",
            WatchError::Unexpected(_) => "unexpected",
        }
    }
}
