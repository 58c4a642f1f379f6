use std::fmt;

/// Failure of one fetch, already converted into a displayable value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadError {
    pub kind: LoadErrorKind,
    pub message: String,
}

impl LoadError {
    pub fn new(kind: LoadErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Whether the UI should offer a manual retry.
    pub fn is_retryable(&self) -> bool {
        match self.kind {
            LoadErrorKind::Network
            | LoadErrorKind::Timeout
            | LoadErrorKind::HttpStatus(_)
            | LoadErrorKind::MalformedResponse => true,
            LoadErrorKind::AuthExpired | LoadErrorKind::NotFound => false,
        }
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}", self.message)
        }
    }
}

impl std::error::Error for LoadError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// The request did not complete (DNS, connection, body read).
    Network,
    /// The request exceeded its deadline.
    Timeout,
    /// The server answered with a non-success status other than 401/404.
    HttpStatus(u16),
    /// The body matched none of the recognized response shapes.
    MalformedResponse,
    /// HTTP 401; handled by the process-wide auth handler.
    AuthExpired,
    /// A single-record fetch produced no valid record.
    NotFound,
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadErrorKind::Network => write!(f, "network error"),
            LoadErrorKind::Timeout => write!(f, "timeout"),
            LoadErrorKind::HttpStatus(code) => write!(f, "http status {code}"),
            LoadErrorKind::MalformedResponse => write!(f, "malformed response"),
            LoadErrorKind::AuthExpired => write!(f, "authentication expired"),
            LoadErrorKind::NotFound => write!(f, "record not found"),
        }
    }
}
