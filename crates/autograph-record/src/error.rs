use std::fmt;

/// Errors produced while decoding, validating, or storing a stroke record.
#[derive(Debug)]
pub enum RecordError {
    /// The payload is not a well-formed record.
    Json(serde_json::Error),
    /// Filesystem failure in a storage collaborator.
    Io(std::io::Error),
    /// A storage token was empty or contained characters outside `[A-Za-z0-9_-]`.
    InvalidToken(String),
    /// A submission carried zero strokes ("not signed").
    EmptyRecord,
    /// A stroke breaks a record invariant.
    Invalid {
        /// Index of the offending stroke in draw order.
        stroke: usize,
        reason: String,
    },
}

impl RecordError {
    pub(crate) fn invalid(stroke: usize, reason: impl Into<String>) -> Self {
        Self::Invalid { stroke, reason: reason.into() }
    }
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json(e) => write!(f, "malformed stroke record: {e}"),
            Self::Io(e) => write!(f, "stroke record i/o error: {e}"),
            Self::InvalidToken(t) => write!(f, "invalid record token {t:?}"),
            Self::EmptyRecord => write!(f, "stroke record is empty"),
            Self::Invalid { stroke, reason } => {
                write!(f, "invalid stroke at index {stroke}: {reason}")
            }
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json(e) => Some(e),
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

impl From<std::io::Error> for RecordError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
