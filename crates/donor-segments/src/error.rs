use std::fmt;

#[derive(Debug)]
pub enum SegmentError {
    InvalidRule { id: String, reason: String },
    DuplicateRule(String),
    Parse(serde_json::Error),
}

impl fmt::Display for SegmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentError::InvalidRule { id, reason } => {
                write!(f, "invalid trigger rule {id:?}: {reason}")
            }
            SegmentError::DuplicateRule(id) => write!(f, "duplicate trigger rule: {id}"),
            SegmentError::Parse(e) => write!(f, "parse error: {e}"),
        }
    }
}

impl std::error::Error for SegmentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SegmentError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SegmentError {
    fn from(e: serde_json::Error) -> Self {
        SegmentError::Parse(e)
    }
}

impl SegmentError {
    pub(crate) fn invalid(id: &str, reason: impl Into<String>) -> Self {
        SegmentError::InvalidRule {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}
