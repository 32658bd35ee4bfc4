use std::path::PathBuf;

use donor_segments::SegmentError;

#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid {name}: {value:?}")]
    Setting { name: &'static str, value: String },

    #[error("trigger rules: {0}")]
    Rules(#[from] SegmentError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}
