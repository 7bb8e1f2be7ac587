use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("unknown rule id: {0}")]
    UnknownRule(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
