use std::path::PathBuf;
use thiserror::Error;

/// Failures of the artwork pipeline. None of them are fatal to the display loop.
#[derive(Debug, Error)]
pub enum ArtworkError {
    #[error("current track has no artwork source")]
    MissingSource,

    #[error("failed to fetch artwork from {source_id}: {reason}")]
    Fetch { source_id: String, reason: String },

    #[error("failed to decode artwork: {0}")]
    Decode(#[source] image::ImageError),

    #[error("failed to transform artwork: {0}")]
    Transform(String),

    #[error("failed to persist artwork at {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode artwork at {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl ArtworkError {
    pub fn fetch(source_id: &str, reason: impl ToString) -> Self {
        Self::Fetch {
            source_id: source_id.to_string(),
            reason: reason.to_string(),
        }
    }

    pub fn persist(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persist {
            path: path.into(),
            source,
        }
    }
}
