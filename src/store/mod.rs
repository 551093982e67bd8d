pub mod client;
pub mod download;
pub mod file_store;
pub mod schema;

use thiserror::Error;

pub use client::{HttpWordStore, WordStore};
pub use file_store::FileWordStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server returned {status}: {reason}")]
    Rejected { status: u16, reason: String },
    #[error("invalid word data: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("built without network support")]
    Offline,
}

impl StoreError {
    /// The backend-provided reason, if the backend answered at all.
    pub fn rejection_reason(&self) -> Option<&str> {
        match self {
            StoreError::Rejected { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

#[cfg(feature = "network")]
impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Transport(err.to_string())
    }
}
