use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),
    #[error("Failed to write preference: {0}")]
    StorageWrite(String),
    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("Video playlist is empty")]
    EmptyPlaylist,
    #[error("Video playback rejected: {0}")]
    Playback(String),
}

pub type Result<T> = std::result::Result<T, SiteError>;
