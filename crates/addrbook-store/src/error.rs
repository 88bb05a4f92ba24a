use addrbook_core::CoreError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite error: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid data path: {0}")]
    InvalidDataPath(PathBuf),
    #[error("migration error: {0}")]
    Migration(String),
    #[error("unsupported data version: {0}")]
    UnsupportedVersion(i64),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Io,
    Sql,
    Json,
    Core,
    MissingHomeDir,
    InvalidDataPath,
    Migration,
    UnsupportedVersion,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Io(_) => StoreErrorKind::Io,
            StoreError::Sql(_) => StoreErrorKind::Sql,
            StoreError::Json(_) => StoreErrorKind::Json,
            StoreError::Core(_) => StoreErrorKind::Core,
            StoreError::MissingHomeDir => StoreErrorKind::MissingHomeDir,
            StoreError::InvalidDataPath(_) => StoreErrorKind::InvalidDataPath,
            StoreError::Migration(_) => StoreErrorKind::Migration,
            StoreError::UnsupportedVersion(_) => StoreErrorKind::UnsupportedVersion,
        }
    }
}
