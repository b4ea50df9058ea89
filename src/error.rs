//! Error type shared by the identity scheme, the record store and the
//! scenario builder.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Malformed fixture: {message}")]
    MalformedFixture { message: String },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Dangling reference: {kind} references missing {target}")]
    DanglingReference { kind: &'static str, target: String },
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        Self::MalformedFixture {
            message: e.to_string(),
        }
    }
}
