use thiserror::Error;

/// Why a location could not be constructed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidLocation {
    #[error("location name cannot be empty")]
    EmptyName,
    #[error("latitude must be between -90 and 90, got {0}")]
    InvalidLatitude(f64),
    #[error("longitude must be between -180 and 180, got {0}")]
    InvalidLongitude(f64),
}

#[derive(Error, Debug)]
pub enum LocationStoreError {
    #[error(transparent)]
    InvalidLocation(#[from] InvalidLocation),
    #[error("location `{0}` already exists")]
    AlreadyExists(String),
    #[error("location not found: {0}")]
    NotFound(String),
    #[error("location backend is unavailable")]
    BackendUnavailable(#[source] anyhow::Error),
    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl LocationStoreError {
    pub fn empty_store() -> Self {
        LocationStoreError::NotFound("no locations have been stored".to_string())
    }
}
