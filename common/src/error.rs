use thiserror::Error;

use crate::asset::{AssetId, ScanId, TargetId};

/// Failures of the catalog backend itself.
///
/// These are infrastructure problems and are handed to the caller unchanged.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed catalog document: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("catalog backend failure: {0}")]
    Backend(String),
}

/// Errors surfaced by the asset-intelligence operations.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("{0} does not exist")]
    TargetNotFound(TargetId),
    #[error("{0} does not exist")]
    ScanNotFound(ScanId),
    #[error("subdomain {0} does not exist")]
    SubdomainNotFound(AssetId),
    #[error("{scan} does not belong to {target}")]
    ScanOutsideTarget { scan: ScanId, target: TargetId },
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl AssetError {
    /// True for every variant that means "the referenced record is not there".
    pub fn is_not_found(&self) -> bool {
        !matches!(self, AssetError::Catalog(_))
    }
}
