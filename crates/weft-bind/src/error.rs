use weft_types::ContractId;

use weft_store::StoreError;

/// Errors from binding and caching operations.
#[derive(Debug, thiserror::Error)]
pub enum BindError {
    /// A second implementation was registered for an already-cached
    /// contract id (or an already-cached instance). Programming error,
    /// not expected in normal flow.
    #[error("duplicate cache entry for {contract}")]
    DuplicateCacheEntry { contract: ContractId },

    /// A previously-allocated association was expected but not found.
    /// Indicates a corrupted or id-space-mismatched persisted store.
    #[error("missing association: {detail}")]
    MissingAssociation { detail: String },

    /// Failure in the underlying storage backend.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result alias for binding operations.
pub type BindResult<T> = Result<T, BindError>;
