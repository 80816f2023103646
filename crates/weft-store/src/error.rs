/// Errors from storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The requested key has no value.
    #[error("no value stored for key {key}")]
    Missing { key: String },

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A scalar held a different kind than the typed view expected.
    #[error("scalar kind mismatch: expected {expected}, found {found}")]
    KindMismatch { expected: String, found: String },

    /// A persisted envelope declares a different value type than the store
    /// reading it. Indicates the snapshot belongs to another store.
    #[error("declared type mismatch for key {key}: snapshot says {declared}, store expects {expected}")]
    DeclaredTypeMismatch {
        key: String,
        declared: String,
        expected: String,
    },
}

impl StoreError {
    /// Missing-key error from any debuggable key.
    pub fn missing(key: &impl std::fmt::Debug) -> Self {
        Self::Missing {
            key: format!("{key:?}"),
        }
    }
}

/// Result alias for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
