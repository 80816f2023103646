use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Persisted form of one stored value.
///
/// Snapshot documents are flat maps from encoded key to this envelope. The
/// declared type name makes a snapshot self-describing: loading it into a
/// store of the wrong value type is detected instead of producing garbage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ValueEnvelope {
    /// Type name of the value as declared by the store that wrote it.
    pub declared: String,
    /// The encoded value.
    pub value: serde_json::Value,
}

impl ValueEnvelope {
    /// Wrap a value for persistence.
    pub fn encode<V: Serialize>(value: &V) -> StoreResult<Self> {
        Ok(Self {
            declared: std::any::type_name::<V>().to_string(),
            value: serde_json::to_value(value)
                .map_err(|e| StoreError::Serialization(e.to_string()))?,
        })
    }

    /// Unwrap a value, verifying the declared type name.
    ///
    /// `key` is only used to name the offending entry in errors.
    pub fn decode<V: DeserializeOwned>(&self, key: &str) -> StoreResult<V> {
        let expected = std::any::type_name::<V>();
        if self.declared != expected {
            return Err(StoreError::DeclaredTypeMismatch {
                key: key.to_string(),
                declared: self.declared.clone(),
                expected: expected.to_string(),
            });
        }
        serde_json::from_value(self.value.clone())
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }
}
