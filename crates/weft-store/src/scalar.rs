use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use weft_types::ValueId;

use crate::error::{StoreError, StoreResult};
use crate::traits::{SharedStorage, Storage};

/// One stored scalar.
///
/// The value slots of the engine's stores are heterogeneous, so scalars are
/// carried as a tagged union rather than boxed values with runtime casts.
/// The serde tagging makes the persisted form self-describing: a snapshot
/// entry reads back as the kind it was written with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ScalarValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Bytes(Vec<u8>),
    /// A plain aggregate record, encoded with its type name so decodes can
    /// reject snapshots written by a different record type.
    Record {
        type_name: String,
        value: serde_json::Value,
    },
}

impl ScalarValue {
    /// The kind tag, for diagnostics and mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Record { .. } => "record",
        }
    }

    /// Encode a plain aggregate record.
    pub fn record<T: Serialize>(value: &T) -> StoreResult<Self> {
        Ok(Self::Record {
            type_name: std::any::type_name::<T>().to_string(),
            value: serde_json::to_value(value)
                .map_err(|e| StoreError::Serialization(e.to_string()))?,
        })
    }

    /// Decode a record scalar back into `T`, checking the recorded type name.
    pub fn decode_record<T: DeserializeOwned>(&self) -> StoreResult<T> {
        match self {
            Self::Record { type_name, value } => {
                let expected = std::any::type_name::<T>();
                if type_name != expected {
                    return Err(StoreError::KindMismatch {
                        expected: expected.to_string(),
                        found: type_name.clone(),
                    });
                }
                serde_json::from_value(value.clone())
                    .map_err(|e| StoreError::Serialization(e.to_string()))
            }
            other => Err(StoreError::KindMismatch {
                expected: "record".to_string(),
                found: other.kind().to_string(),
            }),
        }
    }

    fn mismatch(expected: &'static str, found: &Self) -> StoreError {
        StoreError::KindMismatch {
            expected: expected.to_string(),
            found: found.kind().to_string(),
        }
    }
}

/// Conversion between a concrete value type and [`ScalarValue`].
///
/// Primitive kinds are provided here; record types implement the trait via
/// [`ScalarValue::record`] / [`ScalarValue::decode_record`].
pub trait ScalarRepr: Sized + 'static {
    fn into_scalar(self) -> ScalarValue;
    fn from_scalar(value: ScalarValue) -> StoreResult<Self>;
}

impl ScalarRepr for i64 {
    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Int(self)
    }

    fn from_scalar(value: ScalarValue) -> StoreResult<Self> {
        match value {
            ScalarValue::Int(n) => Ok(n),
            other => Err(ScalarValue::mismatch("int", &other)),
        }
    }
}

impl ScalarRepr for f64 {
    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Float(self)
    }

    fn from_scalar(value: ScalarValue) -> StoreResult<Self> {
        match value {
            ScalarValue::Float(n) => Ok(n),
            other => Err(ScalarValue::mismatch("float", &other)),
        }
    }
}

impl ScalarRepr for bool {
    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Bool(self)
    }

    fn from_scalar(value: ScalarValue) -> StoreResult<Self> {
        match value {
            ScalarValue::Bool(b) => Ok(b),
            other => Err(ScalarValue::mismatch("bool", &other)),
        }
    }
}

impl ScalarRepr for String {
    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Text(self)
    }

    fn from_scalar(value: ScalarValue) -> StoreResult<Self> {
        match value {
            ScalarValue::Text(s) => Ok(s),
            other => Err(ScalarValue::mismatch("text", &other)),
        }
    }
}

impl ScalarRepr for Vec<u8> {
    fn into_scalar(self) -> ScalarValue {
        ScalarValue::Bytes(self)
    }

    fn from_scalar(value: ScalarValue) -> StoreResult<Self> {
        match value {
            ScalarValue::Bytes(b) => Ok(b),
            other => Err(ScalarValue::mismatch("bytes", &other)),
        }
    }
}

/// The store shape the engine reads and writes scalars through: one scalar
/// per [`ValueId`].
pub type ScalarStorage = dyn Storage<ValueId, ScalarValue>;

/// Shared handle to a scalar store. This is also the contract type under
/// which physical stores are registered for resolution.
pub type SharedScalarStore = SharedStorage<ValueId, ScalarValue>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
    struct SpawnPoint {
        x: i64,
        y: i64,
        label: String,
    }

    #[test]
    fn primitive_roundtrips() {
        assert_eq!(i64::from_scalar(42i64.into_scalar()).unwrap(), 42);
        assert_eq!(bool::from_scalar(true.into_scalar()).unwrap(), true);
        assert_eq!(
            String::from_scalar("hi".to_string().into_scalar()).unwrap(),
            "hi"
        );
        assert_eq!(
            Vec::<u8>::from_scalar(vec![1, 2, 3].into_scalar()).unwrap(),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn float_roundtrip() {
        let v = 1.5f64.into_scalar();
        assert_eq!(f64::from_scalar(v).unwrap(), 1.5);
    }

    #[test]
    fn kind_mismatch_reports_both_sides() {
        let err = i64::from_scalar(ScalarValue::Text("no".into())).unwrap_err();
        match err {
            StoreError::KindMismatch { expected, found } => {
                assert_eq!(expected, "int");
                assert_eq!(found, "text");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn record_roundtrip() {
        let point = SpawnPoint {
            x: 3,
            y: -1,
            label: "start".into(),
        };
        let scalar = ScalarValue::record(&point).unwrap();
        assert_eq!(scalar.kind(), "record");
        let decoded: SpawnPoint = scalar.decode_record().unwrap();
        assert_eq!(decoded, point);
    }

    #[test]
    fn record_decode_rejects_wrong_type() {
        #[derive(Serialize, Deserialize)]
        struct Other {
            x: i64,
        }
        let scalar = ScalarValue::record(&SpawnPoint {
            x: 0,
            y: 0,
            label: String::new(),
        })
        .unwrap();
        assert!(matches!(
            scalar.decode_record::<Other>(),
            Err(StoreError::KindMismatch { .. })
        ));
    }

    #[test]
    fn record_decode_rejects_non_record() {
        assert!(matches!(
            ScalarValue::Int(1).decode_record::<SpawnPoint>(),
            Err(StoreError::KindMismatch { .. })
        ));
    }

    #[test]
    fn serde_form_is_tagged() {
        let json = serde_json::to_value(ScalarValue::Int(7)).unwrap();
        assert_eq!(json["kind"], "int");
        assert_eq!(json["value"], 7);
    }
}
