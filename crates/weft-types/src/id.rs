use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TypeError;

fn parse_hex_uuid(s: &str, prefix: &str) -> Result<Uuid, TypeError> {
    let s = s.strip_prefix(prefix).unwrap_or(s);
    let bytes = hex::decode(s).map_err(|e| TypeError::InvalidHex(e.to_string()))?;
    if bytes.len() != 16 {
        return Err(TypeError::InvalidLength {
            expected: 16,
            actual: bytes.len(),
        });
    }
    let mut arr = [0u8; 16];
    arr.copy_from_slice(&bytes);
    Ok(Uuid::from_bytes(arr))
}

/// Identifier of one composed entity.
///
/// An `ObjectId` is assigned when an entity is first built and never changes
/// afterwards. All contract and value bindings of the entity hang off this
/// identifier in the persisted records.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(Uuid);

impl ObjectId {
    /// Wrap an existing uuid.
    pub const fn new(raw: Uuid) -> Self {
        Self(raw)
    }

    /// Mint a fresh random id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Build an id from a sequential ordinal (low bits of the uuid).
    pub fn from_ordinal(n: u64) -> Self {
        Self(Uuid::from_u128(n as u128))
    }

    /// The nil id (all zeros). Represents "no object".
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Returns `true` if this is the nil id.
    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    /// The underlying uuid.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Full hex-encoded string (32 hex characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.as_bytes())
    }

    /// Short identifier (first 8 hex characters).
    pub fn short_id(&self) -> String {
        format!("obj:{}", hex::encode(&self.0.as_bytes()[..4]))
    }

    /// Parse from a hex string (32 hex characters, optional `obj:` prefix).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        parse_hex_uuid(s, "obj:").map(Self)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.short_id())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}

/// Identifier of one (object, contract type) binding.
///
/// Allocated lazily the first time that pair is resolved and recorded in the
/// object's binding record, so repeated resolutions against the same
/// persisted record always see the same id.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContractId(Uuid);

impl ContractId {
    pub const fn new(raw: Uuid) -> Self {
        Self(raw)
    }

    /// Mint a fresh random id.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Build an id from a sequential ordinal.
    pub fn from_ordinal(n: u64) -> Self {
        Self(Uuid::from_u128(n as u128))
    }

    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0.as_bytes())
    }

    /// Short identifier (first 8 hex characters).
    pub fn short_id(&self) -> String {
        format!("con:{}", hex::encode(&self.0.as_bytes()[..4]))
    }

    /// Parse from a hex string (optional `con:` prefix).
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        parse_hex_uuid(s, "con:").map(Self)
    }
}

impl fmt::Debug for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContractId({})", self.short_id())
    }
}

impl fmt::Display for ContractId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}

/// Identifier of one stored scalar.
///
/// Allocated lazily on first resolution of a (ContractId, SlotId) pair and
/// recorded in the contract's binding record.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ValueId(Uuid);

impl ValueId {
    pub const fn new(raw: Uuid) -> Self {
        Self(raw)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_ordinal(n: u64) -> Self {
        Self(Uuid::from_u128(n as u128))
    }

    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn is_nil(&self) -> bool {
        self.0.is_nil()
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0.as_bytes())
    }

    pub fn short_id(&self) -> String {
        format!("val:{}", hex::encode(&self.0.as_bytes()[..4]))
    }

    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        parse_hex_uuid(s, "val:").map(Self)
    }
}

impl fmt::Debug for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ValueId({})", self.short_id())
    }
}

impl fmt::Display for ValueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_id())
    }
}

/// Positional constructor parameter within a contract's implementation.
///
/// Slot ids are ordinals, scoped to the contract binding they belong to;
/// two different contracts may both have a `slot:0`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotId(u32);

impl SlotId {
    pub const fn new(index: u32) -> Self {
        Self(index)
    }

    /// The zero-based parameter position.
    pub fn index(&self) -> u32 {
        self.0
    }
}

impl fmt::Debug for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SlotId({})", self.0)
    }
}

impl fmt::Display for SlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slot:{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn random_ids_are_unique() {
        let a = ObjectId::random();
        let b = ObjectId::random();
        assert_ne!(a, b);
    }

    #[test]
    fn nil_is_nil() {
        assert!(ObjectId::nil().is_nil());
        assert!(!ObjectId::random().is_nil());
    }

    #[test]
    fn from_ordinal_is_deterministic() {
        assert_eq!(ContractId::from_ordinal(7), ContractId::from_ordinal(7));
        assert_ne!(ContractId::from_ordinal(7), ContractId::from_ordinal(8));
    }

    #[test]
    fn short_id_format() {
        let id = ObjectId::from_ordinal(1);
        let short = id.short_id();
        assert!(short.starts_with("obj:"));
        assert_eq!(short.len(), 12); // "obj:" + 8 hex chars
    }

    #[test]
    fn hex_roundtrip() {
        let id = ValueId::random();
        let parsed = ValueId::from_hex(&id.to_hex()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn hex_roundtrip_with_prefix() {
        let id = ContractId::random();
        let prefixed = format!("con:{}", id.to_hex());
        assert_eq!(ContractId::from_hex(&prefixed).unwrap(), id);
    }

    #[test]
    fn from_hex_rejects_bad_input() {
        assert!(matches!(
            ObjectId::from_hex("zz"),
            Err(crate::TypeError::InvalidHex(_))
        ));
        assert!(matches!(
            ObjectId::from_hex("abcd"),
            Err(crate::TypeError::InvalidLength { expected: 16, .. })
        ));
    }

    #[test]
    fn serde_roundtrip() {
        let id = ObjectId::random();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: ObjectId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn slot_id_display() {
        assert_eq!(SlotId::new(3).to_string(), "slot:3");
        assert_eq!(SlotId::new(3).index(), 3);
    }

    #[test]
    fn slot_ids_order_by_index() {
        assert!(SlotId::new(0) < SlotId::new(1));
    }

    proptest! {
        #[test]
        fn ordinal_ids_roundtrip_through_hex(n in 0u64..) {
            let id = ValueId::from_ordinal(n);
            prop_assert_eq!(ValueId::from_hex(&id.to_hex()).unwrap(), id);
        }

        #[test]
        fn distinct_ordinals_are_distinct_ids(a in 0u64.., b in 0u64..) {
            prop_assume!(a != b);
            prop_assert_ne!(ObjectId::from_ordinal(a), ObjectId::from_ordinal(b));
        }
    }
}
