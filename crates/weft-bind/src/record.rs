use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use weft_types::{ContractId, SlotId, ValueId};

/// Per-object binding record: contract-type name → [`ContractId`].
///
/// One record exists per object, created empty on first use and mutated
/// only when a contract id is allocated. It lives as long as the object's
/// persisted lifetime, which is what makes contract ids stable across
/// build sessions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectRecord {
    pub contracts: BTreeMap<String, ContractId>,
}

impl ObjectRecord {
    /// The contract id bound to the named contract type, if allocated.
    pub fn contract_id(&self, contract_name: &str) -> Option<ContractId> {
        self.contracts.get(contract_name).copied()
    }

    /// Number of contract bindings recorded.
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// Returns `true` if no contract has been bound yet.
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

/// Per-contract binding record: [`SlotId`] → [`ValueId`].
///
/// Same lifecycle pattern one layer down: created empty, mutated only when
/// a value id is allocated for a constructor slot.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub slots: BTreeMap<SlotId, ValueId>,
}

impl ContractRecord {
    /// The value id bound to a slot, if allocated.
    pub fn value_id(&self, slot: SlotId) -> Option<ValueId> {
        self.slots.get(&slot).copied()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_records() {
        assert!(ObjectRecord::default().is_empty());
        assert!(ContractRecord::default().is_empty());
    }

    #[test]
    fn object_record_lookup() {
        let mut record = ObjectRecord::default();
        let id = ContractId::from_ordinal(5);
        record.contracts.insert("game::Health".into(), id);
        assert_eq!(record.contract_id("game::Health"), Some(id));
        assert_eq!(record.contract_id("game::Mana"), None);
        assert_eq!(record.len(), 1);
    }

    #[test]
    fn contract_record_lookup() {
        let mut record = ContractRecord::default();
        let id = ValueId::from_ordinal(9);
        record.slots.insert(SlotId::new(0), id);
        assert_eq!(record.value_id(SlotId::new(0)), Some(id));
        assert_eq!(record.value_id(SlotId::new(1)), None);
    }

    #[test]
    fn records_roundtrip_through_json() {
        let mut record = ContractRecord::default();
        record.slots.insert(SlotId::new(0), ValueId::from_ordinal(1));
        record.slots.insert(SlotId::new(3), ValueId::from_ordinal(2));
        let json = serde_json::to_string(&record).unwrap();
        let parsed: ContractRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, record);
    }
}
