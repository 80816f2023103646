use std::rc::Rc;

use weft_store::{LazyStorage, SharedStorage, Storage};
use weft_types::{ContractId, ContractKey, IdGenerator, ObjectId, SlotId, ValueId};

use crate::error::{BindError, BindResult};
use crate::record::{ContractRecord, ObjectRecord};

/// Allocate-or-lookup layer over the per-object binding records.
///
/// This is the only mutation path for [`ObjectRecord`]s: the first
/// resolution of an (object, contract type) pair allocates a
/// [`ContractId`] and writes it back; every later resolution -- in this
/// session or any later one against the same store -- reads the same id.
pub struct ObjectBindings {
    records: LazyStorage<ObjectId, ObjectRecord>,
    ids: Rc<dyn IdGenerator<ContractId>>,
}

impl ObjectBindings {
    pub fn new(
        store: SharedStorage<ObjectId, ObjectRecord>,
        ids: Rc<dyn IdGenerator<ContractId>>,
    ) -> Self {
        Self {
            records: LazyStorage::new(store, ObjectRecord::default),
            ids,
        }
    }

    /// The stable contract id for (object, contract type), allocating on
    /// first use.
    pub fn contract_id(&self, object: ObjectId, contract: &ContractKey) -> BindResult<ContractId> {
        self.contract_id_entry(object, contract).map(|(id, _)| id)
    }

    /// Like [`Self::contract_id`], also reporting whether the id was
    /// freshly allocated.
    pub fn contract_id_entry(
        &self,
        object: ObjectId,
        contract: &ContractKey,
    ) -> BindResult<(ContractId, bool)> {
        let mut record = self.records.read(&object)?;
        if let Some(id) = record.contract_id(contract.name()) {
            return Ok((id, false));
        }
        let id = self.ids.generate();
        record.contracts.insert(contract.name().to_string(), id);
        self.records.write(object, record)?;
        Ok((id, true))
    }

    /// Non-allocating lookup.
    pub fn lookup(
        &self,
        object: ObjectId,
        contract: &ContractKey,
    ) -> BindResult<Option<ContractId>> {
        if !self.records.contains(&object)? {
            return Ok(None);
        }
        Ok(self.records.read(&object)?.contract_id(contract.name()))
    }

    /// Lookup that treats absence as store corruption.
    pub fn existing_contract_id(
        &self,
        object: ObjectId,
        contract: &ContractKey,
    ) -> BindResult<ContractId> {
        self.lookup(object, contract)?
            .ok_or_else(|| BindError::MissingAssociation {
                detail: format!("no contract id for {} on {}", contract.name(), object),
            })
    }
}

/// Allocate-or-lookup layer over the per-contract binding records, mapping
/// constructor slots to stored values. Mirrors [`ObjectBindings`] one layer
/// down.
pub struct ContractBindings {
    records: LazyStorage<ContractId, ContractRecord>,
    ids: Rc<dyn IdGenerator<ValueId>>,
}

impl ContractBindings {
    pub fn new(
        store: SharedStorage<ContractId, ContractRecord>,
        ids: Rc<dyn IdGenerator<ValueId>>,
    ) -> Self {
        Self {
            records: LazyStorage::new(store, ContractRecord::default),
            ids,
        }
    }

    /// The stable value id for (contract, slot), allocating on first use.
    pub fn value_id(&self, contract: ContractId, slot: SlotId) -> BindResult<ValueId> {
        self.value_id_entry(contract, slot).map(|(id, _)| id)
    }

    /// Like [`Self::value_id`], also reporting whether the id was freshly
    /// allocated.
    pub fn value_id_entry(
        &self,
        contract: ContractId,
        slot: SlotId,
    ) -> BindResult<(ValueId, bool)> {
        let mut record = self.records.read(&contract)?;
        if let Some(id) = record.value_id(slot) {
            return Ok((id, false));
        }
        let id = self.ids.generate();
        record.slots.insert(slot, id);
        self.records.write(contract, record)?;
        Ok((id, true))
    }

    /// Non-allocating lookup.
    pub fn lookup(&self, contract: ContractId, slot: SlotId) -> BindResult<Option<ValueId>> {
        if !self.records.contains(&contract)? {
            return Ok(None);
        }
        Ok(self.records.read(&contract)?.value_id(slot))
    }

    /// Lookup that treats absence as store corruption.
    pub fn existing_value_id(&self, contract: ContractId, slot: SlotId) -> BindResult<ValueId> {
        self.lookup(contract, slot)?
            .ok_or_else(|| BindError::MissingAssociation {
                detail: format!("no value id for {slot} under {contract}"),
            })
    }
}
