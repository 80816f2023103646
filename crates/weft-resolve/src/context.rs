use std::rc::Rc;

use weft_bind::SessionCache;
use weft_types::{ContractId, ObjectId, SlotId};

/// Call-site marker metadata carried into a resolution.
///
/// `location` names the physical store a value cell should bind to;
/// `key` disambiguates between multiple container registrations of the
/// same contract type. Both come from the blueprint parameter that spawned
/// the sub-resolution; root resolutions carry neither.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteMetadata {
    pub location: Option<String>,
    pub key: Option<String>,
}

impl SiteMetadata {
    /// No markers.
    pub fn none() -> Self {
        Self::default()
    }

    /// A storage-location marker.
    pub fn at_location(location: impl Into<String>) -> Self {
        Self {
            location: Some(location.into()),
            key: None,
        }
    }

    /// A container resolution key.
    pub fn keyed(key: impl Into<String>) -> Self {
        Self {
            location: None,
            key: Some(key.into()),
        }
    }
}

/// The ambient scope of one resolution.
///
/// A `Scope` is an explicit value threaded through every recursive call:
/// the object being built, the contract binding and slot currently in
/// flight (if any), the call-site metadata, and the session cache. Child
/// scopes are derived, never mutated in place; the cache is the only
/// shared state and carries its own interior mutability.
#[derive(Clone)]
pub struct Scope {
    object: ObjectId,
    contract: Option<ContractId>,
    slot: Option<SlotId>,
    site: SiteMetadata,
    cache: Rc<SessionCache>,
}

impl Scope {
    /// The scope a build starts from: just the object and the session cache.
    pub fn root(object: ObjectId, cache: Rc<SessionCache>) -> Self {
        Self {
            object,
            contract: None,
            slot: None,
            site: SiteMetadata::none(),
            cache,
        }
    }

    /// Child scope for resolving one constructor parameter.
    pub fn for_slot(&self, contract: ContractId, slot: SlotId, site: SiteMetadata) -> Self {
        Self {
            object: self.object,
            contract: Some(contract),
            slot: Some(slot),
            site,
            cache: self.cache.clone(),
        }
    }

    /// Child scope for resolving a supporting dependency (e.g. a physical
    /// store) under a container key. Keeps the current binding in scope but
    /// replaces the site metadata.
    pub fn for_lookup(&self, key: Option<String>) -> Self {
        Self {
            object: self.object,
            contract: self.contract,
            slot: self.slot,
            site: SiteMetadata {
                location: None,
                key,
            },
            cache: self.cache.clone(),
        }
    }

    /// The object this build is for.
    pub fn object(&self) -> ObjectId {
        self.object
    }

    /// The contract binding currently being constructed, if any.
    pub fn contract(&self) -> Option<ContractId> {
        self.contract
    }

    /// The constructor slot currently being resolved, if any.
    pub fn slot(&self) -> Option<SlotId> {
        self.slot
    }

    /// Call-site metadata for this resolution.
    pub fn site(&self) -> &SiteMetadata {
        &self.site
    }

    /// The session cache shared by every scope of this build session.
    pub fn cache(&self) -> &SessionCache {
        &self.cache
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope")
            .field("object", &self.object)
            .field("contract", &self.contract)
            .field("slot", &self.slot)
            .field("site", &self.site)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_scope_carries_no_binding() {
        let scope = Scope::root(ObjectId::from_ordinal(1), Rc::new(SessionCache::new()));
        assert!(scope.contract().is_none());
        assert!(scope.slot().is_none());
        assert_eq!(scope.site(), &SiteMetadata::none());
    }

    #[test]
    fn slot_scope_carries_binding_and_site() {
        let scope = Scope::root(ObjectId::from_ordinal(1), Rc::new(SessionCache::new()));
        let child = scope.for_slot(
            ContractId::from_ordinal(4),
            SlotId::new(2),
            SiteMetadata::at_location("archive"),
        );
        assert_eq!(child.object(), scope.object());
        assert_eq!(child.contract(), Some(ContractId::from_ordinal(4)));
        assert_eq!(child.slot(), Some(SlotId::new(2)));
        assert_eq!(child.site().location.as_deref(), Some("archive"));
    }

    #[test]
    fn lookup_scope_replaces_site() {
        let scope = Scope::root(ObjectId::from_ordinal(1), Rc::new(SessionCache::new()));
        let slotted = scope.for_slot(
            ContractId::from_ordinal(4),
            SlotId::new(0),
            SiteMetadata::at_location("archive"),
        );
        let lookup = slotted.for_lookup(Some("archive".into()));
        assert_eq!(lookup.site().key.as_deref(), Some("archive"));
        assert!(lookup.site().location.is_none());
        // The binding stays in scope.
        assert_eq!(lookup.contract(), slotted.contract());
    }

    #[test]
    fn scopes_share_one_cache() {
        let cache = Rc::new(SessionCache::new());
        let scope = Scope::root(ObjectId::from_ordinal(1), cache.clone());
        let child = scope.for_slot(
            ContractId::from_ordinal(1),
            SlotId::new(0),
            SiteMetadata::none(),
        );
        cache
            .add(ContractId::from_ordinal(9), Rc::new(1u32))
            .unwrap();
        assert!(child.cache().contains_id(&ContractId::from_ordinal(9)));
    }
}
