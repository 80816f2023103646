//! Binding records, the session cache, and value cells.
//!
//! This crate carries the id-indirection layer of the Weft engine:
//!
//! - [`ObjectRecord`] / [`ObjectBindings`] -- contract-type → contract id
//!   per object, the mapping that keeps contract ids stable across build
//!   sessions.
//! - [`ContractRecord`] / [`ContractBindings`] -- slot → value id per
//!   contract binding.
//! - [`SessionCache`] -- the session-scoped bidirectional
//!   ContractId ↔ instance map that preserves instance identity within one
//!   build session.
//! - [`ValueCell`] -- the get/set proxy over one stored scalar.
//!
//! Records are plain serde values and persist through any `weft-store`
//! backend; the cache is never persisted.

pub mod bindings;
pub mod cache;
pub mod cell;
pub mod error;
pub mod record;

pub use bindings::{ContractBindings, ObjectBindings};
pub use cache::SessionCache;
pub use cell::ValueCell;
pub use error::{BindError, BindResult};
pub use record::{ContractRecord, ObjectRecord};
