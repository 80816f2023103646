//! Foundation types for Weft.
//!
//! This crate provides the identifier, contract-key, and id-generation
//! primitives used throughout the Weft engine. Every other Weft crate
//! depends on `weft-types`.
//!
//! # Key Types
//!
//! - [`ObjectId`] -- identity of one composed entity
//! - [`ContractId`] -- identity of one (object, contract type) binding
//! - [`SlotId`] -- positional constructor parameter within a contract
//! - [`ValueId`] -- identity of one stored scalar
//! - [`ContractKey`] -- nominal identity of a contract type
//! - [`IdGenerator`] -- random and sequential id allocation strategies

pub mod contract;
pub mod error;
pub mod gen;
pub mod id;

pub use contract::{instance_ptr, ContractKey, Instance};
pub use error::TypeError;
pub use gen::{FromOrdinal, FromRaw, IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use id::{ContractId, ObjectId, SlotId, ValueId};
