//! Entity assembly for Weft.
//!
//! An entity is built in one shot: the factory allocates (or accepts) an
//! object id, resolves every requested contract through the resolver
//! chain, and returns an immutable [`Entity`] exposing the resolved map.
//! Instance identity holds within one [`BuildSession`]; identifier
//! stability holds across sessions through the persisted binding records.
//!
//! # Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use weft_bind::ValueCell;
//! use weft_entity::Composer;
//! use weft_resolve::{Blueprint, ConstructorSpec, ContractDescriptor};
//! use weft_types::Instance;
//!
//! struct Health {
//!     points: Rc<ValueCell<i64>>,
//! }
//!
//! let factory = Composer::new()
//!     .cell::<i64>()
//!     .blueprint(Blueprint::new::<Health>().constructor(
//!         ConstructorSpec::new(|mut args| {
//!             let points: Rc<ValueCell<i64>> = args.take()?;
//!             Ok(Rc::new(Health { points }) as Instance)
//!         })
//!         .param::<ValueCell<i64>>(),
//!     ))
//!     .compose();
//!
//! let entity = factory
//!     .create(&[ContractDescriptor::new::<Health>()], None)
//!     .unwrap();
//! let health = entity.get::<Health>().unwrap();
//! health.points.set(100).unwrap();
//! assert_eq!(health.points.get().unwrap(), 100);
//! ```

pub mod composer;
pub mod entity;
pub mod error;
pub mod factory;

pub use composer::Composer;
pub use entity::Entity;
pub use error::{EntityError, EntityResult};
pub use factory::{BuildSession, EntityFactory};
