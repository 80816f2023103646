//! The built-in resolver nodes, one per resolution source.
//!
//! Default chain order: construct → container → descriptor → value.

pub mod construct;
pub mod container;
pub mod descriptor;
pub mod value;

pub use construct::ConstructResolver;
pub use container::ContainerResolver;
pub use descriptor::DescriptorResolver;
pub use value::ValueResolver;
