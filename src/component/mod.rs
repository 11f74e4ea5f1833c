//! Registrable components.
//!
//! Components describe their environment requirements explicitly through
//! the metadata on their [`ComponentDescriptor`]. The [`ComponentRegistry`]
//! uses the environment matcher to decide which of them become active.

pub mod descriptor;
pub mod registry;

pub use descriptor::{ComponentDescriptor, Metadata};
pub use registry::{Activation, ComponentRegistry};
