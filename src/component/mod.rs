//! Component registry for front-end JavaScript bootstrapping
//!
//! Templates register UI components and service calls while a page renders;
//! a bootstrap script at the end of the page picks up the accumulated lists
//! and starts the matching JavaScript components.

pub mod registry;

pub use registry::{ComponentDescriptor, ComponentRegistry, ServiceCall};
