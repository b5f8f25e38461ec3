//! Kernel crate for FOLIO: settings, the module contract, and the registry
//! that drives module lifecycle during bootstrap.

pub mod module;
pub mod registry;
pub mod settings;

pub use module::{InitCtx, Module};
pub use registry::ModuleRegistry;
