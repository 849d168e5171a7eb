//! Component registry: serde-loadable tag to component mappings.

/// Default registry configurations.
pub mod defaults;
/// Registry type definitions.
pub mod types;

pub use defaults::default_docs_registry;
pub use types::{ComponentDefinition, RegistryComponent, RegistryConfig, RegistryError};
