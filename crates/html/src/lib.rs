#![deny(missing_docs)]
//! mdxr HTML host: static rendering, component registry, and markdown bridge.

/// Markdown to element tree conversion.
pub mod bridge;
/// Deployment address tables as page content.
pub mod deployments;
/// HTML serialization of element trees.
pub mod host;
/// Rendering options.
pub mod options;
/// Page and batch rendering entry points.
pub mod page;
/// Component registry for tag to component mappings.
pub mod registry;

pub use bridge::markdown_to_node;
pub use deployments::{ContentError, Deployments, NetworkDeployment, deployments_node};
pub use host::{HtmlRenderer, is_void_element};
pub use options::RenderOptions;
pub use page::{
    BatchInput, BatchOptions, BatchProcessingResult, BatchResult, BatchStats, render_batch,
    render_deployments_page, render_page,
};
pub use registry::{
    ComponentDefinition, RegistryComponent, RegistryConfig, RegistryError, default_docs_registry,
};
