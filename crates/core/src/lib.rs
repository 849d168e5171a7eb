#![deny(missing_docs)]
//! mdxr core: component context, tag resolution, and element descriptions.

/// Component context and the scoped context store.
pub mod context;
/// Element descriptions and the element factory.
pub mod element;
/// Core error types.
pub mod error;
/// Props bag and prop values.
pub mod props;
/// Renderer references and the component trait.
pub mod renderer;
/// Tag to renderer resolution.
pub mod resolver;

pub use context::{ComponentContext, ContextStore, Provider};
pub use element::{
    Element, ElementFactory, MDX_TYPE_PROP, Node, ORIGINAL_TYPE_PROP, Origin, RenderRequest,
    is_reserved_prop,
};
pub use error::{RenderError, SourceLocation};
pub use props::{PropValue, Props};
pub use renderer::{Component, FnComponent, Renderer, component_fn};
pub use resolver::{Resolution, ResolvedFrom, fallback, resolve, resolve_in, scoped_key};
